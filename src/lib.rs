//! ir-embed: bakes impulse-response audio files into static C++ arrays.
//!
//! A run reads every `.wav` / `.wv` file in a directory, decodes it,
//! peak-normalizes it, builds a short waveform preview, and writes a header
//! and definition file that the host program compiles in. The host then needs
//! no file I/O or parsing to use the IRs.
//!
//! # Modules
//!
//! - [`audio`]: Decoding (native WAV, external WavPack tools)
//! - [`dsp`]: Peak normalization and preview downsampling
//! - [`codegen`]: C++ source emission
//! - [`pipeline`]: Input discovery and the end-to-end run
//! - [`types`]: Core data types (IrItem)
//! - [`config`]: Run configuration (BakeConfig, Layout)
//! - [`error`]: Error types and codes (BakeError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use ir_embed::{audio::ToolLocator, pipeline, BakeConfig};
//!
//! let config = BakeConfig {
//!     input_dir: "assets/ir_src".into(),
//!     ..Default::default()
//! };
//! let summary = pipeline::run(&config, &ToolLocator::from_env())?;
//! println!("embedded {} IRs", summary.items);
//! ```

pub mod audio;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod dsp;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::{BakeConfig, Layout};
pub use error::{BakeError, ErrorCode, Result};
pub use types::IrItem;
