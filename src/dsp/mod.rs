//! Sample processing applied after decoding.
//!
//! - [`normalize`]: peak normalization across channels
//! - [`preview`]: point-sampled previews for waveform display

pub mod normalize;
pub mod preview;

// Re-export commonly used items
pub use normalize::{normalize_peak, peak, DEFAULT_TARGET_PEAK, SILENCE_THRESHOLD};
pub use preview::{build_preview, preview_source, DEFAULT_PREVIEW_SAMPLES};
