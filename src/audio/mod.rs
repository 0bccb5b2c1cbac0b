//! Audio input module.
//!
//! Decodes impulse-response files into de-interleaved f32 channels. WAV is
//! parsed natively with hound; WavPack goes through an external tool first.

pub mod decoder;
pub mod external;
pub mod wav;

// Re-export commonly used items
pub use decoder::{decode, DecodedAudio, InputFormat};
pub use external::{DecodeTool, ToolLocator, DECODE_TOOLS};
pub use wav::read_wav;
