//! Format dispatch for IR inputs.

use std::path::Path;

use crate::error::{BakeError, Result};

use super::external::{decode_external, ToolLocator};
use super::wav::read_wav;

/// Decoded audio, split per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// 1 (mono) or 2 (stereo).
    pub channels: u16,
    /// Mono samples, or the left channel of a stereo file.
    pub left: Vec<f32>,
    /// Right channel; `Some` iff `channels == 2`.
    pub right: Option<Vec<f32>>,
}

impl DecodedAudio {
    /// Returns true for two-channel audio.
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Number of frames, taken from the left channel.
    pub fn frame_count(&self) -> usize {
        self.left.len()
    }
}

/// Container formats recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Uncompressed RIFF/WAVE, parsed natively.
    Wav,
    /// WavPack, decoded by an external tool.
    WavPack,
}

impl InputFormat {
    /// Extensions accepted as input, lowercase.
    pub const EXTENSIONS: [&'static str; 2] = ["wav", "wv"];

    /// Detects the format from the path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "wav" => Some(InputFormat::Wav),
            "wv" => Some(InputFormat::WavPack),
            _ => None,
        }
    }
}

/// Decodes `path` into per-channel samples in [-1, 1].
///
/// `locator` is only consulted for formats that need an external decoder.
pub fn decode(path: &Path, locator: &ToolLocator) -> Result<DecodedAudio> {
    match InputFormat::from_path(path) {
        Some(InputFormat::Wav) => read_wav(path),
        Some(InputFormat::WavPack) => decode_external(path, locator),
        None => {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_else(|| "(none)".to_string());
            Err(BakeError::unsupported_format(
                path,
                format!("unsupported extension {}", ext),
            ))
        }
    }
}
