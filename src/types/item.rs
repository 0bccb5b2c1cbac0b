//! IrItem type representing one embedded impulse response.
//!
//! An IrItem is built once per input file, is never modified afterwards, and
//! is consumed by the source emitter. Its `id` comes from the file stem and
//! must be unique across a run.

use std::path::Path;

/// One decoded, normalized impulse response ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct IrItem {
    /// Stable identifier, the input file stem (e.g. `large_hall-02`).
    pub id: String,

    /// User-facing name derived from `id` (e.g. `Large Hall 02`).
    pub display_name: String,

    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// 1 (mono) or 2 (stereo).
    pub channels: u16,

    /// Mono samples, or the left channel.
    pub left: Vec<f32>,

    /// Right channel. `Some` iff `channels == 2`.
    pub right: Option<Vec<f32>>,

    /// Downsampled preview of the (channel-averaged) signal.
    pub preview: Vec<f32>,
}

impl IrItem {
    /// Number of frames in each channel.
    pub fn frame_count(&self) -> usize {
        self.left.len()
    }

    /// Returns true for two-channel items.
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// C identifier fragment used to name this item's arrays.
    pub fn symbol(&self) -> String {
        symbol_name(&self.id)
    }

    /// Validates that the item meets all constraints.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if self.id.is_empty() {
            return Some("IR id cannot be empty".to_string());
        }

        if self.sample_rate == 0 {
            return Some(format!("{}: sample rate must be positive", self.id));
        }

        match (self.channels, &self.right) {
            (1, None) => {}
            (2, Some(right)) => {
                if right.len() != self.left.len() {
                    return Some(format!(
                        "{}: channel lengths differ (left {}, right {})",
                        self.id,
                        self.left.len(),
                        right.len()
                    ));
                }
            }
            (channels, right) => {
                return Some(format!(
                    "{}: {} channels with {} right channel",
                    self.id,
                    channels,
                    if right.is_some() { "a" } else { "no" }
                ));
            }
        }

        let in_range = |s: &f32| (-1.0..=1.0).contains(s);
        let mut all_samples = self
            .left
            .iter()
            .chain(self.right.iter().flatten())
            .chain(&self.preview);
        if !all_samples.all(in_range) {
            return Some(format!("{}: sample values must lie in [-1, 1]", self.id));
        }

        None
    }
}

/// Derives an item id from a file path: the file name without extension.
pub fn derive_id(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    if stem.is_empty() {
        None
    } else {
        Some(stem.into_owned())
    }
}

/// Turns an id into a display name.
///
/// Runs of `_`, `-` and `\` become a single space and every word gets an
/// uppercase first letter; the rest of each word is kept as written.
pub fn display_name(id: &str) -> String {
    let spaced: String = id
        .trim()
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '\\') { ' ' } else { c })
        .collect();

    spaced
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
pub fn symbol_name(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
