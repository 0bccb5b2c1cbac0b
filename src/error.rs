//! Error types for ir-embed.
//!
//! Every error is fatal for a run: the binary reports it and exits non-zero
//! without writing any output.

use std::fmt;
use std::path::Path;

/// Error codes identifying the category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Input cannot be decoded by this tool.
    /// Trigger: Unknown extension, compressed WAV, channel count other than
    /// 1 or 2, or a sample format other than PCM16 / float32.
    UnsupportedFormat,

    /// Two inputs map to the same item identifier or C symbol.
    /// Trigger: `hall.wav` next to `hall.wv`, or `big-hall.wav` next to `big_hall.wav`.
    DuplicateIdentifier,

    /// Stereo decode produced channels of different length.
    /// Trigger: A stereo data chunk that ends in a partial frame, or an
    /// external decoder output with uneven channels.
    ChannelLengthMismatch,

    /// A WavPack input was found but no decoder tool is on PATH.
    DecodeToolUnavailable,

    /// The external decoder ran and failed.
    ExternalDecodeFailed,

    /// The input directory is missing or holds no recognized files.
    NoInputFiles,

    /// Reading an input or writing an output failed.
    Io,

    /// Configuration values are out of range or malformed.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::DuplicateIdentifier => "DUPLICATE_IDENTIFIER",
            ErrorCode::ChannelLengthMismatch => "CHANNEL_LENGTH_MISMATCH",
            ErrorCode::DecodeToolUnavailable => "DECODE_TOOL_UNAVAILABLE",
            ErrorCode::ExternalDecodeFailed => "EXTERNAL_DECODE_FAILED",
            ErrorCode::NoInputFiles => "NO_INPUT_FILES",
            ErrorCode::Io => "IO",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedFormat => {
                "Convert the file to an uncompressed mono or stereo WAV \
                 (16-bit PCM or 32-bit float), or a .wv file"
            }
            ErrorCode::DuplicateIdentifier => {
                "Rename one of the files so every file stem is unique \
                 after replacing non-alphanumeric characters with '_'"
            }
            ErrorCode::ChannelLengthMismatch => {
                "Re-export the file; its data chunk ends in the middle of a frame"
            }
            ErrorCode::DecodeToolUnavailable => {
                "Install ffmpeg or wvunpack and make sure it is on PATH"
            }
            ErrorCode::ExternalDecodeFailed => {
                "Check that the file is a valid WavPack stream; the decoder output above has details"
            }
            ErrorCode::NoInputFiles => {
                "Point --input-dir at a directory containing .wav or .wv files"
            }
            ErrorCode::Io => "Check file permissions and free disk space",
            ErrorCode::InvalidConfig => "Fix the value in the config file, environment or flags",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ir-embed operations.
#[derive(Debug)]
pub struct BakeError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BakeError {
    /// Creates a new BakeError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new BakeError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an UNSUPPORTED_FORMAT error for `path`.
    pub fn unsupported_format(path: &Path, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::UnsupportedFormat,
            format!("{}: {}", path.display(), reason),
        )
    }

    /// Creates a DUPLICATE_IDENTIFIER error.
    pub fn duplicate_identifier(path: &Path, id: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateIdentifier,
            format!("{}: duplicate IR id '{}'", path.display(), id),
        )
    }

    /// Creates a CHANNEL_LENGTH_MISMATCH error.
    pub fn channel_length_mismatch(path: &Path, left: usize, right: usize) -> Self {
        Self::new(
            ErrorCode::ChannelLengthMismatch,
            format!(
                "{}: stereo decode produced mismatched channel lengths (left {}, right {})",
                path.display(),
                left,
                right
            ),
        )
    }

    /// Creates a DECODE_TOOL_UNAVAILABLE error.
    pub fn decode_tool_unavailable(path: &Path) -> Self {
        Self::new(
            ErrorCode::DecodeToolUnavailable,
            format!(
                "{}: decoding .wv requires ffmpeg or wvunpack on PATH",
                path.display()
            ),
        )
    }

    /// Creates an EXTERNAL_DECODE_FAILED error carrying the tool's diagnostics.
    pub fn external_decode_failed(path: &Path, tool: &str, diagnostics: &str) -> Self {
        Self::new(
            ErrorCode::ExternalDecodeFailed,
            format!("{}: {} decode failed:\n{}", path.display(), tool, diagnostics.trim()),
        )
    }

    /// Creates a NO_INPUT_FILES error naming the directory.
    pub fn no_input_files(dir: &Path) -> Self {
        Self::new(
            ErrorCode::NoInputFiles,
            format!("no .wav/.wv files found in {}", dir.display()),
        )
    }

    /// Creates an IO error for an operation on `path`.
    pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::Io,
            format!("Failed to {} {}: {}", action, path.display(), source),
            source,
        )
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, reason)
    }
}

impl fmt::Display for BakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for BakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using BakeError.
pub type Result<T> = std::result::Result<T, BakeError>;
