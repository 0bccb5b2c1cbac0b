//! External decoder support for WavPack inputs.
//!
//! `.wv` files are converted to a temporary PCM16 WAV by `ffmpeg` or, when
//! ffmpeg is not installed, `wvunpack`. The temporary file is owned by a
//! [`tempfile::NamedTempFile`] and is deleted when decoding returns, whether
//! it succeeded or not.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{BakeError, Result};

use super::decoder::DecodedAudio;
use super::wav::read_wav;

/// External programs able to turn WavPack into WAV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTool {
    /// FFmpeg, asked to write 16-bit PCM.
    Ffmpeg,
    /// The WavPack reference unpacker.
    WvUnpack,
}

/// Lookup order for decoder tools.
pub const DECODE_TOOLS: [DecodeTool; 2] = [DecodeTool::Ffmpeg, DecodeTool::WvUnpack];

impl DecodeTool {
    /// Executable name without platform suffix.
    pub fn program(&self) -> &'static str {
        match self {
            DecodeTool::Ffmpeg => "ffmpeg",
            DecodeTool::WvUnpack => "wvunpack",
        }
    }

    /// Command-line arguments decoding `input` into the WAV file `output`.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        match self {
            DecodeTool::Ffmpeg => {
                args.extend(["-v", "error", "-y", "-i"].map(OsString::from));
                args.push(input.into());
                args.extend(["-c:a", "pcm_s16le"].map(OsString::from));
                args.push(output.into());
            }
            DecodeTool::WvUnpack => {
                // -y: the temp file already exists.
                args.extend(["-q", "-y", "-o"].map(OsString::from));
                args.push(output.into());
                args.push(input.into());
            }
        }
        args
    }
}

/// Finds decoder executables on a search path.
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    search_path: Option<OsString>,
}

impl ToolLocator {
    /// Searches the directories listed in the `PATH` environment variable.
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Searches only the given `PATH`-style list of directories.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Returns the full path of `tool` if an executable copy is found.
    pub fn locate(&self, tool: DecodeTool) -> Option<PathBuf> {
        let search_path = self.search_path.as_deref()?;
        std::env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(executable_name(tool.program())))
            .find(|candidate| is_executable(candidate))
    }

    /// Returns the first available tool in [`DECODE_TOOLS`] order.
    pub fn first_available(&self) -> Option<(DecodeTool, PathBuf)> {
        DECODE_TOOLS
            .iter()
            .find_map(|tool| self.locate(*tool).map(|path| (*tool, path)))
    }
}

/// Decodes a non-native file through the first available external tool.
pub fn decode_external(input: &Path, locator: &ToolLocator) -> Result<DecodedAudio> {
    let (tool, program) = locator
        .first_available()
        .ok_or_else(|| BakeError::decode_tool_unavailable(input))?;

    let scratch = tempfile::Builder::new()
        .prefix("ir-embed-")
        .suffix(".wav")
        .tempfile()
        .map_err(|e| BakeError::io("create temporary file for", input, e))?;

    debug!(
        input = %input.display(),
        tool = tool.program(),
        program = %program.display(),
        scratch = %scratch.path().display(),
        "running external decoder"
    );

    run_tool(tool, &program, input, scratch.path())?;
    read_wav(scratch.path())
    // `scratch` is dropped here, removing the temporary WAV.
}

fn run_tool(tool: DecodeTool, program: &Path, input: &Path, output: &Path) -> Result<()> {
    let result = Command::new(program)
        .args(tool.args(input, output))
        .output()
        .map_err(|e| {
            BakeError::external_decode_failed(
                input,
                tool.program(),
                &format!("failed to launch {}: {}", program.display(), e),
            )
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let diagnostics = if stderr.trim().is_empty() {
            format!("{} exited with {}", tool.program(), result.status)
        } else {
            stderr.into_owned()
        };
        return Err(BakeError::external_decode_failed(
            input,
            tool.program(),
            &diagnostics,
        ));
    }

    Ok(())
}

fn executable_name(program: &str) -> OsString {
    let mut name = OsString::from(program);
    if cfg!(windows) {
        name.push(".exe");
    }
    name
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
