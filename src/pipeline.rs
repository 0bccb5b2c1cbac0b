//! Bake pipeline.
//!
//! Discovers inputs, turns each into an [`IrItem`] (decode, normalize,
//! preview), emits the sources and writes them. Any failure aborts the whole
//! run before anything is written.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::audio::{decode, DecodedAudio, InputFormat, ToolLocator};
use crate::codegen::{emit, EmitOptions, GeneratedSources};
use crate::config::{BakeConfig, Layout};
use crate::dsp::{build_preview, normalize_peak, preview_source};
use crate::error::{BakeError, ErrorCode, Result};
use crate::types::{derive_id, display_name, symbol_name, IrItem};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakeSummary {
    /// Number of items embedded.
    pub items: usize,
    /// How many of them are stereo.
    pub stereo_items: usize,
    /// Written header path.
    pub header_path: PathBuf,
    /// Written definition file path.
    pub source_path: PathBuf,
}

/// Runs the whole pipeline for `config`.
///
/// # Arguments
///
/// * `config` - Validated settings for the run
/// * `locator` - Where to look for `ffmpeg` / `wvunpack` when a `.wv` input is found
///
/// # Returns
///
/// A summary of what was embedded. On error nothing has been written.
pub fn run(config: &BakeConfig, locator: &ToolLocator) -> Result<BakeSummary> {
    let inputs = collect_inputs(&config.input_dir)?;
    info!(
        count = inputs.len(),
        dir = %config.input_dir.display(),
        "found impulse responses"
    );

    let items = build_items(&inputs, config, locator)?;
    let sources = emit(&items, &EmitOptions::from(config));
    write_outputs(&sources, &config.header_path, &config.source_path)?;

    let summary = BakeSummary {
        items: items.len(),
        stereo_items: items.iter().filter(|i| i.is_stereo()).count(),
        header_path: config.header_path.clone(),
        source_path: config.source_path.clone(),
    };
    info!(
        items = summary.items,
        stereo = summary.stereo_items,
        header = %summary.header_path.display(),
        source = %summary.source_path.display(),
        "wrote generated sources"
    );
    Ok(summary)
}

/// Lists recognized input files directly inside `dir`, sorted by file name.
///
/// Fails with `NoInputFiles` if `dir` is missing or holds no such files.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(BakeError::new(
            ErrorCode::NoInputFiles,
            format!("input directory {} does not exist", dir.display()),
        ));
    }
    if !dir.is_dir() {
        return Err(BakeError::new(
            ErrorCode::NoInputFiles,
            format!("input path {} is not a directory", dir.display()),
        ));
    }

    let entries = fs::read_dir(dir).map_err(|e| BakeError::io("read directory", dir, e))?;
    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| BakeError::io("read directory", dir, e))?
            .path();
        if path.is_file() && InputFormat::from_path(&path).is_some() {
            inputs.push(path);
        }
    }

    if inputs.is_empty() {
        return Err(BakeError::no_input_files(dir));
    }

    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// Builds one item per input, in order.
///
/// Identifiers (and the C symbols derived from them) are checked for
/// uniqueness before anything is decoded.
///
/// # Arguments
///
/// * `inputs` - Input files, already sorted
/// * `config` - Settings for normalization, previews and layout
/// * `locator` - Decoder tool lookup for `.wv` inputs
///
/// # Returns
///
/// One item per input, in the same order.
pub fn build_items(
    inputs: &[PathBuf],
    config: &BakeConfig,
    locator: &ToolLocator,
) -> Result<Vec<IrItem>> {
    let ids = assign_ids(inputs)?;
    inputs
        .iter()
        .zip(ids)
        .map(|(path, id)| process_file(path, id, config, locator))
        .collect()
}

/// Decodes, normalizes and previews a single file.
///
/// # Arguments
///
/// * `path` - The `.wav` or `.wv` file to read
/// * `id` - Identifier derived from the file name
/// * `config` - Settings for normalization, previews and layout
/// * `locator` - Decoder tool lookup for `.wv` inputs
///
/// # Returns
///
/// The finished item with normalized channels and its preview.
pub fn process_file(
    path: &Path,
    id: String,
    config: &BakeConfig,
    locator: &ToolLocator,
) -> Result<IrItem> {
    debug!(path = %path.display(), id = %id, "decoding");
    let decoded = decode(path, locator)?;
    check_channels(path, &decoded, config.layout)?;

    let (left, right) = normalize_peak(&decoded.left, decoded.right.as_deref(), config.target_peak);
    let preview = build_preview(
        &preview_source(&left, right.as_deref()),
        config.preview_samples,
    );

    let item = IrItem {
        display_name: display_name(&id),
        id,
        sample_rate: decoded.sample_rate,
        channels: decoded.channels,
        left,
        right,
        preview,
    };
    if let Some(reason) = item.validate() {
        return Err(BakeError::unsupported_format(path, reason));
    }

    info!(
        id = %item.id,
        channels = item.channels,
        frames = item.frame_count(),
        sample_rate = item.sample_rate,
        preview = item.preview.len(),
        "baked impulse response"
    );
    Ok(item)
}

/// Checks the decoded channel layout against what the run can emit.
pub fn check_channels(path: &Path, decoded: &DecodedAudio, layout: Layout) -> Result<()> {
    if decoded.channels > layout.max_channels() {
        return Err(BakeError::unsupported_format(
            path,
            format!(
                "{}-channel input is not supported by the {} layout",
                decoded.channels, layout
            ),
        ));
    }

    if decoded.is_stereo() {
        let right_len = decoded.right.as_ref().map_or(0, Vec::len);
        if right_len != decoded.left.len() {
            return Err(BakeError::channel_length_mismatch(
                path,
                decoded.left.len(),
                right_len,
            ));
        }
    }
    Ok(())
}

/// Writes both generated files, creating parent directories as needed.
///
/// Both files are first written to temporary files next to their targets and
/// then renamed into place. If the second rename fails, the first output is
/// removed again, so a run never leaves a header without its definition file.
pub fn write_outputs(sources: &GeneratedSources, header_path: &Path, source_path: &Path) -> Result<()> {
    let header = stage_output(header_path, &sources.header)?;
    let source = stage_output(source_path, &sources.source)?;

    header
        .persist(header_path)
        .map_err(|e| BakeError::io("write", header_path, e.error))?;
    if let Err(e) = source.persist(source_path) {
        let _ = fs::remove_file(header_path);
        return Err(BakeError::io("write", source_path, e.error));
    }
    Ok(())
}

fn stage_output(path: &Path, text: &str) -> Result<NamedTempFile> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| BakeError::io("create directory", parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".ir-embed-")
        .tempfile_in(parent)
        .map_err(|e| BakeError::io("create temporary file in", parent, e))?;
    staged
        .write_all(text.as_bytes())
        .map_err(|e| BakeError::io("write", staged.path(), e))?;

    // Temporary files are created owner-only; outputs get regular file modes.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| BakeError::io("set permissions on", staged.path(), e))?;
    }
    Ok(staged)
}

fn assign_ids(inputs: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen_ids = HashSet::new();
    let mut seen_symbols: HashMap<String, String> = HashMap::new();
    let mut ids = Vec::with_capacity(inputs.len());

    for path in inputs {
        let id = derive_id(path)
            .ok_or_else(|| BakeError::unsupported_format(path, "file name has no stem"))?;
        if !seen_ids.insert(id.clone()) {
            return Err(BakeError::duplicate_identifier(path, &id));
        }
        if let Some(other) = seen_symbols.insert(symbol_name(&id), id.clone()) {
            return Err(BakeError::new(
                ErrorCode::DuplicateIdentifier,
                format!(
                    "{}: IR id '{}' maps to the same symbol as '{}'",
                    path.display(),
                    id,
                    other
                ),
            ));
        }
        ids.push(id);
    }
    Ok(ids)
}
