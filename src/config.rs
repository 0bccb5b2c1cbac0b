//! Bake configuration module.
//!
//! Contains the settings for one ir-embed run: where to read IRs from, where
//! to write the generated sources, and how to shape them.
//!
//! Values are resolved in order: built-in defaults, an optional JSON config
//! file, `IR_EMBED_*` environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::codegen::{DEFAULT_HEADER_INCLUDE, DEFAULT_NAMESPACE};
use crate::dsp::{DEFAULT_PREVIEW_SAMPLES, DEFAULT_TARGET_PEAK};
use crate::error::{BakeError, Result};

/// Record layout of the generated item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Mono or stereo items; records carry `channels`, `samplesL` and `samplesR`.
    #[default]
    Stereo,

    /// Mono items only; records carry a single `samples` pointer.
    /// Stereo inputs are rejected.
    Mono,
}

impl Layout {
    /// Returns the string representation of the layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Stereo => "stereo",
            Layout::Mono => "mono",
        }
    }

    /// Parses a layout from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stereo" => Some(Layout::Stereo),
            "mono" => Some(Layout::Mono),
            _ => None,
        }
    }

    /// Highest channel count accepted in this layout.
    pub fn max_channels(&self) -> u16 {
        match self {
            Layout::Stereo => 2,
            Layout::Mono => 1,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Directory scanned for `.wav` / `.wv` files (not recursive).
    pub input_dir: PathBuf,

    /// Output header path.
    pub header_path: PathBuf,

    /// Output definition file path.
    pub source_path: PathBuf,

    /// Maximum preview length per item. 0 disables previews.
    pub preview_samples: usize,

    /// Peak level after normalization, in (0, 1].
    pub target_peak: f32,

    /// C++ namespace of the generated declarations.
    pub namespace: String,

    /// Header path written into the definition file's `#include`.
    pub header_include: String,

    /// Record layout.
    pub layout: Layout,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("assets/ir_src"),
            header_path: PathBuf::from("generated/room_ir/RoomIrData.h"),
            source_path: PathBuf::from("generated/room_ir/RoomIrData.cpp"),
            preview_samples: DEFAULT_PREVIEW_SAMPLES,
            target_peak: DEFAULT_TARGET_PEAK,
            namespace: DEFAULT_NAMESPACE.to_string(),
            header_include: DEFAULT_HEADER_INCLUDE.to_string(),
            layout: Layout::default(),
        }
    }
}

impl BakeConfig {
    /// Creates a new BakeConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BakeError::io("read", path, e))?;
        serde_json::from_str(&text).map_err(|e| {
            BakeError::invalid_config(format!("{}: invalid config file: {}", path.display(), e))
        })
    }

    /// Applies overrides from the process environment.
    ///
    /// Reads the following environment variables:
    /// - `IR_EMBED_PREVIEW` - Preview length
    /// - `IR_EMBED_TARGET_PEAK` - Normalization peak, in (0, 1]
    /// - `IR_EMBED_NAMESPACE` - C++ namespace
    /// - `IR_EMBED_LAYOUT` - `stereo` or `mono`
    ///
    /// Unset or unparsable variables leave the current value in place.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies overrides using `lookup` in place of the process environment.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(preview) = lookup("IR_EMBED_PREVIEW").and_then(|v| v.trim().parse().ok()) {
            self.preview_samples = preview;
        }

        if let Some(peak) = lookup("IR_EMBED_TARGET_PEAK")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|p| valid_target_peak(*p))
        {
            self.target_peak = peak;
        }

        if let Some(namespace) = lookup("IR_EMBED_NAMESPACE").filter(|ns| valid_namespace(ns)) {
            self.namespace = namespace;
        }

        if let Some(layout) = lookup("IR_EMBED_LAYOUT").and_then(|v| Layout::parse(v.trim())) {
            self.layout = layout;
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if !valid_target_peak(self.target_peak) {
            return Some(format!(
                "target peak must be in (0, 1], got {}",
                self.target_peak
            ));
        }

        if !valid_namespace(&self.namespace) {
            return Some(format!(
                "namespace must be '::'-separated C++ identifiers, got '{}'",
                self.namespace
            ));
        }

        if self.header_include.trim().is_empty() {
            return Some("header include path cannot be empty".to_string());
        }

        if self.header_path == self.source_path {
            return Some(format!(
                "header and definition outputs are the same file: {}",
                self.header_path.display()
            ));
        }

        None
    }
}

fn valid_target_peak(peak: f32) -> bool {
    peak > 0.0 && peak <= 1.0
}

fn valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace.split("::").all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn layout_parsing() {
        assert_eq!(Layout::parse("stereo"), Some(Layout::Stereo));
        assert_eq!(Layout::parse("MONO"), Some(Layout::Mono));
        assert_eq!(Layout::parse("quad"), None);
        assert_eq!(Layout::Mono.to_string(), "mono");
        assert_eq!(Layout::Stereo.max_channels(), 2);
        assert_eq!(Layout::Mono.max_channels(), 1);
    }

    #[test]
    fn defaults() {
        let config = BakeConfig::new();
        assert_eq!(config.preview_samples, 512);
        assert_eq!(config.target_peak, 0.95);
        assert_eq!(config.namespace, "dsp::room_ir");
        assert_eq!(config.header_include, "room_ir/RoomIrData.h");
        assert_eq!(config.layout, Layout::Stereo);
        assert!(config.validate().is_none());
    }

    #[test]
    fn config_validation() {
        let mut config = BakeConfig::new();
        config.target_peak = 0.0;
        assert!(config.validate().is_some());
        config.target_peak = 1.0;
        assert!(config.validate().is_none());
        config.target_peak = 1.01;
        assert!(config.validate().is_some());

        let mut config = BakeConfig::new();
        config.namespace = "dsp::".to_string();
        assert!(config.validate().is_some());
        config.namespace = "9lives".to_string();
        assert!(config.validate().is_some());
        config.namespace = "_ir".to_string();
        assert!(config.validate().is_none());

        let mut config = BakeConfig::new();
        config.source_path = config.header_path.clone();
        assert!(config.validate().is_some());
    }

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [
            ("IR_EMBED_PREVIEW", "256"),
            ("IR_EMBED_TARGET_PEAK", "0.5"),
            ("IR_EMBED_NAMESPACE", "synth::ir"),
            ("IR_EMBED_LAYOUT", "mono"),
        ]
        .into_iter()
        .collect();

        let mut config = BakeConfig::new();
        config.apply_env_with(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.preview_samples, 256);
        assert_eq!(config.target_peak, 0.5);
        assert_eq!(config.namespace, "synth::ir");
        assert_eq!(config.layout, Layout::Mono);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let env: HashMap<&str, &str> = [
            ("IR_EMBED_PREVIEW", "lots"),
            ("IR_EMBED_TARGET_PEAK", "2.0"),
            ("IR_EMBED_NAMESPACE", "not a namespace"),
            ("IR_EMBED_LAYOUT", "surround"),
        ]
        .into_iter()
        .collect();

        let mut config = BakeConfig::new();
        config.apply_env_with(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config, BakeConfig::new());
    }

    #[test]
    fn load_partial_json_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ir-embed.json");
        std::fs::write(&path, r#"{ "input_dir": "irs", "preview_samples": 64, "layout": "mono" }"#)
            .unwrap();

        let config = BakeConfig::load(&path).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("irs"));
        assert_eq!(config.preview_samples, 64);
        assert_eq!(config.layout, Layout::Mono);
        assert_eq!(config.namespace, "dsp::room_ir");
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ preview_samples: }").unwrap();

        let err = BakeConfig::load(&path).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfig);
    }
}
