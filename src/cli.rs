//! CLI argument parser.
//!
//! Flags override values from the config file and environment; see
//! [`crate::config`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{BakeConfig, Layout};
use crate::error::{BakeError, Result};

/// Record layout choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Mono or stereo items, with channel count and left/right pointers
    Stereo,
    /// Mono items only, with a single sample pointer
    Mono,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Stereo => Layout::Stereo,
            LayoutArg::Mono => Layout::Mono,
        }
    }
}

/// ir-embed: bake impulse responses into static C++ arrays
#[derive(Parser, Debug)]
#[command(name = "ir-embed")]
#[command(about = "Bakes a directory of WAV/WavPack impulse responses into a C++ header and source file")]
#[command(version)]
pub struct Cli {
    /// Directory containing .wav / .wv impulse responses
    #[arg(long = "input-dir", visible_alias = "input_dir")]
    pub input_dir: Option<PathBuf>,

    /// Output header path
    #[arg(long = "out-h", visible_alias = "out_h")]
    pub out_h: Option<PathBuf>,

    /// Output definition file path
    #[arg(long = "out-cpp", visible_alias = "out_cpp")]
    pub out_cpp: Option<PathBuf>,

    /// Maximum preview samples per IR (default 512, 0 disables previews)
    #[arg(long)]
    pub preview: Option<usize>,

    /// Peak level after normalization (default 0.95)
    #[arg(long = "target-peak")]
    pub target_peak: Option<f32>,

    /// C++ namespace for the generated code (default dsp::room_ir)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Header path written into the generated #include (default room_ir/RoomIrData.h)
    #[arg(long)]
    pub include: Option<String>,

    /// Record layout of the generated table
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// JSON config file providing defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log debug details (tool selection, temporary files)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Builds the effective configuration: config file, then environment,
    /// then flags. The result is validated.
    pub fn resolve_config(&self) -> Result<BakeConfig> {
        let mut config = match &self.config {
            Some(path) => BakeConfig::load(path)?,
            None => BakeConfig::default(),
        };
        config.apply_env();
        self.apply_to(&mut config);

        if let Some(reason) = config.validate() {
            return Err(BakeError::invalid_config(reason));
        }
        Ok(config)
    }

    /// Overwrites `config` with every flag that was given.
    pub fn apply_to(&self, config: &mut BakeConfig) {
        if let Some(ref dir) = self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(ref path) = self.out_h {
            config.header_path = path.clone();
        }
        if let Some(ref path) = self.out_cpp {
            config.source_path = path.clone();
        }
        if let Some(preview) = self.preview {
            config.preview_samples = preview;
        }
        if let Some(peak) = self.target_peak {
            config.target_peak = peak;
        }
        if let Some(ref namespace) = self.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(ref include) = self.include {
            config.header_include = include.clone();
        }
        if let Some(layout) = self.layout {
            config.layout = layout.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_underscore_flag_aliases() {
        let cli = Cli::try_parse_from([
            "ir-embed",
            "--input_dir",
            "assets/ir_src",
            "--out_h",
            "gen/room_ir/RoomIrData.h",
            "--out_cpp",
            "gen/room_ir/RoomIrData.cpp",
            "--preview",
            "256",
        ])
        .unwrap();
        assert_eq!(cli.input_dir, Some(PathBuf::from("assets/ir_src")));
        assert_eq!(cli.out_h, Some(PathBuf::from("gen/room_ir/RoomIrData.h")));
        assert_eq!(cli.out_cpp, Some(PathBuf::from("gen/room_ir/RoomIrData.cpp")));
        assert_eq!(cli.preview, Some(256));
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "ir-embed",
            "--input-dir",
            "irs",
            "--layout",
            "mono",
            "--namespace",
            "fx::ir",
            "--target-peak",
            "0.5",
            "-v",
        ])
        .unwrap();

        let mut config = BakeConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.input_dir, PathBuf::from("irs"));
        assert_eq!(config.layout, Layout::Mono);
        assert_eq!(config.namespace, "fx::ir");
        assert_eq!(config.target_peak, 0.5);
        assert_eq!(config.preview_samples, 512);
        assert!(cli.verbose);
    }

    #[test]
    fn invalid_flag_values_fail_validation() {
        let cli = Cli::try_parse_from(["ir-embed", "--target-peak", "1.5"]).unwrap();
        let err = cli.resolve_config().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfig);
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(Cli::try_parse_from(["ir-embed", "--layout", "quad"]).is_err());
    }
}
