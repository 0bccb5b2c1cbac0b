//! ir-embed: bakes a directory of impulse responses into C++ sources.

use ir_embed::audio::ToolLocator;
use ir_embed::cli::Cli;
use ir_embed::error::Result;
use ir_embed::{logging, pipeline};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    let config = cli.resolve_config()?;
    tracing::debug!(?config, "resolved configuration");

    pipeline::run(&config, &ToolLocator::from_env())?;
    Ok(())
}
