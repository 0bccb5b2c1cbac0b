//! Logging setup.
//!
//! Installs a global tracing subscriber writing to stderr, so stdout stays
//! free for tools that capture it. `RUST_LOG` takes precedence over the
//! default level.

use tracing_subscriber::{fmt, EnvFilter};

/// Returns the filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ir_embed=debug"
    } else {
        "ir_embed=info"
    }
}

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_directive(false), "ir_embed=info");
        assert_eq!(default_directive(true), "ir_embed=debug");
    }

    #[test]
    fn init_is_idempotent() {
        init(false);
        init(true);
        tracing::info!("logging initialized twice");
    }
}
