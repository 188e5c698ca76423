//! Shared logging setup for nullable binaries.
//!
//! Everything goes to stderr so that stdout stays machine-readable.
//! `RUST_LOG` always wins over the built-in directives.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_FILTER: &str = "nullable=info,nullable_db=info";
const VERBOSE_LOG_FILTER: &str = "nullable=debug,nullable_db=debug";
const QUIET_LOG_FILTER: &str = "warn";

/// Logging configuration shared by nullable binaries.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Output is JSON; keep the console to warnings and errors.
    pub json_mode: bool,
}

impl<'a> LogConfig<'a> {
    pub fn new(app_name: &'a str) -> Self {
        Self {
            app_name,
            verbose: false,
            json_mode: false,
        }
    }

    /// Filter directives used when `RUST_LOG` is unset.
    pub fn directives(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else if self.json_mode {
            QUIET_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}

/// Initialize tracing with a stderr fmt layer.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.verbose)
                .with_filter(console_filter),
        )
        .try_init()
        .with_context(|| format!("Failed to initialize logging for {}", config.app_name))?;

    tracing::debug!(app = config.app_name, "logging initialized");
    Ok(())
}
