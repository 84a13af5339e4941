//! Logging configuration and initialization
//!
//! The decoder reports through the `tracing` crate: a `trace` event for every
//! classified message and a `debug` event for every rejected one. Nothing is
//! printed unless a subscriber is installed. Applications that already set up
//! `tracing` themselves can ignore this module; everyone else can call
//! [`init_logging`] once at startup.
//!
//! # Usage Pattern
//!
//! ```rust,no_run
//! use rpcsift_core::LoggingConfig;
//!
//! let config = LoggingConfig::new("rpcsift_core=trace")
//!     .with_json(true);
//!
//! rpcsift_core::init_logging(config).expect("Failed to init logging");
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives; when set it takes precedence over the
//!   configured level (e.g. "info", "rpcsift_core=debug")

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
///
/// # Defaults
///
/// - Log level: `$RUST_LOG` or "info"
/// - Human-readable output (JSON disabled)
/// - Module targets shown, thread ids and line numbers hidden
///
/// # Examples
///
/// ```rust
/// use rpcsift_core::LoggingConfig;
///
/// let config = LoggingConfig::default()
///     .with_log_level("debug")
///     .with_json(true)
///     .with_line_number(true);
///
/// assert_eq!(config.log_level, "debug");
/// assert!(config.json);
/// ```
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives, in `EnvFilter` syntax
    ///
    /// Plain levels ("error", "warn", "info", "debug", "trace") or per-target
    /// directives such as "rpcsift_core=trace".
    pub log_level: String,

    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,

    /// Include the module path of each event
    pub with_target: bool,

    pub with_thread_ids: bool,

    pub with_line_number: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: false,
            with_target: true,
            with_thread_ids: false,
            with_line_number: false,
        }
    }
}

impl LoggingConfig {
    /// Create a configuration with the given filter directives
    pub fn new(log_level: impl Into<String>) -> Self {
        Self {
            log_level: log_level.into(),
            ..Default::default()
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_json(mut self, enable: bool) -> Self {
        self.json = enable;
        self
    }

    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    pub fn with_thread_ids(mut self, enable: bool) -> Self {
        self.with_thread_ids = enable;
        self
    }

    pub fn with_line_number(mut self, enable: bool) -> Self {
        self.with_line_number = enable;
        self
    }

    /// Build the event filter: `RUST_LOG` if set and valid, else `log_level`
    pub fn env_filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
        Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.log_level))?)
    }
}

/// Install a global `tracing` subscriber built from `config`
///
/// # Errors
///
/// Fails if the filter directives do not parse, or if a global subscriber
/// has already been installed (so calling this twice returns an error rather
/// than panicking).
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = config.env_filter()?;

    if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_thread_ids(config.with_thread_ids)
            .with_line_number(config.with_line_number)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_thread_ids(config.with_thread_ids)
            .with_line_number(config.with_line_number);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::debug!(
        log_level = %config.log_level,
        json = config.json,
        "Logging initialized"
    );

    Ok(())
}
