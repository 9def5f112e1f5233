//! Logging setup for the pipeline.
//!
//! The helpers in this crate only emit `tracing` events; whoever hosts them
//! decides where the events go. Binaries call [`init_logging`] (or
//! [`init_from_env`]) once at startup, tests can scope a subscriber with
//! `tracing::subscriber::with_default`.
//!
//! ```no_run
//! use cnn_classifier::utils::logging::{init_logging, LoggingConfig};
//!
//! init_logging(LoggingConfig::pipeline()).expect("logging");
//! tracing::info!("pipeline started");
//! ```

use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use anyhow::{Context, Result};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "CNN_CLASSIFIER_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "CNN_CLASSIFIER_LOG_JSON";
pub const LOG_FILE_ENV: &str = "CNN_CLASSIFIER_LOG_FILE";

/// Where the pipeline keeps its running log.
pub const PIPELINE_LOG_FILE: &str = "logs/running_logs.log";

static INSTALLED: Mutex<bool> = Mutex::new(false);

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level when `RUST_LOG` is not set
    pub level: Level,

    /// JSON lines on the console instead of the human format
    pub use_json: bool,

    /// Include the module target in each line
    pub include_target: bool,

    /// Also append plain-text lines to this file
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            log_file: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Console output plus the running log file under `logs/`.
    pub fn pipeline() -> Self {
        Self {
            log_file: Some(PathBuf::from(PIPELINE_LOG_FILE)),
            ..Default::default()
        }
    }
}

/// Parses a level name, case-insensitively. Unknown names fall back to INFO.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. \
                 Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. After one successful call, later calls
/// return `Ok(())` without touching it; a failed call can be retried.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
    if *installed {
        return Ok(());
    }
    install(&config)?;
    *installed = true;
    Ok(())
}

/// Builds a [`LoggingConfig`] from `CNN_CLASSIFIER_LOG_*` variables and installs it.
pub fn init_from_env() -> Result<()> {
    init_logging(config_from_env())
}

fn config_from_env() -> LoggingConfig {
    let level = env::var(LOG_LEVEL_ENV)
        .map(|v| parse_level(&v))
        .unwrap_or(Level::INFO);

    let use_json = env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    let log_file = env::var(LOG_FILE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    LoggingConfig {
        level,
        use_json,
        log_file,
        ..Default::default()
    }
}

fn install(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    // Exactly one of these is set
    let (plain, json) = if config.use_json {
        let layer = fmt::layer()
            .json()
            .with_target(config.include_target)
            .with_writer(io::stderr);
        (None, Some(layer))
    } else {
        let layer = fmt::layer()
            .with_target(config.include_target)
            .with_writer(io::stderr);
        (Some(layer), None)
    };

    let file = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(config.include_target)
                    .with_writer(Mutex::new(handle)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .with(file)
        .try_init()
        .context("Failed to install the tracing subscriber")?;
    Ok(())
}
