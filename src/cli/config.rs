use std::path::PathBuf;

use crate::utils::logging::{parse_level, LoggingConfig};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Expands a leading `~` so paths behave the same whether or not a shell did it.
pub fn expand_path(raw: &str) -> PathBuf {
    shellexpand::tilde(raw).into_owned().into()
}

pub fn logging_config(log_level: &str, log_file: Option<&str>, json_logs: bool) -> LoggingConfig {
    LoggingConfig {
        level: parse_level(log_level),
        use_json: json_logs,
        log_file: log_file.map(expand_path),
        ..Default::default()
    }
}
