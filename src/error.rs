//! Error and diagnostic types.
//!
//! Signal handling in the controllers is total and never fails. The only
//! hard errors come from loading configuration; questionable-but-usable
//! configuration is reported as a [`ConfigWarning`] and kept as given.

use std::path::PathBuf;

/// Failure to load controller configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A misconfiguration the controller tolerates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("\"min\" ({min}) must be lower than \"max\" ({max})")]
    MinAboveMax { min: f64, max: f64 },
    #[error("\"step\" ({step}) must be lower than \"large_step\" ({large_step})")]
    StepAboveLargeStep { step: f64, large_step: f64 },
    #[error("\"{name}\" ({value}) must be positive")]
    NonPositiveStep { name: &'static str, value: f64 },
    #[error("\"repeat_rate\" must be at least 1ms")]
    ZeroRepeatRate,
    #[error("\"completed_factor\" ({0}) must be within 0..=1")]
    CompletedFactorOutOfRange(f64),
}
