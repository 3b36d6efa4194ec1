//! Error types.

use thiserror::Error;

/// Caller contract violations that are reported instead of silently misbehaving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("orbit group must contain at least one agent")]
    EmptyOrbitGroup,
    #[error("orbit index {index} is outside a group of {count}")]
    OrbitIndexOutOfRange { index: usize, count: usize },
}

/// Failure loading a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
