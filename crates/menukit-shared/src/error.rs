//! Errors raised by the shared layer itself (configuration and bootstrap).
//! Menu, permission, and role failures live in `menukit-core`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing settings while building [`crate::config::AppConfig`].
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    InternalError(String),
}
