use thiserror::Error;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Failures that stop the service from starting or running
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Server failed: {0}")]
    Server(String),
}
