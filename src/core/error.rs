//! Assembly error types

use crate::client::ClientError;
use thiserror::Error;

/// Error types for assembly operations
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("assembly has not been fitted yet; call fit() before exporting")]
    NotFitted,

    #[error("invalid assembly definition: {0}")]
    Config(String),

    #[error("failed to parse assembly definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
