#![forbid(unsafe_code)]

use sortsynth_core::SortError;
use sortsynth_runtime::{AudioError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sort(#[from] SortError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Process exit code: 2 for anything the user typed wrong, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sort(SortError::InvalidAlgorithm { .. })
            | Self::Config(ConfigError::Invalid(_))
            | Self::Audio(AudioError::InvalidConfig(_))
            | Self::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
