use thiserror::Error;

pub type Result<T> = std::result::Result<T, SortError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("unknown sorting algorithm: {name:?} (expected one of bubble, insertion, selection, heap, quick, merge)")]
    InvalidAlgorithm { name: String },

    #[error("move index {index} out of range for array of length {len}")]
    MoveOutOfRange { index: usize, len: usize },
}

impl SortError {
    #[must_use]
    pub fn invalid_algorithm(name: impl Into<String>) -> Self {
        Self::InvalidAlgorithm { name: name.into() }
    }
}
