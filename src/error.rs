use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong in the recipe book core.
///
/// Every variant is recoverable: the interactive session reports the error
/// and keeps running. Storage variants carry the offending path so the
/// message names the actual file.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("could not read {}: {}", .path.display(), .source)]
    StorageRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a valid recipe file: {}", .path.display(), .source)]
    StorageParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not save {}: {}", .path.display(), .source)]
    StorageWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("recipe '{0}' not found")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid number")]
    InvalidSelection,

    #[error("the recipe book is empty")]
    EmptyStore,
}

pub type Result<T> = std::result::Result<T, RecipeError>;
