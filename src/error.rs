//! Error types for mdcodes

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Input path does not exist: {0:?}")]
    InputNotFound(PathBuf),

    #[error("Output template must contain {{name}}: {0:?}")]
    InvalidTemplate(String),

    #[error("Target language tags must be non-empty: {0:?}")]
    EmptyLanguage(Vec<String>),

    #[error("Invalid language tag pattern: {0}")]
    InvalidLanguage(#[from] regex::Error),

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
