//! Error taxonomy shared by every pipeline.

use std::path::PathBuf;

/// Errors raised while reading, transforming or writing episode containers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required group, dataset or attribute is absent.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// The container does not match what the operation expects.
    #[error("Schema error at '{path}': {message}")]
    Schema { path: String, message: String },

    /// An episode group name does not end in an integer index.
    #[error("Cannot parse episode index from group name '{name}'")]
    Parse { name: String },

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
