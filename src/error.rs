// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollocError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sheet {path}: {source}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Row and column are 0-based here; diagnostics add one to the row.
    #[error("row {} has no column {col}", .row + 1)]
    MissingColumn { row: usize, col: usize },

    #[error("snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("model source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("could not persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl CollocError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T, E = CollocError> = std::result::Result<T, E>;
