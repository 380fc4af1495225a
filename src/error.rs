use std::path::PathBuf;

// Every failure in the export pipeline ends the run; callers report it once.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid block hash: {0}")]
    InvalidBlockHash(String),

    #[error("Failed to fetch block")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode block JSON")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        ExportError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
