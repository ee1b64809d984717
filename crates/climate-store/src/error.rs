//! Error types for climate-store.

use std::path::PathBuf;
use std::time::Duration;

use climate_types::DateError;

/// Result type for climate-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in climate-store.
///
/// Empty query results are never errors; they come back as `None` or an
/// empty vector.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset could not be opened or is not a SQLite database.
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// A required table is missing from the dataset.
    #[error("Dataset is missing table '{0}'")]
    MissingTable(&'static str),

    /// A required column is missing from a dataset table.
    #[error("Dataset table '{table}' is missing column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A query ran past the configured deadline and was interrupted.
    #[error("Query exceeded timeout of {0:?}")]
    QueryTimeout(Duration),

    /// A date argument was not in `YYYY-MM-DD` form.
    #[error(transparent)]
    InvalidDate(#[from] DateError),
}

impl Error {
    /// Whether the dataset itself is unusable, as opposed to a single query failing.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Error::Open { .. } | Error::MissingTable(_) | Error::MissingColumn { .. }
        )
    }
}
