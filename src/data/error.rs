use std::path::PathBuf;

use thiserror::Error;

/// Why a CSV resource could not be turned into records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read CSV header: {0}")]
    Headers(#[source] csv::Error),

    #[error("CSV row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}
