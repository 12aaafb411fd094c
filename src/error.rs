use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can abort a preparation run. One variant per failure
/// kind; nothing is retried or recovered, callers surface these directly.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Raw input path missing or unreadable.
    #[error("cannot read dataset at {path}: {source}")]
    FileNotFound { path: PathBuf, source: io::Error },

    /// Input opened fine but a record refused to parse.
    #[error("malformed delimited data in {path}: {source}")]
    Malformed { path: PathBuf, source: csv::Error },

    /// The categorical column to encode is not in the header.
    #[error("categorical column `{column}` not present in input")]
    Encoding { column: String },

    /// The test fraction must lie strictly between 0 and 1.
    #[error("test ratio must be in (0, 1), got {ratio}")]
    InvalidRatio { ratio: f64 },

    #[error("dataset contains no rows")]
    EmptyDataset,

    /// Output directory uncreatable or partition write failed.
    #[error("writing {path} failed: {source}")]
    IoWrite { path: PathBuf, source: csv::Error },
}
