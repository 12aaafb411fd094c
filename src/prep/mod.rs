// src/prep/mod.rs
pub mod encode;
pub mod split;

use std::path::Path;

use tracing::info;

use crate::data;
use crate::error::PrepError;

pub use split::Split;

/// Full preparation pipeline: load the raw dataset, label-encode `column`,
/// and partition the rows into train/test subsets.
///
/// Pure with respect to the filesystem apart from the read; writing the
/// partitions out is the caller's job.
pub fn encode_and_split(
    raw_path: &Path,
    column: &str,
    test_ratio: f64,
    seed: u64,
) -> Result<Split, PrepError> {
    let frame = data::read_csv(raw_path)?;
    info!(rows = frame.len(), cols = frame.columns().len(), "loaded raw data");

    let (encoded, mapping) = encode::label_encode(&frame, column)?;
    info!(column, classes = mapping.len(), "encoded categorical column");

    split::train_test_split(&encoded, test_ratio, seed)
}
