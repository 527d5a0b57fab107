//! CSV dataset loader.

use std::path::Path;

use tracing::info;

use crate::error::Result;

use super::{Corpus, RawRecord};

/// Load raw records from a CSV file.
///
/// The file must carry a header row with at least a `title` column;
/// `overview`, `genres` and `keywords` are optional and default to empty.
/// Any other columns are ignored.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        let record: RawRecord = record?;
        records.push(record);
    }
    info!(records = records.len(), path = %path.as_ref().display(), "dataset loaded");
    Ok(records)
}

/// Load and preprocess a CSV dataset into a [`Corpus`] in one step.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    Ok(Corpus::from_records(load_records(path)?))
}
