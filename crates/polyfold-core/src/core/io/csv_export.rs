use crate::core::scoring::distance_map::{DistanceMap, PairRecord};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("CSV error: {0}")]
    Write(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct DistanceRow {
    i: usize,
    j: usize,
    separation: usize,
    weight: f64,
    reference: f64,
    live: f64,
    error: f64,
}

impl From<PairRecord> for DistanceRow {
    fn from(pair: PairRecord) -> Self {
        Self {
            i: pair.i,
            j: pair.j,
            separation: pair.separation,
            weight: pair.weight,
            reference: pair.reference,
            live: pair.live,
            error: pair.error,
        }
    }
}

/// Writes every lower-triangle pair of `map` as one CSV row, residues 0-based.
pub fn write_distance_map(map: &DistanceMap, writer: impl Write) -> Result<(), CsvExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for pair in map.pairs() {
        csv_writer.serialize(DistanceRow::from(pair))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_distance_map_to_path(map: &DistanceMap, path: &Path) -> Result<(), CsvExportError> {
    let to_csv_error = |source| CsvExportError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut csv_writer = csv::Writer::from_path(path).map_err(to_csv_error)?;
    for pair in map.pairs() {
        csv_writer
            .serialize(DistanceRow::from(pair))
            .map_err(to_csv_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}
