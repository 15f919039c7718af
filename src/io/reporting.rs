// src/io/reporting.rs

use serde::Serialize;
use std::error::Error;
use std::path::Path;

/// Writes any row sequence to a CSV file, one record per row.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/trace.csv").
/// * `rows` - The row records produced by a simulation run.
pub fn write_rows<R: Serialize>(file_path: &str, rows: &[R]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);

    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    Ok(())
}
