use std::path::Path;

use csv::WriterBuilder;

use crate::candidates::CandidateTable;
use crate::types::Result;

/// Writes the final candidate relation as `vertex,pattern` rows, one per live pair.
///
/// Returns the number of rows written.
pub fn write_matches(path: impl AsRef<Path>, table: &CandidateTable) -> Result<u64> {
    let mut writer = WriterBuilder::new().from_path(path.as_ref())?;
    writer.write_record(["vertex", "pattern"])?;
    let mut rows = 0u64;
    for (vertex, candidates) in table.matches() {
        for pattern in candidates {
            writer.write_record([vertex.0.to_string(), pattern.0.to_string()])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

/// Writes per-vertex scalars as `vertex,<column>` rows.
pub fn write_values<T: ToString>(
    path: impl AsRef<Path>,
    column: &str,
    values: &[T],
) -> Result<u64> {
    let mut writer = WriterBuilder::new().from_path(path.as_ref())?;
    writer.write_record(["vertex", column])?;
    for (vertex, value) in values.iter().enumerate() {
        writer.write_record([vertex.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(values.len() as u64)
}
