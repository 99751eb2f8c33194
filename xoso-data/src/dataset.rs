use std::path::Path;

use crate::error::{DataError, Result};
use crate::models::{normalize_number, Record};

/// Columns the exporter cannot work without.
pub const REQUIRED_COLUMNS: &[&str] = &["game", "number", "last_seen_days", "target"];

/// Load the long-format dataset. Rows keep file order.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::load(path, e))?;

    let headers = reader.headers().map_err(|e| DataError::load(path, e))?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::load(path, format!("missing column '{column}'")));
        }
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<Record>().enumerate() {
        // header is line 1
        let line = i + 2;
        let mut record = row.map_err(|e| DataError::load(path, format!("line {line}: {e}")))?;
        if record.target > 1 {
            return Err(DataError::load(
                path,
                format!("line {line}: target must be 0 or 1, got {}", record.target),
            ));
        }
        if record.last_seen_days.is_some_and(|v| v < 0.0) {
            log::debug!("line {line}: negative last_seen_days will be clamped to 0");
        }
        record.number = normalize_number(&record.number);
        records.push(record);
    }

    log::info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Keep only the rows of `game`, preserving order.
pub fn filter_game(records: Vec<Record>, game: &str) -> Vec<Record> {
    let before = records.len();
    let kept: Vec<Record> = records.into_iter().filter(|r| r.is_game(game)).collect();
    log::debug!("Kept {}/{} rows for game '{game}'", kept.len(), before);
    kept
}

/// Write records as CSV, replacing whatever is at `path`.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| DataError::write(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| DataError::write(path, e))?;
    }
    writer.flush().map_err(|e| DataError::write(path, e))?;
    Ok(())
}
