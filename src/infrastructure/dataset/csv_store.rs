use crate::domain::entities::item::FEATURE_COLUMNS;
use crate::domain::entities::market_record::MarketRecord;
use crate::domain::error::DomainError;
use std::path::Path;

pub const TARGET_COLUMN: &str = "resale_price";

/// Write records as CSV with a header row.
pub fn write_dataset(path: &Path, records: &[MarketRecord]) -> Result<(), DomainError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| DomainError::Io(format!("Cannot create dataset {}: {e}", path.display())))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| DomainError::Io(format!("Failed to write dataset row: {e}")))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a dataset written by [`write_dataset`]. A missing file, a header
/// that does not match the feature schema, a row that breaks the record
/// invariants, or zero rows is `DataUnavailable`.
pub fn read_dataset(path: &Path) -> Result<Vec<MarketRecord>, DomainError> {
    if !path.exists() {
        return Err(DomainError::DataUnavailable(format!(
            "No dataset at {}. Run `smartval generate` first.",
            path.display()
        )));
    }
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DomainError::DataUnavailable(format!("Cannot open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| DomainError::DataUnavailable(format!("Unreadable header: {e}")))?;
    let expected: Vec<&str> = FEATURE_COLUMNS.iter().copied().chain([TARGET_COLUMN]).collect();
    if headers.iter().collect::<Vec<_>>() != expected {
        return Err(DomainError::DataUnavailable(format!(
            "Dataset columns {:?} do not match expected {:?}",
            headers, expected
        )));
    }

    let records = reader
        .deserialize::<MarketRecord>()
        .enumerate()
        .map(|(i, row)| {
            let bad_row = |e: String| DomainError::DataUnavailable(format!("Bad dataset row {}: {e}", i + 1));
            let record = row.map_err(|e| bad_row(e.to_string()))?;
            record.check().map_err(bad_row)?;
            Ok(record)
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    if records.is_empty() {
        return Err(DomainError::DataUnavailable(format!(
            "Dataset {} has no rows",
            path.display()
        )));
    }
    Ok(records)
}
