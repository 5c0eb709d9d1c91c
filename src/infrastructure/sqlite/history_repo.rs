use crate::domain::entities::valuation::ValuationRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::history_repository::HistoryRepository;
use crate::domain::values::brand_tier::BrandTier;
use crate::domain::values::condition::Condition;
use chrono::DateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use std::sync::Mutex;

const SELECT_COLUMNS: &str =
    "SELECT id, original_price, age, condition, brand_tier, estimated_price, created_at FROM valuation_logs";

pub struct SqliteHistoryRepo {
    conn: Mutex<Connection>,
}

impl SqliteHistoryRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<ValuationRecord, rusqlite::Error> {
        let age: i64 = row.get(2)?;
        let condition: i64 = row.get(3)?;
        let tier: i64 = row.get(4)?;
        let created_str: String = row.get(6)?;

        let invalid = |col: usize, msg: String| {
            rusqlite::Error::FromSqlConversionFailure(col, Type::Integer, msg.into())
        };

        Ok(ValuationRecord {
            id: Some(row.get(0)?),
            original_price: row.get(1)?,
            age: u32::try_from(age).map_err(|e| invalid(2, e.to_string()))?,
            condition: Condition::new(condition).map_err(|e| invalid(3, e))?,
            brand_tier: BrandTier::new(tier).map_err(|e| invalid(4, e))?,
            estimated_price: row.get(5)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
                })?,
        })
    }
}

impl HistoryRepository for SqliteHistoryRepo {
    fn append(&self, record: &ValuationRecord) -> Result<ValuationRecord, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        conn.execute(
            "INSERT INTO valuation_logs (original_price, age, condition, brand_tier, estimated_price, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.original_price,
                record.age,
                i64::from(record.condition),
                i64::from(record.brand_tier),
                record.estimated_price,
                record.created_at.to_rfc3339(),
            ],
        ).map_err(|e| DomainError::Persistence(format!("Failed to append valuation: {e}")))?;

        let mut stored = record.clone();
        stored.id = Some(conn.last_insert_rowid());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<ValuationRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        let records = stmt
            .query_map([], Self::row_to_record)
            .map_err(|e| DomainError::Persistence(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Persistence(format!("Corrupt history row: {e}")))?;
        Ok(records)
    }
}
