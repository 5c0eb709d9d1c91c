use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS valuation_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            original_price REAL NOT NULL,
            age INTEGER NOT NULL,
            condition INTEGER NOT NULL,
            brand_tier INTEGER NOT NULL,
            estimated_price REAL NOT NULL,
            created_at TEXT NOT NULL
        );
        "
    ).map_err(|e| DomainError::Persistence(format!("Migration failed: {e}")))
}
