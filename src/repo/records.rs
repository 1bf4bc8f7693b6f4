// Shared storage for JSON payload tables (bugs, projects_meta, cards)

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use anyhow::{Context, Result};

/// Replace every row of `table` with `records`, keeping their order.
///
/// Callers wrap this in a transaction together with the revision bump.
pub(crate) fn replace_records<T: Serialize>(conn: &Connection, table: &str, records: &[T]) -> Result<usize> {
    conn.execute(&format!("DELETE FROM {}", table), [])
        .with_context(|| format!("Failed to clear {}", table))?;

    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {} (position, payload) VALUES (?1, ?2)",
        table
    ))?;
    for (position, record) in records.iter().enumerate() {
        let payload = serde_json::to_string(record)?;
        stmt.execute(rusqlite::params![position as i64, payload])
            .with_context(|| format!("Failed to store {} row {}", table, position))?;
    }

    Ok(records.len())
}

/// Load all rows of `table` in stored order.
pub(crate) fn load_records<T: DeserializeOwned>(conn: &Connection, table: &str) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT payload FROM {} ORDER BY position",
        table
    ))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut records = Vec::new();
    for (position, row) in rows.enumerate() {
        let payload = row?;
        let record = serde_json::from_str(&payload)
            .with_context(|| format!("Corrupt {} row {}", table, position))?;
        records.push(record);
    }
    Ok(records)
}

pub(crate) fn count_records(conn: &Connection, table: &str) -> Result<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
    Ok(count as usize)
}
