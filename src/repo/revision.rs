use rusqlite::{Connection, OptionalExtension};
use anyhow::{Context, Result};

/// Which collector output an import replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Bugs,
    Meta,
    Cards,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Bugs => "bugs",
            ImportKind::Meta => "meta",
            ImportKind::Cards => "cards",
        }
    }
}

/// Last import of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    pub kind: String,
    pub record_count: i64,
    pub revision: i64,
    pub imported_ts: i64,
}

/// Change revision of the stored snapshot.
///
/// Every import bumps the revision; `ping` bumps it without changing data.
/// Watchers compare revisions to decide whether to refetch.
pub struct RevisionRepo;

impl RevisionRepo {
    pub fn current(conn: &Connection) -> Result<i64> {
        conn.query_row(
            "SELECT revision FROM snapshot_revision WHERE id = 1",
            [],
            |row| row.get(0),
        )
        .context("Failed to read snapshot revision")
    }

    /// Increment the revision and return the new value
    pub fn bump(conn: &Connection) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "UPDATE snapshot_revision SET revision = revision + 1, modified_ts = ?1 WHERE id = 1",
            [now],
        )
        .context("Failed to bump snapshot revision")?;
        let revision = Self::current(conn)?;
        log::info!("Snapshot revision is now {}", revision);
        Ok(revision)
    }

    pub fn record_import(conn: &Connection, kind: ImportKind, record_count: usize, revision: i64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO import_log (kind, record_count, revision, imported_ts) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![kind.as_str(), record_count as i64, revision, now],
        )
        .with_context(|| format!("Failed to record {} import", kind.as_str()))?;
        Ok(())
    }

    /// Most recent import of any kind
    pub fn last_import(conn: &Connection) -> Result<Option<ImportRecord>> {
        let record = conn
            .query_row(
                "SELECT kind, record_count, revision, imported_ts FROM import_log
                 ORDER BY imported_ts DESC, id DESC LIMIT 1",
                [],
                |row| {
                    Ok(ImportRecord {
                        kind: row.get(0)?,
                        record_count: row.get(1)?,
                        revision: row.get(2)?,
                        imported_ts: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}
