use rusqlite::Connection;
use crate::dashboard::{Snapshot, SnapshotSource};
use crate::models::{Bug, Card, ProjectMeta};
use crate::repo::{BugRepo, CardRepo, ImportKind, MetaRepo, RevisionRepo};
use anyhow::{Context, Result};

/// Snapshot provider backed by the local database
pub struct SqliteSource<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteSource<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotSource for SqliteSource<'_> {
    fn fetch(&self) -> Result<Snapshot> {
        // One read transaction so the revision matches the rows
        let tx = self.conn.unchecked_transaction()
            .context("Failed to start snapshot read")?;
        let snapshot = Snapshot {
            revision: RevisionRepo::current(&tx)?,
            bugs: BugRepo::list_all(&tx)?,
            projects: MetaRepo::list_all(&tx)?,
            cards: CardRepo::list_all(&tx)?,
        };
        tx.commit()?;

        log::debug!(
            "Fetched snapshot revision {} ({} bugs, {} metadata entries, {} cards)",
            snapshot.revision,
            snapshot.bugs.len(),
            snapshot.projects.len(),
            snapshot.cards.len()
        );
        Ok(snapshot)
    }
}

/// Records parsed from one collector output file
#[derive(Debug, Clone)]
pub enum ImportBatch {
    Bugs(Vec<Bug>),
    Meta(Vec<ProjectMeta>),
    Cards(Vec<Card>),
}

impl ImportBatch {
    /// Parse collector JSON. An empty document means an empty collection.
    pub fn parse(kind: ImportKind, json: &str) -> Result<Self> {
        let json = if json.trim().is_empty() { "[]" } else { json };
        let batch = match kind {
            ImportKind::Bugs => ImportBatch::Bugs(serde_json::from_str(json).context("Invalid bug list JSON")?),
            ImportKind::Meta => ImportBatch::Meta(serde_json::from_str(json).context("Invalid metadata JSON")?),
            ImportKind::Cards => ImportBatch::Cards(serde_json::from_str(json).context("Invalid card list JSON")?),
        };
        Ok(batch)
    }

    pub fn kind(&self) -> ImportKind {
        match self {
            ImportBatch::Bugs(_) => ImportKind::Bugs,
            ImportBatch::Meta(_) => ImportKind::Meta,
            ImportBatch::Cards(_) => ImportKind::Cards,
        }
    }
}

/// Store a batch as the new full snapshot of its kind and bump the revision.
///
/// Returns the new revision.
pub fn import_batch(conn: &Connection, batch: &ImportBatch) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;
    let count = match batch {
        ImportBatch::Bugs(bugs) => BugRepo::replace_all(&tx, bugs)?,
        ImportBatch::Meta(entries) => MetaRepo::replace_all(&tx, entries)?,
        ImportBatch::Cards(cards) => CardRepo::replace_all(&tx, cards)?,
    };
    let revision = RevisionRepo::bump(&tx)?;
    RevisionRepo::record_import(&tx, batch.kind(), count, revision)?;
    tx.commit().context("Failed to commit import")?;
    Ok(revision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    #[test]
    fn test_import_then_fetch() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let bugs = ImportBatch::parse(
            ImportKind::Bugs,
            r#"[{"title": "a", "tasks": [{"status": "New", "milestone": "2.0"}]}]"#,
        )
        .unwrap();
        let meta = ImportBatch::parse(ImportKind::Meta, "").unwrap();

        assert_eq!(import_batch(&conn, &bugs).unwrap(), 1);
        assert_eq!(import_batch(&conn, &meta).unwrap(), 2);

        let snapshot = SqliteSource::new(&conn).fetch().unwrap();
        assert_eq!(snapshot.revision, 2);
        assert_eq!(snapshot.bugs.len(), 1);
        assert_eq!(snapshot.bugs[0].tasks[0].milestone, "2.0");
        assert!(snapshot.projects.is_empty());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(ImportBatch::parse(ImportKind::Cards, "{not json").is_err());
        assert!(ImportBatch::parse(ImportKind::Bugs, r#"{"title": "not a list"}"#).is_err());
    }
}
