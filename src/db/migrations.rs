use rusqlite::{Connection, Result};
use std::collections::HashMap;

/// Current database schema version
const CURRENT_VERSION: u32 = 2;

/// Migration system for managing database schema versions
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the database with the current schema
    /// This creates the schema_version table and applies all migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version = Self::get_version(conn)?;
        for version in (current_version + 1)..=CURRENT_VERSION {
            Self::apply_migration(conn, version)?;
        }

        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        if let Some(migration) = migrations.get(&version) {
            let tx = conn.unchecked_transaction()?;
            migration(&tx)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )?;
            tx.commit()?;
            log::debug!("Applied schema migration v{}", version);
            Ok(())
        } else {
            Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_MISUSE),
                Some(format!("No migration found for version {}", version)),
            ))
        }
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> {
    let mut migrations: HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations.insert(2, migration_v2);
    migrations
}

/// Migration v1: snapshot tables
///
/// Each collector output is stored as JSON payload rows in arrival order.
/// Imports replace a whole table; the revision row is bumped with every import
/// so readers can tell that the data changed.
fn migration_v1(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE bugs (
            id INTEGER PRIMARY KEY,
            position INTEGER NOT NULL,
            payload TEXT NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "CREATE TABLE projects_meta (
            id INTEGER PRIMARY KEY,
            position INTEGER NOT NULL,
            payload TEXT NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "CREATE TABLE cards (
            id INTEGER PRIMARY KEY,
            position INTEGER NOT NULL,
            payload TEXT NOT NULL
        )",
        [],
    )?;

    // Single-row change counter
    tx.execute(
        "CREATE TABLE snapshot_revision (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            revision INTEGER NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "INSERT INTO snapshot_revision (id, revision, modified_ts) VALUES (1, 0, 0)",
        [],
    )?;

    Ok(())
}

/// Migration v2: import log
fn migration_v2(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE import_log (
            id INTEGER PRIMARY KEY,
            kind TEXT NOT NULL CHECK(kind IN ('bugs','meta','cards')),
            record_count INTEGER NOT NULL,
            revision INTEGER NOT NULL,
            imported_ts INTEGER NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "CREATE INDEX idx_import_log_kind ON import_log(kind, imported_ts)",
        [],
    )?;
    Ok(())
}
