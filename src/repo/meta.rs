use rusqlite::Connection;
use crate::models::ProjectMeta;
use crate::repo::records::{load_records, replace_records};
use anyhow::Result;

pub struct MetaRepo;

impl MetaRepo {
    /// Replace the stored project metadata documents
    pub fn replace_all(conn: &Connection, entries: &[ProjectMeta]) -> Result<usize> {
        replace_records(conn, "projects_meta", entries)
    }

    pub fn list_all(conn: &Connection) -> Result<Vec<ProjectMeta>> {
        load_records(conn, "projects_meta")
    }
}
