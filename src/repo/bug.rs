use rusqlite::Connection;
use crate::models::Bug;
use crate::repo::records::{count_records, load_records, replace_records};
use anyhow::Result;

pub struct BugRepo;

impl BugRepo {
    /// Replace the stored bug list with a new full snapshot
    pub fn replace_all(conn: &Connection, bugs: &[Bug]) -> Result<usize> {
        replace_records(conn, "bugs", bugs)
    }

    /// All bugs in collector order
    pub fn list_all(conn: &Connection) -> Result<Vec<Bug>> {
        load_records(conn, "bugs")
    }

    pub fn count(conn: &Connection) -> Result<usize> {
        count_records(conn, "bugs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::models::BugTask;

    #[test]
    fn test_replace_keeps_order_and_drops_previous() {
        let conn = DbConnection::connect_in_memory().unwrap();
        BugRepo::replace_all(&conn, &[Bug::new("old", vec![])]).unwrap();

        let bugs = vec![
            Bug::new("second import A", vec![BugTask::new("2.0").with_status("New")]),
            Bug::new("second import B", vec![]),
        ];
        assert_eq!(BugRepo::replace_all(&conn, &bugs).unwrap(), 2);

        let stored = BugRepo::list_all(&conn).unwrap();
        assert_eq!(stored, bugs);
        assert_eq!(BugRepo::count(&conn).unwrap(), 2);
    }
}
