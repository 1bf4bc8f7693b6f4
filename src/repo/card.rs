use rusqlite::Connection;
use crate::models::Card;
use crate::repo::records::{load_records, replace_records};
use anyhow::Result;

pub struct CardRepo;

impl CardRepo {
    /// Replace the stored cards (board entry included)
    pub fn replace_all(conn: &Connection, cards: &[Card]) -> Result<usize> {
        replace_records(conn, "cards", cards)
    }

    pub fn list_all(conn: &Connection) -> Result<Vec<Card>> {
        load_records(conn, "cards")
    }
}
