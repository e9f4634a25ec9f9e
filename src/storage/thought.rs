//! Thought storage: upsert, delete, and load thoughts.

use jiff::Timestamp;
use rusqlite::Connection;
use uuid::Uuid;

use crate::model::Thought;

use super::{Result, Storage, StorageError};

impl Storage {
    /// Inserts or replaces a thought.
    ///
    /// A replaced thought keeps its original position in the sermon's
    /// thought list.
    pub fn update_thought(&self, sermon_id: Uuid, thought: &Thought) -> Result<()> {
        let conn = self.open_db(sermon_id)?;
        upsert(&conn, thought)?;
        tracing::debug!(sermon = %sermon_id, thought = %thought.id, "updated thought");
        Ok(())
    }

    /// Deletes a thought. Returns `false` if it wasn't stored.
    ///
    /// The structure is left as is; callers remove the id from it
    /// separately, and a stale id is dropped on the next load anyway.
    pub fn delete_thought(&self, sermon_id: Uuid, thought_id: &str) -> Result<bool> {
        let conn = self.open_db(sermon_id)?;
        let rows = conn.execute("DELETE FROM thought WHERE id = ?1", [thought_id])?;
        Ok(rows > 0)
    }
}

/// Upsert without moving the row, so insertion order survives edits.
pub(super) fn upsert(conn: &Connection, thought: &Thought) -> Result<()> {
    conn.execute(
        "INSERT INTO thought (id, text, tags, date, outline_point_id)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
             text = excluded.text,
             tags = excluded.tags,
             date = excluded.date,
             outline_point_id = excluded.outline_point_id",
        rusqlite::params![
            &thought.id,
            &thought.text,
            serde_json::to_string(&thought.tags)?,
            thought.date.to_string(),
            &thought.outline_point_id,
        ],
    )?;
    Ok(())
}

/// Loads every thought in insertion order.
pub(super) fn load_all(conn: &Connection) -> Result<Vec<Thought>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, tags, date, outline_point_id FROM thought ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;

    let mut thoughts = Vec::new();
    for row in rows {
        let (id, text, tags_json, date_str, outline_point_id) = row?;
        let date = date_str
            .parse::<Timestamp>()
            .map_err(|e| StorageError::Corrupt(format!("invalid date on thought {id}: {e}")))?;
        thoughts.push(Thought {
            tags: serde_json::from_str(&tags_json)?,
            id,
            text,
            date,
            outline_point_id,
        });
    }
    Ok(thoughts)
}
