//! Sermon storage: create, load, list, and update structure and outline.

use std::collections::HashSet;
use std::{fs, io};

use jiff::Timestamp;
use rusqlite::{Connection, Transaction};
use uuid::Uuid;

use crate::model::{Outline, OutlinePoint, RawStructure, Section, Sermon, Structure};
use crate::order::normalize_structure;

use super::{Result, Storage, StorageError, thought};

impl Storage {
    /// Creates a new sermon file holding the whole snapshot.
    ///
    /// Of thoughts sharing an id, only the first is stored. If any write
    /// fails, the file is removed so the id can be created again.
    pub fn create_sermon(&self, sermon: &Sermon) -> Result<()> {
        let conn = self.create_db(sermon.id)?;
        if let Err(e) = write_snapshot(conn, sermon) {
            self.discard_db(sermon.id);
            return Err(e);
        }
        tracing::debug!(sermon = %sermon.id, thoughts = sermon.thoughts.len(), "created sermon");
        Ok(())
    }

    /// Loads a sermon snapshot.
    ///
    /// The stored structure goes through normalization on the way out; an
    /// unparseable column is reported as [`StorageError::Structure`].
    pub fn load_sermon(&self, id: Uuid) -> Result<Sermon> {
        let conn = self.open_db(id)?;
        load_sermon_from(&conn)
    }

    /// Lists all sermons by reading each `.sqlite` file in the storage root.
    ///
    /// Unreadable or malformed files are skipped with a warning.
    pub fn list_sermons(&self) -> Result<Vec<Sermon>> {
        let mut sermons = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(sermons),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("sqlite") {
                continue;
            }
            match Connection::open(&path)
                .map_err(StorageError::from)
                .and_then(|conn| load_sermon_from(&conn))
            {
                Ok(s) => sermons.push(s),
                Err(e) => tracing::warn!(path = %path.display(), "skipping unreadable sermon: {e}"),
            }
        }
        sermons.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(sermons)
    }

    /// Replaces the stored structure.
    pub fn update_structure(&self, sermon_id: Uuid, structure: &Structure) -> Result<()> {
        let conn = self.open_db(sermon_id)?;
        let rows = conn.execute(
            "UPDATE sermon SET structure = ?1 WHERE id = ?2",
            rusqlite::params![serde_json::to_string(structure)?, sermon_id.to_string()],
        )?;
        if rows == 0 {
            return Err(StorageError::SermonNotFound(sermon_id));
        }
        tracing::debug!(sermon = %sermon_id, ids = structure.len(), "updated structure");
        Ok(())
    }

    /// Replaces the whole outline.
    pub fn update_outline(&self, sermon_id: Uuid, outline: &Outline) -> Result<()> {
        let mut conn = self.open_db(sermon_id)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM outline_point", [])?;
        write_outline(&tx, outline)?;
        tx.commit()?;
        Ok(())
    }
}

/// Writes a whole snapshot into a fresh database. Consumes the connection
/// so the file is closed by the time the caller sees an error.
fn write_snapshot(mut conn: Connection, sermon: &Sermon) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO sermon (id, title, created_at, structure) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            sermon.id.to_string(),
            &sermon.title,
            sermon.created_at.to_string(),
            serde_json::to_string(&sermon.structure)?,
        ],
    )?;
    write_outline(&tx, &sermon.outline)?;

    let mut seen = HashSet::new();
    for t in &sermon.thoughts {
        if !seen.insert(t.id.as_str()) {
            tracing::debug!(sermon = %sermon.id, thought = %t.id, "skipping duplicate thought id");
            continue;
        }
        thought::upsert(&tx, t)?;
    }
    tx.commit()?;
    Ok(())
}

fn write_outline(tx: &Transaction<'_>, outline: &Outline) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO outline_point (id, section, position, text) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for section in Section::OUTLINED {
        for (position, point) in outline.points(section).iter().enumerate() {
            stmt.execute(rusqlite::params![
                &point.id,
                section.as_str(),
                i64::try_from(position).map_err(|e| StorageError::Corrupt(e.to_string()))?,
                &point.text,
            ])?;
        }
    }
    Ok(())
}

/// Reads the full snapshot from an open connection.
fn load_sermon_from(conn: &Connection) -> Result<Sermon> {
    let (id_str, title, created_at_str, structure_json) = conn.query_row(
        "SELECT id, title, created_at, structure FROM sermon LIMIT 1",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    )?;

    let id = id_str
        .parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid sermon id: {e}")))?;
    let created_at = created_at_str
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid created_at: {e}")))?;
    let structure = normalize_structure(Some(&RawStructure::Encoded(structure_json)))?;

    Ok(Sermon {
        id,
        title,
        created_at,
        thoughts: thought::load_all(conn)?,
        outline: load_outline(conn)?,
        structure,
    })
}

fn load_outline(conn: &Connection) -> Result<Outline> {
    let mut stmt =
        conn.prepare("SELECT id, section, text FROM outline_point ORDER BY position, rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut outline = Outline::default();
    for row in rows {
        let (id, section, text) = row?;
        let points = match section.as_str() {
            "introduction" => &mut outline.introduction,
            "main" => &mut outline.main,
            "conclusion" => &mut outline.conclusion,
            other => {
                return Err(StorageError::Corrupt(format!(
                    "unknown outline section: {other}"
                )));
            }
        };
        points.push(OutlinePoint { id, text });
    }
    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::Thought;
    use crate::order::fixtures::{ids, point, pointed, tagged};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("sermons")).unwrap();
        (dir, storage)
    }

    fn sample_sermon() -> Sermon {
        let mut sermon = Sermon::new("The prodigal son");
        sermon.outline = Outline {
            introduction: vec![point("p1")],
            main: vec![point("p2"), point("p4")],
            conclusion: vec![],
        };
        sermon.thoughts = vec![
            pointed("2", 9, "p2"),
            tagged("1", 8, &["Вступ", "grace"]),
            pointed("4", 10, "p4"),
        ];
        sermon.structure = Structure {
            introduction: ids(&["1"]),
            main: ids(&["2", "4"]),
            ..Structure::default()
        };
        sermon
    }

    #[test]
    fn create_and_load_sermon() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();

        storage.create_sermon(&sermon).unwrap();
        let loaded = storage.load_sermon(sermon.id).unwrap();

        assert_eq!(loaded, sermon);
    }

    #[test]
    fn thoughts_load_in_insertion_order() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();
        storage.create_sermon(&sermon).unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        let order: Vec<&str> = loaded.thoughts.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, ["2", "1", "4"]);
    }

    #[test]
    fn create_duplicate_sermon_fails() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();

        storage.create_sermon(&sermon).unwrap();
        let err = storage.create_sermon(&sermon).unwrap_err();

        assert!(matches!(err, StorageError::SermonAlreadyExists(_)));
    }

    #[test]
    fn load_nonexistent_sermon_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_sermon(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, StorageError::SermonNotFound(_)));
    }

    #[test]
    fn update_structure_round_trips() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();
        storage.create_sermon(&sermon).unwrap();

        let structure = Structure {
            main: ids(&["4", "2"]),
            ambiguous: ids(&["1"]),
            ..Structure::default()
        };
        storage.update_structure(sermon.id, &structure).unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        assert_eq!(loaded.structure, structure);
    }

    #[test]
    fn update_structure_nonexistent_sermon_fails() {
        let (_dir, storage) = test_storage();
        let err = storage
            .update_structure(Uuid::new_v4(), &Structure::default())
            .unwrap_err();

        assert!(matches!(err, StorageError::SermonNotFound(_)));
    }

    #[test]
    fn corrupt_structure_column_is_reported() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();
        storage.create_sermon(&sermon).unwrap();

        let conn = storage.open_db(sermon.id).unwrap();
        conn.execute("UPDATE sermon SET structure = '{not json'", [])
            .unwrap();

        let err = storage.load_sermon(sermon.id).unwrap_err();
        assert!(matches!(err, StorageError::Structure(_)));
    }

    #[test]
    fn duplicate_ids_in_stored_structure_are_normalized_on_load() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();
        storage.create_sermon(&sermon).unwrap();

        let conn = storage.open_db(sermon.id).unwrap();
        conn.execute(
            r#"UPDATE sermon SET structure = '{"main":["2","2",null,"4"],"conclusion":"x"}'"#,
            [],
        )
        .unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        assert_eq!(loaded.structure.main, ids(&["2", "4"]));
        assert!(loaded.structure.conclusion.is_empty());
    }

    #[test]
    fn update_outline_replaces_points() {
        let (_dir, storage) = test_storage();
        let sermon = sample_sermon();
        storage.create_sermon(&sermon).unwrap();

        let outline = Outline {
            conclusion: vec![point("p9"), point("p8")],
            ..Outline::default()
        };
        storage.update_outline(sermon.id, &outline).unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        assert_eq!(loaded.outline, outline);
    }

    #[test]
    fn list_sermons_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.list_sermons().unwrap().is_empty());
    }

    #[test]
    fn list_sermons_sorted_by_created_at_skipping_junk() {
        let (dir, storage) = test_storage();

        let mut s1 = Sermon::new("First");
        s1.created_at = Timestamp::new(1_000_000_000, 0).unwrap();
        let mut s2 = Sermon::new("Second");
        s2.created_at = Timestamp::new(2_000_000_000, 0).unwrap();

        // Create in reverse order to verify sorting.
        storage.create_sermon(&s2).unwrap();
        storage.create_sermon(&s1).unwrap();
        fs::write(dir.path().join("sermons").join("junk.sqlite"), "not a db").unwrap();
        fs::write(dir.path().join("sermons").join("notes.txt"), "ignored").unwrap();

        let sermons = storage.list_sermons().unwrap();
        let titles: Vec<&str> = sermons.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn same_point_id_in_two_sections_round_trips() {
        let (_dir, storage) = test_storage();
        let mut sermon = Sermon::new("Shared ids");
        sermon.outline = Outline {
            introduction: vec![point("p1")],
            main: vec![point("p1")],
            conclusion: vec![],
        };
        storage.create_sermon(&sermon).unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        assert_eq!(loaded.outline, sermon.outline);

        storage.update_outline(sermon.id, &sermon.outline).unwrap();
        assert_eq!(storage.load_sermon(sermon.id).unwrap().outline, sermon.outline);
    }

    #[test]
    fn failed_create_leaves_no_file() {
        let (_dir, storage) = test_storage();
        let mut sermon = Sermon::new("Broken outline");
        sermon.outline.main = vec![point("p1"), point("p1")];

        let err = storage.create_sermon(&sermon).unwrap_err();
        assert!(matches!(err, StorageError::Sqlite(_)));
        assert!(!storage.db_path(sermon.id).exists());
        assert!(storage.list_sermons().unwrap().is_empty());

        sermon.outline.main.pop();
        storage.create_sermon(&sermon).unwrap();
        assert_eq!(storage.load_sermon(sermon.id).unwrap().outline.main.len(), 1);
    }

    #[test]
    fn duplicate_thought_ids_keep_the_first() {
        let (_dir, storage) = test_storage();
        let mut sermon = Sermon::new("Duplicates");
        let mut second = pointed("7", 11, "p2");
        second.text = "later copy".into();
        sermon.thoughts = vec![tagged("7", 9, &["Conclusion"]), second, tagged("8", 10, &[])];
        storage.create_sermon(&sermon).unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        assert_eq!(loaded.thoughts, vec![sermon.thoughts[0].clone(), sermon.thoughts[2].clone()]);
    }

    #[test]
    fn thought_fields_survive_storage() {
        let (_dir, storage) = test_storage();
        let mut sermon = Sermon::new("Fields");
        sermon.thoughts = vec![Thought {
            id: "t".into(),
            text: "Grace is unearned".into(),
            tags: vec!["Main Part".into(), "grace".into()],
            date: "2024-05-01T12:30:00Z".parse().unwrap(),
            outline_point_id: None,
        }];
        storage.create_sermon(&sermon).unwrap();

        let loaded = storage.load_sermon(sermon.id).unwrap();
        assert_eq!(loaded.thoughts, sermon.thoughts);
    }
}
