//! Note/keyword repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD over `notes`.
//! - Own keyword-row replacement with atomic semantics.
//!
//! # Invariants
//! - All queries filter on `owner_id`; a note of another owner behaves as
//!   if it did not exist.
//! - Keyword order is preserved through the `position` column.
//! - Note create and keyword insert happen in one transaction.

use crate::db::DbError;
use crate::model::note::{Note, NoteId, NoteInput, NoteUpdate, NoteValidationError, OwnerId};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    title,
    content,
    created_at
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] NoteValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error("invalid persisted note data: {0}")]
    InvalidData(String),
    #[error("missing required table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("missing required column `{table}.{column}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Owner-scoped note store.
pub trait NoteRepository {
    /// Lists all notes of one owner ordered by `created_at ASC, id ASC`.
    fn list_notes(&self, owner_id: OwnerId) -> RepoResult<Vec<Note>>;
    /// Gets one note, `None` when missing or owned by someone else.
    fn get_note(&self, id: NoteId, owner_id: OwnerId) -> RepoResult<Option<Note>>;
    /// Persists a new note together with its extracted keywords.
    fn create_note(
        &mut self,
        input: &NoteInput,
        keywords: &[String],
        owner_id: OwnerId,
    ) -> RepoResult<Note>;
    /// Applies a partial update to title/content. Keywords are untouched.
    fn update_note(
        &mut self,
        id: NoteId,
        update: &NoteUpdate,
        owner_id: OwnerId,
    ) -> RepoResult<Note>;
    /// Replaces the full keyword list of one note.
    fn set_note_keywords(
        &mut self,
        id: NoteId,
        keywords: &[String],
        owner_id: OwnerId,
    ) -> RepoResult<()>;
    /// Deletes one note and its keyword rows.
    fn delete_note(&mut self, id: NoteId, owner_id: OwnerId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails when the schema has not been migrated.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self, owner_id: OwnerId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner_id])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let mut note = parse_note_row(row)?;
            note.keywords = load_keywords_for_note(self.conn, note.id)?;
            notes.push(note);
        }
        Ok(notes)
    }

    fn get_note(&self, id: NoteId, owner_id: OwnerId) -> RepoResult<Option<Note>> {
        fetch_note(self.conn, id, owner_id)
    }

    fn create_note(
        &mut self,
        input: &NoteInput,
        keywords: &[String],
        owner_id: OwnerId,
    ) -> RepoResult<Note> {
        input.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO notes (owner_id, title, content) VALUES (?1, ?2, ?3);",
            params![owner_id, input.title.as_str(), input.content.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        insert_keywords(&tx, id, keywords)?;
        tx.commit()?;

        fetch_note(self.conn, id, owner_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created note {id} missing in read-back"))
        })
    }

    fn update_note(
        &mut self,
        id: NoteId,
        update: &NoteUpdate,
        owner_id: OwnerId,
    ) -> RepoResult<Note> {
        update.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = COALESCE(?3, title),
                content = COALESCE(?4, content)
             WHERE id = ?1
               AND owner_id = ?2;",
            params![
                id,
                owner_id,
                update.title.as_deref(),
                update.content.as_deref()
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        fetch_note(self.conn, id, owner_id)?.ok_or(RepoError::NotFound(id))
    }

    fn set_note_keywords(
        &mut self,
        id: NoteId,
        keywords: &[String],
        owner_id: OwnerId,
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !note_exists_in_tx(&tx, id, owner_id)? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute("DELETE FROM note_keywords WHERE note_id = ?1;", [id])?;
        insert_keywords(&tx, id, keywords)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId, owner_id: OwnerId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner_id = ?2;",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn fetch_note(conn: &Connection, id: NoteId, owner_id: OwnerId) -> RepoResult<Option<Note>> {
    let note = conn
        .query_row(
            &format!("{NOTE_SELECT_SQL} WHERE id = ?1 AND owner_id = ?2;"),
            params![id, owner_id],
            |row| Ok(parse_note_row(row)),
        )
        .optional()?;

    match note {
        Some(parsed) => {
            let mut note = parsed?;
            note.keywords = load_keywords_for_note(conn, note.id)?;
            Ok(Some(note))
        }
        None => Ok(None),
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        let id: NoteId = row.get("id")?;
        return Err(RepoError::InvalidData(format!(
            "blank title for note {id} in notes.title"
        )));
    }

    Ok(Note {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        title,
        content: row.get("content")?,
        keywords: Vec::new(),
        created_at: row.get("created_at")?,
    })
}

fn load_keywords_for_note(conn: &Connection, note_id: NoteId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT keyword
         FROM note_keywords
         WHERE note_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([note_id])?;
    let mut keywords = Vec::new();
    while let Some(row) = rows.next()? {
        keywords.push(row.get(0)?);
    }
    Ok(keywords)
}

fn insert_keywords(tx: &Transaction<'_>, note_id: NoteId, keywords: &[String]) -> RepoResult<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO note_keywords (note_id, position, keyword) VALUES (?1, ?2, ?3);",
    )?;
    for (position, keyword) in keywords.iter().enumerate() {
        stmt.execute(params![note_id, position as i64, keyword.as_str()])?;
    }
    Ok(())
}

fn note_exists_in_tx(tx: &Transaction<'_>, id: NoteId, owner_id: OwnerId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM notes
            WHERE id = ?1
              AND owner_id = ?2
        );",
        params![id, owner_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["notes", "note_keywords"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["id", "owner_id", "title", "content", "created_at"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    for column in ["note_id", "position", "keyword"] {
        if !table_has_column(conn, "note_keywords", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "note_keywords",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
