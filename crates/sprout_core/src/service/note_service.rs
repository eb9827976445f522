//! Note use-case service.
//!
//! # Responsibility
//! - Create notes with AI-extracted keywords.
//! - Apply partial updates under an explicit keyword refresh policy.
//! - Project the owner's note collection into the keyword graph.
//!
//! # Invariants
//! - Keyword extraction failure never fails a create or update; the note
//!   is stored with empty keywords instead.
//! - Input is validated before the extractor is called.
//! - With `KeywordRefresh::Preserve` an update never touches keywords.

use crate::graph::{build_graph_with, GraphStrategy, KeywordGraph};
use crate::keywords::{extract_or_empty, extraction_text, KeywordExtractor};
use crate::model::note::{Note, NoteId, NoteInput, NoteUpdate, NoteValidationError, OwnerId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Service error for note use-cases.
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    Validation(#[from] NoteValidationError),
    /// Missing note, or a note owned by someone else.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// What happens to stored keywords when a note is edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordRefresh {
    /// Keywords stay as extracted at creation, even if the text changes.
    #[default]
    Preserve,
    /// Re-extract whenever title or content changes.
    RecomputeOnEdit,
}

impl Display for KeywordRefresh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preserve => f.write_str("preserve"),
            Self::RecomputeOnEdit => f.write_str("recompute"),
        }
    }
}

impl FromStr for KeywordRefresh {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "recompute" | "recompute_on_edit" => Ok(Self::RecomputeOnEdit),
            other => Err(format!(
                "unsupported keyword refresh policy `{other}`; expected preserve|recompute"
            )),
        }
    }
}

/// Welcome notes planted for an owner with an empty garden.
const WELCOME_NOTES: &[(&str, &str, &[&str])] = &[
    (
        "Welcome to Sprout",
        "This is a note-taking app that connects your ideas automatically.",
        &["sprout", "note-taking", "ideas"],
    ),
    (
        "Project Ideas",
        "1. A gardening app\n2. A recipe organizer\n3. Sprout: An app for connecting ideas.",
        &["project", "ideas", "sprout", "app"],
    ),
    (
        "Gardening Tips",
        "Sprouts need water and sunlight. Gardening is relaxing.",
        &["gardening", "sprouts", "water", "sunlight"],
    ),
];

/// Note service facade over a store and a keyword extractor.
pub struct NoteService<R: NoteRepository, E: KeywordExtractor> {
    repo: R,
    extractor: E,
    keyword_refresh: KeywordRefresh,
}

impl<R: NoteRepository, E: KeywordExtractor> NoteService<R, E> {
    pub fn new(repo: R, extractor: E) -> Self {
        Self {
            repo,
            extractor,
            keyword_refresh: KeywordRefresh::default(),
        }
    }

    pub fn with_keyword_refresh(mut self, policy: KeywordRefresh) -> Self {
        self.keyword_refresh = policy;
        self
    }

    pub fn keyword_refresh(&self) -> KeywordRefresh {
        self.keyword_refresh
    }

    /// Creates a note, tagging it with extracted keywords.
    ///
    /// Markup is stripped before extraction; an extraction failure stores
    /// the note with no keywords.
    pub async fn create_note(&mut self, input: NoteInput, owner_id: OwnerId) -> ServiceResult<Note> {
        input.validate()?;

        let text = extraction_text(&input.title, &input.content);
        let keywords = extract_or_empty(&self.extractor, &text).await;
        let note = self.repo.create_note(&input, &keywords, owner_id)?;

        info!(
            "event=note_create module=service status=ok note_id={} owner_id={} keyword_count={}",
            note.id,
            owner_id,
            note.keywords.len()
        );
        Ok(note)
    }

    /// Applies a partial update. Keyword handling follows the configured
    /// [`KeywordRefresh`] policy.
    pub async fn update_note(
        &mut self,
        id: NoteId,
        update: NoteUpdate,
        owner_id: OwnerId,
    ) -> ServiceResult<Note> {
        update.validate()?;

        let updated = self.repo.update_note(id, &update, owner_id)?;
        if self.keyword_refresh == KeywordRefresh::Preserve || update.is_empty() {
            info!(
                "event=note_update module=service status=ok note_id={id} owner_id={owner_id} keywords=preserved"
            );
            return Ok(updated);
        }

        let text = extraction_text(&updated.title, &updated.content);
        let keywords = extract_or_empty(&self.extractor, &text).await;
        self.repo.set_note_keywords(id, &keywords, owner_id)?;
        info!(
            "event=note_update module=service status=ok note_id={id} owner_id={owner_id} keywords=recomputed keyword_count={}",
            keywords.len()
        );

        self.repo
            .get_note(id, owner_id)?
            .ok_or(NoteServiceError::NoteNotFound(id))
    }

    pub fn get_note(&self, id: NoteId, owner_id: OwnerId) -> ServiceResult<Option<Note>> {
        Ok(self.repo.get_note(id, owner_id)?)
    }

    pub fn list_notes(&self, owner_id: OwnerId) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.list_notes(owner_id)?)
    }

    pub fn delete_note(&mut self, id: NoteId, owner_id: OwnerId) -> ServiceResult<()> {
        self.repo.delete_note(id, owner_id)?;
        info!("event=note_delete module=service status=ok note_id={id} owner_id={owner_id}");
        Ok(())
    }

    /// Builds the keyword graph over the owner's current notes.
    pub fn graph(&self, owner_id: OwnerId, strategy: GraphStrategy) -> ServiceResult<KeywordGraph> {
        let notes = self.repo.list_notes(owner_id)?;
        Ok(build_graph_with(&notes, strategy))
    }

    /// Plants the welcome notes when the owner has none.
    ///
    /// Returns the notes created, empty when the owner already had notes.
    /// Seeded keywords are fixed; the extractor is not called.
    pub fn seed_if_empty(&mut self, owner_id: OwnerId) -> ServiceResult<Vec<Note>> {
        if !self.repo.list_notes(owner_id)?.is_empty() {
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(WELCOME_NOTES.len());
        for (title, content, keywords) in WELCOME_NOTES {
            let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
            let input = NoteInput::new(*title, *content);
            created.push(self.repo.create_note(&input, &keywords, owner_id)?);
        }

        info!(
            "event=note_seed module=service status=ok owner_id={owner_id} count={}",
            created.len()
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::KeywordRefresh;

    #[test]
    fn keyword_refresh_parses_and_displays() {
        assert_eq!(
            "Recompute".parse::<KeywordRefresh>(),
            Ok(KeywordRefresh::RecomputeOnEdit)
        );
        assert_eq!(KeywordRefresh::Preserve.to_string(), "preserve");
        assert!("sometimes".parse::<KeywordRefresh>().is_err());
    }
}
