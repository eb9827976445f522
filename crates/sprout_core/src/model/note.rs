//! Note records and write payloads.
//!
//! # Invariants
//! - `keywords` is generated server-side; callers never supply it.
//! - A note title is never blank.

use serde::{Deserialize, Serialize};

/// Store-assigned note identifier.
pub type NoteId = i64;

/// Identifier of the user a note belongs to.
pub type OwnerId = i64;

/// Persisted note as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub owner_id: OwnerId,
    pub title: String,
    /// Rich-text markup as produced by the editor.
    pub content: String,
    /// AI-extracted keywords in extraction order. Empty when extraction
    /// produced nothing or failed.
    pub keywords: Vec<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks caller-supplied fields before they reach the store.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update payload. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteUpdate {
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Returns true when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Validation failure for note payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteValidationError {
    #[error("note title must not be blank")]
    BlankTitle,
}

fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        Err(NoteValidationError::BlankTitle)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteInput, NoteUpdate, NoteValidationError};

    #[test]
    fn input_rejects_blank_title() {
        let err = NoteInput::new("   ", "body").validate().unwrap_err();
        assert_eq!(err, NoteValidationError::BlankTitle);
        assert!(NoteInput::new("Garden", "").validate().is_ok());
    }

    #[test]
    fn update_only_validates_present_title() {
        assert!(NoteUpdate::default().validate().is_ok());
        let update = NoteUpdate {
            title: Some(String::new()),
            content: None,
        };
        assert_eq!(update.validate(), Err(NoteValidationError::BlankTitle));
    }

    #[test]
    fn note_serializes_with_camel_case_fields() {
        let note = Note {
            id: 7,
            owner_id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            keywords: vec!["ideas".to_string()],
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["ownerId"], 1);
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["keywords"][0], "ideas");
    }
}
