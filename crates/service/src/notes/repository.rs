use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{Note, NoteChanges};
use super::errors::NoteError;

/// Repository abstraction for note persistence. Implementations surface the
/// store-level unique-title violation as `NoteError::Conflict`.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(
        &self,
        titre: &str,
        contenue: &str,
        now: DateTime<Utc>,
    ) -> Result<Note, NoteError>;

    /// All notes, newest first.
    async fn find_all_desc(&self) -> Result<Vec<Note>, NoteError>;

    /// Apply `changes` to the note with `id`, stamping `updated_at = now`.
    /// Returns `None` when no note has that id.
    async fn apply_changes(
        &self,
        id: Uuid,
        changes: &NoteChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Note>, NoteError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, NoteError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockNoteRepository {
        notes: Mutex<Vec<Note>>,
    }

    impl MockNoteRepository {
        pub fn snapshot(&self) -> Vec<Note> {
            self.notes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NoteRepository for MockNoteRepository {
        async fn insert(
            &self,
            titre: &str,
            contenue: &str,
            now: DateTime<Utc>,
        ) -> Result<Note, NoteError> {
            let mut notes = self.notes.lock().unwrap();
            if notes.iter().any(|n| n.titre == titre) {
                return Err(NoteError::Conflict);
            }
            let note = Note {
                id: Uuid::new_v4(),
                titre: titre.to_string(),
                contenue: contenue.to_string(),
                created_at: now,
                updated_at: now,
            };
            notes.push(note.clone());
            Ok(note)
        }

        async fn find_all_desc(&self) -> Result<Vec<Note>, NoteError> {
            let mut notes = self.notes.lock().unwrap().clone();
            notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(notes)
        }

        async fn apply_changes(
            &self,
            id: Uuid,
            changes: &NoteChanges,
            now: DateTime<Utc>,
        ) -> Result<Option<Note>, NoteError> {
            let mut notes = self.notes.lock().unwrap();
            if let Some(titre) = &changes.titre {
                if notes.iter().any(|n| n.id != id && &n.titre == titre) {
                    return Err(NoteError::Conflict);
                }
            }
            let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
                return Ok(None);
            };
            if let Some(titre) = &changes.titre {
                note.titre = titre.clone();
            }
            if let Some(contenue) = &changes.contenue {
                note.contenue = contenue.clone();
            }
            note.updated_at = now;
            Ok(Some(note.clone()))
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<bool, NoteError> {
            let mut notes = self.notes.lock().unwrap();
            let before = notes.len();
            notes.retain(|n| n.id != id);
            Ok(notes.len() < before)
        }
    }
}
