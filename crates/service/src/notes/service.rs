use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CreateNote, Note, NoteChanges};
use super::errors::NoteError;
use super::repository::NoteRepository;

/// Notes service independent of the web framework.
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Note>, NoteError> {
        self.repo.find_all_desc().await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateNote) -> Result<Note, NoteError> {
        let (titre, contenue) = match (&input.titre, &input.contenue) {
            (Some(t), Some(c)) if !t.is_empty() && !c.is_empty() => (t, c),
            _ => {
                return Err(NoteError::Validation(
                    "titre and contenue are required to create a note".into(),
                ))
            }
        };
        models::note::validate_titre(titre).map_err(|e| NoteError::Validation(e.to_string()))?;
        models::note::validate_contenue(contenue)
            .map_err(|e| NoteError::Validation(e.to_string()))?;

        let note = self.repo.insert(titre, contenue, Utc::now()).await?;
        info!(note_id = %note.id, "note_created");
        Ok(note)
    }

    /// Shared by PUT and PATCH; PATCH additionally refuses an empty body.
    /// Validation re-runs on the provided fields only.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: Uuid,
        changes: NoteChanges,
        require_fields: bool,
    ) -> Result<Note, NoteError> {
        if require_fields && changes.is_empty() {
            return Err(NoteError::Validation(
                "please provide at least one field for the partial update".into(),
            ));
        }
        if let Some(titre) = &changes.titre {
            if titre.is_empty() {
                return Err(NoteError::Validation("titre cannot be empty".into()));
            }
            models::note::validate_titre(titre)
                .map_err(|e| NoteError::Validation(e.to_string()))?;
        }
        if let Some(contenue) = &changes.contenue {
            if contenue.is_empty() {
                return Err(NoteError::Validation("contenue cannot be empty".into()));
            }
            models::note::validate_contenue(contenue)
                .map_err(|e| NoteError::Validation(e.to_string()))?;
        }

        match self.repo.apply_changes(id, &changes, Utc::now()).await? {
            Some(note) => Ok(note),
            None => Err(NoteError::NotFound),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), NoteError> {
        if self.repo.delete_by_id(id).await? {
            info!(note_id = %id, "note_deleted");
            Ok(())
        } else {
            Err(NoteError::NotFound)
        }
    }
}
