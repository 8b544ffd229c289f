use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::domain::{Note, NoteChanges};
use super::errors::NoteError;
use super::repository::NoteRepository;

pub struct SeaOrmNoteRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: models::note::Model) -> Note {
    Note {
        id: m.id,
        titre: m.titre,
        contenue: m.contenue,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn map_db_err(e: DbErr) -> NoteError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        NoteError::Conflict
    } else {
        NoteError::Repository(e.to_string())
    }
}

#[async_trait::async_trait]
impl NoteRepository for SeaOrmNoteRepository {
    async fn insert(
        &self,
        titre: &str,
        contenue: &str,
        now: DateTime<Utc>,
    ) -> Result<Note, NoteError> {
        let am = models::note::ActiveModel {
            id: Set(Uuid::new_v4()),
            titre: Set(titre.to_string()),
            contenue: Set(contenue.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let created = am.insert(&self.db).await.map_err(map_db_err)?;
        Ok(to_domain(created))
    }

    async fn find_all_desc(&self) -> Result<Vec<Note>, NoteError> {
        let rows = models::note::Entity::find()
            .order_by_desc(models::note::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| NoteError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn apply_changes(
        &self,
        id: Uuid,
        changes: &NoteChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Note>, NoteError> {
        let found = models::note::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| NoteError::Repository(e.to_string()))?;
        let Some(found) = found else { return Ok(None) };

        let mut am: models::note::ActiveModel = found.into();
        if let Some(titre) = &changes.titre {
            am.titre = Set(titre.clone());
        }
        if let Some(contenue) = &changes.contenue {
            am.contenue = Set(contenue.clone());
        }
        am.updated_at = Set(now.into());
        let updated = am.update(&self.db).await.map_err(map_db_err)?;
        Ok(Some(to_domain(updated)))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, NoteError> {
        let res = models::note::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| NoteError::Repository(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
