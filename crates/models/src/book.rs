use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog entry. Immutable once created; there is no update path for books.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub published_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A field that is missing or blank after trimming rejects the whole request
/// with one message, so a whitespace-only value can never land as an empty
/// string.
pub fn validate_new(
    title: Option<&str>,
    author: Option<&str>,
    summary: Option<&str>,
) -> Result<(), crate::errors::ModelError> {
    let present = |v: Option<&str>| matches!(v, Some(s) if !s.trim().is_empty());
    if present(title) && present(author) && present(summary) {
        Ok(())
    } else {
        Err(crate::errors::ModelError::Validation(
            "please include the title, author and summary".into(),
        ))
    }
}
