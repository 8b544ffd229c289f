use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const TITRE_MAX: usize = 100;
pub const CONTENUE_MAX: usize = 1000;

/// Note document. `titre` carries a store-level unique constraint; violations
/// surface as a conflict. `updated_at` is set explicitly by every mutating
/// operation rather than by a save hook.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "note")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub titre: String,
    #[sea_orm(column_type = "Text")]
    pub contenue: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_titre(titre: &str) -> Result<(), ModelError> {
    if titre.chars().count() > TITRE_MAX {
        return Err(ModelError::Validation(format!(
            "titre cannot exceed {TITRE_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_contenue(contenue: &str) -> Result<(), ModelError> {
    if contenue.chars().count() > CONTENUE_MAX {
        return Err(ModelError::Validation(format!(
            "contenue cannot exceed {CONTENUE_MAX} characters"
        )));
    }
    Ok(())
}
