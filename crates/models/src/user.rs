use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 6;

/// Registered account. The password column holds the value exactly as it was
/// submitted; hashing it would make every existing record unverifiable, so the
/// login contract keeps plain-text comparison (flagged for the integrator in
/// DESIGN.md).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Registration rules: alphanumeric, 3-30 characters. First violation wins.
pub fn validate_username(username: Option<&str>) -> Result<(), ModelError> {
    let username = match username {
        Some(u) if !u.is_empty() => u,
        _ => return Err(ModelError::Validation("username is required".into())),
    };
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ModelError::Validation(
            "username must only contain alphanumeric characters".into(),
        ));
    }
    let len = username.chars().count();
    if len < USERNAME_MIN {
        return Err(ModelError::Validation(format!(
            "username must be at least {USERNAME_MIN} characters"
        )));
    }
    if len > USERNAME_MAX {
        return Err(ModelError::Validation(format!(
            "username cannot exceed {USERNAME_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_password(password: Option<&str>) -> Result<(), ModelError> {
    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ModelError::Validation("password is required".into())),
    };
    if password.chars().count() < PASSWORD_MIN {
        return Err(ModelError::Validation(format!(
            "password must be at least {PASSWORD_MIN} characters"
        )));
    }
    Ok(())
}
