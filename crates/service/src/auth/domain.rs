use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthError;

/// Domain user (business view). Carries the stored password for the login
/// comparison; never serialize this type to a client.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing user view with the password field excluded.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<AuthUser> for PublicUser {
    fn from(u: AuthUser) -> Self {
        Self {
            id: u.id,
            username: u.username,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Registration input; optional fields so missing keys reach the validator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Username,
    CreatedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Username => "username",
            SortBy::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Raw query string of `GET /users`, validated by [`resolve_users_query`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ListUsersParams {
    pub page: u64,
    pub limit: u64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Schema check with defaults, first violation reported. Unlike the book
/// listing there is no silent coercion: a malformed value is a 400.
pub fn resolve_users_query(query: &UsersQuery) -> Result<ListUsersParams, AuthError> {
    let page = match &query.page {
        None => 1,
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| {
                AuthError::Validation("page must be an integer greater than or equal to 1".into())
            })?,
    };
    let limit = match &query.limit {
        None => 10,
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|l| (1..=100).contains(l))
            .ok_or_else(|| {
                AuthError::Validation("limit must be an integer between 1 and 100".into())
            })?,
    };
    let sort_by = match query.sort_by.as_deref() {
        None | Some("createdAt") => SortBy::CreatedAt,
        Some("username") => SortBy::Username,
        Some(_) => {
            return Err(AuthError::Validation(
                "sortBy must be one of username, createdAt".into(),
            ))
        }
    };
    let sort_order = match query.sort_order.as_deref() {
        None | Some("asc") => SortOrder::Asc,
        Some("desc") => SortOrder::Desc,
        Some(_) => {
            return Err(AuthError::Validation("sortOrder must be one of asc, desc".into()))
        }
    };
    Ok(ListUsersParams { page, limit, sort_by, sort_order })
}

/// One page of the user listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<PublicUser>,
    pub pagination: UsersPageMeta,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPageMeta {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub items_per_page: u64,
    pub sort_by: &'static str,
    pub sort_order: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_query_defaults() {
        let params = resolve_users_query(&UsersQuery::default()).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort_by, SortBy::CreatedAt);
        assert_eq!(params.sort_order, SortOrder::Asc);
    }

    #[test]
    fn users_query_rejects_out_of_range_values() {
        let q = UsersQuery { page: Some("0".into()), ..Default::default() };
        assert!(resolve_users_query(&q).is_err());

        let q = UsersQuery { limit: Some("101".into()), ..Default::default() };
        assert!(resolve_users_query(&q).is_err());

        let q = UsersQuery { page: Some("abc".into()), ..Default::default() };
        assert!(resolve_users_query(&q).is_err());

        let q = UsersQuery { sort_by: Some("password".into()), ..Default::default() };
        assert!(resolve_users_query(&q).is_err());

        let q = UsersQuery { sort_order: Some("up".into()), ..Default::default() };
        assert!(resolve_users_query(&q).is_err());
    }

    #[test]
    fn public_user_has_no_password_field() {
        let json = serde_json::to_value(PublicUser {
            id: Uuid::new_v4(),
            username: "alice".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
