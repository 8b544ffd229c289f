//! Read-only user store for the stateless operating mode. The credential list
//! is injected from configuration at startup and never mutated at request
//! time, so no synchronization is needed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{AuthUser, SortBy, SortOrder};
use super::errors::AuthError;
use super::repository::UserRepository;

pub struct MemoryUserRepository {
    users: Vec<AuthUser>,
}

impl MemoryUserRepository {
    /// Ids are assigned at startup and stay stable for the process lifetime,
    /// which is all the token round-trip needs.
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        let now = Utc::now();
        let users = credentials
            .into_iter()
            .map(|(username, password)| AuthUser {
                id: Uuid::new_v4(),
                username,
                password,
                created_at: now,
                updated_at: now,
            })
            .collect();
        Self { users }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(
        &self,
        _username: &str,
        _password: &str,
        _now: DateTime<Utc>,
    ) -> Result<AuthUser, AuthError> {
        Err(AuthError::Repository("the in-memory user store is read-only".into()))
    }

    async fn count(&self) -> Result<u64, AuthError> {
        Ok(self.users.len() as u64)
    }

    async fn page_sorted(
        &self,
        _skip: u64,
        _take: u64,
        _sort_by: SortBy,
        _sort_order: SortOrder,
    ) -> Result<Vec<AuthUser>, AuthError> {
        Err(AuthError::Repository("the in-memory user store is not listable".into()))
    }
}
