use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::{AuthUser, SortBy, SortOrder};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Persists the password exactly as given; implementations surface the
    /// store-level unique-username violation as `AuthError::Conflict`.
    async fn insert(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthUser, AuthError>;

    async fn count(&self) -> Result<u64, AuthError>;
    async fn page_sorted(
        &self,
        skip: u64,
        take: u64,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Result<Vec<AuthUser>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<AuthUser>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.username == username).cloned())
        }

        async fn insert(
            &self,
            username: &str,
            password: &str,
            now: DateTime<Utc>,
        ) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password: password.to_string(),
                created_at: now,
                updated_at: now,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn count(&self) -> Result<u64, AuthError> {
            Ok(self.users.lock().unwrap().len() as u64)
        }

        async fn page_sorted(
            &self,
            skip: u64,
            take: u64,
            sort_by: SortBy,
            sort_order: SortOrder,
        ) -> Result<Vec<AuthUser>, AuthError> {
            let mut users = self.users.lock().unwrap().clone();
            users.sort_by(|a, b| {
                let ord = match sort_by {
                    SortBy::Username => a.username.cmp(&b.username),
                    SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
                };
                match sort_order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
            Ok(users
                .into_iter()
                .skip(skip as usize)
                .take(take as usize)
                .collect())
        }
    }
}
