use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::pagination;

use super::domain::{
    resolve_users_query, AuthUser, ListUsersParams, LoginInput, PublicUser, RegisterInput,
    UserPage, UsersPageMeta, UsersQuery,
};
use super::errors::AuthError;
use super::repository::UserRepository;
use super::token::{self, Claims};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// 1 hour in the in-memory mode, 3 hours when store-backed.
    pub token_ttl: chrono::Duration,
}

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user. The password is persisted exactly as given.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        models::user::validate_username(input.username.as_deref())
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        models::user::validate_password(input.password.as_deref())
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        if let Some(existing) = self.repo.find_by_username(&username).await? {
            debug!("user exists: {}", existing.username);
            return Err(AuthError::Conflict);
        }

        // The repository re-raises the store's unique violation as Conflict,
        // the second line of defense behind the lookup above.
        let user = self.repo.insert(&username, &password, Utc::now()).await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a signed token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockUserRepository};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl: chrono::Duration::hours(3) });
    /// tokio_test::block_on(svc.register(RegisterInput { username: Some("alice".into()), password: Some("wonderland".into()) })).unwrap();
    /// let token = tokio_test::block_on(svc.login(LoginInput { username: Some("alice".into()), password: Some("wonderland".into()) })).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginInput) -> Result<String, AuthError> {
        let username = match input.username.as_deref() {
            Some(u) if !u.is_empty() => u,
            _ => return Err(AuthError::Validation("username is required".into())),
        };
        let password = match input.password.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(AuthError::Validation("password is required".into())),
        };

        // Plain-text comparison, preserved from the stored contract; one
        // error for both unknown user and wrong password.
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if user.password != password {
            return Err(AuthError::Unauthorized);
        }

        let token = token::issue(user.id, &user.username, &self.cfg.jwt_secret, self.cfg.token_ttl)?;
        info!(user_id = %user.id, username = %user.username, "user_logged_in");
        Ok(token)
    }

    /// Guard used by the bearer middleware before protected handlers run.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        token::verify(token, &self.cfg.jwt_secret)
    }

    /// Paginated, sorted user listing with the password field excluded.
    #[instrument(skip(self, query))]
    pub async fn list_users(&self, query: &UsersQuery) -> Result<UserPage, AuthError> {
        let ListUsersParams { page, limit, sort_by, sort_order } = resolve_users_query(query)?;

        let total = self.repo.count().await?;
        let skip = (page - 1) * limit;
        let users = self
            .repo
            .page_sorted(skip, limit, sort_by, sort_order)
            .await?
            .into_iter()
            .map(PublicUser::from)
            .collect();
        let total_pages = pagination::total_pages(total, limit as i64) as u64;

        Ok(UserPage {
            users,
            pagination: UsersPageMeta {
                total_items: total,
                total_pages,
                current_page: page,
                items_per_page: limit,
                sort_by: sort_by.as_str(),
                sort_order: sort_order.as_str(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::MemoryUserRepository;
    use super::super::repository::mock::MockUserRepository;
    use super::*;

    fn cfg() -> AuthConfig {
        AuthConfig { jwt_secret: "test-secret".into(), token_ttl: chrono::Duration::hours(3) }
    }

    fn register_input(u: &str, p: &str) -> RegisterInput {
        RegisterInput { username: Some(u.into()), password: Some(p.into()) }
    }

    fn login_input(u: &str, p: &str) -> LoginInput {
        LoginInput { username: Some(u.into()), password: Some(p.into()) }
    }

    #[tokio::test]
    async fn register_reports_first_violation() {
        let svc = AuthService::new(Arc::new(MockUserRepository::default()), cfg());
        let err = svc.register(register_input("a b", "longenough")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "username must only contain alphanumeric characters"
        );
        let err = svc.register(register_input("alice", "short")).await.unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let svc = AuthService::new(Arc::new(MockUserRepository::default()), cfg());
        svc.register(register_input("alice", "wonderland")).await.unwrap();
        let err = svc.register(register_input("alice", "different")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn login_does_not_leak_which_field_was_wrong() {
        let svc = AuthService::new(Arc::new(MockUserRepository::default()), cfg());
        svc.register(register_input("alice", "wonderland")).await.unwrap();

        let unknown = svc.login(login_input("bob", "wonderland")).await.unwrap_err();
        let wrong = svc.login(login_input("alice", "not-it")).await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn token_round_trip_yields_user_id() {
        let repo = Arc::new(MockUserRepository::default());
        let svc = AuthService::new(repo, cfg());
        let user = svc.register(register_input("alice", "wonderland")).await.unwrap();
        let token = svc.login(login_input("alice", "wonderland")).await.unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.id, user.id.to_string());
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn memory_mode_checks_exact_match() {
        let repo = Arc::new(MemoryUserRepository::new(vec![(
            "admin".to_string(),
            "password123".to_string(),
        )]));
        let svc = AuthService::new(
            repo,
            AuthConfig { jwt_secret: "s".into(), token_ttl: chrono::Duration::hours(1) },
        );
        assert!(svc.login(login_input("admin", "password123")).await.is_ok());
        assert!(matches!(
            svc.login(login_input("admin", "Password123")).await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn user_listing_excludes_password_and_paginates() {
        let svc = AuthService::new(Arc::new(MockUserRepository::default()), cfg());
        for n in 0..12 {
            svc.register(register_input(&format!("user{n:02}"), "secret99")).await.unwrap();
        }

        let query = UsersQuery {
            limit: Some("5".into()),
            sort_by: Some("username".into()),
            ..Default::default()
        };
        let page = svc.list_users(&query).await.unwrap();
        assert_eq!(page.users.len(), 5);
        assert_eq!(page.pagination.total_items, 12);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.users[0].username, "user00");
        assert_eq!(page.pagination.sort_by, "username");
    }
}
