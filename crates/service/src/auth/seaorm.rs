use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use super::domain::{AuthUser, SortBy, SortOrder};
use super::errors::AuthError;
use super::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: models::user::Model) -> AuthUser {
    AuthUser {
        id: m.id,
        username: m.username,
        password: m.password,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn map_db_err(e: DbErr) -> AuthError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AuthError::Conflict
    } else {
        AuthError::Repository(e.to_string())
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find()
            .filter(models::user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_domain))
    }

    async fn insert(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthUser, AuthError> {
        let am = models::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let created = am.insert(&self.db).await.map_err(map_db_err)?;
        Ok(to_domain(created))
    }

    async fn count(&self) -> Result<u64, AuthError> {
        models::user::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }

    async fn page_sorted(
        &self,
        skip: u64,
        take: u64,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Result<Vec<AuthUser>, AuthError> {
        let column = match sort_by {
            SortBy::Username => models::user::Column::Username,
            SortBy::CreatedAt => models::user::Column::CreatedAt,
        };
        let order = match sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        let rows = models::user::Entity::find()
            .order_by(column, order)
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(to_domain).collect())
    }
}
