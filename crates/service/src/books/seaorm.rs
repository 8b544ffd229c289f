use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use super::domain::Book;
use super::errors::BookError;
use super::repository::BookRepository;

pub struct SeaOrmBookRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: models::book::Model) -> Book {
    Book {
        id: m.id,
        title: m.title,
        author: m.author,
        summary: m.summary,
        published_date: m.published_date.with_timezone(&Utc),
    }
}

#[async_trait::async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn insert(
        &self,
        title: &str,
        author: &str,
        summary: &str,
        published_date: DateTime<Utc>,
    ) -> Result<Book, BookError> {
        let am = models::book::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            author: Set(author.to_string()),
            summary: Set(summary.to_string()),
            published_date: Set(published_date.into()),
        };
        let created = am
            .insert(&self.db)
            .await
            .map_err(|e| BookError::Repository(e.to_string()))?;
        Ok(to_domain(created))
    }

    async fn count(&self) -> Result<u64, BookError> {
        models::book::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| BookError::Repository(e.to_string()))
    }

    async fn page(&self, skip: u64, take: u64) -> Result<Vec<Book>, BookError> {
        // Stable page order: books have no created_at, published_date stands in.
        let rows = models::book::Entity::find()
            .order_by_asc(models::book::Column::PublishedDate)
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await
            .map_err(|e| BookError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, BookError> {
        let res = models::book::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BookError::Repository(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
