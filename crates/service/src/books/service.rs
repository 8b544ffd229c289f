use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::pagination;

use super::domain::{Book, BookPage, CreateBook, PageMeta};
use super::errors::BookError;
use super::repository::BookRepository;

/// Book catalog service independent of the web framework.
pub struct BookService {
    repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateBook) -> Result<Book, BookError> {
        models::book::validate_new(
            input.title.as_deref(),
            input.author.as_deref(),
            input.summary.as_deref(),
        )
        .map_err(|e| BookError::Validation(e.to_string()))?;

        let title = input.title.unwrap_or_default();
        let author = input.author.unwrap_or_default();
        let summary = input.summary.unwrap_or_default();
        let book = self
            .repo
            .insert(title.trim(), author.trim(), &summary, Utc::now())
            .await?;
        info!(book_id = %book.id, "book_created");
        Ok(book)
    }

    /// Skip/limit listing. `page` and `limit` arrive already coerced by the
    /// HTTP layer; bounds are checked against the live count.
    pub async fn list(&self, page: i64, limit: i64) -> Result<BookPage, BookError> {
        let total = self.repo.count().await?;
        let total_pages = pagination::total_pages(total, limit);

        if page > total_pages && total > 0 {
            return Err(BookError::PageNotFound);
        }
        if page < 1 && total > 0 {
            return Err(BookError::InvalidPage);
        }

        let skip = pagination::skip(page, limit).max(0) as u64;
        let take = limit.max(0) as u64;
        let books = self.repo.page(skip, take).await?;

        Ok(BookPage {
            books,
            pagination: PageMeta {
                total_books: total,
                total_pages,
                current_page: page,
                page_size: limit,
                next_page: (page < total_pages)
                    .then(|| format!("/api/books?page={}&limit={}", page + 1, limit)),
                previous_page: (page > 1)
                    .then(|| format!("/api/books?page={}&limit={}", page - 1, limit)),
            },
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), BookError> {
        if self.repo.delete_by_id(id).await? {
            info!(book_id = %id, "book_deleted");
            Ok(())
        } else {
            Err(BookError::NotFound)
        }
    }
}
