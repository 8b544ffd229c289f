use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::Book;
use super::errors::BookError;

/// Repository abstraction for book persistence.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(
        &self,
        title: &str,
        author: &str,
        summary: &str,
        published_date: DateTime<Utc>,
    ) -> Result<Book, BookError>;

    async fn count(&self) -> Result<u64, BookError>;
    async fn page(&self, skip: u64, take: u64) -> Result<Vec<Book>, BookError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, BookError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBookRepository {
        books: Mutex<Vec<Book>>,
    }

    #[async_trait]
    impl BookRepository for MockBookRepository {
        async fn insert(
            &self,
            title: &str,
            author: &str,
            summary: &str,
            published_date: DateTime<Utc>,
        ) -> Result<Book, BookError> {
            let mut books = self.books.lock().unwrap();
            let book = Book {
                id: Uuid::new_v4(),
                title: title.to_string(),
                author: author.to_string(),
                summary: summary.to_string(),
                published_date,
            };
            books.push(book.clone());
            Ok(book)
        }

        async fn count(&self) -> Result<u64, BookError> {
            Ok(self.books.lock().unwrap().len() as u64)
        }

        async fn page(&self, skip: u64, take: u64) -> Result<Vec<Book>, BookError> {
            let books = self.books.lock().unwrap();
            Ok(books
                .iter()
                .skip(skip as usize)
                .take(take as usize)
                .cloned()
                .collect())
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<bool, BookError> {
            let mut books = self.books.lock().unwrap();
            let before = books.len();
            books.retain(|b| b.id != id);
            Ok(books.len() < before)
        }
    }
}
