use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain book (business view).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub published_date: DateTime<Utc>,
}

/// Creation input; fields are optional so that missing JSON keys reach the
/// validator instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
}

/// One page of the catalog plus its pagination block.
#[derive(Debug, Clone, Serialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: PageMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub total_books: u64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub next_page: Option<String>,
    pub previous_page: Option<String>,
}
