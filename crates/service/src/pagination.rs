//! Skip/limit pagination arithmetic shared by the listing endpoints.

/// Coercion rule for the book listing query parameters: anything that does not
/// parse as an integer, and the integer zero, falls back to the default.
pub fn coerce(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v != 0)
        .unwrap_or(default)
}

/// `ceil(total / limit)`; zero when the collection is empty.
pub fn total_pages(total: u64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total as i64 + limit - 1) / limit
}

/// Offset of the first item on `page`.
pub fn skip(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}
