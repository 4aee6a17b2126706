//! Shelf service: the user's books and their reading statuses.
//!
//! DESIGN
//! ======
//! A shelf entry joins a user to an externally identified book and carries
//! one of three reading statuses. Uniqueness of `(user_id, book_id)` lives in
//! the table constraint, so setting a status is a single upsert and removal
//! is a single delete.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    #[error("book not on shelf: {0}")]
    NotFound(String),
    #[error("unknown reading status in store: {0}")]
    CorruptStatus(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Reading status of a shelf entry. Exactly one of three values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatus {
    #[default]
    WantToRead,
    IsReading,
    Completed,
}

impl ReadingStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::WantToRead, Self::IsReading, Self::Completed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WantToRead => "WANT_TO_READ",
            Self::IsReading => "IS_READING",
            Self::Completed => "COMPLETED",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "WANT_TO_READ" => Some(Self::WantToRead),
            "IS_READING" => Some(Self::IsReading),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::WantToRead => "Want to Read",
            Self::IsReading => "Currently Reading",
            Self::Completed => "Read",
        }
    }
}

const MAX_BOOK_ID_LEN: usize = 64;

/// Catalog ids appear in URL paths, so they are limited to a URL-safe set.
#[must_use]
pub fn is_valid_book_id(book_id: &str) -> bool {
    !book_id.is_empty()
        && book_id.len() <= MAX_BOOK_ID_LEN
        && book_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// The catalog identity of a book plus the metadata copied onto the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    pub book_id: String,
    pub title: String,
    pub author: Option<String>,
}

/// One row of `user_books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBook {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: String,
    pub title: String,
    pub author: Option<String>,
    pub status: ReadingStatus,
}

impl UserBook {
    #[must_use]
    pub fn book_ref(&self) -> BookRef {
        BookRef { book_id: self.book_id.clone(), title: self.title.clone(), author: self.author.clone() }
    }
}

/// Per-status counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShelfSummary {
    pub want_to_read: usize,
    pub is_reading: usize,
    pub completed: usize,
}

impl ShelfSummary {
    #[must_use]
    pub fn from_books(books: &[UserBook]) -> Self {
        books.iter().fold(Self::default(), |mut acc, book| {
            match book.status {
                ReadingStatus::WantToRead => acc.want_to_read += 1,
                ReadingStatus::IsReading => acc.is_reading += 1,
                ReadingStatus::Completed => acc.completed += 1,
            }
            acc
        })
    }

    #[must_use]
    pub fn count(&self, status: ReadingStatus) -> usize {
        match status {
            ReadingStatus::WantToRead => self.want_to_read,
            ReadingStatus::IsReading => self.is_reading,
            ReadingStatus::Completed => self.completed,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.want_to_read + self.is_reading + self.completed
    }
}

// =============================================================================
// STORE
// =============================================================================

#[async_trait::async_trait]
pub trait ShelfStore: Send + Sync {
    /// All shelf entries for `user_id`, most recently changed first.
    async fn list_user_books(&self, user_id: Uuid) -> Result<Vec<UserBook>, ShelfError>;

    async fn get_user_book(&self, user_id: Uuid, book_id: &str) -> Result<Option<UserBook>, ShelfError>;

    /// Add `book` with `status`, or change the status of the existing entry.
    async fn set_status(&self, user_id: Uuid, book: &BookRef, status: ReadingStatus) -> Result<UserBook, ShelfError>;

    /// Delete the entry. Irreversible.
    async fn remove_book(&self, user_id: Uuid, book_id: &str) -> Result<(), ShelfError>;
}

pub struct PgShelfStore {
    pool: PgPool,
}

impl PgShelfStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_book_from_row(row: &PgRow) -> Result<UserBook, ShelfError> {
    let raw_status: String = row.get("status");
    let status = ReadingStatus::parse(&raw_status).ok_or(ShelfError::CorruptStatus(raw_status))?;
    Ok(UserBook {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id: row.get("book_id"),
        title: row.get("title"),
        author: row.get("author"),
        status,
    })
}

#[async_trait::async_trait]
impl ShelfStore for PgShelfStore {
    async fn list_user_books(&self, user_id: Uuid) -> Result<Vec<UserBook>, ShelfError> {
        let rows = sqlx::query(
            "SELECT id, user_id, book_id, title, author, status
             FROM user_books
             WHERE user_id = $1
             ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_book_from_row).collect()
    }

    async fn get_user_book(&self, user_id: Uuid, book_id: &str) -> Result<Option<UserBook>, ShelfError> {
        let row = sqlx::query(
            "SELECT id, user_id, book_id, title, author, status
             FROM user_books
             WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_book_from_row).transpose()
    }

    async fn set_status(&self, user_id: Uuid, book: &BookRef, status: ReadingStatus) -> Result<UserBook, ShelfError> {
        let row = sqlx::query(
            r"INSERT INTO user_books (user_id, book_id, title, author, status)
              VALUES ($1, $2, $3, $4, $5)
              ON CONFLICT (user_id, book_id)
              DO UPDATE SET status = EXCLUDED.status, updated_at = now()
              RETURNING id, user_id, book_id, title, author, status",
        )
        .bind(user_id)
        .bind(&book.book_id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        user_book_from_row(&row)
    }

    async fn remove_book(&self, user_id: Uuid, book_id: &str) -> Result<(), ShelfError> {
        let result = sqlx::query("DELETE FROM user_books WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ShelfError::NotFound(book_id.to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "shelf_test.rs"]
mod tests;
