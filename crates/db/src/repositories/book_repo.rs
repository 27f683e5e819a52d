//! Repository for the `books` catalog table.

use sangha_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::book::{Book, CreateBook};

const COLUMNS: &str = "id, title, isbn, publisher, created_at, updated_at";

/// Provides create, list and count operations for the book catalog.
pub struct BookRepo;

impl BookRepo {
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, isbn, publisher) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(input.title.trim())
            .bind(input.isbn.trim())
            .bind(input.publisher.trim())
            .fetch_one(pool)
            .await
    }

    /// List catalog items, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await
    }

    /// Count catalog items created at or after `since`.
    pub async fn count_created_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE created_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await
    }
}
