use crate::database::types::{AuthorRecord, BookRecord};
use sqlx::types::Json;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;

pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[allow(
        clippy::missing_inline_in_public_items,
        reason = "Called once at start of program"
    )]
    pub async fn init(path: &Path) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .foreign_keys(true)
            .create_if_missing(true)
            .filename(path);
        let pool = SqlitePool::connect_with(options).await?;
        sqlx::migrate!().run(&pool).await?;

        Ok(Self { pool })
    }

    #[allow(
        clippy::missing_inline_in_public_items,
        reason = "Called once at end of program"
    )]
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Inserts an author, overwriting any previous record with the same `id`. Re-running a dump
    /// therefore re-saves every record rather than duplicating it.
    #[allow(
        clippy::missing_inline_in_public_items,
        reason = "Called once per dump line"
    )]
    pub async fn upsert_author(&self, author: &AuthorRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, personal_name)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                personal_name = excluded.personal_name;
        "#,
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(&author.personal_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[allow(
        clippy::missing_inline_in_public_items,
        reason = "Called once per author reference"
    )]
    pub async fn fetch_author(&self, id: &str) -> Result<Option<AuthorRecord>, sqlx::Error> {
        sqlx::query_as("SELECT id, name, personal_name FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a work, overwriting any previous record with the same `id`. The list-shaped
    /// columns ride as JSON text, matching the denormalized dump records.
    #[allow(
        clippy::missing_inline_in_public_items,
        reason = "Called once per dump line"
    )]
    pub async fn upsert_book(&self, book: &BookRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, description, published_date, cover_ids, authors)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                published_date = excluded.published_date,
                cover_ids = excluded.cover_ids,
                authors = excluded.authors;
        "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.published_date)
        .bind(Json(&book.cover_ids))
        .bind(Json(&book.authors))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[allow(clippy::missing_inline_in_public_items, reason = "Called rarely")]
    pub async fn fetch_book(&self, id: &str) -> Result<Option<BookRecord>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, title, description, published_date, cover_ids, authors \
             FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
