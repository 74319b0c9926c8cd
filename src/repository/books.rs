//! Books repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{update_statement, PrimaryStore};
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrimaryStore<Book> for BooksRepository {
    async fn get_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn create(&self, book: &mut Book) -> AppResult<()> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, isbn)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&book.name)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await?;

        *book = created;
        Ok(())
    }

    async fn update(&self, book: &mut Book) -> AppResult<()> {
        let id = book
            .id
            .ok_or_else(|| AppError::BadRequest("Book id is required".to_string()))?;

        let (query, values) = update_statement(
            "books",
            &[("name", book.name.as_str()), ("isbn", book.isbn.as_str())],
        );

        let mut builder = sqlx::query_as::<_, Book>(&query).bind(Utc::now());
        for value in values {
            builder = builder.bind(value);
        }

        let updated = builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        *book = updated;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
