//! Repository layer: the authoritative Postgres store and the derived search index

pub mod books;
pub mod members;
pub mod search;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Document};

/// Authoritative CRUD storage for one entity type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrimaryStore<E: Document>: Send + Sync {
    /// All rows that are not soft-deleted; empty when there are none
    async fn get_all(&self) -> AppResult<Vec<E>>;

    /// Insert `entity`, then overwrite it with the stored row (id, timestamps)
    async fn create(&self, entity: &mut E) -> AppResult<()>;

    /// Apply the non-empty fields of `entity` to the row with its id, then
    /// overwrite it with the stored row
    async fn update(&self, entity: &mut E) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}

/// Best-effort full-text index for one entity type. Never authoritative.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchIndex<E: Document>: Send + Sync {
    /// Upsert the document keyed by the entity id
    async fn index_document(&self, entity: &E) -> AppResult<()>;

    async fn search(&self, keyword: &str) -> AppResult<Vec<E>>;

    async fn ping(&self) -> AppResult<()>;
}

/// Postgres repositories, one per entity
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub members: members::MembersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool),
        }
    }
}

/// Build a partial `UPDATE` for `table`: empty values are left untouched,
/// `updated_at` is always bumped.
///
/// Placeholders are `$1` for `updated_at`, then one per kept value in order,
/// then the id. Returns the statement and the kept values.
pub(crate) fn update_statement<'a>(
    table: &str,
    fields: &[(&'static str, &'a str)],
) -> (String, Vec<&'a str>) {
    let mut sets = vec!["updated_at = $1".to_string()];
    let mut values = Vec::new();
    let mut idx = 2;

    for (column, value) in fields {
        if value.is_empty() {
            continue;
        }
        sets.push(format!("{} = ${}", column, idx));
        values.push(*value);
        idx += 1;
    }

    let query = format!(
        "UPDATE {} SET {} WHERE id = ${} AND deleted_at IS NULL RETURNING *",
        table,
        sets.join(", "),
        idx
    );
    (query, values)
}
