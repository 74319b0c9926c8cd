//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Document;

/// Book record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Assigned by the database on create
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[schema(example = "The Alchemist")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "9780062315007")]
    pub isbn: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Document for Book {
    const INDEX: &'static str = "books";
    const LABEL: &'static str = "book";
    const LABEL_PLURAL: &'static str = "books";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
