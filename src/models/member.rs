//! Member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Document;

/// Library member record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[schema(example = "John Lennon")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Document for Member {
    const INDEX: &'static str = "members";
    const LABEL: &'static str = "member";
    const LABEL_PLURAL: &'static str = "members";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
