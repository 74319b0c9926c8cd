//! Members repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{update_statement, PrimaryStore};
use crate::{
    error::{AppError, AppResult},
    models::Member,
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrimaryStore<Member> for MembersRepository {
    async fn get_all(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn create(&self, member: &mut Member) -> AppResult<()> {
        let created = sqlx::query_as::<_, Member>(
            "INSERT INTO members (name) VALUES ($1) RETURNING *",
        )
        .bind(&member.name)
        .fetch_one(&self.pool)
        .await?;

        *member = created;
        Ok(())
    }

    async fn update(&self, member: &mut Member) -> AppResult<()> {
        let id = member
            .id
            .ok_or_else(|| AppError::BadRequest("Member id is required".to_string()))?;

        let (query, values) = update_statement("members", &[("name", member.name.as_str())]);

        let mut builder = sqlx::query_as::<_, Member>(&query).bind(Utc::now());
        for value in values {
            builder = builder.bind(value);
        }

        let updated = builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;

        *member = updated;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
