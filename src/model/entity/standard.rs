use crate::impl_paginatable_for;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Learning standard a chapter covers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Standard {
    id: i32,
    chapter_id: i32,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StandardCreate {
    pub chapter_id: i32,
    pub name: String,
}

impl ResourceTyped for Standard {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Standard
    }
}

impl Standard {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl CrudRepository<Standard, StandardCreate, i32> for Standard {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: StandardCreate,
    ) -> DatabaseResult<Self> {
        let standard =
            sqlx::query_as("INSERT INTO standards (chapter_id, name) VALUES ($1,$2) RETURNING *")
                .bind(data.chapter_id)
                .bind(&data.name)
                .fetch_one(mm.executor())
                .await?;

        Ok(standard)
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: StandardCreate,
    ) -> DatabaseResult<Self> {
        sqlx::query("UPDATE standards SET chapter_id = $1, name = $2 WHERE id = $3")
            .bind(data.chapter_id)
            .bind(&data.name)
            .bind(self.id)
            .execute(mm.executor())
            .await?;

        self.chapter_id = data.chapter_id;
        self.name = data.name;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM standards WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: i32,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM standards WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    async fn list(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        limit: i64,
        offset: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM standards ORDER BY id LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM standards")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Standard, StandardCreate, i32);

impl Standard {
    pub async fn all_by_chapter(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        chapter_id: i32,
    ) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM standards WHERE chapter_id = $1 ORDER BY id")
            .bind(chapter_id)
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }
}
