use crate::curriculum::CurriculumChapter;
use crate::impl_paginatable_for;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Chapter {
    id: i32,
    order_number: i32,
    name: String,
    active: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ChapterCreate {
    pub order_number: i32,
    pub name: String,
    pub active: Option<bool>,
}

impl ResourceTyped for Chapter {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Chapter
    }
}

impl Chapter {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn order_number(&self) -> i32 {
        self.order_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[async_trait]
impl CrudRepository<Chapter, ChapterCreate, i32> for Chapter {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ChapterCreate,
    ) -> DatabaseResult<Self> {
        let chapter = sqlx::query_as(
            "INSERT INTO chapters (order_number, name, active) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(data.order_number)
        .bind(&data.name)
        .bind(data.active.unwrap_or(true))
        .fetch_one(mm.executor())
        .await?;

        Ok(chapter)
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: ChapterCreate,
    ) -> DatabaseResult<Self> {
        let active = data.active.unwrap_or(self.active);
        sqlx::query("UPDATE chapters SET order_number = $1, name = $2, active = $3 WHERE id = $4")
            .bind(data.order_number)
            .bind(&data.name)
            .bind(active)
            .bind(self.id)
            .execute(mm.executor())
            .await?;

        self.order_number = data.order_number;
        self.name = data.name;
        self.active = active;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM chapters WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM chapters WHERE id = $1")
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
        let result =
            sqlx::query_as("SELECT * FROM chapters ORDER BY order_number LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chapters")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Chapter, ChapterCreate, i32);

// Utils

/// Active chapter with the reader's completion flag, as used for navigation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct ChapterWithStatus {
    pub id: i32,
    pub order_number: i32,
    pub name: String,
    pub read: bool,
}

impl CurriculumChapter for ChapterWithStatus {
    fn chapter_order(&self) -> i32 {
        self.order_number
    }

    fn chapter_read(&self) -> bool {
        self.read
    }
}

impl ChapterWithStatus {
    /// A chapter without active lessons is never read.
    pub async fn fetch_all(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                c.id,
                c.order_number,
                c.name,
                COALESCE(
                    bool_and(COALESCE(lr.read, FALSE)) FILTER (WHERE l.id IS NOT NULL),
                    FALSE
                ) AS read
            FROM chapters c
            LEFT JOIN lessons l
                ON l.chapter_id = c.id AND l.active
            LEFT JOIN lesson_reads lr
                ON lr.lesson_id = l.id AND lr.user_id = $1
            WHERE c.active
            GROUP BY c.id
            ORDER BY c.order_number
            "#,
        )
        .bind(actor.user_id())
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
