use crate::curriculum::JoinRow;
use crate::impl_paginatable_for;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Lesson {
    id: i32,
    chapter_id: i32,
    lesson_order_number: i32,
    chapter_order_number: i32,
    name: String,
    content: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Lesson
    }
}

impl Lesson {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LessonCreate {
    pub chapter_id: i32,
    pub lesson_order_number: i32,
    pub chapter_order_number: i32,
    pub name: String,
    pub content: String,
    pub active: Option<bool>,
}

#[async_trait]
impl CrudRepository<Lesson, LessonCreate, i32> for Lesson {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: LessonCreate,
    ) -> DatabaseResult<Self> {
        let lesson = sqlx::query_as(
            r#"
            INSERT INTO lessons (chapter_id, lesson_order_number, chapter_order_number, name, content, active)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING *
            "#,
        )
        .bind(data.chapter_id)
        .bind(data.lesson_order_number)
        .bind(data.chapter_order_number)
        .bind(&data.name)
        .bind(&data.content)
        .bind(data.active.unwrap_or(true))
        .fetch_one(mm.executor())
        .await?;

        Ok(lesson)
    }

    async fn update(
        mut self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: LessonCreate,
    ) -> DatabaseResult<Self> {
        let active = data.active.unwrap_or(self.active);
        sqlx::query(
            r#"
            UPDATE lessons
            SET chapter_id = $1, lesson_order_number = $2, chapter_order_number = $3,
                name = $4, content = $5, active = $6
            WHERE id = $7
            "#,
        )
        .bind(data.chapter_id)
        .bind(data.lesson_order_number)
        .bind(data.chapter_order_number)
        .bind(&data.name)
        .bind(&data.content)
        .bind(active)
        .bind(self.id)
        .execute(mm.executor())
        .await?;

        self.chapter_id = data.chapter_id;
        self.lesson_order_number = data.lesson_order_number;
        self.chapter_order_number = data.chapter_order_number;
        self.name = data.name;
        self.content = data.content;
        self.active = active;
        Ok(self)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM lessons WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM lessons WHERE id = $1")
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
        let result = sqlx::query_as(
            "SELECT * FROM lessons ORDER BY lesson_order_number LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl_paginatable_for!(Lesson, LessonCreate, i32);

impl Lesson {
    pub async fn find_active(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: i32,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as(
            r#"
            SELECT l.* FROM lessons l
            JOIN chapters c ON c.id = l.chapter_id
            WHERE l.id = $1 AND l.active AND c.active
            "#,
        )
        .bind(id)
        .fetch_optional(mm.executor())
        .await?;
        Ok(result)
    }
}

// Utils

const CURRICULUM_ROWS: &str = r#"
    SELECT
        c.id AS chapter_id,
        c.order_number AS chapter_order,
        c.name AS chapter_name,
        bool_and(COALESCE(lr.read, FALSE)) OVER (PARTITION BY c.id) AS chapter_read,
        l.id AS lesson_id,
        l.lesson_order_number AS lesson_order,
        l.name AS lesson_name,
        l.content AS lesson_content,
        COALESCE(lr.read, FALSE) AS lesson_read
    FROM chapters c
    JOIN lessons l
        ON l.chapter_id = c.id
    LEFT JOIN lesson_reads lr
        ON lr.lesson_id = l.id AND lr.user_id = $1
    WHERE c.active AND l.active
"#;

impl JoinRow {
    /// Every active chapter x lesson pair, chapters in curriculum order.
    pub async fn fetch_all(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
    ) -> DatabaseResult<Vec<Self>> {
        let query = format!("{CURRICULUM_ROWS} ORDER BY c.order_number");
        let rows = sqlx::query_as(&query)
            .bind(actor.user_id())
            .fetch_all(mm.executor())
            .await?;
        Ok(rows)
    }
}
