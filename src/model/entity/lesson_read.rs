use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use crate::web::AuthenticatedUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Per-user read flag of a lesson. A missing row means "not read".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct LessonRead {
    user_id: i32,
    lesson_id: i32,
    read: bool,
    updated_at: DateTime<Utc>,
}

impl ResourceTyped for LessonRead {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::LessonRead
    }
}

impl LessonRead {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn lesson_id(&self) -> i32 {
        self.lesson_id
    }

    pub fn read(&self) -> bool {
        self.read
    }

    pub async fn set(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        lesson_id: i32,
        read: bool,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO lesson_reads (user_id, lesson_id, read, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, lesson_id) DO UPDATE
            SET read = EXCLUDED.read, updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(actor.user_id())
        .bind(lesson_id)
        .bind(read)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn find(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        lesson_id: i32,
    ) -> DatabaseResult<Option<Self>> {
        let row = sqlx::query_as("SELECT * FROM lesson_reads WHERE user_id = $1 AND lesson_id = $2")
            .bind(actor.user_id())
            .bind(lesson_id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(row)
    }
}
