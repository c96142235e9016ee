use crate::curriculum::Threaded;
use crate::model::access::HasOwner;
use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Comment on a lesson. Replies point at a top-level message via `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Message {
    id: i32,
    content: String,
    parent_id: Option<i32>,
    lesson_id: i32,
    user_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageCreate {
    pub content: String,
    pub parent_id: Option<i32>,
    pub lesson_id: i32,
    pub user_id: i32,
}

impl ResourceTyped for Message {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Message
    }
}

impl Message {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn parent_id(&self) -> Option<i32> {
        self.parent_id
    }

    pub fn lesson_id(&self) -> i32 {
        self.lesson_id
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

#[async_trait]
impl CrudRepository<Message, MessageCreate, i32> for Message {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: MessageCreate,
    ) -> DatabaseResult<Self> {
        let message = sqlx::query_as(
            r#"
            INSERT INTO messages (content, parent_id, lesson_id, user_id)
            VALUES ($1,$2,$3,$4)
            RETURNING *
            "#,
        )
        .bind(&data.content)
        .bind(data.parent_id)
        .bind(data.lesson_id)
        .bind(data.user_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(message)
    }

    /// Only the content of a message can change.
    async fn update(
        self,
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: MessageCreate,
    ) -> DatabaseResult<Self> {
        let message = sqlx::query_as(
            "UPDATE messages SET content = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(&data.content)
        .bind(self.id)
        .fetch_one(mm.executor())
        .await?;

        Ok(message)
    }

    async fn delete(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM messages WHERE id = $1")
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
        let result = sqlx::query_as("SELECT * FROM messages WHERE id = $1")
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
            sqlx::query_as("SELECT * FROM messages ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(mm.executor())
                .await?;
        Ok(result)
    }

    async fn count(mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(mm.executor())
            .await?;

        Ok(result)
    }
}

impl HasOwner for Message {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

// Utils

/// Message joined with its author, as shown under a lesson.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct MessageWithAuthor {
    pub message_id: i32,
    pub message_content: String,
    pub message_parent_id: Option<i32>,
    pub message_lesson_id: i32,
    pub message_created_at: DateTime<Utc>,
    pub message_updated_at: DateTime<Utc>,
    pub user_id: i32,
    pub user_github_display_name: String,
    pub user_github_avatar: String,
}

impl Threaded for MessageWithAuthor {
    fn message_id(&self) -> i32 {
        self.message_id
    }

    fn parent_id(&self) -> Option<i32> {
        self.message_parent_id
    }
}

impl MessageWithAuthor {
    pub async fn all_by_lesson(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        lesson_id: i32,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                m.id AS message_id,
                m.content AS message_content,
                m.parent_id AS message_parent_id,
                m.lesson_id AS message_lesson_id,
                m.created_at AS message_created_at,
                m.updated_at AS message_updated_at,
                u.id AS user_id,
                u.github_display_name AS user_github_display_name,
                u.github_avatar AS user_github_avatar
            FROM messages m
            JOIN users u ON u.id = m.user_id
            WHERE m.lesson_id = $1
            ORDER BY m.created_at, m.id
            "#,
        )
        .bind(lesson_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}

/// Latest comments across the course, for the dashboard activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct MessageFeedRow {
    pub message_id: i32,
    pub message_content: String,
    pub message_created_at: DateTime<Utc>,
    pub lesson_id: i32,
    pub lesson_name: String,
    pub user_github_display_name: String,
    pub user_github_avatar: String,
}

impl MessageFeedRow {
    pub async fn latest(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        limit: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                m.id AS message_id,
                m.content AS message_content,
                m.created_at AS message_created_at,
                l.id AS lesson_id,
                l.name AS lesson_name,
                u.github_display_name AS user_github_display_name,
                u.github_avatar AS user_github_avatar
            FROM messages m
            JOIN lessons l ON l.id = m.lesson_id
            JOIN users u ON u.id = m.user_id
            WHERE l.active
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
