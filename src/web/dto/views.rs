use serde::Serialize;

use crate::{
    curriculum::{ChapterAggregate, LessonSummary, MessageThread},
    model::entity::{Chapter, ChapterWithStatus, Lesson, MessageFeedRow, MessageWithAuthor, Standard, UserEntity},
    web::dto::progress::ProgressSummary,
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DashboardView {
    pub user: UserEntity,
    pub is_admin: bool,
    pub chapters: Vec<ChapterAggregate>,
    pub progress: ProgressSummary,
    pub activity: Vec<MessageFeedRow>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ChapterView {
    pub chapter: Chapter,
    pub standards: Vec<Standard>,
    pub lessons: Vec<LessonSummary>,
    pub sidebar: Vec<ChapterAggregate>,
    pub previous: Vec<ChapterWithStatus>,
    pub next: Vec<ChapterWithStatus>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LessonView {
    pub sidebar: Vec<ChapterAggregate>,
    pub lesson: Lesson,
    pub read: bool,
    /// Top-level comments, each with its `replies`
    #[schema(value_type = Vec<Object>)]
    pub comments: Vec<MessageThread<MessageWithAuthor>>,
}
