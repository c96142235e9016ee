use serde::Serialize;

use crate::curriculum::{ChapterAggregate, completed_chapters};

/// Integer percentage of `part` in `total`, halves rounded away from zero.
/// Nothing to complete counts as 0%.
pub fn percent(part: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (200 * part + total) / (2 * total)
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ProgressSummary {
    chapters_total: i64,
    chapters_completed: i64,
    chapters_percent: i64,
    lessons_total: i64,
    lessons_read: i64,
    lessons_percent: i64,
}

impl ProgressSummary {
    pub fn new(chapters_total: i64, chapters_completed: i64, lessons_total: i64, lessons_read: i64) -> Self {
        Self {
            chapters_total,
            chapters_completed,
            chapters_percent: percent(chapters_completed, chapters_total),
            lessons_total,
            lessons_read,
            lessons_percent: percent(lessons_read, lessons_total),
        }
    }

    pub fn from_curriculum(chapters: &[ChapterAggregate]) -> Self {
        let lessons = chapters.iter().flat_map(|c| c.lessons.iter());
        let (lessons_total, lessons_read) = lessons.fold((0, 0), |(total, read), lesson| {
            (total + 1, read + i64::from(lesson.lesson_read))
        });

        Self::new(
            chapters.len() as i64,
            completed_chapters(chapters).len() as i64,
            lessons_total,
            lessons_read,
        )
    }

    pub fn chapters_percent(&self) -> i64 {
        self.chapters_percent
    }

    pub fn lessons_percent(&self) -> i64 {
        self.lessons_percent
    }
}
