use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat chapter x lesson row, one per lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct JoinRow {
    pub chapter_id: i32,
    pub chapter_order: i32,
    pub chapter_name: String,
    pub chapter_read: bool,
    pub lesson_id: i32,
    pub lesson_order: i32,
    pub lesson_name: String,
    pub lesson_content: String,
    pub lesson_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LessonSummary {
    pub lesson_id: i32,
    pub lesson_order: i32,
    pub lesson_name: String,
    pub lesson_content: String,
    pub lesson_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChapterAggregate {
    pub chapter_id: i32,
    pub chapter_order: i32,
    pub chapter_name: String,
    pub chapter_read: bool,
    pub lessons: Vec<LessonSummary>,
}

/// Chapters keyed by id, in order of first appearance.
pub type ChapterMap = IndexMap<i32, ChapterAggregate>;

impl From<&JoinRow> for LessonSummary {
    fn from(row: &JoinRow) -> Self {
        Self {
            lesson_id: row.lesson_id,
            lesson_order: row.lesson_order,
            lesson_name: row.lesson_name.clone(),
            lesson_content: row.lesson_content.clone(),
            lesson_read: row.lesson_read,
        }
    }
}

impl ChapterAggregate {
    fn empty_from(row: &JoinRow) -> Self {
        Self {
            chapter_id: row.chapter_id,
            chapter_order: row.chapter_order,
            chapter_name: row.chapter_name.clone(),
            chapter_read: row.chapter_read,
            lessons: Vec::new(),
        }
    }
}

/// Groups join rows by chapter. The first row seen for a chapter decides its
/// chapter-level fields; every row contributes exactly one lesson.
pub fn reduce_rows<'a, I>(rows: I) -> ChapterMap
where
    I: IntoIterator<Item = &'a JoinRow>,
{
    let mut chapters = ChapterMap::new();
    for row in rows {
        chapters
            .entry(row.chapter_id)
            .or_insert_with(|| ChapterAggregate::empty_from(row))
            .lessons
            .push(LessonSummary::from(row));
    }
    chapters
}

/// Keeps insertion order. Chapter display order is the query's business.
pub fn into_chapters(map: ChapterMap) -> Vec<ChapterAggregate> {
    map.into_values().collect()
}

pub fn compare_lessons(a: &LessonSummary, b: &LessonSummary) -> Ordering {
    a.lesson_order.cmp(&b.lesson_order)
}

pub fn sort_lessons(mut chapters: Vec<ChapterAggregate>) -> Vec<ChapterAggregate> {
    for chapter in chapters.iter_mut() {
        chapter.lessons.sort_by(compare_lessons);
    }
    chapters
}

/// Reducer, converter and sorter in one go; this is what the views consume.
pub fn build_curriculum(rows: &[JoinRow]) -> Vec<ChapterAggregate> {
    sort_lessons(into_chapters(reduce_rows(rows)))
}
