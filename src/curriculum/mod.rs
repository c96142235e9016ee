//! Reshapes flat chapter/lesson query rows into the nested, ordered curriculum
//! the views render, plus the small lookups built on top of it.
//!
//! Everything here is synchronous and pure: a request queries its rows, runs
//! them through these functions and drops the result after rendering.

mod aggregate;
pub use aggregate::{
    ChapterAggregate, ChapterMap, JoinRow, LessonSummary, build_curriculum, compare_lessons,
    into_chapters, reduce_rows, sort_lessons,
};

mod navigation;
pub use navigation::{
    CurriculumChapter, InvalidOrder, completed_chapters, next_chapter, parse_order,
    previous_chapter,
};

mod threads;
pub use threads::{MessageThread, Threaded, thread_messages};

#[cfg(test)]
pub(crate) mod fixtures;
