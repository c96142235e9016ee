use thiserror::Error;

use super::ChapterAggregate;

/// Anything that sits at a position in the curriculum and can be marked read.
pub trait CurriculumChapter {
    fn chapter_order(&self) -> i32;
    fn chapter_read(&self) -> bool;
}

impl CurriculumChapter for ChapterAggregate {
    fn chapter_order(&self) -> i32 {
        self.chapter_order
    }

    fn chapter_read(&self) -> bool {
        self.chapter_read
    }
}

impl<T: CurriculumChapter> CurriculumChapter for &T {
    fn chapter_order(&self) -> i32 {
        (*self).chapter_order()
    }

    fn chapter_read(&self) -> bool {
        (*self).chapter_read()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a whole number, got {input:?}")]
pub struct InvalidOrder {
    pub input: String,
}

/// Parses an order number or id coming from a path or query string.
pub fn parse_order(input: &str) -> Result<i32, InvalidOrder> {
    input.trim().parse::<i32>().map_err(|_| InvalidOrder {
        input: input.to_string(),
    })
}

pub fn completed_chapters<T: CurriculumChapter>(chapters: &[T]) -> Vec<&T> {
    chapters.iter().filter(|c| c.chapter_read()).collect()
}

fn chapters_at<T: CurriculumChapter>(order: Option<i32>, chapters: &[T]) -> Vec<&T> {
    match order {
        Some(order) => chapters
            .iter()
            .filter(|c| c.chapter_order() == order)
            .collect(),
        None => Vec::new(),
    }
}

/// Every chapter ordered right before `order`. Empty when `order` is the first.
pub fn previous_chapter<T: CurriculumChapter>(order: i32, chapters: &[T]) -> Vec<&T> {
    chapters_at(order.checked_sub(1), chapters)
}

/// Every chapter ordered right after `order`. Empty when `order` is the last.
pub fn next_chapter<T: CurriculumChapter>(order: i32, chapters: &[T]) -> Vec<&T> {
    chapters_at(order.checked_add(1), chapters)
}
