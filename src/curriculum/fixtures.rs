//! Seven-row chapter/lesson sample shared by the curriculum tests.

use super::JoinRow;

pub fn row(
    chapter_id: i32,
    chapter_order: i32,
    chapter_name: &str,
    lesson_id: i32,
    lesson_order: i32,
) -> JoinRow {
    JoinRow {
        chapter_id,
        chapter_order,
        chapter_name: chapter_name.to_string(),
        chapter_read: false,
        lesson_id,
        lesson_order,
        lesson_name: format!("Lesson {lesson_id}"),
        lesson_content: String::from("test"),
        lesson_read: false,
    }
}

fn named(mut row: JoinRow, lesson_name: &str) -> JoinRow {
    row.lesson_name = lesson_name.to_string();
    row
}

pub fn base_rows() -> Vec<JoinRow> {
    vec![
        named(row(1, 1, "Functions and Loops", 3, 1), "Lesson 1a"),
        named(row(1, 1, "Functions and Loops", 2, 3), "Lesson 1c"),
        named(row(1, 1, "Functions and Loops", 1, 2), "Lesson 1b"),
        named(row(2, 3, "Lists and Dictionaries", 6, 7), "Lesson 3b"),
        named(row(2, 3, "Lists and Dictionaries", 4, 6), "Lesson 3a"),
        named(row(3, 2, "Conditional logic", 5, 5), "Lesson 2a"),
        named(row(1, 1, "Functions and Loops", 7, 4), "Lesson 1d"),
    ]
}
