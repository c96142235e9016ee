mod user;
pub use user::{UserEntity, UserEntityCreateUpdate, UserFlags};

mod chapter;
pub use chapter::{Chapter, ChapterCreate, ChapterWithStatus};

mod lesson;
pub use lesson::{Lesson, LessonCreate};

mod lesson_read;
pub use lesson_read::LessonRead;

mod standard;
pub use standard::{Standard, StandardCreate};

mod message;
pub use message::{Message, MessageCreate, MessageFeedRow, MessageWithAuthor};
