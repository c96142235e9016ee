pub mod messages;
pub mod progress;
pub mod views;
