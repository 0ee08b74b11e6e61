//! Chat transport adapters

pub mod console;
pub mod twitch;
