//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod message;
pub mod user_config;

pub use command::{CommandEntry, CommandRegistry, EntryKind, MAX_TEXT_LEN, ROSTER_NAME};
pub use message::ChatMessage;
pub use user_config::UserConfig;
