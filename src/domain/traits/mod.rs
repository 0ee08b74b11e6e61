//! Domain traits - Abstractions for infrastructure implementations

pub mod chat;
pub mod store;

pub use chat::{BotInfo, Chat};
pub use store::Store;
