//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IRC error: {0}")]
    Irc(String),
}

/// Command registry errors
///
/// These surface on the editing path only. The chat-matching hot path never
/// produces them — a failed lookup is `None`, not an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid command name: {0:?}")]
    InvalidName(String),

    #[error("Command already exists: {0}")]
    DuplicateName(String),

    #[error("The built-in roster entry cannot be removed or edited directly")]
    ProtectedEntry,

    #[error("No command at index {0}")]
    IndexOutOfRange(usize),

    #[error("Command text is {0} characters, limit is 500")]
    TextTooLong(usize),
}

/// Persistence errors for the user config file
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported config file version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid stored command: {0}")]
    InvalidEntry(#[from] RegistryError),
}

/// Bot connection configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),
}
