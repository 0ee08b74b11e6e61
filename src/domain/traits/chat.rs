use async_trait::async_trait;
use crate::application::errors::BotError;

/// Chat trait - abstraction for the outbound side of a chat transport
#[async_trait]
pub trait Chat: Send + Sync {
    /// Send a message to a channel
    async fn say(&self, channel: &str, text: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub name: String,
}
