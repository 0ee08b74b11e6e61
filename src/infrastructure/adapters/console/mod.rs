//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::traits::{BotInfo, Chat};

/// Console chat transport for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                name: "console".to_string(),
            },
        }
    }

    /// Reads one line from stdin; `None` on EOF.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;

        print!("{}", prompt);
        std::io::stdout().flush().ok()?;

        let mut input = String::new();
        let read = std::io::stdin().read_line(&mut input).ok()?;
        if read == 0 {
            return None;
        }
        Some(input.trim().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Chat for ConsoleAdapter {
    async fn say(&self, _channel: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
