//! The chat listener: matches inbound messages against the command registry

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{ChatMessage, UserConfig};

/// Handle to the live user config, shared between the connection worker and
/// the editing surface. Mutations and whole-config replacement happen under
/// the write lock, so a lookup sees either the old or the new aggregate.
pub type SharedConfig = Arc<RwLock<UserConfig>>;

pub fn shared_config(config: UserConfig) -> SharedConfig {
    Arc::new(RwLock::new(config))
}

/// The matching engine behind the chat connection.
///
/// Holds the live config, not a copy — a saved edit is visible to the next
/// lookup without a reconnect.
pub struct Responder {
    config: SharedConfig,
}

impl Responder {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Looks the message text up in the registry and returns the response.
    ///
    /// `Some("")` is a match whose text is unset — the caller sends nothing.
    /// Lookups never fail; an unrecognized message is `None`.
    pub async fn on_message(&self, message: &ChatMessage) -> Option<String> {
        let config = self.config.read().await;
        let commands = config.commands();

        let index = commands.find(&message.text)?;
        let text = commands.get(index)?.text().to_string();
        tracing::debug!("Matched {} from {}", message.text, message.sender);
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> ChatMessage {
        ChatMessage::new("somestreamer", "viewer", text)
    }

    fn config_with(entries: &[(&str, &str)]) -> UserConfig {
        let mut config = UserConfig::new("somestreamer");
        for (name, text) in entries {
            config.commands_mut().add(name, *text).unwrap();
        }
        config
    }

    #[tokio::test]
    async fn responds_with_configured_text() {
        let shared = shared_config(config_with(&[("!hello", "hi there"), ("!discord", "")]));
        let responder = Responder::new(shared);

        assert_eq!(
            responder.on_message(&message("!hello")).await,
            Some("hi there".to_string())
        );
        // matched but unset: the caller emits nothing
        assert_eq!(
            responder.on_message(&message("!discord")).await,
            Some(String::new())
        );
        assert_eq!(responder.on_message(&message("!unknown")).await, None);
    }

    #[tokio::test]
    async fn roster_lookup_lists_the_other_commands() {
        let shared = shared_config(config_with(&[("!hello", "hi"), ("!bye", "see ya")]));
        let responder = Responder::new(shared);

        assert_eq!(
            responder.on_message(&message("!commands")).await,
            Some("!hello, !bye".to_string())
        );
    }

    #[tokio::test]
    async fn edits_are_visible_without_reconnect() {
        let shared = shared_config(config_with(&[]));
        let responder = Responder::new(Arc::clone(&shared));

        assert_eq!(responder.on_message(&message("!brb")).await, None);

        shared.write().await.commands_mut().add("!brb", "back soon").unwrap();
        assert_eq!(
            responder.on_message(&message("!brb")).await,
            Some("back soon".to_string())
        );
    }

    #[tokio::test]
    async fn replace_never_exposes_a_mixed_generation() {
        let gen_a = config_with(&[("!probe", "alpha"), ("!extra-a", "x")]);
        let gen_b = config_with(&[("!probe", "beta"), ("!extra-b", "y")]);

        let shared = shared_config(gen_a.clone());
        let responder = Responder::new(Arc::clone(&shared));

        let writer = {
            let shared = Arc::clone(&shared);
            let (gen_a, gen_b) = (gen_a.clone(), gen_b.clone());
            tokio::spawn(async move {
                for round in 0..200 {
                    let next = if round % 2 == 0 { gen_b.clone() } else { gen_a.clone() };
                    shared.write().await.replace(next);
                    tokio::task::yield_now().await;
                }
            })
        };

        for _ in 0..200 {
            let response = responder.on_message(&message("!probe")).await;
            assert!(
                response.as_deref() == Some("alpha") || response.as_deref() == Some("beta"),
                "lookup saw a torn registry: {:?}",
                response
            );

            // the roster must agree with whichever generation is installed
            let config = shared.read().await;
            let commands = config.commands();
            let names: Vec<&str> = commands
                .entries()
                .iter()
                .skip(1)
                .map(|e| e.name())
                .collect();
            assert_eq!(commands.get(0).unwrap().text(), names.join(", "));
            drop(config);

            tokio::task::yield_now().await;
        }

        writer.await.unwrap();
    }
}
