//! The configuration editing surface: mutate the shared aggregate, persist it

use crate::application::errors::BotError;
use crate::application::services::responder::SharedConfig;
use crate::domain::entities::{CommandEntry, UserConfig};
use crate::domain::traits::Store;

/// The only mutation path into the shared aggregate.
///
/// Every edit runs under the write lock and is followed by a save. A failed
/// save is logged and returned; the in-memory state stays authoritative
/// until the next successful write.
pub struct SettingsService<S: Store> {
    config: SharedConfig,
    store: S,
}

impl<S: Store> SettingsService<S> {
    pub fn new(config: SharedConfig, store: S) -> Self {
        Self { config, store }
    }

    pub async fn add_command(&self, name: &str, text: &str) -> Result<usize, BotError> {
        let mut config = self.config.write().await;
        let index = config.commands_mut().add(name, text)?;
        self.persist(&config)?;
        Ok(index)
    }

    pub async fn remove_command(&self, index: usize) -> Result<CommandEntry, BotError> {
        let mut config = self.config.write().await;
        let removed = config.commands_mut().remove(index)?;
        self.persist(&config)?;
        Ok(removed)
    }

    pub async fn set_text(&self, index: usize, text: &str) -> Result<(), BotError> {
        let mut config = self.config.write().await;
        config.commands_mut().set_text(index, text)?;
        self.persist(&config)
    }

    pub async fn set_channel(&self, name: &str) -> Result<(), BotError> {
        let mut config = self.config.write().await;
        config.set_channel_name(name);
        self.persist(&config)
    }

    /// Swaps in a whole new aggregate and persists it.
    pub async fn replace(&self, next: UserConfig) -> Result<(), BotError> {
        let mut config = self.config.write().await;
        config.replace(next);
        self.persist(&config)
    }

    pub async fn snapshot(&self) -> UserConfig {
        self.config.read().await.clone()
    }

    fn persist(&self, config: &UserConfig) -> Result<(), BotError> {
        if let Err(e) = self.store.save(config) {
            tracing::warn!("Failed to persist user config: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::responder::shared_config;
    use crate::infrastructure::storage::ConfigStore;

    #[tokio::test]
    async fn edits_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userconfig.dat");

        let store = ConfigStore::new(&path);
        let settings = SettingsService::new(shared_config(store.load()), store);

        settings.set_channel("SomeStreamer").await.unwrap();
        let index = settings.add_command("!hello", "hi there").await.unwrap();
        settings.set_text(index, "hello!").await.unwrap();

        let reloaded = ConfigStore::new(&path).load();
        assert_eq!(reloaded.channel_name(), "somestreamer");
        assert_eq!(reloaded.commands().get(index).unwrap().text(), "hello!");
    }

    #[tokio::test]
    async fn replace_swaps_and_persists_the_whole_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userconfig.dat");

        let store = ConfigStore::new(&path);
        let settings = SettingsService::new(shared_config(store.load()), store);
        settings.add_command("!old", "x").await.unwrap();

        let mut next = UserConfig::new("newchannel");
        next.commands_mut().add("!new", "y").unwrap();
        settings.replace(next.clone()).await.unwrap();

        assert_eq!(settings.snapshot().await, next);
        assert_eq!(ConfigStore::new(&path).load(), next);
    }

    #[tokio::test]
    async fn failed_save_is_reported_but_memory_stays_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        // parent of the store path is a regular file, every save fails
        let store = ConfigStore::new(blocker.join("userconfig.dat"));
        let settings = SettingsService::new(shared_config(store.load()), store);

        let result = settings.add_command("!hello", "hi").await;
        assert!(matches!(result, Err(BotError::Store(_))));

        let snapshot = settings.snapshot().await;
        assert_eq!(snapshot.commands().find("!hello"), Some(1));
    }
}
