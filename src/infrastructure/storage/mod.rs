//! File-based persistence for the user config aggregate

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::errors::StoreError;
use crate::domain::entities::{CommandRegistry, UserConfig};
use crate::domain::traits::Store;

/// Current on-disk schema version
const FORMAT_VERSION: u32 = 1;

/// Default user config file name, resolved against the working directory
pub const DEFAULT_PATH: &str = "userconfig.dat";

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    version: u32,
    channel: String,
    commands: Vec<CommandRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CommandRecord {
    name: String,
    text: String,
}

/// Stores the aggregate as version-tagged JSON at a single path.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<UserConfig, StoreError> {
        let bytes = fs::read(&self.path)?;
        let file: ConfigFile = serde_json::from_slice(&bytes)?;
        if file.version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion(file.version));
        }

        let registry = CommandRegistry::from_records(
            file.commands.into_iter().map(|r| (r.name, r.text)),
        )?;
        Ok(UserConfig::from_parts(&file.channel, registry))
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl Store for ConfigStore {
    /// Reads the aggregate from disk.
    ///
    /// Any failure — missing file, unreadable bytes, unknown version, records
    /// violating registry invariants — falls back to a fresh default config.
    fn load(&self) -> UserConfig {
        match self.try_load() {
            Ok(config) => config,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No user config at {}, starting fresh", self.path.display());
                UserConfig::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read user config from {}: {}, starting fresh",
                    self.path.display(),
                    e
                );
                UserConfig::default()
            }
        }
    }

    /// Writes the aggregate, replacing any previous file.
    ///
    /// The bytes go to a sibling temp file first and are renamed over the
    /// target, so an interrupted write leaves the previous file intact.
    fn save(&self, config: &UserConfig) -> Result<(), StoreError> {
        let file = ConfigFile {
            version: FORMAT_VERSION,
            channel: config.channel_name().to_string(),
            commands: config
                .commands()
                .entries()
                .iter()
                .map(|e| CommandRecord {
                    name: e.name().to_string(),
                    text: e.text().to_string(),
                })
                .collect(),
        };
        let bytes = serde_json::to_vec_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(DEFAULT_PATH))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut config = UserConfig::new("somestreamer");
        config.commands_mut().add("!hello", "hi there").unwrap();
        config.commands_mut().add("!discord", "").unwrap();

        store.save(&config).unwrap();
        let loaded = store.load();

        assert_eq!(loaded, config);
        let names: Vec<&str> = loaded.commands().entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["!commands", "!hello", "!discord"]);
    }

    #[test]
    fn load_missing_file_yields_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = store_in(&dir).load();

        assert_eq!(loaded.channel_name(), "");
        assert_eq!(loaded.commands().len(), 1);
        assert_eq!(loaded.commands().get(0).unwrap().text(), "");
    }

    #[test]
    fn load_corrupt_file_yields_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), b"not json at all").unwrap();
        assert_eq!(store.load(), UserConfig::default());
    }

    #[test]
    fn load_unknown_version_yields_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(
            store.path(),
            br#"{"version": 99, "channel": "x", "commands": []}"#,
        )
        .unwrap();
        assert_eq!(store.load(), UserConfig::default());
    }

    #[test]
    fn load_regenerates_the_roster_from_stored_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // a roster record with stale text must not be trusted
        fs::write(
            store.path(),
            br#"{
                "version": 1,
                "channel": "somestreamer",
                "commands": [
                    {"name": "!commands", "text": "stale"},
                    {"name": "!hello", "text": "hi"}
                ]
            }"#,
        )
        .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.commands().get(0).unwrap().text(), "!hello");
    }

    #[test]
    fn save_replaces_the_previous_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&UserConfig::new("first")).unwrap();
        let mut next = UserConfig::new("second");
        next.commands_mut().add("!hello", "hi").unwrap();
        store.save(&next).unwrap();

        assert_eq!(store.load(), next);
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, [DEFAULT_PATH]);
    }
}
