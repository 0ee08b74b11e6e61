use super::command::CommandRegistry;

/// The persisted aggregate: channel name plus the command registry.
///
/// Exactly one of these exists per process; the chat listener and the
/// editing surface share it through a locked handle and only ever touch the
/// registry through its methods.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserConfig {
    channel_name: String,
    commands: CommandRegistry,
}

impl UserConfig {
    pub fn new(channel_name: &str) -> Self {
        Self {
            channel_name: clean_channel(channel_name),
            commands: CommandRegistry::new(),
        }
    }

    pub fn from_parts(channel_name: &str, commands: CommandRegistry) -> Self {
        Self {
            channel_name: clean_channel(channel_name),
            commands,
        }
    }

    /// Lower-cased channel login; empty while unconfigured.
    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn set_channel_name(&mut self, name: &str) {
        self.channel_name = clean_channel(name);
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    /// Wholesale replacement — the save path of the editing surface swaps
    /// the entire aggregate at once.
    pub fn replace(&mut self, other: UserConfig) {
        *self = other;
    }
}

// Twitch channel logins are lower-case; the IRC channel prefix is the
// transport's business, not ours.
fn clean_channel(name: &str) -> String {
    name.trim().trim_start_matches('#').to_lowercase()
}
