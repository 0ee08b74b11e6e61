use crate::application::errors::RegistryError;

/// Name of the always-present roster entry
pub const ROSTER_NAME: &str = "!commands";

/// Response text limit, enforced here rather than in the editing surface
pub const MAX_TEXT_LEN: usize = 500;

/// Distinguishes the built-in roster entry from user-defined commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The first entry, whose text is derived from the other entries' names
    Roster,
    /// A command added by the user
    Custom,
}

/// One trigger/response pair recognized in chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    name: String,
    text: String,
    kind: EntryKind,
}

impl CommandEntry {
    fn new(name: String, text: String, kind: EntryKind) -> Self {
        Self { name, text, kind }
    }

    /// Normalized name, including the leading `!`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Response text; empty means unset, nothing is sent on a match
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_roster(&self) -> bool {
        self.kind == EntryKind::Roster
    }
}

/// Ordered collection of commands for one channel.
///
/// Insertion order is user-visible. The first entry is always the roster
/// (`!commands`); its text is regenerated after every mutation as the
/// comma-joined names of all other entries, and no two entries ever share a
/// normalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        let roster = CommandEntry::new(ROSTER_NAME.to_string(), String::new(), EntryKind::Roster);
        Self { entries: vec![roster] }
    }

    /// Lower-cases a raw command name and prepends the `!` sentinel if absent.
    ///
    /// Empty names, a bare `!`, and names containing whitespace are invalid.
    pub fn normalize(raw: &str) -> Result<String, RegistryError> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName(raw.to_string()));
        }

        let lower = raw.to_lowercase();
        let name = if lower.starts_with('!') { lower } else { format!("!{}", lower) };
        if name.len() == 1 {
            return Err(RegistryError::InvalidName(raw.to_string()));
        }

        Ok(name)
    }

    /// Adds a command and returns its index.
    pub fn add(&mut self, raw_name: &str, text: impl Into<String>) -> Result<usize, RegistryError> {
        let name = Self::normalize(raw_name)?;
        let text = text.into();
        Self::check_text(&text)?;

        // Stored names are already lower-cased, so equality here is the
        // case-insensitive collision check.
        if self.entries.iter().any(|e| e.name == name) {
            return Err(RegistryError::DuplicateName(name));
        }

        self.entries.push(CommandEntry::new(name, text, EntryKind::Custom));
        self.rebuild_roster();
        Ok(self.entries.len() - 1)
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CommandEntry, RegistryError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange(index))?;
        if entry.is_roster() {
            return Err(RegistryError::ProtectedEntry);
        }

        let removed = self.entries.remove(index);
        self.rebuild_roster();
        Ok(removed)
    }

    /// Overwrites the response text of the entry at `index`.
    ///
    /// The roster's text is derived, never directly settable.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), RegistryError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(RegistryError::IndexOutOfRange(index))?;
        if entry.is_roster() {
            return Err(RegistryError::ProtectedEntry);
        }

        let text = text.into();
        Self::check_text(&text)?;
        entry.text = text;
        Ok(())
    }

    /// First case-insensitive exact match of `message` against entry names,
    /// in insertion order.
    ///
    /// The message is taken literally: `!hello` matches, a bare `hello` does
    /// not. No normalization is applied on the lookup side.
    pub fn find(&self, message: &str) -> Option<usize> {
        let lowered = message.to_lowercase();
        self.entries.iter().position(|e| e.name == lowered)
    }

    pub fn get(&self, index: usize) -> Option<&CommandEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuilds a registry from persisted name/text pairs.
    ///
    /// A stored roster record contributes nothing — its text is derived, not
    /// trusted from disk. Records violating registry invariants are an error;
    /// the store treats that as a corrupt file.
    pub fn from_records<I>(records: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut registry = Self::new();
        for (name, text) in records {
            if name == ROSTER_NAME {
                continue;
            }
            registry.add(&name, text)?;
        }
        Ok(registry)
    }

    fn check_text(text: &str) -> Result<(), RegistryError> {
        let len = text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(RegistryError::TextTooLong(len));
        }
        Ok(())
    }

    fn rebuild_roster(&mut self) {
        let listing = self
            .entries
            .iter()
            .filter(|e| !e.is_roster())
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if let Some(roster) = self.entries.iter_mut().find(|e| e.is_roster()) {
            roster.text = listing;
        }
    }
}
