use crate::application::errors::StoreError;
use crate::domain::entities::UserConfig;

/// Store trait - abstraction for user config persistence
pub trait Store: Send + Sync {
    /// Read the aggregate from durable storage.
    ///
    /// Loading is total: implementations fall back to the default aggregate
    /// instead of failing.
    fn load(&self) -> UserConfig;

    /// Write the aggregate, replacing the previously stored state.
    fn save(&self, config: &UserConfig) -> Result<(), StoreError>;
}
