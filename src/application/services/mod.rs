//! Application services - Business logic orchestration

pub mod responder;
pub mod settings;

pub use responder::{shared_config, Responder, SharedConfig};
pub use settings::SettingsService;
