//! Admin settings: record, validating merge, and process-wide store

pub mod patch;
pub mod settings;
pub mod store;

pub use patch::{GenerationPatch, SettingsError, SettingsPatch};
pub use settings::{AdminSettings, GenerationSettings};
pub use store::SettingsStore;
