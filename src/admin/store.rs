//! Process-wide owner of the current admin settings

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::admin::patch::{SettingsError, SettingsPatch};
use crate::admin::settings::AdminSettings;
use crate::backend::catalog::{self, ProviderKey};

/// Holds one settings record for the lifetime of the process.
///
/// Readers get an `Arc` snapshot that is never mutated; every successful
/// patch or reset swaps in a new record. Nothing is persisted.
pub struct SettingsStore {
    current: RwLock<Arc<AdminSettings>>,
}

impl SettingsStore {
    /// Create a store holding the fixed defaults
    pub fn new() -> Self {
        Self::with_settings(AdminSettings::default())
    }

    pub fn with_settings(settings: AdminSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<AdminSettings> {
        self.current.read().clone()
    }

    /// Validate and merge `patch` over the current record, then commit it.
    ///
    /// The write lock is held across the merge, so concurrent patches are
    /// applied one after another. On error nothing is committed.
    pub fn patch(&self, patch: &SettingsPatch) -> Result<Arc<AdminSettings>, SettingsError> {
        let mut current = self.current.write();
        let next = Arc::new(patch.apply(&current)?);
        *current = next.clone();
        debug!("Admin settings updated");
        Ok(next)
    }

    /// Restore the fixed defaults unconditionally
    pub fn reset(&self) -> Arc<AdminSettings> {
        let defaults = Arc::new(AdminSettings::default());
        *self.current.write() = defaults.clone();
        info!("Admin settings reset to defaults");
        defaults
    }

    /// Allowed models per provider
    pub fn available_models(&self) -> BTreeMap<ProviderKey, Vec<String>> {
        catalog::available_models()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
