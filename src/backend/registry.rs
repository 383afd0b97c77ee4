//! Registry of configured provider clients

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::info;

use crate::backend::catalog::ProviderKey;
use crate::backend::http_backend::HttpImageProvider;
use crate::backend::traits::ImageProvider;
use crate::config::ProviderEndpointConfig;
use crate::error::Result;

/// Maps each provider to the client that talks to it
#[derive(Default)]
pub struct ProviderRegistry {
    clients: HashMap<ProviderKey, Arc<dyn ImageProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build HTTP clients for every configured provider
    pub fn from_config(providers: &BTreeMap<ProviderKey, ProviderEndpointConfig>) -> Result<Self> {
        let mut registry = Self::new();
        for (key, config) in providers {
            let client = HttpImageProvider::new(*key, config)?;
            info!(
                provider = %key,
                name = key.spec().display_name,
                endpoint = %client.endpoint(),
                "Registered provider client"
            );
            registry.register(Arc::new(client));
        }
        Ok(registry)
    }

    /// Add or replace the client for `provider.key()`
    pub fn register(&mut self, provider: Arc<dyn ImageProvider>) {
        self.clients.insert(provider.key(), provider);
    }

    pub fn get(&self, key: ProviderKey) -> Option<Arc<dyn ImageProvider>> {
        self.clients.get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
