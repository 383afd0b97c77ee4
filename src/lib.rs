//! Image Generation Gateway
//!
//! Proxies image generation requests to third-party providers, applying a
//! runtime-editable set of admin settings (model overrides, prompt prefix,
//! dimensions, seeds, timeouts) held in memory for the life of the process.

pub mod admin;
pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod response;

pub use error::{AppError, Result};

use std::sync::Arc;

use admin::SettingsStore;
use gateway::Dispatcher;

/// Application state shared across all handlers
pub struct AppState {
    pub config: config::ServiceConfig,
    pub store: Arc<SettingsStore>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(
        config: config::ServiceConfig,
        store: Arc<SettingsStore>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            config,
            store,
            dispatcher,
        }
    }
}
