//! Process configuration

pub mod service;

pub use service::{AuthConfig, LoggingConfig, ProviderEndpointConfig, ServerConfig, ServiceConfig};
