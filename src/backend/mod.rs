//! Backend module - provider catalog, client trait, HTTP client, and registry

pub mod catalog;
pub mod http_backend;
pub mod registry;
pub mod traits;
