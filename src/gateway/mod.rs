//! Gateway module - request resolution and provider dispatch

pub mod dispatcher;

pub use dispatcher::{Dispatcher, GenerateImageRequest, ResolvedGeneration};
