//! Common traits and types for image generation providers

use async_trait::async_trait;
use serde::Serialize;

use crate::backend::catalog::ProviderKey;
use crate::error::Result;

/// Image dimension parameter, in whichever form is currently active
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Pixel dimensions such as `1024x1024`
    Size(String),
    /// Ratio such as `16:9`
    AspectRatio(String),
}

/// Fully resolved request handed to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    /// Model identifier
    pub model: String,

    /// Prompt, including any system prompt prefix
    pub prompt: String,

    pub dimension: Dimension,

    /// Seed for reproducibility, omitted when the provider does not take one
    pub seed: Option<i64>,

    /// Watermark flag, only set for providers that support it
    pub add_watermark: Option<bool>,
}

/// Image returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// Base64 encoded image data, without any data URL prefix
    pub base64: String,

    /// Non-fatal warnings reported by the provider
    pub warnings: Vec<String>,
}

/// Trait for image generation providers
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Which catalog entry this client serves
    fn key(&self) -> ProviderKey;

    /// Generate a single image
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage>;
}
