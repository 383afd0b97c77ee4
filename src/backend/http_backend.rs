//! HTTP image provider client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::backend::catalog::ProviderKey;
use crate::backend::traits::{Dimension, GeneratedImage, ImageProvider, ImageRequest};
use crate::config::ProviderEndpointConfig;
use crate::error::{AppError, Result};
use crate::response::base64;

/// Provider reached over an images-generation style JSON API
pub struct HttpImageProvider {
    key: ProviderKey,
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

/// Request body sent upstream
#[derive(Debug, Serialize)]
struct ApiGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    add_watermark: Option<bool>,
    response_format: &'a str,
}

/// Upstream response; accepts both `data` and `images` arrays
#[derive(Debug, Deserialize)]
struct ApiGenerateResponse {
    #[serde(default)]
    data: Vec<ApiImageData>,
    #[serde(default)]
    images: Vec<ApiImageData>,
    #[serde(default)]
    warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiImageData {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    base64: Option<String>,
}

impl HttpImageProvider {
    /// Create a new HTTP provider from configuration
    pub fn new(key: ProviderKey, config: &ProviderEndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            key,
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageProvider for HttpImageProvider {
    fn key(&self) -> ProviderKey {
        self.key
    }

    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage> {
        let (size, aspect_ratio) = match &request.dimension {
            Dimension::Size(size) => (Some(size.as_str()), None),
            Dimension::AspectRatio(ratio) => (None, Some(ratio.as_str())),
        };

        let body = ApiGenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            n: 1,
            size,
            aspect_ratio,
            seed: request.seed,
            add_watermark: request.add_watermark,
            response_format: "b64_json",
        };

        debug!(provider = %self.key, endpoint = %self.endpoint, model = %request.model, "Sending generate request");

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderFailure(format!(
                "{} returned {}: {}",
                self.key, status, body
            )));
        }

        let api_response: ApiGenerateResponse = response.json().await.map_err(|e| {
            AppError::ProviderFailure(format!("Failed to parse {} response: {}", self.key, e))
        })?;

        let payload = api_response
            .data
            .into_iter()
            .chain(api_response.images)
            .find_map(|img| img.b64_json.or(img.base64))
            .ok_or_else(|| {
                AppError::ProviderFailure(format!("{} returned no image", self.key))
            })?;

        Ok(GeneratedImage {
            base64: base64::normalize(&payload)?,
            warnings: api_response.warnings,
        })
    }
}
