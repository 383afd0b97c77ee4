//! Image request dispatcher: resolves effective parameters from the current
//! settings and races the provider call against the configured timeout.

use rand::Rng;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::admin::settings::AdminSettings;
use crate::backend::catalog::ProviderKey;
use crate::backend::registry::ProviderRegistry;
use crate::backend::traits::ImageRequest;
use crate::error::{AppError, Result};
use crate::response::GenerateImageResponse;

/// Randomized seeds are drawn from `0..SEED_UPPER_BOUND`
pub const SEED_UPPER_BOUND: i64 = 1_000_000;

/// Caller's generation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

/// Everything needed to make one provider call
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeneration {
    pub provider: ProviderKey,
    pub request: ImageRequest,
    pub timeout: Duration,
}

/// Resolve a request against a settings snapshot
pub fn resolve(request: &GenerateImageRequest, settings: &AdminSettings) -> Result<ResolvedGeneration> {
    resolve_with_rng(request, settings, &mut rand::thread_rng())
}

/// Same as [`resolve`] with an explicit source of randomness for seeds
pub fn resolve_with_rng<R: Rng>(
    request: &GenerateImageRequest,
    settings: &AdminSettings,
    rng: &mut R,
) -> Result<ResolvedGeneration> {
    let prompt = request.prompt.as_deref().filter(|p| !p.is_empty());
    let provider = request
        .provider
        .as_deref()
        .and_then(|p| p.parse::<ProviderKey>().ok());

    let (prompt, provider) = match (prompt, provider) {
        (Some(prompt), Some(provider)) => (prompt, provider),
        _ => {
            return Err(AppError::InvalidRequest(
                "Invalid request parameters".to_string(),
            ))
        }
    };

    if !settings.is_enabled(provider) {
        return Err(AppError::ProviderDisabled(provider));
    }

    let override_model = settings.model_override(provider);
    let model = if settings.hide_model_from_user {
        override_model
    } else {
        request.model_id.as_deref().or(override_model)
    }
    .ok_or_else(|| {
        AppError::InvalidRequest(format!("No model configured for provider {}", provider))
    })?;

    let prompt = if settings.system_prompt.is_empty() {
        prompt.to_string()
    } else {
        format!("{}\n{}", settings.system_prompt, prompt)
    };

    let generation = &settings.generation;
    let seed = if generation.use_seed && provider.accepts_seed() {
        if generation.randomize_seed {
            Some(rng.gen_range(0..SEED_UPPER_BOUND))
        } else {
            generation.seed
        }
    } else {
        None
    };

    let add_watermark = (provider == ProviderKey::Vertex).then_some(generation.vertex_add_watermark);

    Ok(ResolvedGeneration {
        provider,
        request: ImageRequest {
            model: model.to_string(),
            prompt,
            dimension: generation.dimension(),
            seed,
            add_watermark,
        },
        timeout: generation.timeout(),
    })
}

/// Sends resolved requests to provider clients
pub struct Dispatcher {
    providers: Arc<ProviderRegistry>,
}

impl Dispatcher {
    pub fn new(providers: Arc<ProviderRegistry>) -> Self {
        Self { providers }
    }

    /// Run one generation against a snapshot taken by the caller.
    ///
    /// Provider errors and timeouts are logged in full and returned as
    /// [`AppError::ProviderFailure`] / [`AppError::Timeout`], whose client
    /// message is generic. A timed out provider future is dropped.
    pub async fn dispatch(
        &self,
        request: GenerateImageRequest,
        settings: Arc<AdminSettings>,
    ) -> Result<GenerateImageResponse> {
        let request_id = Uuid::new_v4();

        let resolved = resolve(&request, &settings).map_err(|e| {
            warn!(%request_id, provider = ?request.provider, error = %e, "Rejected image request");
            e
        })?;
        let provider = resolved.provider;
        let model = resolved.request.model.clone();

        let client = self.providers.get(provider).ok_or_else(|| {
            error!(%request_id, %provider, %model, "No client configured for provider");
            AppError::ProviderFailure(format!("No client configured for provider {}", provider))
        })?;

        let started = Instant::now();
        let timeout = resolved.timeout;
        match tokio::time::timeout(timeout, client.generate(resolved.request)).await {
            Ok(Ok(image)) => {
                if !image.warnings.is_empty() {
                    warn!(%request_id, %provider, %model, warnings = ?image.warnings, "Provider returned warnings");
                }
                info!(
                    %request_id,
                    %provider,
                    %model,
                    elapsed_secs = started.elapsed().as_secs_f64(),
                    "Completed image request"
                );
                Ok(GenerateImageResponse {
                    provider,
                    image: image.base64,
                })
            }
            Ok(Err(e)) => {
                error!(%request_id, %provider, %model, error = %e, "Error generating image");
                Err(AppError::ProviderFailure(e.to_string()))
            }
            Err(_) => {
                error!(
                    %request_id,
                    %provider,
                    %model,
                    timeout_ms = timeout.as_millis() as u64,
                    "Image request timed out"
                );
                Err(AppError::Timeout(format!(
                    "Request timed out after {}ms",
                    timeout.as_millis()
                )))
            }
        }
    }
}
