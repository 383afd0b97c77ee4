//! Static catalog of supported image providers and their model allow-lists

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a supported image generation provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKey {
    Replicate,
    Vertex,
    OpenAi,
    Fireworks,
}

/// How a provider expects image dimensions to be expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionFormat {
    /// Explicit pixel dimensions, e.g. `1024x1024`
    Size,
    /// Width to height ratio, e.g. `16:9`
    AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

/// Immutable description of a provider
#[derive(Debug)]
pub struct ProviderSpec {
    pub key: ProviderKey,
    pub display_name: &'static str,
    pub models: &'static [&'static str],
    pub dimension_format: DimensionFormat,
}

const REPLICATE_MODELS: &[&str] = &[
    "black-forest-labs/flux-1.1-pro",
    "black-forest-labs/flux-1.1-pro-ultra",
    "black-forest-labs/flux-dev",
    "black-forest-labs/flux-pro",
    "black-forest-labs/flux-schnell",
    "ideogram-ai/ideogram-v2",
    "ideogram-ai/ideogram-v2-turbo",
    "luma/photon",
    "luma/photon-flash",
    "recraft-ai/recraft-v3",
    "stability-ai/stable-diffusion-3.5-large",
    "stability-ai/stable-diffusion-3.5-large-turbo",
];

const VERTEX_MODELS: &[&str] = &["imagen-3.0-generate-001", "imagen-3.0-fast-generate-001"];

const OPENAI_MODELS: &[&str] = &["dall-e-2", "dall-e-3"];

const FIREWORKS_MODELS: &[&str] = &[
    "accounts/fireworks/models/flux-1-dev-fp8",
    "accounts/fireworks/models/flux-1-schnell-fp8",
    "accounts/fireworks/models/playground-v2-5-1024px-aesthetic",
    "accounts/fireworks/models/japanese-stable-diffusion-xl",
    "accounts/fireworks/models/playground-v2-1024px-aesthetic",
    "accounts/fireworks/models/SSD-1B",
    "accounts/fireworks/models/stable-diffusion-xl-1024-v1-0",
];

static PROVIDERS: [ProviderSpec; 4] = [
    ProviderSpec {
        key: ProviderKey::Replicate,
        display_name: "Replicate",
        models: REPLICATE_MODELS,
        dimension_format: DimensionFormat::Size,
    },
    ProviderSpec {
        key: ProviderKey::Vertex,
        display_name: "Vertex AI",
        models: VERTEX_MODELS,
        dimension_format: DimensionFormat::AspectRatio,
    },
    ProviderSpec {
        key: ProviderKey::OpenAi,
        display_name: "OpenAI",
        models: OPENAI_MODELS,
        dimension_format: DimensionFormat::Size,
    },
    ProviderSpec {
        key: ProviderKey::Fireworks,
        display_name: "Fireworks",
        models: FIREWORKS_MODELS,
        dimension_format: DimensionFormat::AspectRatio,
    },
];

impl ProviderKey {
    pub const ALL: [ProviderKey; 4] = [
        ProviderKey::Replicate,
        ProviderKey::Vertex,
        ProviderKey::OpenAi,
        ProviderKey::Fireworks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKey::Replicate => "replicate",
            ProviderKey::Vertex => "vertex",
            ProviderKey::OpenAi => "openai",
            ProviderKey::Fireworks => "fireworks",
        }
    }

    /// Static description of this provider
    pub fn spec(&self) -> &'static ProviderSpec {
        match self {
            ProviderKey::Replicate => &PROVIDERS[0],
            ProviderKey::Vertex => &PROVIDERS[1],
            ProviderKey::OpenAi => &PROVIDERS[2],
            ProviderKey::Fireworks => &PROVIDERS[3],
        }
    }

    /// Whether the provider's API accepts a generation seed.
    /// OpenAI's images endpoint rejects one.
    pub fn accepts_seed(&self) -> bool {
        !matches!(self, ProviderKey::OpenAi)
    }

    pub fn allows_model(&self, model: &str) -> bool {
        self.spec().models.contains(&model)
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKey {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// All provider specs in catalog order
pub fn providers() -> &'static [ProviderSpec] {
    &PROVIDERS
}

/// Allowed model identifiers for every provider
pub fn available_models() -> BTreeMap<ProviderKey, Vec<String>> {
    PROVIDERS
        .iter()
        .map(|spec| {
            (
                spec.key,
                spec.models.iter().map(|m| m.to_string()).collect(),
            )
        })
        .collect()
}

/// Named sets of per-provider default models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProfile {
    /// Fast, cheaper models
    Performance,
    /// Slower, higher fidelity models
    Quality,
}

impl ModelProfile {
    pub fn model_for(&self, provider: ProviderKey) -> &'static str {
        match (self, provider) {
            (ModelProfile::Performance, ProviderKey::Replicate) => {
                "stability-ai/stable-diffusion-3.5-large-turbo"
            }
            (ModelProfile::Performance, ProviderKey::Vertex) => "imagen-3.0-fast-generate-001",
            (ModelProfile::Performance, ProviderKey::OpenAi) => "dall-e-3",
            (ModelProfile::Performance, ProviderKey::Fireworks) => {
                "accounts/fireworks/models/flux-1-schnell-fp8"
            }
            (ModelProfile::Quality, ProviderKey::Replicate) => {
                "stability-ai/stable-diffusion-3.5-large"
            }
            (ModelProfile::Quality, ProviderKey::Vertex) => "imagen-3.0-generate-001",
            (ModelProfile::Quality, ProviderKey::OpenAi) => "dall-e-3",
            (ModelProfile::Quality, ProviderKey::Fireworks) => {
                "accounts/fireworks/models/flux-1-dev-fp8"
            }
        }
    }

    /// Provider to model mapping for this profile
    pub fn overrides(&self) -> BTreeMap<ProviderKey, String> {
        ProviderKey::ALL
            .into_iter()
            .map(|key| (key, self.model_for(key).to_string()))
            .collect()
    }
}
