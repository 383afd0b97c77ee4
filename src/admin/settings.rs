//! Runtime-editable admin settings and their fixed defaults

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::backend::catalog::{DimensionFormat, ModelProfile, ProviderKey};
use crate::backend::traits::Dimension;

/// Upper bound on a single generation when no timeout is configured
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 55 * 1000;

pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// The single mutable settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    pub default_provider: ProviderKey,
    /// Model used per provider when the caller's choice is hidden.
    /// Every value is a member of that provider's allow-list.
    pub provider_model_overrides: BTreeMap<ProviderKey, String>,
    pub default_prompt: String,
    /// Prepended to every generation prompt when non-empty
    pub system_prompt: String,
    pub hide_model_from_user: bool,
    pub provider_enabled: BTreeMap<ProviderKey, bool>,
    pub generation: GenerationSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<String>,
}

/// Generation parameters applied to every image request.
///
/// `size` and `aspect_ratio` are both retained regardless of
/// `dimension_format`; only the one matching the active format is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub dimension_format: DimensionFormat,
    pub size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub use_seed: bool,
    pub randomize_seed: bool,
    pub seed: Option<i64>,
    pub vertex_add_watermark: bool,
    pub timeout_millis: Option<u64>,
}

impl AdminSettings {
    /// Providers missing from the map count as disabled
    pub fn is_enabled(&self, provider: ProviderKey) -> bool {
        self.provider_enabled.get(&provider).copied().unwrap_or(false)
    }

    pub fn model_override(&self, provider: ProviderKey) -> Option<&str> {
        self.provider_model_overrides
            .get(&provider)
            .map(String::as_str)
    }
}

impl GenerationSettings {
    /// The dimension parameter for the active format, with defaults filled in
    pub fn dimension(&self) -> Dimension {
        match self.dimension_format {
            DimensionFormat::Size => Dimension::Size(
                self.size
                    .clone()
                    .unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
            ),
            DimensionFormat::AspectRatio => Dimension::AspectRatio(
                self.aspect_ratio
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis.unwrap_or(DEFAULT_TIMEOUT_MILLIS))
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            default_provider: ProviderKey::Replicate,
            provider_model_overrides: ModelProfile::Performance.overrides(),
            default_prompt: String::new(),
            system_prompt: String::new(),
            hide_model_from_user: true,
            provider_enabled: BTreeMap::from([
                (ProviderKey::Replicate, true),
                (ProviderKey::Vertex, false),
                (ProviderKey::OpenAi, false),
                (ProviderKey::Fireworks, false),
            ]),
            generation: GenerationSettings::default(),
            asset_root: None,
            output_folder: None,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            dimension_format: DimensionFormat::Size,
            size: Some(DEFAULT_IMAGE_SIZE.to_string()),
            aspect_ratio: Some(DEFAULT_ASPECT_RATIO.to_string()),
            use_seed: true,
            randomize_seed: true,
            seed: None,
            vertex_add_watermark: false,
            timeout_millis: Some(DEFAULT_TIMEOUT_MILLIS),
        }
    }
}
