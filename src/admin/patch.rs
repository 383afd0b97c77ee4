//! Partial settings updates and the validating merge

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::num::NonZeroU64;
use thiserror::Error;

use crate::admin::settings::{AdminSettings, GenerationSettings};
use crate::backend::catalog::{DimensionFormat, ProviderKey};

/// Rejection of a settings patch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid model for provider {provider}")]
    ModelNotAllowed { provider: String, model: String },
}

/// Partial update to [`AdminSettings`].
///
/// Fields that are absent, or present with the wrong JSON type, are `None`
/// and leave the current value untouched. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, deserialize_with = "lenient")]
    pub default_provider: Option<ProviderKey>,
    /// Kept raw so that unknown providers and non-string models reach
    /// validation instead of being dropped here
    #[serde(default, deserialize_with = "lenient")]
    pub provider_model_overrides: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub system_prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hide_model_from_user: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub provider_enabled: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub generation: Option<GenerationPatch>,
    #[serde(default, deserialize_with = "lenient")]
    pub asset_root: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub output_folder: Option<String>,
}

/// Partial update to the generation sub-record.
///
/// Nullable fields use `Some(None)` for an explicit `null`, which clears them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPatch {
    #[serde(default, deserialize_with = "lenient")]
    pub dimension_format: Option<DimensionFormat>,
    #[serde(default, deserialize_with = "nullable")]
    pub size: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub aspect_ratio: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub use_seed: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub randomize_seed: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub seed: Option<Option<i64>>,
    #[serde(default, deserialize_with = "lenient")]
    pub vertex_add_watermark: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub timeout_millis: Option<Option<NonZeroU64>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Some(None));
    }
    Ok(serde_json::from_value(value).ok().map(Some))
}

impl SettingsPatch {
    /// Build a patch from an arbitrary JSON body. Anything other than an
    /// object yields an empty patch.
    pub fn from_json(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Produce the next settings record, or fail without side effects.
    ///
    /// The model allow-list is the only check; the first offending override
    /// rejects the whole patch.
    pub fn apply(&self, current: &AdminSettings) -> Result<AdminSettings, SettingsError> {
        let mut next = current.clone();

        if let Some(provider) = self.default_provider {
            next.default_provider = provider;
        }

        if let Some(overrides) = &self.provider_model_overrides {
            // Keys iterate in request order
            for (key, model) in overrides {
                let provider = key.parse::<ProviderKey>().ok();
                match (provider, model.as_str()) {
                    (Some(provider), Some(model)) if provider.allows_model(model) => {
                        next.provider_model_overrides
                            .insert(provider, model.to_string());
                    }
                    _ => {
                        return Err(SettingsError::ModelNotAllowed {
                            provider: key.clone(),
                            model: model.to_string(),
                        })
                    }
                }
            }
        }

        if let Some(prompt) = &self.default_prompt {
            next.default_prompt = prompt.clone();
        }
        if let Some(prompt) = &self.system_prompt {
            next.system_prompt = prompt.clone();
        }
        if let Some(hide) = self.hide_model_from_user {
            next.hide_model_from_user = hide;
        }

        if let Some(enabled) = &self.provider_enabled {
            for (key, flag) in enabled {
                if let (Ok(provider), Some(flag)) = (key.parse::<ProviderKey>(), flag.as_bool()) {
                    next.provider_enabled.insert(provider, flag);
                }
            }
        }

        if let Some(generation) = &self.generation {
            generation.merge_into(&mut next.generation);
        }

        if let Some(root) = &self.asset_root {
            next.asset_root = Some(root.clone());
        }
        if let Some(folder) = &self.output_folder {
            next.output_folder = Some(folder.clone());
        }

        Ok(next)
    }
}

impl GenerationPatch {
    /// Last write wins per field. Switching `dimension_format` leaves the
    /// inactive dimension field as it was.
    fn merge_into(&self, target: &mut GenerationSettings) {
        if let Some(format) = self.dimension_format {
            target.dimension_format = format;
        }
        if let Some(size) = &self.size {
            target.size = size.clone();
        }
        if let Some(ratio) = &self.aspect_ratio {
            target.aspect_ratio = ratio.clone();
        }
        if let Some(use_seed) = self.use_seed {
            target.use_seed = use_seed;
        }
        if let Some(randomize) = self.randomize_seed {
            target.randomize_seed = randomize;
        }
        if let Some(seed) = self.seed {
            target.seed = seed;
        }
        if let Some(watermark) = self.vertex_add_watermark {
            target.vertex_add_watermark = watermark;
        }
        if let Some(timeout) = self.timeout_millis {
            target.timeout_millis = timeout.map(NonZeroU64::get);
        }
    }
}
