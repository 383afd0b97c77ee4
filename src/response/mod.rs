//! Response shapes returned to generation callers

pub mod base64;

use serde::{Deserialize, Serialize};

use crate::backend::catalog::ProviderKey;

/// Successful generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    pub provider: ProviderKey,
    /// Base64 encoded image
    pub image: String,
}
