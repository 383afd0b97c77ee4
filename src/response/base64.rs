//! Base64 helpers for provider image payloads

use base64::{engine::general_purpose::STANDARD, Engine};
use crate::error::{AppError, Result};

/// Strip a `data:image/...;base64,` prefix if present
pub fn strip_data_url(payload: &str) -> &str {
    let payload = payload.trim();
    if payload.starts_with("data:") {
        payload.split_once(',').map(|(_, data)| data).unwrap_or(payload)
    } else {
        payload
    }
}

/// Normalize a provider payload to bare base64, rejecting anything undecodable
pub fn normalize(payload: &str) -> Result<String> {
    let data = strip_data_url(payload);
    STANDARD
        .decode(data)
        .map_err(|e| AppError::ProviderFailure(format!("Invalid base64 image data: {}", e)))?;
    Ok(data.to_string())
}
