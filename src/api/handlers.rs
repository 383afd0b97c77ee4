//! Request handlers

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::admin::{AdminSettings, SettingsPatch};
use crate::backend::catalog::{self, ProviderKey};
use crate::error::{AppError, Result};
use crate::gateway::GenerateImageRequest;
use crate::response::GenerateImageResponse;
use crate::AppState;

/// Body of `GET /api/admin-settings`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettingsView {
    pub settings: Arc<AdminSettings>,
    pub available_models: BTreeMap<ProviderKey, Vec<String>>,
    pub providers: Vec<ProviderKey>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_admin_settings(State(state): State<Arc<AppState>>) -> Json<AdminSettingsView> {
    Json(AdminSettingsView {
        settings: state.store.get(),
        available_models: state.store.available_models(),
        providers: catalog::providers().iter().map(|spec| spec.key).collect(),
    })
}

pub async fn update_admin_settings(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Arc<AdminSettings>>> {
    let value: Value = serde_json::from_slice(&body)?;
    let patch = SettingsPatch::from_json(value);

    let updated = state.store.patch(&patch).map_err(|e| {
        warn!(error = %e, "Rejected admin settings patch");
        AppError::from(e)
    })?;

    info!("Admin settings patched");
    Ok(Json(updated))
}

pub async fn reset_admin_settings(State(state): State<Arc<AppState>>) -> Json<Arc<AdminSettings>> {
    Json(state.store.reset())
}

pub async fn generate_images(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateImageResponse>> {
    let request: GenerateImageRequest = serde_json::from_slice(&body)
        .map_err(|_| AppError::InvalidRequest("Invalid request parameters".to_string()))?;

    // One snapshot per request; later settings changes do not affect it
    let settings = state.store.get();
    let response = state.dispatcher.dispatch(request, settings).await?;
    Ok(Json(response))
}
