//! Functional tests for the admin settings endpoints

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use imagegen_gateway::admin::AdminSettings;
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, build_app, json_request};

#[tokio::test]
async fn test_get_returns_settings_models_and_providers() {
    let (app, _) = build_app(None, vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin-settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["settings"], serde_json::to_value(AdminSettings::default()).unwrap());
    assert_eq!(body["providers"], json!(["replicate", "vertex", "openai", "fireworks"]));
    assert!(body["availableModels"]["openai"]
        .as_array()
        .unwrap()
        .contains(&json!("dall-e-2")));
}

#[tokio::test]
async fn test_post_patch_commits_and_returns_full_settings() {
    let (app, state) = build_app(None, vec![]);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin-settings",
            json!({
                "systemPrompt": "Flat vector art.",
                "providerModelOverrides": { "fireworks": "accounts/fireworks/models/SSD-1B" },
                "unknownField": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["systemPrompt"], "Flat vector art.");
    assert_eq!(
        body["providerModelOverrides"]["fireworks"],
        "accounts/fireworks/models/SSD-1B"
    );
    assert_eq!(body["defaultProvider"], "replicate");
    assert!(body.get("unknownField").is_none());

    assert_eq!(state.store.get().system_prompt, "Flat vector art.");
}

#[tokio::test]
async fn test_invalid_override_returns_error_and_keeps_state() {
    let (app, state) = build_app(None, vec![]);
    let before = state.store.get();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin-settings",
            json!({
                "hideModelFromUser": false,
                "providerModelOverrides": { "openai": "flux-pro" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "invalid model for provider openai");
    assert_eq!(*state.store.get(), *before);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, state) = build_app(None, vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin-settings")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(*state.store.get(), AdminSettings::default());
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let (app, state) = build_app(None, vec![]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin-settings",
            json!({ "providerEnabled": { "fireworks": true }, "generation": { "seed": 9 } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.store.get().is_enabled(imagegen_gateway::backend::catalog::ProviderKey::Fireworks));

    let response = app
        .oneshot(json_request("POST", "/api/admin-settings/reset", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, serde_json::to_value(AdminSettings::default()).unwrap());
    assert_eq!(*state.store.get(), AdminSettings::default());
}

#[tokio::test]
async fn test_dimension_switch_keeps_previous_size() {
    let (app, state) = build_app(None, vec![]);

    for patch in [
        json!({ "generation": { "size": "2048x2048" } }),
        json!({ "generation": { "dimensionFormat": "aspectRatio" } }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/admin-settings", patch))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let settings = state.store.get();
    assert_eq!(settings.generation.size.as_deref(), Some("2048x2048"));
    assert_eq!(settings.generation.aspect_ratio.as_deref(), Some("1:1"));
}
