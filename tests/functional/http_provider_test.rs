//! Functional tests for the HTTP provider client against a mock upstream

use imagegen_gateway::{
    backend::{
        catalog::ProviderKey,
        http_backend::HttpImageProvider,
        traits::{Dimension, ImageProvider, ImageRequest},
    },
    config::ProviderEndpointConfig,
    AppError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer, key: ProviderKey) -> HttpImageProvider {
    HttpImageProvider::new(
        key,
        &ProviderEndpointConfig {
            endpoint: format!("{}/v1/images/generations", server.uri()),
            api_key: Some("sk-test".to_string()),
            timeout_ms: 5_000,
        },
    )
    .unwrap()
}

fn request(dimension: Dimension, seed: Option<i64>) -> ImageRequest {
    ImageRequest {
        model: "dall-e-3".to_string(),
        prompt: "a red fox".to_string(),
        dimension,
        seed,
        add_watermark: None,
    }
}

#[tokio::test]
async fn test_posts_size_request_and_reads_b64_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": "dall-e-3",
            "prompt": "a red fox",
            "n": 1,
            "size": "1024x1024",
            "response_format": "b64_json"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "b64_json": "SGVsbG8sIFdvcmxkIQ==" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = provider(&server, ProviderKey::OpenAi)
        .generate(request(Dimension::Size("1024x1024".into()), None))
        .await
        .unwrap();

    assert_eq!(image.base64, "SGVsbG8sIFdvcmxkIQ==");
    assert!(image.warnings.is_empty());
}

#[tokio::test]
async fn test_aspect_ratio_seed_and_data_url_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "model": "dall-e-3",
            "prompt": "a red fox",
            "n": 1,
            "aspect_ratio": "16:9",
            "seed": 42,
            "response_format": "b64_json"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{ "base64": "data:image/png;base64,SGVsbG8sIFdvcmxkIQ==" }],
            "warnings": ["seed ignored by model"]
        })))
        .mount(&server)
        .await;

    let image = provider(&server, ProviderKey::Fireworks)
        .generate(request(Dimension::AspectRatio("16:9".into()), Some(42)))
        .await
        .unwrap();

    assert_eq!(image.base64, "SGVsbG8sIFdvcmxkIQ==");
    assert_eq!(image.warnings, vec!["seed ignored by model".to_string()]);
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = provider(&server, ProviderKey::Replicate)
        .generate(request(Dimension::Size("512x512".into()), None))
        .await
        .unwrap_err();

    match err {
        AppError::ProviderFailure(message) => assert!(message.contains("quota exceeded")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_response_without_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = provider(&server, ProviderKey::Replicate)
        .generate(request(Dimension::Size("512x512".into()), None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ProviderFailure(_)));
}
