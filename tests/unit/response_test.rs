//! Unit tests for response payload helpers

use imagegen_gateway::response::{base64, GenerateImageResponse};
use imagegen_gateway::backend::catalog::ProviderKey;

#[test]
fn test_normalize_rejects_invalid_payloads() {
    assert!(base64::normalize("not valid base64!!!").is_err());
    assert!(base64::normalize("data:image/png;base64,%%%").is_err());
}

#[test]
fn test_normalize_strips_data_url_prefix() {
    let encoded = "iVBORw0K";
    let data_url = format!("data:image/png;base64,{}", encoded);
    assert_eq!(base64::normalize(&data_url).unwrap(), encoded);
    assert_eq!(base64::normalize(encoded).unwrap(), encoded);
}

#[test]
fn test_generate_response_shape() {
    let response = GenerateImageResponse {
        provider: ProviderKey::OpenAi,
        image: "SGVsbG8=".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "provider": "openai", "image": "SGVsbG8=" })
    );
}
