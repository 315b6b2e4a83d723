//! GeminiBackend - Direct REST implementation of the generative backend.
//!
//! Calls `models/{model}:generateContent` in JSON mode, passing the output
//! contract as `responseSchema`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use vibe_core::config::{DEFAULT_MODEL_NAME, DEFAULT_REQUEST_TIMEOUT_SECS};
use vibe_core::error::{Result, VibeError};
use vibe_core::generation::{GenerativeBackend, OutputContract};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const JSON_MIME_TYPE: &str = "application/json";

/// Generative backend that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    /// Creates a backend with the default request timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(
            api_key,
            model,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VibeError::config(format!("Failed to build HTTP client: {}", e)))?;
        let model = model.into();
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: if model.trim().is_empty() {
                DEFAULT_MODEL_NAME.to_string()
            } else {
                model
            },
            base_url: BASE_URL.to_string(),
        })
    }

    /// Points the backend at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(&self, body: &GenerateContentRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| VibeError::BackendUnavailable {
                status_code: None,
                message: format!("Gemini API request failed: {err}"),
                retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            VibeError::malformed(format!("Failed to parse Gemini response envelope: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn complete(&self, prompt: &str, contract: &OutputContract) -> Result<String> {
        let request = GenerateContentRequest::new(prompt, contract.schema());
        self.send_request(&request).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, schema: &'a Value) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| VibeError::malformed("Gemini API returned no text in the response candidates"))
}

fn map_http_error(status: StatusCode, body: String) -> VibeError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    VibeError::BackendUnavailable {
        message,
        status_code: Some(status.as_u16()),
        retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_core::Language;

    #[test]
    fn test_request_body_carries_schema_in_json_mode() {
        let contract = OutputContract::for_language(Language::English);
        let request = GenerateContentRequest::new("make a quiz", contract.schema());

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "make a quiz");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], *contract.schema());
    }

    #[test]
    fn test_extract_text_from_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"htmlCode\": \"x\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), r#"{"htmlCode": "x"}"#);
    }

    #[test]
    fn test_missing_candidates_is_malformed() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text_response(response).unwrap_err().is_malformed_response());
    }

    #[test]
    fn test_map_http_error_retryability() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        match &err {
            VibeError::BackendUnavailable {
                message,
                status_code,
                retryable,
            } => {
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
                assert_eq!(*status_code, Some(429));
                assert!(retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = map_http_error(StatusCode::BAD_REQUEST, "plain text".to_string());
        assert!(err.is_backend_unavailable());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_blank_model_uses_default() {
        let backend = GeminiBackend::new("key", " ").unwrap();
        assert_eq!(backend.model_name(), DEFAULT_MODEL_NAME);
        let backend = backend.with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            backend.endpoint(),
            format!("http://localhost:8080/v1/{}:generateContent", DEFAULT_MODEL_NAME)
        );
    }
}
