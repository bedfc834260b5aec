use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::{LlmSettings, Secret};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("DASHSCOPE_API_KEY not set")]
    ApiKeyNotSet,

    #[error("API key rejected: {0}")]
    Unauthorized(String),

    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("model returned an empty completion")]
    EmptyResponse,

    #[error("invalid completion payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Single-shot text completion used to summarize fact-check material.
/// Implemented by `DashScopeClient` for production; mock implementations used in tests.
pub trait Summarizer {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;
}

#[derive(Clone)]
pub struct DashScopeClient {
    http: Client,
    api_key: Option<Secret>,
    model: String,
    base_url: String,
}

impl DashScopeClient {
    /// Builds a client even without a key; requests then fail with `ApiKeyNotSet`.
    pub fn new(http: Client, settings: &LlmSettings) -> Self {
        if settings.api_key.is_none() {
            warn!("DASHSCOPE_API_KEY not set; summaries will use the document fallback");
        }
        Self {
            http,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
        }
    }
}

impl Summarizer for DashScopeClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::ApiKeyNotSet)?;
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let structured = serde_json::from_str::<ChatCompletionResponse>(&text)
                .ok()
                .and_then(|body| body.error);
            let err = classify_status(status, structured.as_ref(), &text);
            warn!(status = %status, error = %err, "DashScope API error");
            return Err(err);
        }

        let text = response.text().await?;
        let body: ChatCompletionResponse = serde_json::from_str(&text)?;
        if let Some(err) = &body.error {
            let message = err.message.clone().unwrap_or_default();
            warn!(code = ?err.code, "DashScope API error in 200 response");
            return Err(LlmError::Api {
                code: status.as_u16(),
                message,
            });
        }

        debug!(model = %self.model, "completion received");
        body.first_text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }
}

fn classify_status(status: StatusCode, err: Option<&ApiError>, raw: &str) -> LlmError {
    let message = err.and_then(|e| e.message.clone()).unwrap_or_else(|| {
        let snippet = crate::text::truncate_chars(raw, 200);
        format!("HTTP {status}: {snippet}")
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
        _ => LlmError::Api {
            code: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_401_as_unauthorized() {
        let err = ApiError {
            code: Some("invalid_api_key".into()),
            message: Some("Incorrect API key provided.".into()),
        };
        match classify_status(StatusCode::UNAUTHORIZED, Some(&err), "") {
            LlmError::Unauthorized(message) => assert!(message.contains("Incorrect")),
            other => panic!("expected Unauthorized, got: {other:?}"),
        }
    }

    #[test]
    fn classify_429_as_rate_limited() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, None, ""),
            LlmError::RateLimited
        ));
    }

    #[test]
    fn classify_500_without_body_keeps_snippet() {
        match classify_status(StatusCode::INTERNAL_SERVER_ERROR, None, "upstream exploded") {
            LlmError::Api { code, message } => {
                assert_eq!(code, 500);
                assert!(message.contains("upstream exploded"), "got: {message}");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }
}
