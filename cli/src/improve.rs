//! Chat-completions client for the text-improvement phase.

use std::time::Duration;

use docpolish::{ImproveError, TextImprover};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Default chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4";

const TEMPERATURE: f64 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Posts text to an OpenAI-style chat-completions endpoint.
pub struct ChatCompletionsImprover {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    api_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsImprover {
    /// Create a client for `api_url` using `api_key` and `model`.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            client,
            runtime,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn send(&self, text: &str, instruction: &str) -> Result<String, ImproveError> {
        let body = request_body(&self.model, text, instruction);
        log::debug!("Sending {} characters to {}", text.len(), self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ImproveError::RateLimited);
        }
        let payload = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(ImproveError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                payload
            )));
        }

        parse_reply(&payload)
    }
}

impl TextImprover for ChatCompletionsImprover {
    fn improve(&self, text: &str, instruction: &str) -> Result<String, ImproveError> {
        self.runtime.block_on(self.send(text, instruction))
    }
}

fn request_body(model: &str, text: &str, instruction: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": instruction },
            { "role": "user", "content": text }
        ],
        "temperature": TEMPERATURE
    })
}

fn map_transport_error(e: reqwest::Error) -> ImproveError {
    if e.is_timeout() {
        ImproveError::Timeout
    } else {
        ImproveError::RequestFailed(e.to_string())
    }
}

/// Extract `choices[0].message.content` from a reply body.
fn parse_reply(payload: &str) -> Result<String, ImproveError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ImproveError::InvalidResponse(e.to_string()))?;

    value["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ImproveError::InvalidResponse("missing message content".to_string()))
}
