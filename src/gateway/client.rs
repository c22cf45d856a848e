//! HTTP client for the Anthropic Messages API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{build_prompt, Gateway, GatewayError};
use crate::config::GatewayConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/v1/messages";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Join all text blocks. Non-text blocks are skipped.
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("")
    }
}

/// [`Gateway`] backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicGateway {
    config: GatewayConfig,
    client: Client,
}

impl AnthropicGateway {
    /// Create client from environment variables.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::new(GatewayConfig::from_env())
    }

    /// Create with explicit configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            MESSAGES_PATH
        )
    }

    /// Handle response, converting HTTP errors to GatewayError.
    async fn handle_response(response: reqwest::Response) -> Result<String, GatewayError> {
        let status = response.status();
        if status.is_success() {
            let body: MessagesResponse = response.json().await?;
            return Ok(body.into_text());
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GatewayError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(GatewayError::RateLimited),
            _ => Err(GatewayError::Service {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[async_trait]
impl Gateway for AnthropicGateway {
    async fn fetch(&self, question: &str) -> Result<String, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingApiKey)?;

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: 0.0,
            messages: vec![RequestMessage {
                role: "user",
                content: vec![RequestContent {
                    kind: "text",
                    text: build_prompt(question),
                }],
            }],
        };

        tracing::info!(model = %self.config.model, "Requesting answer from model service");

        let response = self
            .client
            .post(self.url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let text = Self::handle_response(response).await?;
        tracing::debug!(chars = text.len(), "Received answer");
        Ok(text)
    }
}
