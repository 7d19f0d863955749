use async_trait::async_trait;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, TikuError};

use super::wire::{ChatCompletionRequest, ChatCompletionResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Sends a chat-completion request and returns the first choice's text.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, GatewayError>;
}

/// [`ChatGateway`] speaking the OpenAI chat-completions protocol over HTTP.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, TikuError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &GatewayConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl ChatGateway for HttpGateway {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, GatewayError> {
        debug!(endpoint = %self.endpoint, model = %request.model, "sending chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        first_choice_text(completion)
    }
}

fn first_choice_text(completion: ChatCompletionResponse) -> Result<String, GatewayError> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or(GatewayError::NoChoices)?;
    choice.message.content.ok_or(GatewayError::EmptyMessage)
}
