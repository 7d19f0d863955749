//! Error types for configuration loading and answer requests

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building an [`AnswerClient`](crate::AnswerClient).
#[derive(Error, Debug)]
pub enum TikuError {
    #[error("config file {} is missing or unreadable: {source}", .path.display())]
    Configuration {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("config source is not valid INI: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("set doubao_api_key in the [tiku] section of the config file")]
    MissingCredential,

    #[error("invalid value for [tiku] {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors returned by a [`ChatGateway`](crate::llm::ChatGateway).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("gateway returned no choices")]
    NoChoices,

    #[error("gateway returned a message without text")]
    EmptyMessage,
}

/// Why an answer request produced no answer.
#[derive(Error, Debug)]
pub enum RequestFailure {
    #[error("gateway request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("model reply is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("model reply has an unexpected shape: {0}")]
    UnexpectedShape(String),

    #[error("model returned an empty answer")]
    EmptyAnswer,
}
