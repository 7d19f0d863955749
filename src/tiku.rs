use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, error};

use crate::answer::parse_answer;
use crate::config::{BusinessConfig, GatewayConfig, TikuConfig};
use crate::error::{RequestFailure, TikuError};
use crate::judgement::judge;
use crate::llm::{ChatGateway, HttpGateway, build_answer_request};
use crate::throttle::RequestThrottle;

/// Submit parameter asking the course site to save the answers as a draft.
pub const SAVE_DRAFT: &str = "1";
/// Submit parameter asking the course site to submit immediately.
pub const SUBMIT_NOW: &str = "";

/// A question record as handed over by the course-answering workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Question {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_url: None,
        }
    }
}

/// Answers quiz questions through an OpenAI-compatible gateway.
pub struct AnswerClient {
    gateway: Box<dyn ChatGateway>,
    config: GatewayConfig,
    business: BusinessConfig,
    throttle: RequestThrottle,
}

impl AnswerClient {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TikuError> {
        Self::new(TikuConfig::load(path)?)
    }

    pub fn new(config: TikuConfig) -> Result<Self, TikuError> {
        let gateway = HttpGateway::new(&config.gateway)?;
        Ok(Self::with_gateway(config, gateway))
    }

    pub fn with_gateway(config: TikuConfig, gateway: impl ChatGateway + 'static) -> Self {
        let TikuConfig { gateway: config, business } = config;
        Self {
            gateway: Box::new(gateway),
            throttle: RequestThrottle::new(config.min_interval),
            config,
            business,
        }
    }

    pub fn gateway_config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn business_config(&self) -> &BusinessConfig {
        &self.business
    }

    pub fn cover_rate(&self) -> f64 {
        self.business.cover_rate
    }

    /// Asks the gateway and reports why no answer came back, if none did.
    pub async fn answer_outcome(
        &self,
        question: &str,
        image_url: Option<&str>,
    ) -> Result<String, RequestFailure> {
        self.throttle.wait_turn().await;

        let request = build_answer_request(&self.config, question, image_url);
        let content = self.gateway.complete(&request).await?;
        let answer = parse_answer(&content)?;

        if self.business.auto_submit {
            debug!("auto-submitting answer: {answer}");
        }
        Ok(answer)
    }

    /// Like [`answer_outcome`](Self::answer_outcome) but logs the failure
    /// and returns `None` in its place.
    pub async fn answer_question(&self, question: &str, image_url: Option<&str>) -> Option<String> {
        match self.answer_outcome(question, image_url).await {
            Ok(answer) => Some(answer),
            Err(failure) => {
                log_failure(&failure);
                None
            }
        }
    }

    pub async fn query(&self, question: &Question) -> Option<String> {
        self.answer_question(&question.title, None).await
    }

    pub fn submit_params(&self) -> &'static str {
        if self.business.auto_submit {
            SUBMIT_NOW
        } else {
            SAVE_DRAFT
        }
    }

    pub fn judgement_select(&self, text: &str) -> bool {
        self.judgement_select_with(text, &mut rand::rng())
    }

    pub fn judgement_select_with<R: Rng>(&self, text: &str, rng: &mut R) -> bool {
        judge(text, &self.business.true_list, &self.business.false_list, rng)
    }
}

fn log_failure(failure: &RequestFailure) {
    match failure {
        RequestFailure::Gateway(err) => error!("answer request failed: {err}"),
        RequestFailure::MalformedJson(err) => error!("model reply is not JSON: {err}"),
        RequestFailure::UnexpectedShape(detail) => {
            error!("model reply has an unexpected shape: {detail}")
        }
        RequestFailure::EmptyAnswer => error!("gateway returned an empty answer"),
    }
}
