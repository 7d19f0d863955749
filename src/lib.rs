pub mod answer;
pub mod config;
pub mod error;
pub mod judgement;
pub mod llm;
pub mod throttle;
pub mod tiku;
pub mod utils;

pub use config::{BusinessConfig, GatewayConfig, TikuConfig};
pub use error::{GatewayError, RequestFailure, TikuError};
pub use tiku::{AnswerClient, Question};
