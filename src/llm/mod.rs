pub mod gateway;
pub mod prompt;
pub mod wire;

pub use gateway::{ChatGateway, HttpGateway};
pub use prompt::build_answer_request;
pub use wire::ChatCompletionRequest;
