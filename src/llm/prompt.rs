use crate::config::GatewayConfig;

use super::wire::{ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, MessageContent, Role};

pub const ANSWER_TEMPERATURE: f64 = 0.1;

pub const SYSTEM_PROMPT: &str = "本题为简答题，直接给出核心答案，以JSON格式返回：{\"Answer\": [\"答案内容\"]}。禁止输出任何多余解释、MD语法或参考资料。";

pub fn build_answer_request(
    gateway: &GatewayConfig,
    question: &str,
    image_url: Option<&str>,
) -> ChatCompletionRequest {
    let mut user_parts = vec![ContentPart::Text {
        text: question.to_string(),
    }];
    if let Some(url) = image_url.filter(|url| !url.trim().is_empty()) {
        user_parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: url.to_string(),
            },
        });
    }

    ChatCompletionRequest {
        model: gateway.model.clone(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: Role::User,
                content: MessageContent::Parts(user_parts),
            },
        ],
        temperature: ANSWER_TEMPERATURE,
        max_tokens: gateway.max_tokens,
        stream: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_parts(request: &ChatCompletionRequest) -> &[ContentPart] {
        match &request.messages[1].content {
            MessageContent::Parts(parts) => parts,
            MessageContent::Text(_) => panic!("user turn should be multi-part"),
        }
    }

    #[test]
    fn text_question_has_system_and_user_turns() {
        let gateway = GatewayConfig::new("k").unwrap();
        let request = build_answer_request(&gateway, "1+1=?", None);

        assert_eq!(request.model, gateway.model);
        assert_eq!(request.temperature, ANSWER_TEMPERATURE);
        assert_eq!(request.max_tokens, 1024);
        assert!(!request.stream);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(SYSTEM_PROMPT.contains("\"Answer\""));
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(
            user_parts(&request),
            [ContentPart::Text {
                text: "1+1=?".to_string()
            }]
        );
    }

    #[test]
    fn image_question_appends_image_part() {
        let gateway = GatewayConfig::new("k").unwrap();
        let request = build_answer_request(&gateway, "描述图片", Some("https://img/a.jpg"));

        let parts = user_parts(&request);
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "https://img/a.jpg".to_string()
                }
            }
        );
    }

    #[test]
    fn blank_image_url_is_ignored() {
        let gateway = GatewayConfig::new("k").unwrap();
        let request = build_answer_request(&gateway, "q", Some("  "));
        assert_eq!(user_parts(&request).len(), 1);
    }
}
