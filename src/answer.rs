use serde_json::Value;

use crate::error::RequestFailure;
use crate::utils::strip_code_fences;

const ANSWER_FIELD: &str = "Answer";

/// Turns a model reply of the form `{"Answer": [...]}` into one
/// newline-joined answer.
///
/// The joined text is trimmed. If nothing is left, the reply is rejected as
/// [`RequestFailure::EmptyAnswer`], even when the list itself was non-empty
/// (`["", " "]`).
pub fn parse_answer(content: &str) -> Result<String, RequestFailure> {
    let cleaned = strip_code_fences(content);
    let value: Value = serde_json::from_str(&cleaned).map_err(RequestFailure::MalformedJson)?;

    let Value::Object(mut envelope) = value else {
        return Err(RequestFailure::UnexpectedShape(format!(
            "expected a JSON object, got {cleaned}"
        )));
    };

    let answers = match envelope.remove(ANSWER_FIELD) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(single)) => vec![single],
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                other => Err(RequestFailure::UnexpectedShape(format!(
                    "answer entries must be strings, got {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(RequestFailure::UnexpectedShape(format!(
                "\"{ANSWER_FIELD}\" must be a list of strings, got {other}"
            )));
        }
    };

    let joined = answers.join("\n");
    let answer = joined.trim();
    if answer.is_empty() {
        return Err(RequestFailure::EmptyAnswer);
    }
    Ok(answer.to_string())
}
