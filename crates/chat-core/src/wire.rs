//! Wire types for the `/api/chat` endpoint
//!
//! The request carries the bounded context window plus the new user message,
//! camelCase on the wire. The response is completion-style JSON from which
//! only `choices[0].message.content` is used; extra fields are ignored.

use crate::conversation::Turn;
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Recent turns, oldest first
    pub cached_messages: Vec<Turn>,
    /// The new user message
    pub user_message: String,
}

/// Completion-style response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; only the first is used
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant message for this choice
    pub message: ChoiceMessage,
}

/// Assistant message inside a choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Assistant text
    pub content: String,
}

impl ChatResponse {
    /// Extract the assistant text, consuming the response
    pub fn into_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_field_names() {
        let request = ChatRequest {
            cached_messages: vec![Turn::new("hi", "hello")],
            user_message: "how are you".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("cachedMessages").is_some());
        assert_eq!(value["userMessage"], "how are you");
        assert_eq!(value["cachedMessages"][0]["user"], "hi");
        assert_eq!(value["cachedMessages"][0]["assistant"], "hello");
    }

    #[test]
    fn response_content_comes_from_first_choice() {
        let body = r#"{
            "id": "cmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"total_tokens": 7}
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_content().as_deref(), Some("first"));
    }

    #[test]
    fn empty_choices_yields_no_content() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.into_content().is_none());

        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_content().is_none());
    }
}
