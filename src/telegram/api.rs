//! Telegram Bot API wire types.
//!
//! Only the fields this service actually reads are modelled; unknown
//! fields in inbound payloads are ignored.

use serde::{Deserialize, Serialize};

/// An inbound webhook update.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    /// Monotonic update identifier assigned by the platform
    pub update_id: i64,
    /// The message, when this update carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// A chat message inside an update.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Message identifier within the chat
    pub message_id: i64,
    /// Sender, absent for channel posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    /// Chat the message was sent in
    pub chat: Chat,
    /// Unix timestamp of the message
    pub date: i64,
    /// Text content, absent for non-text messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A Telegram user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    /// User identifier, the key into the admin allow-list
    pub id: i64,
    /// First name as set in the user's profile
    pub first_name: String,
    /// Username, if the user has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A Telegram chat.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    /// Chat identifier
    pub id: i64,
    /// Chat type (`private`, `group`, ...)
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    /// Destination chat
    pub chat_id: i64,
    /// Message text
    pub text: String,
    /// Optional formatting mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Clone, Deserialize)]
pub struct BotApiResponse {
    /// Whether the platform accepted the call
    pub ok: bool,
    /// Platform-reported failure description
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_deserialize_text_update() {
        let payload = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "Anna", "username": "anna"},
                "chat": {"id": 42, "first_name": "Anna", "type": "private"},
                "date": 1754388000,
                "text": "/listproducts"
            }
        }"#;

        let update: Update = serde_json::from_str(payload).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.from.unwrap().id, 42);
        assert_eq!(message.text.as_deref(), Some("/listproducts"));
        assert_eq!(message.chat.kind, "private");
    }

    #[test]
    fn test_deserialize_update_without_message() {
        let update: Update = serde_json::from_str(r#"{"update_id": 11}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_deserialize_non_text_message() {
        let payload = r#"{
            "update_id": 12,
            "message": {
                "message_id": 6,
                "from": {"id": 42, "first_name": "Anna"},
                "chat": {"id": 42, "type": "private"},
                "date": 1754388000
            }
        }"#;

        let update: Update = serde_json::from_str(payload).unwrap();
        assert!(update.message.unwrap().text.is_none());
    }

    #[test]
    fn test_send_message_request_omits_empty_parse_mode() {
        let request = SendMessageRequest {
            chat_id: 1,
            text: "hello".to_string(),
            parse_mode: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("parse_mode"));
    }

    #[test]
    fn test_deserialize_error_response() {
        let response: BotApiResponse =
            serde_json::from_str(r#"{"ok": false, "description": "Bad Request: chat not found"}"#)
                .unwrap();
        assert!(!response.ok);
        assert_eq!(
            response.description.as_deref(),
            Some("Bad Request: chat not found")
        );
    }
}
