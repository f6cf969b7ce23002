//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::MessageWithParties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Messaggio come lo vede il client, con nome e foto principale delle due parti
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageDTO {
    pub id: i32,
    pub sender_id: i32,
    pub sender_known_as: String,
    pub sender_photo_url: Option<String>,
    pub recipient_id: i32,
    pub recipient_known_as: String,
    pub recipient_photo_url: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub date_read: Option<DateTime<Utc>>,
    pub message_sent: DateTime<Utc>,
}

impl From<MessageWithParties> for MessageDTO {
    fn from(value: MessageWithParties) -> Self {
        let msg = value.message;
        Self {
            id: msg.message_id,
            sender_id: msg.sender_id,
            sender_known_as: value.sender_known_as,
            sender_photo_url: value.sender_photo_url,
            recipient_id: msg.recipient_id,
            recipient_known_as: value.recipient_known_as,
            recipient_photo_url: value.recipient_photo_url,
            content: msg.content,
            is_read: msg.is_read,
            date_read: msg.date_read,
            message_sent: msg.message_sent,
        }
    }
}

/// Body di `POST /users/{user_id}/messages`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SendMessageDTO {
    pub recipient_id: i32,

    #[validate(length(min = 1, max = 5000, message = "Message content must be between 1 and 5000 characters"))]
    pub content: String,
}

/// DTO per creare un nuovo messaggio (senza message_id)
#[derive(Debug, Clone)]
pub struct CreateMessageDTO {
    pub sender_id: i32,
    pub recipient_id: i32,
    pub content: String,
    pub message_sent: DateTime<Utc>,
}
