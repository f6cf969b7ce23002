//! Message entity - Entità messaggio con cancellazione logica per ciascuna delle due parti

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Message {
    pub message_id: i32,
    pub sender_id: i32,
    pub recipient_id: i32,
    pub content: String,
    pub is_read: bool,
    pub date_read: Option<DateTime<Utc>>,
    pub message_sent: DateTime<Utc>,
    // ciascuna parte nasconde il messaggio solo dalla propria vista
    pub sender_deleted: bool,
    pub recipient_deleted: bool,
}

impl Message {
    pub fn involves(&self, user_id: i32) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }
}

/// Messaggio arricchito con known_as e foto principale di mittente e destinatario
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MessageWithParties {
    #[sqlx(flatten)]
    pub message: Message,
    pub sender_known_as: String,
    pub sender_photo_url: Option<String>,
    pub recipient_known_as: String,
    pub recipient_photo_url: Option<String>,
}
