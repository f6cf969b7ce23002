//! Message queries - cartelle (inbox/outbox/unread) e thread tra due utenti

use super::{SqlQuery, push_clause};
use crate::entities::{MessageContainer, MessageWithParties};
use sqlx::{MySql, QueryBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageScope {
    /// Una cartella vista da `user_id`
    Container {
        user_id: i32,
        container: MessageContainer,
    },
    /// Conversazione tra `user_id` e `other_id`, vista da `user_id`
    Thread { user_id: i32, other_id: i32 },
}

/// Messages visible in a scope, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageQuery {
    scope: MessageScope,
}

impl MessageQuery {
    pub fn container(user_id: i32, container: MessageContainer) -> Self {
        Self {
            scope: MessageScope::Container { user_id, container },
        }
    }

    pub fn thread(user_id: i32, other_id: i32) -> Self {
        Self {
            scope: MessageScope::Thread { user_id, other_id },
        }
    }

    pub fn scope(&self) -> MessageScope {
        self.scope
    }
}

impl SqlQuery for MessageQuery {
    type Row = MessageWithParties;

    const SELECT_FROM: &'static str = "SELECT m.message_id, m.sender_id, m.recipient_id, \
        m.content, m.is_read, m.date_read, m.message_sent, m.sender_deleted, m.recipient_deleted, \
        s.known_as AS sender_known_as, \
        (SELECT sp.url FROM photos sp WHERE sp.user_id = m.sender_id AND sp.is_main = TRUE \
        ORDER BY sp.photo_id LIMIT 1) AS sender_photo_url, \
        r.known_as AS recipient_known_as, \
        (SELECT rp.url FROM photos rp WHERE rp.user_id = m.recipient_id AND rp.is_main = TRUE \
        ORDER BY rp.photo_id LIMIT 1) AS recipient_photo_url \
        FROM messages m \
        JOIN users s ON s.user_id = m.sender_id \
        JOIN users r ON r.user_id = m.recipient_id";

    const COUNT_FROM: &'static str = "SELECT COUNT(*) FROM messages m";

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, MySql>) {
        let mut first = true;
        match self.scope {
            MessageScope::Container { user_id, container } => {
                push_clause(qb, &mut first);
                match container {
                    MessageContainer::Inbox => {
                        qb.push("m.recipient_id = ")
                            .push_bind(user_id)
                            .push(" AND m.recipient_deleted = FALSE");
                    }
                    MessageContainer::Outbox => {
                        qb.push("m.sender_id = ")
                            .push_bind(user_id)
                            .push(" AND m.sender_deleted = FALSE");
                    }
                    MessageContainer::Unread => {
                        qb.push("m.recipient_id = ")
                            .push_bind(user_id)
                            .push(" AND m.recipient_deleted = FALSE AND m.is_read = FALSE");
                    }
                }
            }
            MessageScope::Thread { user_id, other_id } => {
                push_clause(qb, &mut first);
                qb.push("((m.recipient_id = ")
                    .push_bind(user_id)
                    .push(" AND m.sender_id = ")
                    .push_bind(other_id)
                    .push(" AND m.recipient_deleted = FALSE) OR (m.sender_id = ")
                    .push_bind(user_id)
                    .push(" AND m.recipient_id = ")
                    .push_bind(other_id)
                    .push(" AND m.sender_deleted = FALSE))");
            }
        }
    }

    fn push_ordering(&self, qb: &mut QueryBuilder<'_, MySql>) {
        qb.push(" ORDER BY m.message_sent DESC, m.message_id DESC");
    }
}
