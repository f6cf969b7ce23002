//! MessageRepository - Repository per la gestione dei messaggi

use super::{Create, Delete, Read};
use crate::core::PagedList;
use crate::dtos::CreateMessageDTO;
use crate::entities::{Message, MessageWithParties};
use crate::queries::{MessageQuery, SqlPage, SqlQuery};
use chrono::{DateTime, Utc};
use sqlx::{Error, MySqlPool};
use tracing::{debug, instrument};

const SELECT_MESSAGE: &str = "SELECT message_id, sender_id, recipient_id, content, is_read, \
    date_read, message_sent, sender_deleted, recipient_deleted FROM messages";

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: MySqlPool,
}

impl MessageRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Messaggio con nome e foto principale di mittente e destinatario
    pub async fn find_with_parties(&self, id: &i32) -> Result<Option<MessageWithParties>, Error> {
        let sql = format!("{} WHERE m.message_id = ?", MessageQuery::SELECT_FROM);
        let msg = sqlx::query_as::<_, MessageWithParties>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(msg)
    }

    /// One page of a mailbox container
    #[instrument(skip(self, query))]
    pub async fn find_paged(
        &self,
        query: &MessageQuery,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedList<MessageWithParties>, Error> {
        debug!("Listing messages for {:?}", query.scope());
        PagedList::create(&SqlPage::new(&self.connection_pool, query), page_number, page_size).await
    }

    /// Whole conversation, newest first
    #[instrument(skip(self, query))]
    pub async fn find_thread(&self, query: &MessageQuery) -> Result<Vec<MessageWithParties>, Error> {
        SqlPage::new(&self.connection_pool, query).fetch_all().await
    }

    /// Segna come letto; i messaggi già letti mantengono la data originale
    pub async fn mark_read(&self, id: &i32, at: DateTime<Utc>) -> Result<(), Error> {
        sqlx::query(
            "UPDATE messages SET is_read = TRUE, date_read = ? WHERE message_id = ? AND is_read = FALSE",
        )
        .bind(at)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        Ok(())
    }

    pub async fn update_deleted_flags(
        &self,
        id: &i32,
        sender_deleted: bool,
        recipient_deleted: bool,
    ) -> Result<(), Error> {
        sqlx::query(
            "UPDATE messages SET sender_deleted = ?, recipient_deleted = ? WHERE message_id = ?",
        )
        .bind(sender_deleted)
        .bind(recipient_deleted)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        Ok(())
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO messages (sender_id, recipient_id, content, is_read, message_sent, sender_deleted, recipient_deleted)
            VALUES (?, ?, ?, FALSE, ?, FALSE, FALSE)
            "#,
        )
        .bind(data.sender_id)
        .bind(data.recipient_id)
        .bind(&data.content)
        .bind(data.message_sent)
        .execute(&self.connection_pool)
        .await?;

        // Get the last inserted ID
        let new_id = result.last_insert_id() as i32;

        Ok(Message {
            message_id: new_id,
            sender_id: data.sender_id,
            recipient_id: data.recipient_id,
            content: data.content.clone(),
            is_read: false,
            date_read: None,
            message_sent: data.message_sent,
            sender_deleted: false,
            recipient_deleted: false,
        })
    }
}

impl Read<Message, i32> for MessageRepository {
    async fn read(&self, id: &i32) -> Result<Option<Message>, Error> {
        let msg = sqlx::query_as::<_, Message>(&format!("{} WHERE message_id = ?", SELECT_MESSAGE))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(msg)
    }
}

impl Delete<i32> for MessageRepository {
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        sqlx::query("DELETE FROM messages WHERE message_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}
