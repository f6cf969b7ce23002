//! LikeRepository - Repository per la relazione di like tra utenti

use super::{Create, Read};
use crate::entities::{Like, LikeDirection};
use crate::queries::resolve_like_set;
use sqlx::{Error, MySqlPool};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

// LIKE REPO
pub struct LikeRepository {
    connection_pool: MySqlPool,
}

impl LikeRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// Every like where the user is liker or likee
    pub async fn find_edges_for_user(&self, user_id: &i32) -> Result<Vec<Like>, Error> {
        let likes = sqlx::query_as::<_, Like>(
            "SELECT liker_id, likee_id FROM likes WHERE liker_id = ? OR likee_id = ?",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(likes)
    }

    /// Ids on the other side of the user's likes, in the requested direction
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        user_id: &i32,
        direction: LikeDirection,
    ) -> Result<BTreeSet<i32>, Error> {
        let edges = self.find_edges_for_user(user_id).await?;
        let ids = resolve_like_set(*user_id, direction, &edges);
        debug!("Resolved {} related users", ids.len());
        Ok(ids)
    }
}

impl Create<Like, Like> for LikeRepository {
    async fn create(&self, data: &Like) -> Result<Like, Error> {
        sqlx::query("INSERT INTO likes (liker_id, likee_id) VALUES (?, ?)")
            .bind(data.liker_id)
            .bind(data.likee_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(*data)
    }
}

/// Chiave: (liker_id, likee_id)
impl Read<Like, (i32, i32)> for LikeRepository {
    async fn read(&self, id: &(i32, i32)) -> Result<Option<Like>, Error> {
        let like = sqlx::query_as::<_, Like>(
            "SELECT liker_id, likee_id FROM likes WHERE liker_id = ? AND likee_id = ?",
        )
        .bind(id.0)
        .bind(id.1)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(like)
    }
}
