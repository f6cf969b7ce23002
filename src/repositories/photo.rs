//! PhotoRepository - Repository per la gestione delle foto profilo

use super::{Create, Delete, Read};
use crate::dtos::CreatePhotoDTO;
use crate::entities::Photo;
use chrono::Utc;
use sqlx::{Error, MySqlPool};
use tracing::{debug, instrument};

const SELECT_PHOTO: &str =
    "SELECT photo_id, user_id, url, public_id, description, date_added, is_main FROM photos";

// PHOTO REPO
pub struct PhotoRepository {
    connection_pool: MySqlPool,
}

impl PhotoRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// All photos of a user, oldest first
    pub async fn find_many_by_user(&self, user_id: &i32) -> Result<Vec<Photo>, Error> {
        let photos = sqlx::query_as::<_, Photo>(&format!(
            "{} WHERE user_id = ? ORDER BY date_added ASC, photo_id ASC",
            SELECT_PHOTO
        ))
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(photos)
    }

    pub async fn find_main_for_user(&self, user_id: &i32) -> Result<Option<Photo>, Error> {
        let photo = sqlx::query_as::<_, Photo>(&format!(
            "{} WHERE user_id = ? AND is_main = TRUE LIMIT 1",
            SELECT_PHOTO
        ))
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(photo)
    }

    /// Rende `photo_id` la foto principale di `user_id`.
    ///
    /// Le due UPDATE avvengono nella stessa transazione: l'utente non resta mai
    /// con zero o due foto principali.
    #[instrument(skip(self))]
    pub async fn set_main(&self, user_id: &i32, photo_id: &i32) -> Result<(), Error> {
        let mut tx = self.connection_pool.begin().await?;

        sqlx::query("UPDATE photos SET is_main = FALSE WHERE user_id = ? AND is_main = TRUE")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE photos SET is_main = TRUE WHERE photo_id = ? AND user_id = ?")
            .bind(photo_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // rollback automatico al drop della transazione
            return Err(Error::RowNotFound);
        }

        tx.commit().await?;
        debug!("Main photo switched");
        Ok(())
    }
}

impl Create<Photo, CreatePhotoDTO> for PhotoRepository {
    /// Inserisce la foto; diventa la principale solo se l'utente non ne ha già una.
    ///
    /// La riga dell'utente resta bloccata (`FOR UPDATE`) fino al commit, quindi due
    /// upload concorrenti non possono entrambi vedere "nessuna principale".
    #[instrument(skip(self, data), fields(user_id = %data.user_id))]
    async fn create(&self, data: &CreatePhotoDTO) -> Result<Photo, Error> {
        let mut tx = self.connection_pool.begin().await?;

        sqlx::query("SELECT user_id FROM users WHERE user_id = ? FOR UPDATE")
            .bind(data.user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(Error::RowNotFound)?;

        let has_main: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM photos WHERE user_id = ? AND is_main = TRUE)",
        )
        .bind(data.user_id)
        .fetch_one(&mut *tx)
        .await?;
        let is_main = !has_main;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO photos (user_id, url, public_id, description, date_added, is_main)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.user_id)
        .bind(&data.url)
        .bind(&data.public_id)
        .bind(&data.description)
        .bind(now)
        .bind(is_main)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Photo stored (main: {})", is_main);

        Ok(Photo {
            photo_id: result.last_insert_id() as i32,
            user_id: data.user_id,
            url: data.url.clone(),
            public_id: data.public_id.clone(),
            description: data.description.clone(),
            date_added: now,
            is_main,
        })
    }
}

impl Read<Photo, i32> for PhotoRepository {
    async fn read(&self, id: &i32) -> Result<Option<Photo>, Error> {
        let photo = sqlx::query_as::<_, Photo>(&format!("{} WHERE photo_id = ?", SELECT_PHOTO))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(photo)
    }
}

impl Delete<i32> for PhotoRepository {
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        sqlx::query("DELETE FROM photos WHERE photo_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}
