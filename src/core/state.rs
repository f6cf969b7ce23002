//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, configurazioni e client esterni condivisi
//! necessari per gestire l'applicazione.

use crate::media::MediaHost;
use crate::repositories::{LikeRepository, MessageRepository, PhotoRepository, UserRepository};
use sqlx::MySqlPool;
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione delle foto
    pub photo: PhotoRepository,

    /// Repository per la gestione dei like
    pub like: LikeRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Client del media host che ospita le immagini
    pub media: Arc<dyn MediaHost>,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni MySQL condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    /// * `media` - Client del media host (Cloudinary in produzione)
    pub fn new(pool: MySqlPool, jwt_secret: String, media: Arc<dyn MediaHost>) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            photo: PhotoRepository::new(pool.clone()),
            like: LikeRepository::new(pool.clone()),
            msg: MessageRepository::new(pool),
            jwt_secret,
            media,
        }
    }
}
