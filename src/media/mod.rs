//! Media host - Caricamento e rimozione delle immagini su un servizio esterno
//!
//! Il backend non elabora le immagini: invia il file al media host, che applica
//! le trasformazioni e restituisce URL pubblico e `public_id`.

pub mod cloudinary;

pub use cloudinary::CloudinaryClient;

use futures::future::BoxFuture;

/// File ricevuto dal client, pronto per essere inoltrato
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Risultato di un caricamento andato a buon fine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("request to media host failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("media host rejected the request: {0}")]
    Rejected(String),

    #[error("uploaded file is empty")]
    EmptyFile,
}

/// External image host. Object safe so that `AppState` can hold any implementation.
pub trait MediaHost: Send + Sync {
    fn upload(&self, image: ImageUpload) -> BoxFuture<'_, Result<UploadedImage, MediaError>>;

    /// Returns `true` when the host confirms the image was removed
    fn destroy<'a>(&'a self, public_id: &'a str) -> BoxFuture<'a, Result<bool, MediaError>>;
}
