//! Photo DTOs - Data Transfer Objects per foto

use crate::entities::Photo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhotoDTO {
    pub id: i32,
    pub url: String,
    pub description: Option<String>,
    pub date_added: DateTime<Utc>,
    pub is_main: bool,
}

impl From<Photo> for PhotoDTO {
    fn from(value: Photo) -> Self {
        Self {
            id: value.photo_id,
            url: value.url,
            description: value.description,
            date_added: value.date_added,
            is_main: value.is_main,
        }
    }
}

/// DTO per inserire una foto già caricata sul media host (senza photo_id).
/// Se diventa la principale lo decide il repository, dentro la transazione.
#[derive(Debug, Clone)]
pub struct CreatePhotoDTO {
    pub user_id: i32,
    pub url: String,
    pub public_id: Option<String>,
    pub description: Option<String>,
}
