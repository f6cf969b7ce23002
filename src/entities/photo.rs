//! Photo entity - Entità foto (ospitata dal media host esterno)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Photo {
    pub photo_id: i32,
    pub user_id: i32,
    pub url: String,
    // None per le foto non caricate tramite media host (es. seed)
    pub public_id: Option<String>,
    pub description: Option<String>,
    pub date_added: DateTime<Utc>,
    pub is_main: bool,
}
