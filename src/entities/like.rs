//! Like entity - Arco diretto liker -> likee

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct Like {
    pub liker_id: i32,
    pub likee_id: i32,
}
