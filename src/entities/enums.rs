//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};

// ********************* ENUMERAZIONI UTILI **********************//

// salvato come stringa minuscola, decodificato con try_from nelle righe sqlx
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Gender shown by default in the listing when the caller does not ask for one
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Vista logica della casella messaggi
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageContainer {
    Inbox,
    Outbox,
    // valori sconosciuti ricadono su Unread
    #[default]
    #[serde(other)]
    Unread,
}

/// Ordinamento della lista utenti (sempre decrescente)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrderBy {
    #[serde(rename = "created")]
    Created,
    #[default]
    #[serde(rename = "lastActive", other)]
    LastActive,
}

/// Which side of the like relation to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeDirection {
    /// users who liked the given user
    Likers,
    /// users the given user liked
    Likees,
}
