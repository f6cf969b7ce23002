//! User entity - Entità utente con metodi per gestione password ed età

use super::enums::Gender;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub known_as: String,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub city: String,
    pub country: String,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }

    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }
}

/// Età in anni compiuti: se il compleanno di quest'anno non è ancora arrivato si toglie un anno
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Riga della lista utenti: utente + url della foto principale (LEFT JOIN)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserWithMainPhoto {
    #[sqlx(flatten)]
    pub user: User,
    pub photo_url: Option<String>,
}
