//! User DTOs - Data Transfer Objects per utenti

use super::PhotoDTO;
use crate::entities::{Gender, Photo, User};
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.]+$").unwrap();
}

const MIN_REGISTRATION_AGE: i32 = 18;

/// Riga della lista utenti
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserListDTO {
    pub id: i32,
    pub username: String,
    pub gender: Gender,
    pub age: i32,
    pub known_as: String,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub city: String,
    pub country: String,
    pub photo_url: Option<String>,
}

impl UserListDTO {
    pub fn new(user: User, photo_url: Option<String>, today: NaiveDate) -> Self {
        Self {
            id: user.user_id,
            age: user.age_on(today),
            username: user.username,
            gender: user.gender,
            known_as: user.known_as,
            created: user.created,
            last_active: user.last_active,
            city: user.city,
            country: user.country,
            photo_url,
        }
    }
}

/// Profilo completo, con tutte le foto
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDetailDTO {
    pub id: i32,
    pub username: String,
    pub gender: Gender,
    pub age: i32,
    pub known_as: String,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub city: String,
    pub country: String,
    pub photo_url: Option<String>,
    pub photos: Vec<PhotoDTO>,
}

impl UserDetailDTO {
    pub fn new(user: User, photos: Vec<Photo>, today: NaiveDate) -> Self {
        let photo_url = photos.iter().find(|p| p.is_main).map(|p| p.url.clone());
        Self {
            id: user.user_id,
            age: user.age_on(today),
            username: user.username,
            gender: user.gender,
            known_as: user.known_as,
            created: user.created,
            last_active: user.last_active,
            introduction: user.introduction,
            looking_for: user.looking_for,
            interests: user.interests,
            city: user.city,
            country: user.country,
            photo_url,
            photos: photos.into_iter().map(PhotoDTO::from).collect(),
        }
    }
}

/// DTO per creare un nuovo utente (senza user_id)
///
/// Usato sia come body di registrazione sia per l'insert, con la password già hashata.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(
        length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"),
        regex(path = *USERNAME_RE, message = "Username may only contain letters, digits, '_' and '.'")
    )]
    pub username: String,

    #[validate(length(min = 4, max = 64, message = "Password must be between 4 and 64 characters"))]
    pub password: String,

    pub gender: Gender,

    #[validate(custom(function = "validate_adult"))]
    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, max = 64, message = "Known as is required"))]
    pub known_as: String,

    #[validate(length(min = 1, max = 64, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 64, message = "Country is required"))]
    pub country: String,
}

fn validate_adult(date_of_birth: &NaiveDate) -> Result<(), ValidationError> {
    if crate::entities::user::age_on(*date_of_birth, Utc::now().date_naive()) < MIN_REGISTRATION_AGE {
        let mut err = ValidationError::new("too_young");
        err.message = Some("Users must be at least 18 years old".into());
        return Err(err);
    }
    Ok(())
}

/// DTO per aggiornare il profilo (solo campi modificabili)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateUserDTO {
    #[validate(length(max = 2000))]
    pub introduction: Option<String>,

    #[validate(length(max = 2000))]
    pub looking_for: Option<String>,

    #[validate(length(max = 2000))]
    pub interests: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub country: Option<String>,
}

impl UpdateUserDTO {
    pub fn is_empty(&self) -> bool {
        self.introduction.is_none()
            && self.looking_for.is_none()
            && self.interests.is_none()
            && self.city.is_none()
            && self.country.is_none()
    }
}

/// DTO per il login (solo username e password)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

/// Body della risposta di login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserListDTO,
}
