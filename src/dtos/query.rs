//! Query DTOs - Parametri di query string per liste paginate

use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::entities::{Gender, MessageContainer, UserOrderBy};
use crate::queries::users::{DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};
use serde::Deserialize;

/// Query parameters di `GET /users`
///
/// `user_id` non arriva dal client: viene impostato dal service con l'utente autenticato.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UserParams {
    #[serde(skip)]
    pub user_id: i32,
    pub gender: Option<Gender>,
    pub likers: bool,
    pub likees: bool,
    pub min_age: u32,
    pub max_age: u32,
    pub order_by: UserOrderBy,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for UserParams {
    fn default() -> Self {
        Self {
            user_id: 0,
            gender: None,
            likers: false,
            likees: false,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            order_by: UserOrderBy::default(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query parameters di `GET /users/{user_id}/messages`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MessageParams {
    #[serde(skip)]
    pub user_id: i32,
    pub message_container: MessageContainer,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for MessageParams {
    fn default() -> Self {
        Self {
            user_id: 0,
            message_container: MessageContainer::default(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
