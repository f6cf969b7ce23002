//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod like;
pub mod message;
pub mod photo;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{login_user, register_user};
pub use like::like_user;
pub use message::{
    delete_message, get_message, get_thread, list_messages, mark_message_read, send_message,
};
pub use photo::{delete_photo, get_photo, set_main_photo, upload_photo};
pub use user::{get_user, list_users, update_user};

use crate::core::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
