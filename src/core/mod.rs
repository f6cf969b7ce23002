//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione, JWT e hook di attività
//! - Configurazione
//! - Gestione errori
//! - Paginazione generica
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod pagination;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{
    Claims, authentication_middleware, decode_jwt, encode_jwt, ensure_self, log_user_activity,
};
pub use config::Config;
pub use error::AppError;
pub use pagination::{PageSource, PagedList};
pub use state::AppState;
