//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod media;
pub mod queries;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, Method, header},
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .nest("/users", configure_user_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Configura le routes di autenticazione (login, register)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use crate::services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Configura le routes per utenti, like, foto e messaggi.
///
/// Tutte richiedono il token; dopo ogni richiesta autenticata viene aggiornato `last_active`.
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{authentication_middleware, log_user_activity};
    use crate::services::photo::MAX_UPLOAD_BYTES;
    use crate::services::*;

    Router::new()
        .route("/", get(list_users))
        .route("/{user_id}", get(get_user).put(update_user))
        .route("/{user_id}/like/{recipient_id}", post(like_user))
        // foto
        .route(
            "/{user_id}/photos",
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/{user_id}/photos/{id}", get(get_photo).delete(delete_photo))
        .route("/{user_id}/photos/{id}/set_main", post(set_main_photo))
        // messaggi
        .route("/{user_id}/messages", get(list_messages).post(send_message))
        .route(
            "/{user_id}/messages/thread/{recipient_id}",
            get(get_thread),
        )
        .route(
            "/{user_id}/messages/{id}",
            get(get_message).post(delete_message),
        )
        .route("/{user_id}/messages/{id}/read", post(mark_message_read))
        // l'ultimo layer aggiunto è il più esterno: prima auth, poi activity
        .layer(middleware::from_fn_with_state(
            state.clone(),
            log_user_activity,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static("authorization")])
}
