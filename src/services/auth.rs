//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{AuthResponse, CreateUserDTO, LoginDTO, UserListDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

const TOKEN_MAX_AGE_SECS: u32 = 24 * 60 * 60;

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt");
    // 1. Cercare l'utente nel database tramite username
    // 2. Se l'utente non esiste, ritornare errore UNAUTHORIZED
    // 3. Verificare che la password fornita corrisponda all'hash memorizzato, altrimenti UNAUTHORIZED
    // 4. Generare un token JWT con userid, username e il segreto
    // 5. Costruire un cookie HttpOnly, Secure, SameSite=Lax con il token e durata 24 ore
    // 6. Creare gli headers HTTP con Set-Cookie e Authorization (Bearer token)
    // 7. Ritornare StatusCode::OK con gli headers, il token e l'utente con la sua foto principale

    // gli username sono salvati in minuscolo
    let username = body.username.to_lowercase();
    let user = match state.user.find_by_username(&username).await? {
        Some(user) => user,
        None => {
            warn!("Login failed: unknown username");
            return Err(AppError::unauthorized("Username or password are not correct."));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Login failed: wrong password");
        return Err(AppError::unauthorized("Username or password are not correct."));
    }

    let token = encode_jwt(user.username.clone(), user.user_id, &state.jwt_secret)?;

    let cookie_value = format!(
        "token={}; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
        token, TOKEN_MAX_AGE_SECS
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie_value)
            .map_err(|_| AppError::internal_server_error("Failed to build auth headers"))?,
    );
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::internal_server_error("Failed to build auth headers"))?,
    );

    let photo_url = state
        .photo
        .find_main_for_user(&user.user_id)
        .await?
        .map(|photo| photo.url);

    info!("User logged in");
    let body = AuthResponse {
        token,
        user: UserListDTO::new(user, photo_url, Utc::now().date_naive()),
    };
    Ok((StatusCode::OK, headers, Json(body)))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering new user");
    // 1. Validare il DTO con validator (username, password, età minima, campi obbligatori)
    // 2. Se esiste già un utente con lo stesso username (in minuscolo) ritornare CONFLICT
    // 3. Generare l'hash della password, INTERNAL_SERVER_ERROR se fallisce
    // 4. Salvare il nuovo utente con la password hashata; una registrazione concorrente
    //    con lo stesso username viene fermata dal vincolo UNIQUE (CONFLICT)
    // 5. Ritornare CREATED con l'utente creato (ancora senza foto)

    body.validate()?;

    let username = body.username.to_lowercase();
    if state.user.find_by_username(&username).await?.is_some() {
        warn!("Username already taken");
        return Err(AppError::conflict("Username already exists"));
    }

    let password_hash = User::hash_password(&body.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let new_user = CreateUserDTO {
        username,
        password: password_hash,
        ..body
    };

    let created_user = state.user.create(&new_user).await?;

    info!("User registered with id {}", created_user.user_id);
    Ok((
        StatusCode::CREATED,
        Json(UserListDTO::new(created_user, None, Utc::now().date_naive())),
    ))
}
