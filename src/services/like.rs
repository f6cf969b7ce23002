//! Like services - Un utente mette like a un altro

use crate::core::{AppError, AppState, ensure_self};
use crate::entities::{Like, User};
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, current_user), fields(user_id = %user_id, recipient_id = %recipient_id))]
pub async fn like_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, recipient_id)): Path<(i32, i32)>, // /users/{user_id}/like/{recipient_id}
) -> Result<impl IntoResponse, AppError> {
    debug!("Liking user");
    // 1. Solo per conto del chiamante
    // 2. Non ci si può mettere like da soli
    // 3. Il destinatario deve esistere, altrimenti NOT_FOUND
    // 4. Un like già presente è un CONFLICT
    // 5. Salvare il like (un doppione concorrente urta la chiave primaria: CONFLICT)
    ensure_self(&current_user, user_id)?;

    if user_id == recipient_id {
        warn!("User tried to like themselves");
        return Err(AppError::bad_request("You cannot like yourself"));
    }

    if state.user.read(&recipient_id).await?.is_none() {
        warn!("Recipient not found");
        return Err(AppError::not_found("User not found"));
    }

    if state.like.read(&(user_id, recipient_id)).await?.is_some() {
        warn!("Like already exists");
        return Err(AppError::conflict("You already like this user"));
    }

    state
        .like
        .create(&Like {
            liker_id: user_id,
            likee_id: recipient_id,
        })
        .await?;

    info!("Like created");
    Ok(StatusCode::OK)
}
