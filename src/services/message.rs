//! Message services - Cartelle, thread e ciclo di vita dei messaggi

use crate::core::pagination::clamp_page;
use crate::core::{AppError, AppState, PagedList, ensure_self};
use crate::dtos::{CreateMessageDTO, MessageDTO, MessageParams, SendMessageDTO};
use crate::entities::{Message, User};
use crate::queries::MessageQuery;
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Messaggio `message_id` visibile a `user_id`: NOT_FOUND se non esiste, FORBIDDEN se non è una delle parti
async fn message_for_party(
    state: &AppState,
    user_id: i32,
    message_id: i32,
) -> Result<Message, AppError> {
    let msg = state.msg.read(&message_id).await?.ok_or_else(|| {
        warn!("Message not found");
        AppError::not_found("Message not found")
    })?;

    if !msg.involves(user_id) {
        warn!("User {} is not a party of message {}", user_id, message_id);
        return Err(AppError::forbidden("You are not a party of this message"));
    }
    Ok(msg)
}

#[instrument(skip(state, current_user, params), fields(user_id = %user_id))]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<i32>,
    Query(mut params): Query<MessageParams>, // ?message_container=Inbox&page_number=1
) -> Result<Json<PagedList<MessageDTO>>, AppError> {
    debug!("Listing messages");
    // 1. Solo per conto del chiamante
    // 2. Costruire la query della cartella richiesta (Unread se assente o sconosciuta)
    // 3. Contare e caricare la pagina, convertire in MessageDTO
    ensure_self(&current_user, user_id)?;
    params.user_id = user_id;
    let (page_number, page_size) = clamp_page(params.page_number, params.page_size);

    let query = MessageQuery::container(params.user_id, params.message_container);
    let page = state
        .msg
        .find_paged(&query, page_number, page_size)
        .await?
        .map(MessageDTO::from);

    info!(
        "Returning {} of {} messages in {:?}",
        page.items.len(),
        page.total_count,
        params.message_container
    );
    Ok(Json(page))
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, message_id = %message_id))]
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, message_id)): Path<(i32, i32)>,
) -> Result<Json<MessageDTO>, AppError> {
    debug!("Fetching message");
    ensure_self(&current_user, user_id)?;

    message_for_party(&state, user_id, message_id).await?;

    let msg = state
        .msg
        .find_with_parties(&message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    Ok(Json(MessageDTO::from(msg)))
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, recipient_id = %recipient_id))]
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, recipient_id)): Path<(i32, i32)>, // /users/{user_id}/messages/thread/{recipient_id}
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    debug!("Fetching thread");
    ensure_self(&current_user, user_id)?;

    let query = MessageQuery::thread(user_id, recipient_id);
    let thread: Vec<MessageDTO> = state
        .msg
        .find_thread(&query)
        .await?
        .into_iter()
        .map(MessageDTO::from)
        .collect();

    info!("Thread has {} messages", thread.len());
    Ok(Json(thread))
}

#[instrument(skip(state, current_user, body), fields(user_id = %user_id, recipient_id = %body.recipient_id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<i32>,
    Json(body): Json<SendMessageDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Sending message");
    // 1. Solo per conto del chiamante
    // 2. Validare il contenuto
    // 3. Il destinatario deve esistere, altrimenti BAD_REQUEST
    // 4. Salvare il messaggio con la data corrente
    // 5. Ritornare CREATED con il messaggio arricchito con i dati delle due parti
    ensure_self(&current_user, user_id)?;
    body.validate()?;

    if state.user.read(&body.recipient_id).await?.is_none() {
        warn!("Recipient not found");
        return Err(AppError::bad_request("Could not find user"));
    }

    let created = state
        .msg
        .create(&CreateMessageDTO {
            sender_id: user_id,
            recipient_id: body.recipient_id,
            content: body.content,
            message_sent: Utc::now(),
        })
        .await?;

    let msg = state
        .msg
        .find_with_parties(&created.message_id)
        .await?
        .ok_or_else(|| AppError::internal_server_error("Failed to load the new message"))?;

    info!("Message {} sent", created.message_id);
    Ok((StatusCode::CREATED, Json(MessageDTO::from(msg))))
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, message_id = %message_id))]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, message_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting message");
    // 1. Solo per conto del chiamante, che deve essere una delle parti
    // 2. Segnare come cancellato il lato del chiamante (mittente e/o destinatario)
    // 3. Se entrambi i lati l'hanno cancellato, eliminare la riga, altrimenti salvare i flag
    ensure_self(&current_user, user_id)?;

    let msg = message_for_party(&state, user_id, message_id).await?;

    let sender_deleted = msg.sender_deleted || msg.sender_id == user_id;
    let recipient_deleted = msg.recipient_deleted || msg.recipient_id == user_id;

    if sender_deleted && recipient_deleted {
        state.msg.delete(&message_id).await?;
        info!("Message removed for both parties");
    } else {
        state
            .msg
            .update_deleted_flags(&message_id, sender_deleted, recipient_deleted)
            .await?;
        info!("Message hidden for user");
    }

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, message_id = %message_id))]
pub async fn mark_message_read(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, message_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Marking message as read");
    // 1. Solo per conto del chiamante
    // 2. Solo il destinatario può segnare come letto, FORBIDDEN altrimenti
    // 3. Impostare is_read e date_read
    ensure_self(&current_user, user_id)?;

    let msg = message_for_party(&state, user_id, message_id).await?;
    if msg.recipient_id != user_id {
        warn!("Only the recipient can mark a message as read");
        return Err(AppError::forbidden("Only the recipient can mark a message as read"));
    }

    state.msg.mark_read(&message_id, Utc::now()).await?;

    Ok(StatusCode::NO_CONTENT)
}
