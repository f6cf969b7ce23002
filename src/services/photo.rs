//! Photo services - Caricamento, foto principale e rimozione

use crate::core::{AppError, AppState, ensure_self};
use crate::dtos::{CreatePhotoDTO, PhotoDTO};
use crate::entities::{Photo, User};
use crate::media::ImageUpload;
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Upper bound for the upload body
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Foto di `user_id` con id `photo_id`, NOT_FOUND se non esiste o appartiene ad altri
async fn owned_photo(state: &AppState, user_id: i32, photo_id: i32) -> Result<Photo, AppError> {
    match state.photo.read(&photo_id).await? {
        Some(photo) if photo.user_id == user_id => Ok(photo),
        _ => {
            warn!("Photo {} not found for user {}", photo_id, user_id);
            Err(AppError::not_found("Photo not found"))
        }
    }
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, photo_id = %photo_id))]
pub async fn get_photo(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, photo_id)): Path<(i32, i32)>, // /users/{user_id}/photos/{id}
) -> Result<Json<PhotoDTO>, AppError> {
    debug!("Fetching photo");
    ensure_self(&current_user, user_id)?;

    let photo = owned_photo(&state, user_id, photo_id).await?;

    Ok(Json(PhotoDTO::from(photo)))
}

#[debug_handler]
#[instrument(skip(state, current_user, multipart), fields(user_id = %user_id))]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<i32>,
    mut multipart: Multipart, // campi: file, description (opzionale)
) -> Result<impl IntoResponse, AppError> {
    debug!("Uploading photo");
    // 1. Solo per conto del chiamante
    // 2. Leggere i campi multipart: "file" obbligatorio, "description" opzionale
    // 3. Inviare il file al media host (ritaglio 500x500 centrato sul volto)
    // 4. Salvare la foto con url e public_id restituiti dal media host;
    //    diventa la principale se l'utente non ne ha ancora una
    // 5. Ritornare CREATED con la foto
    ensure_self(&current_user, user_id)?;

    let mut image: Option<ImageUpload> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("photo").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("description") => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    description = Some(text);
                }
            }
            // campi sconosciuti ignorati
            _ => {}
        }
    }

    let image = image.ok_or_else(|| {
        warn!("Upload without file field");
        AppError::bad_request("Missing file")
    })?;
    if image.bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }

    let uploaded = state.media.upload(image).await?;
    debug!("Image stored on media host as {}", uploaded.public_id);

    let photo = state
        .photo
        .create(&CreatePhotoDTO {
            user_id,
            url: uploaded.url,
            public_id: Some(uploaded.public_id),
            description,
        })
        .await?;

    info!("Photo {} added (main: {})", photo.photo_id, photo.is_main);
    Ok((StatusCode::CREATED, Json(PhotoDTO::from(photo))))
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, photo_id = %photo_id))]
pub async fn set_main_photo(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, photo_id)): Path<(i32, i32)>, // /users/{user_id}/photos/{id}/set_main
) -> Result<impl IntoResponse, AppError> {
    debug!("Setting main photo");
    // 1. Solo per conto del chiamante
    // 2. La foto deve appartenere all'utente, altrimenti NOT_FOUND
    // 3. Se è già la principale, BAD_REQUEST
    // 4. Scambiare la principale in un'unica transazione
    ensure_self(&current_user, user_id)?;

    let photo = owned_photo(&state, user_id, photo_id).await?;
    if photo.is_main {
        return Err(AppError::bad_request("This is already the main photo"));
    }

    state.photo.set_main(&user_id, &photo_id).await?;

    info!("Main photo updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, current_user), fields(user_id = %user_id, photo_id = %photo_id))]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((user_id, photo_id)): Path<(i32, i32)>, // /users/{user_id}/photos/{id}
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting photo");
    // 1. Solo per conto del chiamante
    // 2. La foto deve appartenere all'utente, altrimenti NOT_FOUND
    // 3. La foto principale non si cancella, BAD_REQUEST
    // 4. Se la foto è sul media host, rimuoverla prima lì (BAD_GATEWAY se rifiuta)
    // 5. Cancellare la riga
    ensure_self(&current_user, user_id)?;

    let photo = owned_photo(&state, user_id, photo_id).await?;
    if photo.is_main {
        return Err(AppError::bad_request("You cannot delete your main photo"));
    }

    if let Some(public_id) = photo.public_id.as_deref() {
        if !state.media.destroy(public_id).await? {
            warn!("Media host did not remove {}", public_id);
            return Err(AppError::bad_gateway("Failed to delete the photo"));
        }
    }

    state.photo.delete(&photo_id).await?;

    info!("Photo deleted");
    Ok(StatusCode::OK)
}
