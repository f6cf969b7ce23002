//! User services - Lista, profilo e aggiornamento utenti

use crate::core::pagination::clamp_page;
use crate::core::{AppError, AppState, PagedList, ensure_self};
use crate::dtos::{UpdateUserDTO, UserDetailDTO, UserListDTO, UserParams};
use crate::entities::{LikeDirection, User};
use crate::queries::UserQuery;
use crate::repositories::{Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use futures_util::future::try_join;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, params), fields(user_id = %current_user.user_id))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Query(mut params): Query<UserParams>,     // /users?gender=female&min_age=25&page_number=2
) -> Result<Json<PagedList<UserListDTO>>, AppError> {
    debug!("Listing users");
    // 1. Impostare user_id dei parametri con l'utente autenticato
    // 2. Se il client non specifica il genere, usare quello opposto al chiamante
    // 3. Normalizzare numero e dimensione della pagina
    // 4. Risolvere gli insiemi likers / likees solo se richiesti
    // 5. Costruire la query (esclusione, genere, likers, likees, età, ordinamento)
    // 6. Contare e caricare la pagina, convertire ogni riga in UserListDTO
    params.user_id = current_user.user_id;
    if params.gender.is_none() {
        params.gender = Some(current_user.gender.opposite());
    }
    let (page_number, page_size) = clamp_page(params.page_number, params.page_size);

    let likers = if params.likers {
        Some(state.like.resolve(&current_user.user_id, LikeDirection::Likers).await?)
    } else {
        None
    };
    let likees = if params.likees {
        Some(state.like.resolve(&current_user.user_id, LikeDirection::Likees).await?)
    } else {
        None
    };

    let today = Utc::now().date_naive();
    let query = UserQuery::listing(&params, likers, likees, today);

    let page = state
        .user
        .find_paged(&query, page_number, page_size)
        .await?
        .map(|row| UserListDTO::new(row.user, row.photo_url, today));

    info!(
        "Returning page {} of {} ({} users in total)",
        page.current_page, page.total_pages, page.total_count
    );
    Ok(Json(page))
}

#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>, // parametro dalla URL /users/{id}
) -> Result<Json<UserDetailDTO>, AppError> {
    debug!("Fetching user profile");
    // 1. Cercare l'utente e le sue foto in parallelo
    // 2. NOT_FOUND se l'utente non esiste
    // 3. Ritornare il profilo completo
    let (user, photos) = try_join(
        state.user.read(&user_id),
        state.photo.find_many_by_user(&user_id),
    )
    .await?;

    let user = user.ok_or_else(|| {
        warn!("User not found");
        AppError::not_found("User not found")
    })?;

    Ok(Json(UserDetailDTO::new(user, photos, Utc::now().date_naive())))
}

#[instrument(skip(state, current_user, body), fields(user_id = %user_id))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<i32>,
    Json(body): Json<UpdateUserDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Updating user profile");
    // 1. Solo il proprietario può modificare il profilo
    // 2. Validare il DTO
    // 3. Scrivere solo i campi presenti
    ensure_self(&current_user, user_id)?;
    body.validate()?;

    state.user.update(&user_id, &body).await?;

    info!("User profile updated");
    Ok(StatusCode::NO_CONTENT)
}
