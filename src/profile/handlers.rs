use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::PublicUser,
        extractors::AuthUser,
        handlers::validate_name_and_email,
    },
    error::{ApiError, ApiJson, Result},
    state::AppState,
    users::User,
};

use super::dto::UpdateProfileRequest;

pub fn routes() -> Router<AppState> {
    Router::new().route("/profile/:id", get(get_profile).put(update_profile))
}

/// Any authenticated caller may read any profile.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<i64>,
    ApiJson(mut payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<PublicUser>> {
    if caller_id != id {
        warn!(caller_id, id, "cross-user profile update rejected");
        return Err(ApiError::Forbidden);
    }

    payload.name = payload.name.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();
    validate_name_and_email(&payload.name, &payload.email)?;

    // The new email may only collide with the caller's own record.
    if let Some(existing) = User::find_by_email(&state.db, &payload.email).await? {
        if existing.id != id {
            warn!(id, email = %payload.email, "email already registered");
            return Err(ApiError::DuplicateEmail);
        }
    }

    let user = User::update(&state.db, id, &payload.name, &payload.email).await?;

    info!(user_id = user.id, "profile updated");
    Ok(Json(user.into()))
}
