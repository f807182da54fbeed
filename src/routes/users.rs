use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::{
        lists::GameListDto,
        user::{UpdateProfileRequest, UserProfile},
    },
    error::AppError,
    routes::extract::ValidJson,
    services::{list_service, user_service},
    state::SharedState,
};

/// Profile and settings endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users/{user_id}", get(get_profile).put(update_profile))
        .route("/users/{user_id}/lists", get(user_lists))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_profile(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(user_service::get_profile(&state, &user_id)?))
}

/// Edit username, bio, avatar and top games.
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid edit"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn update_profile(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(user_service::update_profile(&state, &user_id, payload)?))
}

/// Lists authored by the user.
#[utoipa::path(
    get,
    path = "/users/{user_id}/lists",
    tag = "lists",
    params(("user_id" = String, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Lists of the user", body = [GameListDto]),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn user_lists(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<GameListDto>>, AppError> {
    Ok(Json(list_service::lists_by_author(&state, &user_id).await?))
}
