use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::collection::{
        CollectionResponse, GameStatusResponse, LogReviewRequest, LoggedGameDto, SetStatusRequest,
    },
    error::AppError,
    routes::extract::ValidJson,
    services::collection_service,
    state::SharedState,
};

/// Collection views, status changes and reviews of a user.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users/{user_id}/collection", get(get_collection))
        .route(
            "/users/{user_id}/collection/games/{game_id}",
            get(get_status).put(set_status),
        )
        .route(
            "/users/{user_id}/collection/reviews/{game_id}",
            put(log_review).delete(delete_review),
        )
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/collection",
    tag = "collection",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Wishlist, backlog, playing, dropped and reviews", body = CollectionResponse),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_collection(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<CollectionResponse>, AppError> {
    Ok(Json(collection_service::get_collection(&state, &user_id)?))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/collection/games/{game_id}",
    tag = "collection",
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("game_id" = String, Path, description = "Catalog game identifier")
    ),
    responses(
        (status = 200, description = "Status of the game", body = GameStatusResponse),
        (status = 404, description = "Unknown user or game")
    )
)]
pub async fn get_status(
    State(state): State<SharedState>,
    Path((user_id, game_id)): Path<(String, String)>,
) -> Result<Json<GameStatusResponse>, AppError> {
    Ok(Json(collection_service::get_status(&state, &user_id, &game_id)?))
}

/// Put a game on a shelf, or remove it with `none`. `played` is rejected; log a review instead.
#[utoipa::path(
    put,
    path = "/users/{user_id}/collection/games/{game_id}",
    tag = "collection",
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("game_id" = String, Path, description = "Catalog game identifier")
    ),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "New status", body = GameStatusResponse),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Unknown user or game")
    )
)]
pub async fn set_status(
    State(state): State<SharedState>,
    Path((user_id, game_id)): Path<(String, String)>,
    ValidJson(payload): ValidJson<SetStatusRequest>,
) -> Result<Json<GameStatusResponse>, AppError> {
    let response =
        collection_service::set_status(&state, &user_id, &game_id, payload.status).await?;
    Ok(Json(response))
}

/// Create or edit the review of a game.
#[utoipa::path(
    put,
    path = "/users/{user_id}/collection/reviews/{game_id}",
    tag = "collection",
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("game_id" = String, Path, description = "Catalog game identifier")
    ),
    request_body = LogReviewRequest,
    responses(
        (status = 200, description = "Stored review", body = LoggedGameDto),
        (status = 400, description = "Invalid review"),
        (status = 404, description = "Unknown user or game")
    )
)]
pub async fn log_review(
    State(state): State<SharedState>,
    Path((user_id, game_id)): Path<(String, String)>,
    ValidJson(payload): ValidJson<LogReviewRequest>,
) -> Result<Json<LoggedGameDto>, AppError> {
    let logged = collection_service::log_review(&state, &user_id, &game_id, payload).await?;
    Ok(Json(logged))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}/collection/reviews/{game_id}",
    tag = "collection",
    params(
        ("user_id" = String, Path, description = "User identifier"),
        ("game_id" = String, Path, description = "Catalog game identifier")
    ),
    responses(
        (status = 204, description = "Review removed"),
        (status = 404, description = "No such review")
    )
)]
pub async fn delete_review(
    State(state): State<SharedState>,
    Path((user_id, game_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    collection_service::delete_review(&state, &user_id, &game_id)?;
    Ok(StatusCode::NO_CONTENT)
}
