use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::lists::{AddListGameRequest, AuthorQuery, GameListDto, SaveListRequest},
    error::AppError,
    routes::extract::ValidJson,
    services::list_service,
    state::SharedState,
};

/// Curated list endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/lists", post(save_list))
        .route("/lists/{list_id}", get(get_list).delete(delete_list))
        .route("/lists/{list_id}/games", post(add_game))
        .route("/lists/{list_id}/games/{game_id}", delete(remove_game))
}

/// Create a list, or replace the list named by `id`.
#[utoipa::path(
    post,
    path = "/lists",
    tag = "lists",
    request_body = SaveListRequest,
    responses(
        (status = 200, description = "Saved list", body = GameListDto),
        (status = 400, description = "Invalid list"),
        (status = 403, description = "List belongs to another user")
    )
)]
pub async fn save_list(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<SaveListRequest>,
) -> Result<Json<GameListDto>, AppError> {
    Ok(Json(list_service::save_list(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/lists/{list_id}",
    tag = "lists",
    params(("list_id" = String, Path, description = "List identifier")),
    responses(
        (status = 200, description = "List detail", body = GameListDto),
        (status = 404, description = "Unknown list")
    )
)]
pub async fn get_list(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
) -> Result<Json<GameListDto>, AppError> {
    Ok(Json(list_service::get_list(&state, &list_id).await?))
}

#[utoipa::path(
    delete,
    path = "/lists/{list_id}",
    tag = "lists",
    params(("list_id" = String, Path, description = "List identifier"), AuthorQuery),
    responses(
        (status = 204, description = "List deleted"),
        (status = 403, description = "List belongs to another user"),
        (status = 404, description = "Unknown list")
    )
)]
pub async fn delete_list(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
    Query(query): Query<AuthorQuery>,
) -> Result<StatusCode, AppError> {
    list_service::delete_list(&state, &list_id, &query.author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/lists/{list_id}/games",
    tag = "lists",
    params(("list_id" = String, Path, description = "List identifier")),
    request_body = AddListGameRequest,
    responses(
        (status = 200, description = "Updated list", body = GameListDto),
        (status = 403, description = "List belongs to another user"),
        (status = 404, description = "Unknown list or game")
    )
)]
pub async fn add_game(
    State(state): State<SharedState>,
    Path(list_id): Path<String>,
    ValidJson(payload): ValidJson<AddListGameRequest>,
) -> Result<Json<GameListDto>, AppError> {
    Ok(Json(list_service::add_game(&state, &list_id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/lists/{list_id}/games/{game_id}",
    tag = "lists",
    params(
        ("list_id" = String, Path, description = "List identifier"),
        ("game_id" = String, Path, description = "Catalog game identifier"),
        AuthorQuery
    ),
    responses(
        (status = 200, description = "Updated list", body = GameListDto),
        (status = 403, description = "List belongs to another user"),
        (status = 404, description = "Unknown list")
    )
)]
pub async fn remove_game(
    State(state): State<SharedState>,
    Path((list_id, game_id)): Path<(String, String)>,
    Query(query): Query<AuthorQuery>,
) -> Result<Json<GameListDto>, AppError> {
    let list = list_service::remove_game(&state, &list_id, &game_id, &query.author_id).await?;
    Ok(Json(list))
}
