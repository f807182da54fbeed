use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{GameDetail, GameSummary, GenreGamesQuery, GenreListingResponse, SearchQuery},
    error::AppError,
    services::catalog_service,
    state::SharedState,
};

/// Read-only catalog browsing.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games))
        .route("/games/search", get(search_games))
        .route("/games/{game_id}", get(get_game))
        .route("/genres", get(list_genres))
        .route("/genres/{genre}/games", get(genre_games))
}

/// List every catalog game.
#[utoipa::path(
    get,
    path = "/games",
    tag = "catalog",
    responses((status = 200, description = "Catalog games", body = [GameSummary]))
)]
pub async fn list_games(State(state): State<SharedState>) -> Json<Vec<GameSummary>> {
    Json(catalog_service::list_games(&state))
}

/// Search games by title (at most ten results).
#[utoipa::path(
    get,
    path = "/games/search",
    tag = "catalog",
    params(SearchQuery),
    responses((status = 200, description = "Matching games", body = [GameSummary]))
)]
pub async fn search_games(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<GameSummary>> {
    Json(catalog_service::search(&state, &query.q))
}

#[utoipa::path(
    get,
    path = "/games/{game_id}",
    tag = "catalog",
    params(("game_id" = String, Path, description = "Catalog game identifier")),
    responses(
        (status = 200, description = "Game detail", body = GameDetail),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameDetail>, AppError> {
    Ok(Json(catalog_service::get_game(&state, &game_id)?))
}

#[utoipa::path(
    get,
    path = "/genres",
    tag = "catalog",
    responses((status = 200, description = "Genre names", body = [String]))
)]
pub async fn list_genres(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(catalog_service::genres(&state))
}

/// Games of a genre sorted by rating, with the available filter values.
#[utoipa::path(
    get,
    path = "/genres/{genre}/games",
    tag = "catalog",
    params(("genre" = String, Path, description = "Genre name"), GenreGamesQuery),
    responses(
        (status = 200, description = "Genre page", body = GenreListingResponse),
        (status = 404, description = "Unknown genre")
    )
)]
pub async fn genre_games(
    State(state): State<SharedState>,
    Path(genre): Path<String>,
    Query(query): Query<GenreGamesQuery>,
) -> Result<Json<GenreListingResponse>, AppError> {
    Ok(Json(catalog_service::genre_listing(&state, &genre, query)?))
}
