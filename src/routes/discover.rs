use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::discover::{DiscoverRequest, RecommendationResponse},
    error::AppError,
    routes::extract::ValidJson,
    services::recommendation_service,
    state::SharedState,
};

/// Discover page endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users/{user_id}/discover", post(discover))
        .route("/users/{user_id}/discover/latest", get(latest))
}

/// Recommend one game the user does not own yet.
#[utoipa::path(
    post,
    path = "/users/{user_id}/discover",
    tag = "discover",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = DiscoverRequest,
    responses(
        (status = 200, description = "Recommended game", body = RecommendationResponse),
        (status = 404, description = "Unknown user, or no game matches the preferences"),
        (status = 409, description = "A newer request replaced this one"),
        (status = 502, description = "Recommendation service failed")
    )
)]
pub async fn discover(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    ValidJson(payload): ValidJson<DiscoverRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    Ok(Json(recommendation_service::recommend(&state, &user_id, payload).await?))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/discover/latest",
    tag = "discover",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Last accepted recommendation", body = RecommendationResponse),
        (status = 404, description = "Nothing recommended yet")
    )
)]
pub async fn latest(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<RecommendationResponse>, AppError> {
    Ok(Json(recommendation_service::latest(&state, &user_id)?))
}
