use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::feed::{ActivityDto, NewsArticleDto},
    error::AppError,
    services::feed_service,
    state::SharedState,
};

/// Social feed and news.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users/{user_id}/feed", get(friends_feed))
        .route("/news", get(list_news))
        .route("/news/{news_id}", get(get_news))
}

/// Recent activity of the user's friends, newest first.
#[utoipa::path(
    get,
    path = "/users/{user_id}/feed",
    tag = "feed",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Friends' activity", body = [ActivityDto]),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn friends_feed(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ActivityDto>>, AppError> {
    Ok(Json(feed_service::friends_feed(&state, &user_id).await?))
}

#[utoipa::path(
    get,
    path = "/news",
    tag = "feed",
    responses((status = 200, description = "News articles", body = [NewsArticleDto]))
)]
pub async fn list_news(State(state): State<SharedState>) -> Json<Vec<NewsArticleDto>> {
    Json(feed_service::list_news(&state))
}

#[utoipa::path(
    get,
    path = "/news/{news_id}",
    tag = "feed",
    params(("news_id" = String, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article", body = NewsArticleDto),
        (status = 404, description = "Unknown article")
    )
)]
pub async fn get_news(
    State(state): State<SharedState>,
    Path(news_id): Path<String>,
) -> Result<Json<NewsArticleDto>, AppError> {
    Ok(Json(feed_service::get_news(&state, &news_id)?))
}
