//! Feed payloads: friends' activity and news.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{catalog::GameSummary, user::UserRefDto},
    state::feed::{Activity, ActivityKind, NewsArticle},
};

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKindDto {
    Review,
    Backlog,
    Playing,
    Wishlist,
    Dropped,
}

impl From<ActivityKind> for ActivityKindDto {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Review => ActivityKindDto::Review,
            ActivityKind::Backlog => ActivityKindDto::Backlog,
            ActivityKind::Playing => ActivityKindDto::Playing,
            ActivityKind::Wishlist => ActivityKindDto::Wishlist,
            ActivityKind::Dropped => ActivityKindDto::Dropped,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityDto {
    pub id: String,
    pub user: UserRefDto,
    pub kind: ActivityKindDto,
    pub game: GameSummary,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&Activity> for ActivityDto {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            user: UserRefDto::from(&activity.user),
            kind: activity.kind.into(),
            game: GameSummary::from(activity.game.as_ref()),
            timestamp: activity.timestamp.clone(),
            details: activity.details.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsArticleDto {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
}

impl From<&NewsArticle> for NewsArticleDto {
    fn from(article: &NewsArticle) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            content: article.content.clone(),
        }
    }
}
