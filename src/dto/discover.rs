//! Discover payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dao::recommender::{ANY, Preferences},
    state::recommendation::Recommendation,
};

fn any() -> String {
    ANY.to_string()
}

/// Preferences submitted on the discover page. Genre and platform accept
/// `Any` as a wildcard.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct DiscoverRequest {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub mood: String,
    #[serde(default = "any")]
    #[validate(length(max = 64))]
    pub genre: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub playtime: String,
    #[serde(default = "any")]
    #[validate(length(max = 64))]
    pub platform: String,
}

impl From<DiscoverRequest> for Preferences {
    fn from(request: DiscoverRequest) -> Self {
        Self {
            mood: request.mood,
            genre: request.genre,
            playtime: request.playtime,
            platform: request.platform,
        }
    }
}

/// Recommended game. Genre, platform and cover come from the catalog.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationResponse {
    pub game_id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub platform: String,
    pub reason: String,
    pub cover_url: String,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(recommendation: &Recommendation) -> Self {
        let game = &recommendation.game;
        Self {
            game_id: game.id.clone(),
            title: game.title.clone(),
            description: recommendation.description.clone(),
            genre: game.primary_genre().unwrap_or_default().to_string(),
            platform: game.primary_platform().unwrap_or_default().to_string(),
            reason: recommendation.reason.clone(),
            cover_url: game.cover_url.clone(),
        }
    }
}
