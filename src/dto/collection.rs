//! Collection payloads: status changes, reviews and the derived views.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::catalog::GameSummary,
    state::collection::{Collection, GameStatus, LoggedGame, MAX_RATING},
};

/// Membership of a game in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameStatusDto {
    None,
    Wishlist,
    Backlog,
    Playing,
    Dropped,
    Played,
}

impl From<GameStatus> for GameStatusDto {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::None => GameStatusDto::None,
            GameStatus::Wishlist => GameStatusDto::Wishlist,
            GameStatus::Backlog => GameStatusDto::Backlog,
            GameStatus::Playing => GameStatusDto::Playing,
            GameStatus::Dropped => GameStatusDto::Dropped,
            GameStatus::Played => GameStatusDto::Played,
        }
    }
}

impl From<GameStatusDto> for GameStatus {
    fn from(status: GameStatusDto) -> Self {
        match status {
            GameStatusDto::None => GameStatus::None,
            GameStatusDto::Wishlist => GameStatus::Wishlist,
            GameStatusDto::Backlog => GameStatus::Backlog,
            GameStatusDto::Playing => GameStatus::Playing,
            GameStatusDto::Dropped => GameStatus::Dropped,
            GameStatusDto::Played => GameStatus::Played,
        }
    }
}

/// Request to move a game to a shelf, or out of the collection with `none`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetStatusRequest {
    pub status: GameStatusDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GameStatusResponse {
    pub game_id: String,
    pub status: GameStatusDto,
}

/// Review submission for a played game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LogReviewRequest {
    #[validate(length(min = 1, max = 32))]
    pub platform_played: String,
    pub playtime_hours: u32,
    #[validate(range(max = MAX_RATING))]
    pub rating: u8,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub review: String,
    /// Overrides the stored log date; defaults to now for new reviews.
    #[serde(default)]
    pub log_date: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoggedGameDto {
    pub game: GameSummary,
    pub log_date: String,
    pub platform_played: String,
    pub playtime_hours: u32,
    pub rating: u8,
    pub review: String,
}

impl From<&LoggedGame> for LoggedGameDto {
    fn from(logged: &LoggedGame) -> Self {
        Self {
            game: GameSummary::from(logged.game.as_ref()),
            log_date: logged.log_date.clone(),
            platform_played: logged.platform_played.clone(),
            playtime_hours: logged.playtime_hours,
            rating: logged.rating,
            review: logged.review.clone(),
        }
    }
}

/// The five collection views, each in insertion order.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub wishlist: Vec<GameSummary>,
    pub backlog: Vec<GameSummary>,
    pub playing: Vec<GameSummary>,
    pub dropped: Vec<GameSummary>,
    pub reviews: Vec<LoggedGameDto>,
}

impl From<&Collection> for CollectionResponse {
    fn from(collection: &Collection) -> Self {
        let cards = |games: Vec<std::sync::Arc<crate::state::catalog::Game>>| {
            games
                .iter()
                .map(|game| GameSummary::from(game.as_ref()))
                .collect()
        };
        Self {
            wishlist: cards(collection.wishlist()),
            backlog: cards(collection.backlog()),
            playing: cards(collection.playing()),
            dropped: cards(collection.dropped()),
            reviews: collection.reviews().iter().map(LoggedGameDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, platform: &str) -> LogReviewRequest {
        LogReviewRequest {
            platform_played: platform.into(),
            playtime_hours: 12,
            rating,
            review: String::new(),
            log_date: None,
        }
    }

    #[test]
    fn rating_is_capped() {
        assert!(review(5, "PC").validate().is_ok());
        assert!(review(6, "PC").validate().is_err());
    }

    #[test]
    fn platform_is_required() {
        assert!(review(3, "").validate().is_err());
    }

    #[test]
    fn status_uses_snake_case() {
        let parsed: SetStatusRequest = serde_json::from_str(r#"{"status":"wishlist"}"#).unwrap();
        assert_eq!(parsed.status, GameStatusDto::Wishlist);
        assert_eq!(
            serde_json::to_string(&GameStatusDto::None).unwrap(),
            "\"none\""
        );
    }
}
