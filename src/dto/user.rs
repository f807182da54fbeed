//! Profile payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{catalog::GameSummary, validation::validate_not_blank},
    state::profile::{TOP_GAMES, User, UserRef},
};

const MAX_TOP_GAME_IDS: u64 = TOP_GAMES as u64;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRefDto {
    pub id: String,
    pub username: String,
    pub avatar_url: String,
}

impl From<&UserRef> for UserRefDto {
    fn from(user: &UserRef) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub bio: String,
    pub avatar_url: String,
    pub top_games: Vec<GameSummary>,
    pub friends: Vec<UserRefDto>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            top_games: user
                .top_games
                .iter()
                .map(|game| GameSummary::from(game.as_ref()))
                .collect(),
            friends: user.friends.iter().map(UserRefDto::from).collect(),
        }
    }
}

/// Settings page submission.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 32), custom(function = "validate_not_blank"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub bio: String,
    #[validate(url)]
    pub avatar_url: String,
    /// Favourite games in display order.
    #[serde(default)]
    #[validate(length(max = MAX_TOP_GAME_IDS))]
    pub top_game_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, top: usize) -> UpdateProfileRequest {
        UpdateProfileRequest {
            username: username.into(),
            bio: String::new(),
            avatar_url: "https://picsum.photos/seed/x/200/200".into(),
            top_game_ids: (0..top).map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn accepts_a_regular_edit() {
        assert!(request("Hero", 4).validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_extra_games() {
        assert!(request("  ", 0).validate().is_err());
        assert!(request("Hero", 5).validate().is_err());
    }
}
