//! Curated list payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    dto::{catalog::GameSummary, validation::validate_not_blank},
    state::lists::GameList,
};

/// Create or replace a list. An `id` naming an existing list replaces it.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SaveListRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub author_id: String,
    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    /// Comma separated tags, e.g. `"GOAT, Must-Play"`.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub game_ids: Vec<String>,
}

/// Append a game to a list owned by `author_id`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddListGameRequest {
    #[validate(length(min = 1))]
    pub author_id: String,
    #[validate(length(min = 1))]
    pub game_id: String,
}

/// Identifies the caller of a destructive list operation.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorQuery {
    pub author_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GameListDto {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub games: Vec<GameSummary>,
}

impl From<&GameList> for GameListDto {
    fn from(list: &GameList) -> Self {
        Self {
            id: list.id.clone(),
            author_id: list.author_id.clone(),
            title: list.title.clone(),
            description: list.description.clone(),
            tags: list.tags.clone(),
            games: list
                .games
                .iter()
                .map(|game| GameSummary::from(game.as_ref()))
                .collect(),
        }
    }
}
