//! Catalog projections: game cards, game detail pages and genre listings.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::state::catalog::{CommunityReview, Game, GenreListing};

/// Compact game card used inside every list-like response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameSummary {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub release_year: u16,
    pub avg_rating: f32,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            title: game.title.clone(),
            cover_url: game.cover_url.clone(),
            genres: game.genres.clone(),
            platforms: game.platforms.clone(),
            release_year: game.release_year,
            avg_rating: game.avg_rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommunityReviewDto {
    pub username: String,
    pub rating: u8,
    pub text: String,
}

impl From<&CommunityReview> for CommunityReviewDto {
    fn from(review: &CommunityReview) -> Self {
        Self {
            username: review.username.clone(),
            rating: review.rating,
            text: review.text.clone(),
        }
    }
}

/// Full game page.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameDetail {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub banner_url: String,
    pub screenshots: Vec<String>,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub release_year: u16,
    pub publisher: String,
    pub description: String,
    pub avg_rating: f32,
    pub reviews: Vec<CommunityReviewDto>,
}

impl From<&Game> for GameDetail {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            title: game.title.clone(),
            cover_url: game.cover_url.clone(),
            banner_url: game.banner_url.clone(),
            screenshots: game.screenshots.clone(),
            genres: game.genres.clone(),
            platforms: game.platforms.clone(),
            release_year: game.release_year,
            publisher: game.publisher.clone(),
            description: game.description.clone(),
            avg_rating: game.avg_rating,
            reviews: game.reviews.iter().map(CommunityReviewDto::from).collect(),
        }
    }
}

/// Title search parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub q: String,
}

/// Optional filters of a genre page.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenreGamesQuery {
    pub year: Option<u16>,
    pub platform: Option<String>,
}

/// Genre page: matching games plus the filter values available for the genre.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreListingResponse {
    pub genre: String,
    pub games: Vec<GameSummary>,
    pub available_years: Vec<u16>,
    pub available_platforms: Vec<String>,
}

impl From<GenreListing> for GenreListingResponse {
    fn from(listing: GenreListing) -> Self {
        Self {
            genre: listing.genre,
            games: listing
                .games
                .iter()
                .map(|game| GameSummary::from(game.as_ref()))
                .collect(),
            available_years: listing.available_years,
            available_platforms: listing.available_platforms,
        }
    }
}
