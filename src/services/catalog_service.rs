use std::sync::Arc;

use crate::{
    dto::catalog::{GameDetail, GameSummary, GenreGamesQuery, GenreListingResponse},
    error::ServiceError,
    state::{SharedState, catalog::Game},
};

/// Resolve a catalog game or report it missing.
pub fn require_game(state: &SharedState, game_id: &str) -> Result<Arc<Game>, ServiceError> {
    state
        .catalog()
        .get(game_id)
        .ok_or_else(|| ServiceError::NotFound(format!("game `{game_id}` not found")))
}

/// Resolve a batch of game ids supplied in a request body, keeping order.
pub fn resolve_games(state: &SharedState, game_ids: &[String]) -> Result<Vec<Arc<Game>>, ServiceError> {
    game_ids
        .iter()
        .map(|id| {
            state
                .catalog()
                .get(id)
                .ok_or_else(|| ServiceError::InvalidInput(format!("unknown game `{id}`")))
        })
        .collect()
}

/// Every catalog game in catalog order.
pub fn list_games(state: &SharedState) -> Vec<GameSummary> {
    state
        .catalog()
        .games()
        .map(|game| GameSummary::from(game.as_ref()))
        .collect()
}

pub fn get_game(state: &SharedState, game_id: &str) -> Result<GameDetail, ServiceError> {
    require_game(state, game_id).map(|game| GameDetail::from(game.as_ref()))
}

/// Title search used by the explore page and the game pickers.
pub fn search(state: &SharedState, query: &str) -> Vec<GameSummary> {
    state
        .catalog()
        .search(query)
        .iter()
        .map(|game| GameSummary::from(game.as_ref()))
        .collect()
}

pub fn genres(state: &SharedState) -> Vec<String> {
    state.catalog().genres().to_vec()
}

/// Genre page with optional year and platform filters.
pub fn genre_listing(
    state: &SharedState,
    genre: &str,
    query: GenreGamesQuery,
) -> Result<GenreListingResponse, ServiceError> {
    if !state.catalog().genres().iter().any(|known| known == genre) {
        return Err(ServiceError::NotFound(format!("genre `{genre}` not found")));
    }
    let listing = state
        .catalog()
        .genre_listing(genre, query.year, query.platform.as_deref());
    Ok(listing.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::seeded_state;

    #[test]
    fn search_and_detail() {
        let state = seeded_state();
        let hits = search(&state, "ring");
        assert!(hits.iter().any(|game| game.title == "Elden Ring"));
        assert!(search(&state, "  ").is_empty());
        assert!(search(&state, "e").len() <= 10);

        assert_eq!(get_game(&state, "10").unwrap().title, "Elden Ring");
        assert!(matches!(get_game(&state, "0"), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn genre_pages() {
        let state = seeded_state();
        assert_eq!(genres(&state).len(), 12);

        let page = genre_listing(&state, "RPG", GenreGamesQuery::default()).unwrap();
        assert!(page.games.windows(2).all(|w| w[0].avg_rating >= w[1].avg_rating));
        assert!(page.available_years.windows(2).all(|w| w[0] > w[1]));

        let filtered = genre_listing(
            &state,
            "RPG",
            GenreGamesQuery {
                year: Some(2022),
                platform: None,
            },
        )
        .unwrap();
        assert!(filtered.games.iter().all(|game| game.release_year == 2022));

        assert!(matches!(
            genre_listing(&state, "Opera", GenreGamesQuery::default()),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn resolve_games_keeps_order_and_rejects_unknown_ids() {
        let state = seeded_state();
        let games = resolve_games(&state, &["10".into(), "1".into()]).unwrap();
        assert_eq!(games[0].title, "Elden Ring");
        assert_eq!(games[1].title, "God of War");
        assert!(resolve_games(&state, &["x".into()]).is_err());
    }
}
