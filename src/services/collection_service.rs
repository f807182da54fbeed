use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    dto::collection::{
        CollectionResponse, GameStatusDto, GameStatusResponse, LogReviewRequest, LoggedGameDto,
    },
    error::ServiceError,
    services::{catalog_service::require_game, user_service::require_user},
    state::{
        SharedState,
        catalog::Game,
        collection::{Collection, GameStatus, ReviewDraft, now_rfc3339},
        feed::{Activity, ActivityKind},
        profile::UserRef,
    },
};

/// Longest review excerpt copied into the activity feed.
const EXCERPT_CHARS: usize = 120;

/// The five collection views of a user.
pub fn get_collection(state: &SharedState, user_id: &str) -> Result<CollectionResponse, ServiceError> {
    require_user(state, user_id)?;
    let response = state
        .collections()
        .get(user_id)
        .map(|collection| CollectionResponse::from(&*collection))
        .unwrap_or_else(|| CollectionResponse::from(&Collection::new()));
    Ok(response)
}

/// Current status of one game in the user's collection.
pub fn get_status(
    state: &SharedState,
    user_id: &str,
    game_id: &str,
) -> Result<GameStatusResponse, ServiceError> {
    require_user(state, user_id)?;
    let game = require_game(state, game_id)?;
    let status = state
        .collections()
        .get(user_id)
        .map(|collection| collection.classify(&game.id))
        .unwrap_or(GameStatus::None);

    Ok(GameStatusResponse {
        game_id: game.id.clone(),
        status: status.into(),
    })
}

/// Move a game to a shelf, or drop it from the collection with `none`.
pub async fn set_status(
    state: &SharedState,
    user_id: &str,
    game_id: &str,
    status: GameStatusDto,
) -> Result<GameStatusResponse, ServiceError> {
    let user = require_user(state, user_id)?;
    let game = require_game(state, game_id)?;
    let status = GameStatus::from(status);

    let previous = {
        let mut collection = state.collections().entry(user_id.to_string()).or_default();
        let previous = collection.classify(&game.id);
        collection.set_status(game.clone(), status)?;
        previous
    };
    debug!(user_id, game_id, ?previous, ?status, "collection status updated");

    if previous != status {
        if let Some(shelf) = status.shelf() {
            record(state, user, shelf.into(), game.clone(), None).await;
        }
    }

    Ok(GameStatusResponse {
        game_id: game.id.clone(),
        status: status.into(),
    })
}

/// Create or edit the review of a game, moving it off every shelf.
pub async fn log_review(
    state: &SharedState,
    user_id: &str,
    game_id: &str,
    request: LogReviewRequest,
) -> Result<LoggedGameDto, ServiceError> {
    let user = require_user(state, user_id)?;
    let game = require_game(state, game_id)?;

    let draft = ReviewDraft {
        game: game.clone(),
        log_date: request.log_date,
        platform_played: request.platform_played,
        playtime_hours: request.playtime_hours,
        rating: request.rating,
        review: request.review,
    };

    let (logged, is_new) = {
        let mut collection = state.collections().entry(user_id.to_string()).or_default();
        let is_new = collection.review(&game.id).is_none();
        (collection.log_review(draft)?, is_new)
    };
    info!(user_id, game_id, rating = logged.rating, is_new, "review logged");

    if is_new {
        let details = excerpt(&logged.review);
        record(state, user, ActivityKind::Review, game, details).await;
    }

    Ok(LoggedGameDto::from(&logged))
}

/// Remove the review of a game. Nothing else in the collection changes.
pub fn delete_review(state: &SharedState, user_id: &str, game_id: &str) -> Result<(), ServiceError> {
    require_user(state, user_id)?;
    let removed = state
        .collections()
        .get_mut(user_id)
        .and_then(|mut collection| collection.delete_review(game_id));

    match removed {
        Some(_) => {
            info!(user_id, game_id, "review deleted");
            Ok(())
        }
        None => Err(ServiceError::NotFound(format!(
            "no review of game `{game_id}` for user `{user_id}`"
        ))),
    }
}

async fn record(
    state: &SharedState,
    user: UserRef,
    kind: ActivityKind,
    game: Arc<Game>,
    details: Option<String>,
) {
    let activity = Activity::new(user, kind, game, now_rfc3339(), details);
    state.activity().write().await.push(activity);
}

fn excerpt(review: &str) -> Option<String> {
    let review = review.trim();
    if review.is_empty() {
        return None;
    }
    let mut text = review.chars().take(EXCERPT_CHARS).collect::<String>();
    if review.chars().count() > EXCERPT_CHARS {
        text.push('…');
    }
    Some(format!("\"{text}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{feed_service::friends_feed, testing::seeded_state};

    const ELDEN_RING: &str = "10";

    fn review(rating: u8) -> LogReviewRequest {
        LogReviewRequest {
            platform_played: "PC".into(),
            playtime_hours: 40,
            rating,
            review: "Loved it".into(),
            log_date: None,
        }
    }

    #[tokio::test]
    async fn wishlist_then_playing_moves_the_game() {
        let state = seeded_state();
        set_status(&state, "u1", ELDEN_RING, GameStatusDto::Wishlist)
            .await
            .unwrap();
        let response = set_status(&state, "u1", ELDEN_RING, GameStatusDto::Playing)
            .await
            .unwrap();
        assert_eq!(response.status, GameStatusDto::Playing);

        let collection = get_collection(&state, "u1").unwrap();
        assert!(collection.playing.iter().any(|game| game.id == ELDEN_RING));
        assert!(!collection.wishlist.iter().any(|game| game.id == ELDEN_RING));

        let feed = friends_feed(&state, "u2").await.unwrap();
        assert_eq!(feed.len(), 2);
        assert!(matches!(feed[0].kind, crate::dto::feed::ActivityKindDto::Playing));
    }

    #[tokio::test]
    async fn reviewing_a_backlog_game_takes_it_off_the_shelf() {
        let state = seeded_state();
        assert_eq!(
            get_status(&state, "u1", "16").unwrap().status,
            GameStatusDto::Backlog
        );

        let logged = log_review(&state, "u1", "16", review(4)).await.unwrap();
        assert_eq!(logged.rating, 4);

        let collection = get_collection(&state, "u1").unwrap();
        assert!(!collection.backlog.iter().any(|game| game.id == "16"));
        assert!(collection.reviews.iter().any(|logged| logged.game.id == "16"));
        assert_eq!(
            get_status(&state, "u1", "16").unwrap().status,
            GameStatusDto::Played
        );
    }

    #[tokio::test]
    async fn played_needs_a_review() {
        let state = seeded_state();
        let err = set_status(&state, "u1", ELDEN_RING, GameStatusDto::Played)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn editing_a_review_keeps_its_date_and_feed_quiet() {
        let state = seeded_state();
        let before = friends_feed(&state, "u2").await.unwrap().len();

        let edited = log_review(&state, "u1", "1", review(3)).await.unwrap();
        assert_eq!(edited.log_date, "2024-05-10");
        assert_eq!(edited.rating, 3);
        assert_eq!(friends_feed(&state, "u2").await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn delete_review_only_removes_the_review() {
        let state = seeded_state();
        delete_review(&state, "u1", "1").unwrap();
        assert_eq!(get_status(&state, "u1", "1").unwrap().status, GameStatusDto::None);

        let err = delete_review(&state, "u1", "1").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_user_or_game_is_not_found() {
        let state = seeded_state();
        assert!(matches!(
            set_status(&state, "ghost", "1", GameStatusDto::Wishlist).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            set_status(&state, "u1", "999", GameStatusDto::Wishlist).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn excerpt_quotes_and_truncates() {
        assert_eq!(excerpt("  "), None);
        assert_eq!(excerpt("Great"), Some("\"Great\"".into()));

        let long = "a".repeat(EXCERPT_CHARS + 10);
        let cut = excerpt(&long).unwrap();
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
        assert!(cut.ends_with("…\""));
    }
}
