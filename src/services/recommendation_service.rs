use std::{collections::HashSet, sync::Arc};

use tracing::{info, warn};

use crate::{
    dao::recommender::{Preferences, RecommendationPrompt},
    dto::discover::{DiscoverRequest, RecommendationResponse},
    error::ServiceError,
    services::user_service::require_user,
    state::{SharedState, catalog::Game, recommendation::Recommendation},
};

/// Games the user does not own that satisfy the genre and platform filters,
/// along with the titles the user already owns.
fn candidate_pool(
    state: &SharedState,
    user_id: &str,
    preferences: &Preferences,
) -> (Vec<Arc<Game>>, Vec<String>) {
    let owned = state
        .collections()
        .get(user_id)
        .map(|collection| collection.games().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    let owned_ids = owned.iter().map(|game| game.id.as_str()).collect::<HashSet<_>>();

    let genre = preferences.genre_filter();
    let platform = preferences.platform_filter();
    let pool = state
        .catalog()
        .games()
        .filter(|game| !owned_ids.contains(game.id.as_str()))
        .filter(|game| genre.is_none_or(|genre| game.has_genre(genre)))
        .filter(|game| platform.is_none_or(|platform| game.has_platform(platform)))
        .cloned()
        .collect();
    let owned_titles = owned.iter().map(|game| game.title.clone()).collect();

    (pool, owned_titles)
}

/// Ask the recommender for one unowned game matching the preferences.
///
/// Any recommender failure surfaces as [`ServiceError::RecommendationFailed`];
/// a result that arrives after a newer request was issued is rejected.
pub async fn recommend(
    state: &SharedState,
    user_id: &str,
    request: DiscoverRequest,
) -> Result<RecommendationResponse, ServiceError> {
    require_user(state, user_id)?;
    let preferences = Preferences::from(request);

    let (pool, owned_titles) = candidate_pool(state, user_id, &preferences);
    if pool.is_empty() {
        info!(user_id, genre = %preferences.genre, platform = %preferences.platform, "no candidate games");
        return Err(ServiceError::NoMatch);
    }

    let ticket = state.recommendations().begin(user_id);
    let prompt = RecommendationPrompt {
        preferences,
        owned_titles,
        allowed_titles: pool.iter().map(|game| game.title.clone()).collect(),
    };

    let raw = state.recommender().recommend(prompt).await.map_err(|err| {
        warn!(user_id, error = %err, "recommender failed");
        ServiceError::RecommendationFailed
    })?;

    let Some(game) = state.catalog().find_by_title(&raw.title) else {
        warn!(user_id, title = %raw.title, "recommended title is not in the catalog");
        return Err(ServiceError::RecommendationFailed);
    };
    if !pool.iter().any(|candidate| candidate.id == game.id) {
        warn!(user_id, title = %raw.title, "recommended title is outside the candidate pool");
        return Err(ServiceError::RecommendationFailed);
    }

    let recommendation = Recommendation {
        game,
        description: raw.description,
        reason: raw.reason,
    };
    state
        .recommendations()
        .complete(&ticket, recommendation.clone())?;

    info!(user_id, title = %recommendation.game.title, generation = ticket.generation, "recommendation accepted");
    Ok(RecommendationResponse::from(&recommendation))
}

/// Most recent accepted recommendation for the user.
pub fn latest(state: &SharedState, user_id: &str) -> Result<RecommendationResponse, ServiceError> {
    require_user(state, user_id)?;
    state
        .recommendations()
        .latest(user_id)
        .map(|recommendation| RecommendationResponse::from(&recommendation))
        .ok_or_else(|| ServiceError::NotFound(format!("no recommendation for user `{user_id}`")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::future::BoxFuture;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        dao::{
            fixture::Fixture,
            recommender::{RawRecommendation, Recommender, RecommenderResult, local::LocalRecommender},
        },
        services::testing::state_with,
    };

    fn request(mood: &str, genre: &str, platform: &str) -> DiscoverRequest {
        DiscoverRequest {
            mood: mood.into(),
            genre: genre.into(),
            playtime: "Long".into(),
            platform: platform.into(),
        }
    }

    /// Always answers with a fixed title.
    struct Scripted(&'static str);

    impl Recommender for Scripted {
        fn recommend(
            &self,
            _prompt: RecommendationPrompt,
        ) -> BoxFuture<'static, RecommenderResult<RawRecommendation>> {
            let title = self.0.to_string();
            Box::pin(async move {
                Ok(RawRecommendation {
                    title,
                    description: "desc".into(),
                    reason: "reason".into(),
                })
            })
        }
    }

    /// Picks the first allowed title; `slow` requests wait for a release.
    struct Gated(Arc<Notify>);

    impl Recommender for Gated {
        fn recommend(
            &self,
            prompt: RecommendationPrompt,
        ) -> BoxFuture<'static, RecommenderResult<RawRecommendation>> {
            let release = self.0.clone();
            Box::pin(async move {
                if prompt.preferences.mood == "slow" {
                    release.notified().await;
                }
                Ok(RawRecommendation {
                    title: prompt.allowed_titles[0].clone(),
                    description: prompt.preferences.mood,
                    reason: "reason".into(),
                })
            })
        }
    }

    #[tokio::test]
    async fn rpg_pick_is_unowned_and_tagged_rpg() {
        let local = LocalRecommender::new(Fixture::embedded().catalog);
        let state = state_with(Arc::new(local));

        for _ in 0..10 {
            let picked = recommend(&state, "u1", request("Adventurous", "RPG", "Any"))
                .await
                .unwrap();
            let game = state.catalog().get(&picked.game_id).unwrap();
            assert!(game.has_genre("RPG"));
            let owned = state.collections().get("u1").unwrap().contains(&game.id);
            assert!(!owned, "{} is already owned", game.title);
        }
    }

    #[tokio::test]
    async fn empty_pool_is_no_match() {
        let state = state_with(Arc::new(Scripted("Elden Ring")));
        let err = recommend(&state, "u1", request("Chill", "RPG", "Dreamcast"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoMatch));
    }

    #[tokio::test]
    async fn answers_outside_the_pool_fail() {
        for title in ["Half-Life 3", "Persona 5 Royal"] {
            let state = state_with(Arc::new(Scripted(title)));
            let err = recommend(&state, "u1", request("Chill", "RPG", "Any"))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::RecommendationFailed), "{title}");
            assert!(latest(&state, "u1").is_err());
        }
    }

    #[tokio::test]
    async fn title_match_ignores_case() {
        let state = state_with(Arc::new(Scripted("elden ring")));
        let picked = recommend(&state, "u1", request("Epic", "RPG", "Any"))
            .await
            .unwrap();
        assert_eq!(picked.title, "Elden Ring");
        assert_eq!(picked.genre, "RPG");
        assert_eq!(latest(&state, "u1").unwrap().title, "Elden Ring");
    }

    #[tokio::test]
    async fn stale_request_cannot_overwrite_newer_result() {
        let release = Arc::new(Notify::new());
        let state = state_with(Arc::new(Gated(release.clone())));

        let slow = recommend(&state, "u1", request("slow", "Any", "Any"));
        tokio::pin!(slow);
        assert!(futures::poll!(&mut slow).is_pending());

        let fast = recommend(&state, "u1", request("fast", "Any", "Any"))
            .await
            .unwrap();
        release.notify_one();

        let err = slow.await.unwrap_err();
        assert!(matches!(err, ServiceError::Superseded(_)));
        assert_eq!(latest(&state, "u1").unwrap().description, fast.description);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let state = state_with(Arc::new(Scripted("Elden Ring")));
        let err = recommend(&state, "nobody", request("Chill", "Any", "Any"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
