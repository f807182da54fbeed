//! Offline recommender picking a random title from the allowed pool.

use std::sync::Arc;

use futures::future::{self, BoxFuture};
use rand::seq::IndexedRandom;

use crate::state::catalog::Catalog;

use super::{
    Preferences, RawRecommendation, RecommendationPrompt, Recommender, RecommenderError,
    RecommenderResult,
};

/// Recommender that needs no network access.
#[derive(Debug, Clone)]
pub struct LocalRecommender {
    catalog: Arc<Catalog>,
}

impl LocalRecommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    fn pick(&self, prompt: &RecommendationPrompt) -> RecommenderResult<RawRecommendation> {
        let title = prompt
            .allowed_titles
            .choose(&mut rand::rng())
            .ok_or(RecommenderError::NoCandidates)?;
        let description = self
            .catalog
            .find_by_title(title)
            .map(|game| game.description.clone())
            .unwrap_or_default();

        Ok(RawRecommendation {
            title: title.clone(),
            description,
            reason: generate_reason(&prompt.preferences),
        })
    }
}

impl Recommender for LocalRecommender {
    fn recommend(
        &self,
        prompt: RecommendationPrompt,
    ) -> BoxFuture<'static, RecommenderResult<RawRecommendation>> {
        Box::pin(future::ready(self.pick(&prompt)))
    }
}

/// Explain a pick from the genre and platform preferences.
pub fn generate_reason(preferences: &Preferences) -> String {
    let mut reasons = Vec::with_capacity(2);
    if let Some(genre) = preferences.genre_filter() {
        reasons.push(format!(
            "you're looking for a {} game",
            genre.to_lowercase()
        ));
    }
    if let Some(platform) = preferences.platform_filter() {
        reasons.push(format!("you want to play on {platform}"));
    }

    if reasons.is_empty() {
        "Based on your preferences, this could be your next favorite game!".to_string()
    } else {
        format!("Because {}.", reasons.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::tests::game;

    fn preferences(genre: &str, platform: &str) -> Preferences {
        Preferences {
            mood: "Chill".into(),
            genre: genre.into(),
            playtime: "Short".into(),
            platform: platform.into(),
        }
    }

    #[test]
    fn reason_mentions_concrete_preferences() {
        assert_eq!(
            generate_reason(&preferences("RPG", "PC")),
            "Because you're looking for a rpg game and you want to play on PC."
        );
        assert_eq!(
            generate_reason(&preferences("Any", "Switch")),
            "Because you want to play on Switch."
        );
        assert_eq!(
            generate_reason(&preferences("Any", "Any")),
            "Based on your preferences, this could be your next favorite game!"
        );
    }

    #[tokio::test]
    async fn picks_from_allowed_titles() {
        let mut hades = game("2", "Hades", &["Roguelike"], &["PC"]);
        hades.description = "Defy the god of the dead.".into();
        let catalog = Arc::new(Catalog::new(
            [game("1", "Elden Ring", &["RPG"], &["PC"]), hades],
            Vec::new(),
        ));
        let recommender = LocalRecommender::new(catalog);

        let answer = recommender
            .recommend(RecommendationPrompt {
                preferences: preferences("Roguelike", "Any"),
                owned_titles: vec!["Elden Ring".into()],
                allowed_titles: vec!["Hades".into()],
            })
            .await
            .unwrap();

        assert_eq!(answer.title, "Hades");
        assert_eq!(answer.description, "Defy the god of the dead.");
    }

    #[tokio::test]
    async fn empty_pool_is_an_error() {
        let recommender = LocalRecommender::new(Arc::new(Catalog::new(Vec::new(), Vec::new())));
        let result = recommender
            .recommend(RecommendationPrompt {
                preferences: preferences("Any", "Any"),
                owned_titles: Vec::new(),
                allowed_titles: Vec::new(),
            })
            .await;
        assert!(matches!(result, Err(RecommenderError::NoCandidates)));
    }
}
