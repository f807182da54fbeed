//! Recommendation backends. A recommender receives the user's preferences
//! plus the titles it may and may not suggest and answers with one raw
//! suggestion that the service then validates against the catalog.

pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod local;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    config::{RecommenderProvider, RecommenderSettings},
    state::catalog::Catalog,
};

pub use self::error::{RecommenderError, RecommenderResult};
use self::local::LocalRecommender;

/// Wildcard value accepted for the genre and platform preferences.
pub const ANY: &str = "Any";

/// What the user is in the mood for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub mood: String,
    pub genre: String,
    pub playtime: String,
    pub platform: String,
}

impl Preferences {
    /// Genre filter, `None` for the wildcard.
    pub fn genre_filter(&self) -> Option<&str> {
        filter_value(&self.genre)
    }

    /// Platform filter, `None` for the wildcard.
    pub fn platform_filter(&self) -> Option<&str> {
        filter_value(&self.platform)
    }
}

fn filter_value(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && !value.eq_ignore_ascii_case(ANY)).then_some(value)
}

/// Everything a recommender needs to answer one request.
#[derive(Debug, Clone)]
pub struct RecommendationPrompt {
    pub preferences: Preferences,
    /// Titles already in the user's library, deduplicated.
    pub owned_titles: Vec<String>,
    /// Titles the answer must be picked from.
    pub allowed_titles: Vec<String>,
}

impl RecommendationPrompt {
    /// Render the instruction text sent to a generative model.
    pub fn render(&self) -> String {
        let prefs = &self.preferences;
        let mut prompt = format!(
            "You are a helpful gaming assistant called NextQuest. Recommend ONE video game based on \
             the user's preferences from a specific list of available games.\n\
             The user's preferences are:\n\
             - Mood: {}\n\
             - Genre: {}\n\
             - Desired Playtime: {}\n\
             - Platform: {}",
            prefs.mood, prefs.genre, prefs.playtime, prefs.platform
        );

        prompt.push_str(&format!(
            "\n\nCRITICAL: The \"title\" of the game you recommend MUST be one of the following \
             available titles: {}.",
            self.allowed_titles.join(", ")
        ));

        if !self.owned_titles.is_empty() {
            prompt.push_str(&format!(
                "\n\nIMPORTANT: Also, do NOT recommend any of the following games, as the user \
                 already has them in their library: {}.",
                self.owned_titles.join(", ")
            ));
        }

        prompt.push_str(
            "\n\nYour response MUST be a single, valid JSON object string. Do not include any \
             other text, just the JSON. The JSON object must have ONLY the following properties: \
             \"title\" (from the provided list), \"description\" (a one-sentence compelling \
             description of the game), and \"reason\" (a one-sentence explanation of why it fits \
             the user's preferences).",
        );
        prompt
    }
}

/// Suggestion as produced by a recommender, before catalog validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRecommendation {
    pub title: String,
    pub description: String,
    pub reason: String,
}

/// Source of game suggestions.
pub trait Recommender: Send + Sync {
    fn recommend(
        &self,
        prompt: RecommendationPrompt,
    ) -> BoxFuture<'static, RecommenderResult<RawRecommendation>>;
}

/// Instantiate the configured recommender.
///
/// A remote provider that cannot be set up (missing key, feature disabled)
/// degrades to the local recommender.
pub fn from_settings(settings: &RecommenderSettings, catalog: Arc<Catalog>) -> Arc<dyn Recommender> {
    match settings.provider {
        RecommenderProvider::Gemini => {
            if let Some(recommender) = remote(settings) {
                return recommender;
            }
        }
        RecommenderProvider::Local => info!("using local recommender"),
    }
    Arc::new(LocalRecommender::new(catalog))
}

#[cfg(feature = "gemini")]
fn remote(settings: &RecommenderSettings) -> Option<Arc<dyn Recommender>> {
    match gemini::GeminiConfig::from_env(settings).and_then(gemini::GeminiRecommender::new) {
        Ok(recommender) => {
            info!(model = %settings.model, "using gemini recommender");
            Some(Arc::new(recommender))
        }
        Err(err) => {
            warn!(error = %err, "gemini recommender unavailable; falling back to local picks");
            None
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn remote(_settings: &RecommenderSettings) -> Option<Arc<dyn Recommender>> {
    warn!("built without the `gemini` feature; falling back to local picks");
    None
}

/// Parse model output into a [`RawRecommendation`], tolerating a Markdown
/// code fence around the JSON object.
pub fn parse_recommendation(text: &str) -> RecommenderResult<RawRecommendation> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RecommenderError::EmptyResponse);
    }
    let body = strip_code_fence(text);
    serde_json::from_str(body).map_err(|source| RecommenderError::MalformedAnswer { source })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
