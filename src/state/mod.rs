pub mod catalog;
pub mod collection;
pub mod feed;
pub mod lists;
pub mod profile;
pub mod recommendation;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    config::AppConfig,
    dao::{
        fixture::Fixture,
        recommender::{self, Recommender},
    },
};

use self::{
    catalog::Catalog,
    collection::Collection,
    feed::{ActivityLog, NewsArticle},
    lists::ListBook,
    profile::User,
    recommendation::RecommendationTracker,
};

pub type SharedState = Arc<AppState>;

/// Central application state: the single authoritative store every route
/// reads from and writes to.
pub struct AppState {
    catalog: Arc<Catalog>,
    users: DashMap<String, User>,
    collections: DashMap<String, Collection>,
    lists: RwLock<ListBook>,
    activity: RwLock<ActivityLog>,
    news: Vec<NewsArticle>,
    recommender: Arc<dyn Recommender>,
    recommendations: RecommendationTracker,
}

impl AppState {
    /// Load the fixture named by the configuration and pick the configured
    /// recommender.
    pub fn new(config: AppConfig) -> SharedState {
        let fixture = Fixture::load(&config.catalog_path);
        let recommender = recommender::from_settings(&config.recommender, fixture.catalog.clone());
        Self::with_recommender(config, fixture, recommender)
    }

    /// Build a state from an already loaded fixture and an explicit recommender.
    pub fn with_recommender(
        config: AppConfig,
        fixture: Fixture,
        recommender: Arc<dyn Recommender>,
    ) -> SharedState {
        let mut lists = ListBook::new();
        for list in fixture.lists {
            lists.insert(list);
        }
        let mut activity = ActivityLog::with_capacity(config.activity_capacity);
        activity.extend_oldest_last(fixture.activity);

        info!(
            games = fixture.catalog.len(),
            users = fixture.users.len(),
            lists = lists.len(),
            "application state ready"
        );

        Arc::new(Self {
            catalog: fixture.catalog,
            users: fixture
                .users
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect(),
            collections: fixture.collections.into_iter().collect(),
            lists: RwLock::new(lists),
            activity: RwLock::new(activity),
            news: fixture.news,
            recommender,
            recommendations: RecommendationTracker::new(),
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Profiles keyed by user id.
    pub fn users(&self) -> &DashMap<String, User> {
        &self.users
    }

    /// Collections keyed by user id. Users without an entry own nothing yet.
    pub fn collections(&self) -> &DashMap<String, Collection> {
        &self.collections
    }

    pub fn lists(&self) -> &RwLock<ListBook> {
        &self.lists
    }

    pub fn activity(&self) -> &RwLock<ActivityLog> {
        &self.activity
    }

    pub fn news(&self) -> &[NewsArticle] {
        &self.news
    }

    /// Handle on the recommender, cloned so callers can await it without
    /// borrowing the state.
    pub fn recommender(&self) -> Arc<dyn Recommender> {
        self.recommender.clone()
    }

    pub fn recommendations(&self) -> &RecommendationTracker {
        &self.recommendations
    }
}
