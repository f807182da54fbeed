//! Static fixture loading: catalog games, users, seed collections, curated
//! lists, news and activity history.

use std::{collections::HashMap, fs, io, path::Path, sync::Arc};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::{
    catalog::{Catalog, CommunityReview, Game},
    collection::{Collection, GameStatus, ReviewDraft},
    feed::{Activity, ActivityKind, NewsArticle},
    lists::GameList,
    profile::{User, UserRef},
};

/// Fixture compiled into the binary, used when no file is available on disk.
const EMBEDDED_FIXTURE: &str = include_str!("../../config/catalog.json");

/// Failures while reading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture `{path}`")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse fixture `{path}`")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Fully resolved fixture content.
#[derive(Debug)]
pub struct Fixture {
    pub catalog: Arc<Catalog>,
    pub users: Vec<User>,
    /// Seed collection per user id.
    pub collections: Vec<(String, Collection)>,
    pub lists: Vec<GameList>,
    pub news: Vec<NewsArticle>,
    /// Activity history, newest first.
    pub activity: Vec<Activity>,
}

impl Fixture {
    /// Load the fixture at `path`, falling back to the embedded copy when the
    /// file is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(fixture) => {
                info!(
                    path = %path.display(),
                    games = fixture.catalog.len(),
                    users = fixture.users.len(),
                    "loaded catalog fixture"
                );
                fixture
            }
            Err(FixtureError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "fixture file not found; using embedded catalog"
                );
                Self::embedded()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to load fixture; using embedded catalog"
                );
                Self::embedded()
            }
        }
    }

    /// Parse a fixture file from disk.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| FixtureError::Parse {
            path: display,
            source,
        })
    }

    /// Parse fixture JSON.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawFixture>(contents).map(Into::into)
    }

    /// The fixture shipped with the binary.
    pub fn embedded() -> Self {
        match Self::from_json(EMBEDDED_FIXTURE) {
            Ok(fixture) => fixture,
            Err(err) => {
                warn!(error = %err, "embedded fixture is invalid; starting with an empty catalog");
                RawFixture::default().into()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFixture {
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    games: Vec<RawGame>,
    #[serde(default)]
    users: Vec<RawUser>,
    #[serde(default)]
    collections: HashMap<String, RawCollection>,
    #[serde(default)]
    lists: Vec<RawList>,
    #[serde(default)]
    news: Vec<RawNews>,
    #[serde(default)]
    activity: Vec<RawActivity>,
}

#[derive(Debug, Deserialize)]
struct RawGame {
    id: String,
    title: String,
    #[serde(default)]
    cover_url: String,
    #[serde(default)]
    banner_url: String,
    #[serde(default)]
    screenshots: Vec<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    platforms: Vec<String>,
    release_year: u16,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    avg_rating: f32,
    #[serde(default)]
    reviews: Vec<RawCommunityReview>,
}

#[derive(Debug, Deserialize)]
struct RawCommunityReview {
    username: String,
    rating: u8,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    username: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    top_games: Vec<String>,
    #[serde(default)]
    friends: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCollection {
    #[serde(default)]
    wishlist: Vec<String>,
    #[serde(default)]
    backlog: Vec<String>,
    #[serde(default)]
    playing: Vec<String>,
    #[serde(default)]
    dropped: Vec<String>,
    #[serde(default)]
    reviews: Vec<RawLoggedGame>,
}

#[derive(Debug, Deserialize)]
struct RawLoggedGame {
    game_id: String,
    log_date: String,
    #[serde(default)]
    platform_played: String,
    #[serde(default)]
    playtime_hours: u32,
    rating: u8,
    #[serde(default)]
    review: String,
}

#[derive(Debug, Deserialize)]
struct RawList {
    id: String,
    author_id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    game_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawNews {
    id: String,
    title: String,
    summary: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawActivityKind {
    Review,
    Backlog,
    Playing,
    Wishlist,
    Dropped,
}

#[derive(Debug, Deserialize)]
struct RawActivity {
    id: String,
    user_id: String,
    kind: RawActivityKind,
    game_id: String,
    timestamp: String,
    details: Option<String>,
}

impl From<RawActivityKind> for ActivityKind {
    fn from(value: RawActivityKind) -> Self {
        match value {
            RawActivityKind::Review => ActivityKind::Review,
            RawActivityKind::Backlog => ActivityKind::Backlog,
            RawActivityKind::Playing => ActivityKind::Playing,
            RawActivityKind::Wishlist => ActivityKind::Wishlist,
            RawActivityKind::Dropped => ActivityKind::Dropped,
        }
    }
}

impl From<RawGame> for Game {
    fn from(value: RawGame) -> Self {
        Self {
            id: value.id,
            title: value.title,
            cover_url: value.cover_url,
            banner_url: value.banner_url,
            screenshots: value.screenshots,
            genres: value.genres,
            platforms: value.platforms,
            release_year: value.release_year,
            publisher: value.publisher,
            description: value.description,
            avg_rating: value.avg_rating,
            reviews: value
                .reviews
                .into_iter()
                .map(|review| CommunityReview {
                    username: review.username,
                    rating: review.rating,
                    text: review.text,
                })
                .collect(),
        }
    }
}

impl From<RawFixture> for Fixture {
    fn from(raw: RawFixture) -> Self {
        let catalog = Catalog::new(raw.games.into_iter().map(Game::from), raw.genres);
        let resolve = |id: &str, context: &str| {
            let game = catalog.get(id);
            if game.is_none() {
                warn!(game_id = %id, context, "fixture references unknown game; skipping");
            }
            game
        };

        let refs = raw
            .users
            .iter()
            .map(|user| {
                (
                    user.id.clone(),
                    UserRef {
                        id: user.id.clone(),
                        username: user.username.clone(),
                        avatar_url: user.avatar_url.clone(),
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        let users = raw
            .users
            .into_iter()
            .map(|user| User {
                top_games: user
                    .top_games
                    .iter()
                    .filter_map(|id| resolve(id, "top games"))
                    .collect(),
                friends: user
                    .friends
                    .iter()
                    .filter_map(|id| refs.get(id).cloned())
                    .collect(),
                id: user.id,
                username: user.username,
                bio: user.bio,
                avatar_url: user.avatar_url,
            })
            .collect::<Vec<_>>();

        let mut collections = Vec::with_capacity(raw.collections.len());
        for (user_id, seed) in raw.collections {
            let mut collection = Collection::new();
            // Seed lowest priority first so a game listed twice ends up in the
            // higher-priority state: reviews, playing, backlog, dropped, wishlist.
            let shelves = [
                (seed.wishlist, GameStatus::Wishlist),
                (seed.dropped, GameStatus::Dropped),
                (seed.backlog, GameStatus::Backlog),
                (seed.playing, GameStatus::Playing),
            ];
            for (ids, status) in shelves {
                for game in ids.iter().filter_map(|id| resolve(id, "collection")) {
                    if let Err(err) = collection.set_status(game, status) {
                        warn!(user_id = %user_id, error = %err, "invalid seed status");
                    }
                }
            }
            for logged in seed.reviews {
                let Some(game) = resolve(&logged.game_id, "review") else {
                    continue;
                };
                let draft = ReviewDraft {
                    game,
                    log_date: Some(logged.log_date),
                    platform_played: logged.platform_played,
                    playtime_hours: logged.playtime_hours,
                    rating: logged.rating,
                    review: logged.review,
                };
                if let Err(err) = collection.log_review(draft) {
                    warn!(user_id = %user_id, error = %err, "invalid seed review; skipping");
                }
            }
            collections.push((user_id, collection));
        }

        let lists = raw
            .lists
            .into_iter()
            .map(|list| GameList {
                games: list
                    .game_ids
                    .iter()
                    .filter_map(|id| resolve(id, "list"))
                    .collect(),
                id: list.id,
                author_id: list.author_id,
                title: list.title,
                description: list.description,
                tags: list.tags,
            }
            .normalized())
            .collect();

        let news = raw
            .news
            .into_iter()
            .map(|article| NewsArticle {
                id: article.id,
                title: article.title,
                summary: article.summary,
                content: article.content,
            })
            .collect();

        let activity = raw
            .activity
            .into_iter()
            .filter_map(|entry| {
                let Some(user) = refs.get(&entry.user_id).cloned() else {
                    warn!(user_id = %entry.user_id, "activity references unknown user; skipping");
                    return None;
                };
                let game = resolve(&entry.game_id, "activity")?;
                Some(Activity {
                    id: entry.id,
                    user,
                    kind: entry.kind.into(),
                    game,
                    timestamp: entry.timestamp,
                    details: entry.details,
                })
            })
            .collect();

        Self {
            catalog: Arc::new(catalog),
            users,
            collections,
            lists,
            news,
            activity,
        }
    }
}
