//! Per-user game collection.
//!
//! Every game a user tracks holds exactly one [`Entry`]: either shelved on one
//! of the four plain lists or reviewed. The five lists exposed to clients are
//! views derived from that map in insertion order, so a game can never be on
//! two lists at once.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::state::catalog::Game;

/// Highest star rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// Membership state of a game inside a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The game is not tracked.
    None,
    Wishlist,
    Backlog,
    Playing,
    Dropped,
    /// The game has a review.
    Played,
}

/// One of the four plain lists a game can be shelved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shelf {
    Wishlist,
    Backlog,
    Playing,
    Dropped,
}

impl From<Shelf> for GameStatus {
    fn from(shelf: Shelf) -> Self {
        match shelf {
            Shelf::Wishlist => GameStatus::Wishlist,
            Shelf::Backlog => GameStatus::Backlog,
            Shelf::Playing => GameStatus::Playing,
            Shelf::Dropped => GameStatus::Dropped,
        }
    }
}

impl GameStatus {
    /// Shelf backing this status, if it is a plain-list status.
    pub fn shelf(self) -> Option<Shelf> {
        match self {
            GameStatus::Wishlist => Some(Shelf::Wishlist),
            GameStatus::Backlog => Some(Shelf::Backlog),
            GameStatus::Playing => Some(Shelf::Playing),
            GameStatus::Dropped => Some(Shelf::Dropped),
            GameStatus::None | GameStatus::Played => None,
        }
    }
}

/// Review record for a played game.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedGame {
    pub game: Arc<Game>,
    /// RFC 3339 timestamp (fixture entries may carry a plain date).
    pub log_date: String,
    pub platform_played: String,
    pub playtime_hours: u32,
    /// Star rating between 0 and [`MAX_RATING`].
    pub rating: u8,
    pub review: String,
}

/// Review submission. `log_date` overrides the stored date when present.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub game: Arc<Game>,
    pub log_date: Option<String>,
    pub platform_played: String,
    pub playtime_hours: u32,
    pub rating: u8,
    pub review: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Shelved { game: Arc<Game>, shelf: Shelf },
    Reviewed(LoggedGame),
}

impl Entry {
    fn status(&self) -> GameStatus {
        match self {
            Entry::Shelved { shelf, .. } => (*shelf).into(),
            Entry::Reviewed(_) => GameStatus::Played,
        }
    }

    fn game(&self) -> &Arc<Game> {
        match self {
            Entry::Shelved { game, .. } => game,
            Entry::Reviewed(logged) => &logged.game,
        }
    }
}

/// Rejected status transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// `played` carries rating and playtime, which only a review can supply.
    #[error("marking `{game_id}` as played requires a review")]
    ReviewRequired { game_id: String },
}

/// Rejected review submissions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("rating {rating} is out of range (0-{})", MAX_RATING)]
    RatingOutOfRange { rating: u8 },
}

/// A user's tracked games keyed by game id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    entries: IndexMap<String, Entry>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the current status of a game.
    pub fn classify(&self, game_id: &str) -> GameStatus {
        self.entries
            .get(game_id)
            .map(Entry::status)
            .unwrap_or(GameStatus::None)
    }

    /// Move a game to a plain list, or drop it from the collection with
    /// [`GameStatus::None`].
    ///
    /// The game always leaves its previous list (including its review) and is
    /// appended to the end of the target list.
    pub fn set_status(&mut self, game: Arc<Game>, status: GameStatus) -> Result<(), TransitionError> {
        if status == GameStatus::Played {
            return Err(TransitionError::ReviewRequired {
                game_id: game.id.clone(),
            });
        }

        self.entries.shift_remove(&game.id);
        if let Some(shelf) = status.shelf() {
            self.entries
                .insert(game.id.clone(), Entry::Shelved { game, shelf });
        }
        Ok(())
    }

    /// Insert or replace the review of a game.
    ///
    /// An existing review keeps its position and, unless overridden, its log
    /// date. A new review is appended and stamped with the current time. The
    /// game leaves whichever plain list it was on.
    pub fn log_review(&mut self, draft: ReviewDraft) -> Result<LoggedGame, ReviewError> {
        if draft.rating > MAX_RATING {
            return Err(ReviewError::RatingOutOfRange {
                rating: draft.rating,
            });
        }

        let game_id = draft.game.id.clone();
        let previous_date = match self.entries.get(&game_id) {
            Some(Entry::Reviewed(existing)) => Some(existing.log_date.clone()),
            Some(Entry::Shelved { .. }) => {
                self.entries.shift_remove(&game_id);
                None
            }
            None => None,
        };

        let logged = LoggedGame {
            game: draft.game,
            log_date: draft
                .log_date
                .or(previous_date)
                .unwrap_or_else(now_rfc3339),
            platform_played: draft.platform_played,
            playtime_hours: draft.playtime_hours,
            rating: draft.rating,
            review: draft.review,
        };

        // Replacing an existing key keeps its position in the map.
        self.entries
            .insert(game_id, Entry::Reviewed(logged.clone()));
        Ok(logged)
    }

    /// Remove the review of a game. Other lists are left untouched and the
    /// game does not return to any previous list.
    pub fn delete_review(&mut self, game_id: &str) -> Option<LoggedGame> {
        if !matches!(self.entries.get(game_id), Some(Entry::Reviewed(_))) {
            return None;
        }
        match self.entries.shift_remove(game_id) {
            Some(Entry::Reviewed(logged)) => Some(logged),
            _ => None,
        }
    }

    /// Review of a game, if any.
    pub fn review(&self, game_id: &str) -> Option<&LoggedGame> {
        match self.entries.get(game_id) {
            Some(Entry::Reviewed(logged)) => Some(logged),
            _ => None,
        }
    }

    /// Games on one shelf, in the order they were added.
    pub fn shelf(&self, shelf: Shelf) -> Vec<Arc<Game>> {
        self.entries
            .values()
            .filter_map(|entry| match entry {
                Entry::Shelved { game, shelf: s } if *s == shelf => Some(game.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn wishlist(&self) -> Vec<Arc<Game>> {
        self.shelf(Shelf::Wishlist)
    }

    pub fn backlog(&self) -> Vec<Arc<Game>> {
        self.shelf(Shelf::Backlog)
    }

    pub fn playing(&self) -> Vec<Arc<Game>> {
        self.shelf(Shelf::Playing)
    }

    pub fn dropped(&self) -> Vec<Arc<Game>> {
        self.shelf(Shelf::Dropped)
    }

    /// Reviews in the order they were first logged.
    pub fn reviews(&self) -> Vec<LoggedGame> {
        self.entries
            .values()
            .filter_map(|entry| match entry {
                Entry::Reviewed(logged) => Some(logged.clone()),
                Entry::Shelved { .. } => None,
            })
            .collect()
    }

    /// Whether the game is tracked in any way.
    pub fn contains(&self, game_id: &str) -> bool {
        self.entries.contains_key(game_id)
    }

    /// Every tracked game, reviewed or shelved.
    pub fn games(&self) -> impl Iterator<Item = &Arc<Game>> {
        self.entries.values().map(Entry::game)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Current UTC time formatted as RFC 3339.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
