use std::{collections::VecDeque, sync::Arc};

use uuid::Uuid;

use crate::state::{catalog::Game, collection::Shelf, profile::UserRef};

/// What a user did to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Review,
    Backlog,
    Playing,
    Wishlist,
    Dropped,
}

impl From<Shelf> for ActivityKind {
    fn from(shelf: Shelf) -> Self {
        match shelf {
            Shelf::Wishlist => ActivityKind::Wishlist,
            Shelf::Backlog => ActivityKind::Backlog,
            Shelf::Playing => ActivityKind::Playing,
            Shelf::Dropped => ActivityKind::Dropped,
        }
    }
}

/// Entry of the social feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub user: UserRef,
    pub kind: ActivityKind,
    pub game: Arc<Game>,
    pub timestamp: String,
    /// Review excerpt for review activities.
    pub details: Option<String>,
}

impl Activity {
    /// Build an activity with a generated identifier.
    pub fn new(
        user: UserRef,
        kind: ActivityKind,
        game: Arc<Game>,
        timestamp: String,
        details: Option<String>,
    ) -> Self {
        Self {
            id: format!("act-{}", Uuid::new_v4().simple()),
            user,
            kind,
            game,
            timestamp,
            details,
        }
    }
}

/// News article shown on the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
}

/// Bounded activity history, newest first.
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
    capacity: usize,
}

impl ActivityLog {
    /// Create an empty log keeping at most `capacity` entries (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record the newest activity, evicting the oldest when full.
    pub fn push(&mut self, activity: Activity) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(activity);
    }

    /// Seed history given oldest-last, as listed in a fixture.
    pub fn extend_oldest_last(&mut self, activities: impl IntoIterator<Item = Activity>) {
        for activity in activities {
            if self.entries.len() == self.capacity {
                break;
            }
            self.entries.push_back(activity);
        }
    }

    /// Activities whose author matches the predicate, newest first.
    pub fn filter<F>(&self, mut keep: F) -> Vec<Activity>
    where
        F: FnMut(&UserRef) -> bool,
    {
        self.entries
            .iter()
            .filter(|activity| keep(&activity.user))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::tests::game;

    fn activity(user: &str, kind: ActivityKind) -> Activity {
        Activity::new(
            UserRef {
                id: user.into(),
                username: user.into(),
                avatar_url: String::new(),
            },
            kind,
            Arc::new(game("1", "Hades", &[], &[])),
            "now".into(),
            None,
        )
    }

    #[test]
    fn push_is_newest_first_and_bounded() {
        let mut log = ActivityLog::with_capacity(2);
        log.push(activity("a", ActivityKind::Backlog));
        log.push(activity("b", ActivityKind::Playing));
        log.push(activity("c", ActivityKind::Review));

        let users = log
            .filter(|_| true)
            .into_iter()
            .map(|a| a.user.id)
            .collect::<Vec<_>>();
        assert_eq!(users, vec!["c", "b"]);
    }

    #[test]
    fn seeded_history_keeps_fixture_order() {
        let mut log = ActivityLog::with_capacity(10);
        log.extend_oldest_last([
            activity("newest", ActivityKind::Review),
            activity("older", ActivityKind::Wishlist),
        ]);
        log.push(activity("live", ActivityKind::Dropped));

        let users = log
            .filter(|_| true)
            .into_iter()
            .map(|a| a.user.id)
            .collect::<Vec<_>>();
        assert_eq!(users, vec!["live", "newest", "older"]);
    }

    #[test]
    fn filter_by_author() {
        let mut log = ActivityLog::with_capacity(10);
        log.push(activity("friend", ActivityKind::Backlog));
        log.push(activity("stranger", ActivityKind::Backlog));

        let visible = log.filter(|user| user.id == "friend");
        assert_eq!(visible.len(), 1);
    }
}
