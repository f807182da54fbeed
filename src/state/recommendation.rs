use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::state::catalog::Game;

/// Recommendation accepted for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub game: Arc<Game>,
    /// One-sentence pitch of the game.
    pub description: String,
    /// Why it fits the submitted preferences.
    pub reason: String,
}

/// Handle identifying one in-flight recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub user_id: String,
    pub generation: u64,
}

/// A newer request was issued while this one was in flight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("recommendation request {generation} for `{user_id}` was superseded by {latest}")]
pub struct Superseded {
    pub user_id: String,
    pub generation: u64,
    pub latest: u64,
}

/// Per-user generation counters guarding the latest recommendation slot.
///
/// Each request takes a ticket; only the holder of the newest ticket may
/// publish its result.
#[derive(Debug, Default)]
pub struct RecommendationTracker {
    generations: DashMap<String, u64>,
    latest: DashMap<String, Recommendation>,
}

impl RecommendationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for the user, invalidating any earlier ticket.
    pub fn begin(&self, user_id: &str) -> Ticket {
        let mut generation = self.generations.entry(user_id.to_string()).or_insert(0);
        *generation += 1;
        Ticket {
            user_id: user_id.to_string(),
            generation: *generation,
        }
    }

    /// Publish a result if the ticket is still current.
    pub fn complete(
        &self,
        ticket: &Ticket,
        recommendation: Recommendation,
    ) -> Result<(), Superseded> {
        // Holding the generation entry serialises completion against `begin`.
        let current = self.generations.get(&ticket.user_id);
        let latest = current.as_deref().copied().unwrap_or_default();
        if latest != ticket.generation {
            return Err(Superseded {
                user_id: ticket.user_id.clone(),
                generation: ticket.generation,
                latest,
            });
        }
        self.latest
            .insert(ticket.user_id.clone(), recommendation);
        Ok(())
    }

    /// Latest accepted recommendation for the user.
    pub fn latest(&self, user_id: &str) -> Option<Recommendation> {
        self.latest.get(user_id).map(|entry| entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::tests::game;

    fn recommendation(title: &str) -> Recommendation {
        Recommendation {
            game: Arc::new(game("1", title, &["RPG"], &["PC"])),
            description: "desc".into(),
            reason: "reason".into(),
        }
    }

    #[test]
    fn tickets_increase_per_user() {
        let tracker = RecommendationTracker::new();
        assert_eq!(tracker.begin("u1").generation, 1);
        assert_eq!(tracker.begin("u1").generation, 2);
        assert_eq!(tracker.begin("u2").generation, 1);
    }

    #[test]
    fn stale_ticket_cannot_overwrite_newer_result() {
        let tracker = RecommendationTracker::new();
        let first = tracker.begin("u1");
        let second = tracker.begin("u1");

        tracker
            .complete(&second, recommendation("Newer"))
            .unwrap();
        let err = tracker
            .complete(&first, recommendation("Stale"))
            .unwrap_err();

        assert_eq!(err.latest, 2);
        assert_eq!(tracker.latest("u1").unwrap().game.title, "Newer");
    }

    #[test]
    fn other_users_are_independent() {
        let tracker = RecommendationTracker::new();
        let mine = tracker.begin("u1");
        tracker.begin("u2");

        tracker.complete(&mine, recommendation("Mine")).unwrap();
        assert!(tracker.latest("u2").is_none());
    }
}
