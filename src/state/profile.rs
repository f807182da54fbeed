use std::sync::Arc;

use thiserror::Error;

use crate::state::catalog::Game;

/// Number of favourite games shown on a profile.
pub const TOP_GAMES: usize = 4;

/// Lightweight reference to another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub username: String,
    pub avatar_url: String,
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub bio: String,
    pub avatar_url: String,
    /// Favourite games, at most [`TOP_GAMES`].
    pub top_games: Vec<Arc<Game>>,
    pub friends: Vec<UserRef>,
}

/// Editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub bio: String,
    pub avatar_url: String,
    pub top_games: Vec<Arc<Game>>,
}

/// Rejected profile edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("at most {} top games are allowed (got {count})", TOP_GAMES)]
    TooManyTopGames { count: usize },
}

impl User {
    /// Reference used by friend lists and activity entries.
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    pub fn is_friend(&self, user_id: &str) -> bool {
        self.friends.iter().any(|friend| friend.id == user_id)
    }

    /// Apply a profile edit.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), ProfileError> {
        let username = update.username.trim();
        if username.is_empty() {
            return Err(ProfileError::EmptyUsername);
        }
        if update.top_games.len() > TOP_GAMES {
            return Err(ProfileError::TooManyTopGames {
                count: update.top_games.len(),
            });
        }

        self.username = username.to_string();
        self.bio = update.bio;
        self.avatar_url = update.avatar_url;
        self.top_games = update.top_games;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::tests::game;

    fn user() -> User {
        User {
            id: "u1".into(),
            username: "PixelatedHero".into(),
            bio: String::new(),
            avatar_url: String::new(),
            top_games: Vec::new(),
            friends: vec![UserRef {
                id: "u2".into(),
                username: "GlitchQueen".into(),
                avatar_url: String::new(),
            }],
        }
    }

    fn update(username: &str, top: usize) -> ProfileUpdate {
        ProfileUpdate {
            username: username.into(),
            bio: "bio".into(),
            avatar_url: "https://avatar".into(),
            top_games: (0..top)
                .map(|i| Arc::new(game(&i.to_string(), "G", &[], &[])))
                .collect(),
        }
    }

    #[test]
    fn apply_trims_username() {
        let mut user = user();
        user.apply(update("  Hero  ", 4)).unwrap();
        assert_eq!(user.username, "Hero");
        assert_eq!(user.top_games.len(), 4);
    }

    #[test]
    fn apply_rejects_invalid_edits() {
        let mut user = user();
        assert_eq!(
            user.apply(update("   ", 0)).unwrap_err(),
            ProfileError::EmptyUsername
        );
        assert_eq!(
            user.apply(update("Hero", 5)).unwrap_err(),
            ProfileError::TooManyTopGames { count: 5 }
        );
        assert_eq!(user.username, "PixelatedHero");
    }

    #[test]
    fn friendship_lookup() {
        let user = user();
        assert!(user.is_friend("u2"));
        assert!(!user.is_friend("u3"));
    }
}
