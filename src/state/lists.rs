use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use uuid::Uuid;

use crate::state::catalog::Game;

/// Prefix of generated list identifiers.
const LIST_ID_PREFIX: &str = "list-";

/// User-authored curated group of games.
#[derive(Debug, Clone, PartialEq)]
pub struct GameList {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub description: String,
    /// Ordered, duplicate-free tags.
    pub tags: Vec<String>,
    /// Ordered games, unique by id.
    pub games: Vec<Arc<Game>>,
}

impl GameList {
    /// Trim and dedupe tags, and keep only the first game of each id.
    pub fn normalized(mut self) -> Self {
        let mut seen = IndexSet::new();
        self.games.retain(|game| seen.insert(game.id.clone()));
        self.tags = dedup_tags(self.tags);
        self
    }

    /// Append a game unless a game with the same id is already present.
    /// Returns whether the list changed.
    pub fn add_game(&mut self, game: Arc<Game>) -> bool {
        if self.games.iter().any(|existing| existing.id == game.id) {
            return false;
        }
        self.games.push(game);
        true
    }

    /// Drop every game with the given id. Returns whether the list changed.
    pub fn remove_game(&mut self, game_id: &str) -> bool {
        let before = self.games.len();
        self.games.retain(|game| game.id != game_id);
        self.games.len() != before
    }
}

/// List content submitted for creation or update.
#[derive(Debug, Clone)]
pub struct ListDraft {
    /// Identifier of the list to replace; unknown or missing ids create a new list.
    pub id: Option<String>,
    pub author_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub games: Vec<Arc<Game>>,
}

/// Rejected list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("list `{list_id}` not found")]
    NotFound { list_id: String },
    #[error("list `{list_id}` belongs to another user")]
    NotAuthor { list_id: String },
}

/// Registry of every curated list, in creation order.
#[derive(Debug, Default)]
pub struct ListBook {
    lists: IndexMap<String, GameList>,
}

impl ListBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a list as-is, keeping its identifier. Used for fixture seeding.
    pub fn insert(&mut self, list: GameList) {
        self.lists.insert(list.id.clone(), list);
    }

    /// Replace the list with the draft's id, or create a new list under a
    /// freshly generated id.
    pub fn save(&mut self, draft: ListDraft) -> Result<GameList, ListError> {
        let existing_id = draft
            .id
            .filter(|id| self.lists.contains_key(id.as_str()));

        let id = match existing_id {
            Some(id) => {
                self.ensure_author(&id, &draft.author_id)?;
                id
            }
            None => self.fresh_id(),
        };

        let list = GameList {
            id: id.clone(),
            author_id: draft.author_id,
            title: draft.title,
            description: draft.description,
            tags: draft.tags,
            games: draft.games,
        }
        .normalized();

        // Re-inserting an existing key keeps its position.
        self.lists.insert(id, list.clone());
        Ok(list)
    }

    /// Delete a list owned by `author_id`.
    pub fn delete(&mut self, list_id: &str, author_id: &str) -> Result<GameList, ListError> {
        self.ensure_author(list_id, author_id)?;
        self.lists
            .shift_remove(list_id)
            .ok_or_else(|| ListError::NotFound {
                list_id: list_id.to_string(),
            })
    }

    pub fn get(&self, list_id: &str) -> Option<&GameList> {
        self.lists.get(list_id)
    }

    /// Mutable access to a list owned by `author_id`.
    pub fn get_owned_mut(
        &mut self,
        list_id: &str,
        author_id: &str,
    ) -> Result<&mut GameList, ListError> {
        self.ensure_author(list_id, author_id)?;
        self.lists
            .get_mut(list_id)
            .ok_or_else(|| ListError::NotFound {
                list_id: list_id.to_string(),
            })
    }

    /// Lists written by one author, in creation order.
    pub fn by_author<'a>(&'a self, author_id: &'a str) -> impl Iterator<Item = &'a GameList> {
        self.lists
            .values()
            .filter(move |list| list.author_id == author_id)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    fn ensure_author(&self, list_id: &str, author_id: &str) -> Result<(), ListError> {
        match self.lists.get(list_id) {
            None => Err(ListError::NotFound {
                list_id: list_id.to_string(),
            }),
            Some(list) if list.author_id != author_id => Err(ListError::NotAuthor {
                list_id: list_id.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let candidate = format!("{LIST_ID_PREFIX}{}", Uuid::new_v4().simple());
            if !self.lists.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

/// Split a comma-separated tag string, trimming entries and dropping empty
/// ones and repeats.
pub fn parse_tags(input: &str) -> Vec<String> {
    dedup_tags(input.split(',').map(str::to_string).collect())
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
