use std::{collections::BTreeSet, sync::Arc};

use indexmap::IndexMap;

/// Maximum number of hits returned by a title search.
pub const SEARCH_LIMIT: usize = 10;

/// Community review snippet attached to a catalog game.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityReview {
    pub username: String,
    pub rating: u8,
    pub text: String,
}

/// Immutable catalog entry. Shared by reference once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    /// Unique catalog identifier.
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub banner_url: String,
    pub screenshots: Vec<String>,
    /// Genre tags in display order; the first one is the primary genre.
    pub genres: Vec<String>,
    /// Platform tags in display order; the first one is the primary platform.
    pub platforms: Vec<String>,
    pub release_year: u16,
    pub publisher: String,
    pub description: String,
    /// Aggregate community rating.
    pub avg_rating: f32,
    pub reviews: Vec<CommunityReview>,
}

impl Game {
    /// Whether the game carries the given genre tag.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Whether the game is available on the given platform.
    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }

    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }

    pub fn primary_platform(&self) -> Option<&str> {
        self.platforms.first().map(String::as_str)
    }
}

/// Games of one genre after the optional filters were applied.
#[derive(Debug, Clone)]
pub struct GenreListing {
    pub genre: String,
    /// Matching games sorted by aggregate rating, best first.
    pub games: Vec<Arc<Game>>,
    /// Release years present in the genre, newest first.
    pub available_years: Vec<u16>,
    /// Platforms present in the genre, alphabetical.
    pub available_platforms: Vec<String>,
}

/// Read-only game catalog loaded once at startup.
#[derive(Debug, Default)]
pub struct Catalog {
    games: IndexMap<String, Arc<Game>>,
    genres: Vec<String>,
}

impl Catalog {
    /// Build a catalog from its games and the ordered genre vocabulary.
    ///
    /// Later duplicates of an id are ignored so the first definition wins.
    pub fn new(games: impl IntoIterator<Item = Game>, genres: Vec<String>) -> Self {
        let mut index = IndexMap::new();
        for game in games {
            index
                .entry(game.id.clone())
                .or_insert_with(|| Arc::new(game));
        }
        Self {
            games: index,
            genres,
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Game>> {
        self.games.get(id).cloned()
    }

    /// Resolve a title ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<Arc<Game>> {
        let needle = title.trim().to_lowercase();
        self.games
            .values()
            .find(|game| game.title.to_lowercase() == needle)
            .cloned()
    }

    /// Iterate over every game in catalog order.
    pub fn games(&self) -> impl Iterator<Item = &Arc<Game>> {
        self.games.values()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Ordered genre vocabulary.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Case-insensitive substring search on titles. A blank query yields nothing.
    pub fn search(&self, query: &str) -> Vec<Arc<Game>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.games
            .values()
            .filter(|game| game.title.to_lowercase().contains(&needle))
            .take(SEARCH_LIMIT)
            .cloned()
            .collect()
    }

    /// Games of a genre, optionally narrowed by release year and platform.
    pub fn genre_listing(
        &self,
        genre: &str,
        year: Option<u16>,
        platform: Option<&str>,
    ) -> GenreListing {
        let in_genre = self
            .games
            .values()
            .filter(|game| game.has_genre(genre))
            .collect::<Vec<_>>();

        let years = in_genre
            .iter()
            .map(|game| game.release_year)
            .collect::<BTreeSet<_>>();
        let platforms = in_genre
            .iter()
            .flat_map(|game| game.platforms.iter().cloned())
            .collect::<BTreeSet<_>>();

        let mut games = in_genre
            .into_iter()
            .filter(|game| year.is_none_or(|y| game.release_year == y))
            .filter(|game| platform.is_none_or(|p| game.has_platform(p)))
            .cloned()
            .collect::<Vec<_>>();
        games.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));

        GenreListing {
            genre: genre.to_string(),
            games,
            available_years: years.into_iter().rev().collect(),
            available_platforms: platforms.into_iter().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn game(id: &str, title: &str, genres: &[&str], platforms: &[&str]) -> Game {
        Game {
            id: id.into(),
            title: title.into(),
            cover_url: format!("https://img.example/{id}.jpg"),
            banner_url: String::new(),
            screenshots: Vec::new(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            release_year: 2020,
            publisher: "Publisher".into(),
            description: format!("{title} description"),
            avg_rating: 4.0,
            reviews: Vec::new(),
        }
    }

    fn sample() -> Catalog {
        let mut hades = game("1", "Hades", &["Action", "RPG"], &["PC", "Switch"]);
        hades.avg_rating = 4.9;
        let mut elden = game("2", "Elden Ring", &["RPG", "Fantasy"], &["PC", "PS5"]);
        elden.avg_rating = 4.7;
        elden.release_year = 2022;
        let mut disco = game("3", "Disco Elysium", &["RPG"], &["PC"]);
        disco.avg_rating = 4.8;
        disco.release_year = 2019;
        let celeste = game("4", "Celeste", &["Platformer"], &["Switch", "PC"]);

        Catalog::new(
            [hades, elden, disco, celeste],
            vec!["Action".into(), "RPG".into(), "Platformer".into()],
        )
    }

    #[test]
    fn search_is_case_insensitive_and_blank_is_empty() {
        let catalog = sample();
        let hits = catalog.search("  eLdEn ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn search_caps_results() {
        let games = (0..15)
            .map(|i| game(&i.to_string(), &format!("Quest {i}"), &["RPG"], &["PC"]))
            .collect::<Vec<_>>();
        let catalog = Catalog::new(games, Vec::new());
        assert_eq!(catalog.search("quest").len(), SEARCH_LIMIT);
    }

    #[test]
    fn find_by_title_ignores_case() {
        let catalog = sample();
        assert_eq!(catalog.find_by_title("disco elysium").unwrap().id, "3");
        assert!(catalog.find_by_title("Disco").is_none());
    }

    #[test]
    fn genre_listing_sorts_by_rating_and_collects_facets() {
        let catalog = sample();
        let listing = catalog.genre_listing("RPG", None, None);
        let ids = listing
            .games
            .iter()
            .map(|g| g.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "3", "2"]);
        assert_eq!(listing.available_years, vec![2022, 2020, 2019]);
        assert_eq!(listing.available_platforms, vec!["PC", "PS5", "Switch"]);
    }

    #[test]
    fn genre_listing_applies_filters() {
        let catalog = sample();
        let listing = catalog.genre_listing("RPG", Some(2022), Some("PC"));
        assert_eq!(listing.games.len(), 1);
        assert_eq!(listing.games[0].title, "Elden Ring");
        // Facets describe the whole genre, not the filtered subset.
        assert_eq!(listing.available_years.len(), 3);
    }

    #[test]
    fn duplicate_ids_keep_first_definition() {
        let catalog = Catalog::new(
            [
                game("1", "First", &[], &[]),
                game("1", "Second", &[], &[]),
            ],
            Vec::new(),
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("1").unwrap().title, "First");
    }
}
