/// Catalog browsing, search and genre pages.
pub mod catalog_service;
/// Collection status changes and reviews.
pub mod collection_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Friends' activity and news.
pub mod feed_service;
/// Health check service.
pub mod health_service;
/// Curated list management.
pub mod list_service;
/// Discover recommendations.
pub mod recommendation_service;
/// Profiles and settings.
pub mod user_service;
