use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Number of games served by the catalog.
    pub games: usize,
}

impl HealthResponse {
    /// The catalog is loaded and serving games.
    pub fn ok(games: usize) -> Self {
        Self {
            status: "ok".to_string(),
            games,
        }
    }

    /// The process is up but has nothing to serve.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            games: 0,
        }
    }
}
