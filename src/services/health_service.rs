use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the catalog has games to serve.
pub fn health_status(state: &SharedState) -> HealthResponse {
    let games = state.catalog().len();
    if games == 0 {
        warn!("catalog is empty; reporting degraded");
        HealthResponse::degraded()
    } else {
        HealthResponse::ok(games)
    }
}
