use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Where the interactive API explorer is mounted.
pub const SWAGGER_UI_PATH: &str = "/docs";
/// Raw OpenAPI document consumed by the explorer and client generators.
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

/// Serve the Swagger UI and the OpenAPI document describing the NextQuest API.
pub fn router(state: SharedState) -> Router<SharedState> {
    let explorer: Router<SharedState> = SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into();

    explorer.with_state(state)
}
