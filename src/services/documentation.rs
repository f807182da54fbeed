use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for NextQuest Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::catalog::list_games,
        crate::routes::catalog::search_games,
        crate::routes::catalog::get_game,
        crate::routes::catalog::list_genres,
        crate::routes::catalog::genre_games,
        crate::routes::users::get_profile,
        crate::routes::users::update_profile,
        crate::routes::users::user_lists,
        crate::routes::collection::get_collection,
        crate::routes::collection::get_status,
        crate::routes::collection::set_status,
        crate::routes::collection::log_review,
        crate::routes::collection::delete_review,
        crate::routes::lists::save_list,
        crate::routes::lists::get_list,
        crate::routes::lists::delete_list,
        crate::routes::lists::add_game,
        crate::routes::lists::remove_game,
        crate::routes::discover::discover,
        crate::routes::discover::latest,
        crate::routes::feed::friends_feed,
        crate::routes::feed::list_news,
        crate::routes::feed::get_news,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::catalog::GameSummary,
            crate::dto::catalog::CommunityReviewDto,
            crate::dto::catalog::GameDetail,
            crate::dto::catalog::GenreListingResponse,
            crate::dto::collection::GameStatusDto,
            crate::dto::collection::SetStatusRequest,
            crate::dto::collection::GameStatusResponse,
            crate::dto::collection::LogReviewRequest,
            crate::dto::collection::LoggedGameDto,
            crate::dto::collection::CollectionResponse,
            crate::dto::lists::SaveListRequest,
            crate::dto::lists::AddListGameRequest,
            crate::dto::lists::GameListDto,
            crate::dto::discover::DiscoverRequest,
            crate::dto::discover::RecommendationResponse,
            crate::dto::user::UserRefDto,
            crate::dto::user::UserProfile,
            crate::dto::user::UpdateProfileRequest,
            crate::dto::feed::ActivityKindDto,
            crate::dto::feed::ActivityDto,
            crate::dto::feed::NewsArticleDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Game catalog, search and genre pages"),
        (name = "users", description = "Profiles and settings"),
        (name = "collection", description = "Wishlist, backlog, playing, dropped and reviews"),
        (name = "lists", description = "Curated game lists"),
        (name = "discover", description = "Game recommendations"),
        (name = "feed", description = "Friends' activity and news"),
    )
)]
pub struct ApiDoc;
