use tracing::info;

use crate::{
    dto::user::{UpdateProfileRequest, UserProfile},
    error::ServiceError,
    services::catalog_service::resolve_games,
    state::{
        SharedState,
        profile::{ProfileUpdate, UserRef},
    },
};

/// Reference to an existing user, or not-found.
pub fn require_user(state: &SharedState, user_id: &str) -> Result<UserRef, ServiceError> {
    state
        .users()
        .get(user_id)
        .map(|user| user.to_ref())
        .ok_or_else(|| ServiceError::NotFound(format!("user `{user_id}` not found")))
}

pub fn get_profile(state: &SharedState, user_id: &str) -> Result<UserProfile, ServiceError> {
    state
        .users()
        .get(user_id)
        .map(|user| UserProfile::from(&*user))
        .ok_or_else(|| ServiceError::NotFound(format!("user `{user_id}` not found")))
}

/// Apply a settings edit and refresh the copies of the user's card held in
/// friend lists.
pub fn update_profile(
    state: &SharedState,
    user_id: &str,
    request: UpdateProfileRequest,
) -> Result<UserProfile, ServiceError> {
    let update = ProfileUpdate {
        username: request.username,
        bio: request.bio,
        avatar_url: request.avatar_url,
        top_games: resolve_games(state, &request.top_game_ids)?,
    };

    let (profile, card) = {
        let mut user = state
            .users()
            .get_mut(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("user `{user_id}` not found")))?;
        user.apply(update)?;
        (UserProfile::from(&*user), user.to_ref())
    };

    for mut other in state.users().iter_mut() {
        for friend in other.friends.iter_mut().filter(|friend| friend.id == card.id) {
            *friend = card.clone();
        }
    }

    info!(user_id, username = %profile.username, "profile updated");
    Ok(profile)
}
