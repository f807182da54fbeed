use tracing::info;

use crate::{
    dto::lists::{AddListGameRequest, GameListDto, SaveListRequest},
    error::ServiceError,
    services::{
        catalog_service::{require_game, resolve_games},
        user_service::require_user,
    },
    state::{
        SharedState,
        lists::{ListDraft, ListError, parse_tags},
    },
};

/// Lists authored by a user, in creation order.
pub async fn lists_by_author(
    state: &SharedState,
    user_id: &str,
) -> Result<Vec<GameListDto>, ServiceError> {
    require_user(state, user_id)?;
    let lists = state.lists().read().await;
    Ok(lists.by_author(user_id).map(GameListDto::from).collect())
}

pub async fn get_list(state: &SharedState, list_id: &str) -> Result<GameListDto, ServiceError> {
    let lists = state.lists().read().await;
    lists
        .get(list_id)
        .map(GameListDto::from)
        .ok_or_else(|| {
            ListError::NotFound {
                list_id: list_id.to_string(),
            }
            .into()
        })
}

/// Create a list, or replace one when the request names an existing id.
pub async fn save_list(
    state: &SharedState,
    request: SaveListRequest,
) -> Result<GameListDto, ServiceError> {
    require_user(state, &request.author_id)?;
    let draft = ListDraft {
        id: request.id.filter(|id| !id.trim().is_empty()),
        author_id: request.author_id,
        title: request.title.trim().to_string(),
        description: request.description,
        tags: parse_tags(&request.tags),
        games: resolve_games(state, &request.game_ids)?,
    };

    let saved = state.lists().write().await.save(draft)?;
    info!(list_id = %saved.id, author_id = %saved.author_id, games = saved.games.len(), "list saved");
    Ok(GameListDto::from(&saved))
}

/// Remove a list owned by `author_id`.
pub async fn delete_list(
    state: &SharedState,
    list_id: &str,
    author_id: &str,
) -> Result<(), ServiceError> {
    state.lists().write().await.delete(list_id, author_id)?;
    info!(list_id, author_id, "list deleted");
    Ok(())
}

/// Append a game to a list; adding a game already present changes nothing.
pub async fn add_game(
    state: &SharedState,
    list_id: &str,
    request: AddListGameRequest,
) -> Result<GameListDto, ServiceError> {
    let game = require_game(state, &request.game_id)?;
    let mut lists = state.lists().write().await;
    let list = lists.get_owned_mut(list_id, &request.author_id)?;
    list.add_game(game);
    Ok(GameListDto::from(&*list))
}

/// Remove a game from a list; removing an absent game changes nothing.
pub async fn remove_game(
    state: &SharedState,
    list_id: &str,
    game_id: &str,
    author_id: &str,
) -> Result<GameListDto, ServiceError> {
    let mut lists = state.lists().write().await;
    let list = lists.get_owned_mut(list_id, author_id)?;
    list.remove_game(game_id);
    Ok(GameListDto::from(&*list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::seeded_state;

    fn request(id: Option<&str>, author: &str, title: &str) -> SaveListRequest {
        SaveListRequest {
            id: id.map(str::to_string),
            author_id: author.into(),
            title: title.into(),
            description: "desc".into(),
            tags: "Cozy, , cozy,Cozy".into(),
            game_ids: vec!["22".into(), "22".into(), "50".into()],
        }
    }

    #[tokio::test]
    async fn new_list_gets_a_fresh_id() {
        let state = seeded_state();
        let before = lists_by_author(&state, "u1").await.unwrap().len();

        let saved = save_list(&state, request(None, "u1", " Cozy nights ")).await.unwrap();
        assert!(saved.id.starts_with("list-"));
        assert_eq!(saved.title, "Cozy nights");
        assert_eq!(saved.tags, vec!["Cozy", "cozy"]);
        assert_eq!(saved.games.len(), 2);
        assert_eq!(lists_by_author(&state, "u1").await.unwrap().len(), before + 1);
    }

    #[tokio::test]
    async fn existing_id_replaces_in_place() {
        let state = seeded_state();
        let saved = save_list(&state, request(Some("list1"), "u1", "Renamed"))
            .await
            .unwrap();
        assert_eq!(saved.id, "list1");
        assert_eq!(get_list(&state, "list1").await.unwrap().title, "Renamed");
    }

    #[tokio::test]
    async fn only_the_author_may_change_a_list() {
        let state = seeded_state();
        let err = save_list(&state, request(Some("list1"), "u2", "Mine now"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = delete_list(&state, "list1", "u2").await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let state = seeded_state();
        delete_list(&state, "list1", "u1").await.unwrap();
        assert!(matches!(
            get_list(&state, "list1").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete_list(&state, "list1", "u1").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn add_and_remove_games() {
        let state = seeded_state();
        let before = get_list(&state, "list1").await.unwrap().games.len();

        let add = AddListGameRequest {
            author_id: "u1".into(),
            game_id: "22".into(),
        };
        let list = add_game(&state, "list1", add).await.unwrap();
        assert_eq!(list.games.len(), before + 1);

        let again = AddListGameRequest {
            author_id: "u1".into(),
            game_id: "22".into(),
        };
        assert_eq!(add_game(&state, "list1", again).await.unwrap().games.len(), before + 1);

        let list = remove_game(&state, "list1", "22", "u1").await.unwrap();
        assert_eq!(list.games.len(), before);
    }

    #[tokio::test]
    async fn unknown_games_are_rejected() {
        let state = seeded_state();
        let mut bad = request(None, "u1", "Broken");
        bad.game_ids = vec!["nope".into()];
        assert!(matches!(
            save_list(&state, bad).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }
}
