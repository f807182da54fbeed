use crate::{
    dto::feed::{ActivityDto, NewsArticleDto},
    error::ServiceError,
    state::SharedState,
};

/// Activity of the user's friends, newest first.
pub async fn friends_feed(state: &SharedState, user_id: &str) -> Result<Vec<ActivityDto>, ServiceError> {
    // Cloned so no map guard is held across the lock await.
    let user = state
        .users()
        .get(user_id)
        .map(|user| user.clone())
        .ok_or_else(|| ServiceError::NotFound(format!("user `{user_id}` not found")))?;

    let log = state.activity().read().await;
    Ok(log
        .filter(|author| user.is_friend(&author.id))
        .iter()
        .map(ActivityDto::from)
        .collect())
}

pub fn list_news(state: &SharedState) -> Vec<NewsArticleDto> {
    state.news().iter().map(NewsArticleDto::from).collect()
}

pub fn get_news(state: &SharedState, news_id: &str) -> Result<NewsArticleDto, ServiceError> {
    state
        .news()
        .iter()
        .find(|article| article.id == news_id)
        .map(NewsArticleDto::from)
        .ok_or_else(|| ServiceError::NotFound(format!("news `{news_id}` not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::seeded_state;

    #[tokio::test]
    async fn feed_only_shows_friends() {
        let state = seeded_state();
        let feed = friends_feed(&state, "u1").await.unwrap();
        let ids = feed.iter().map(|activity| activity.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["act1", "act2", "act3", "act4"]);

        assert!(friends_feed(&state, "u2").await.unwrap().is_empty());
        assert!(friends_feed(&state, "ghost").await.is_err());
    }

    #[test]
    fn news_lookup() {
        let state = seeded_state();
        assert_eq!(list_news(&state).len(), 2);
        assert_eq!(get_news(&state, "news2").unwrap().id, "news2");
        assert!(matches!(get_news(&state, "news9"), Err(ServiceError::NotFound(_))));
    }
}
