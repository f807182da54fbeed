use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use tracing::debug;

use crate::dao::recommender::{
    RawRecommendation, RecommendationPrompt, Recommender, RecommenderError, RecommenderResult,
    parse_recommendation,
};

use super::{
    config::GeminiConfig,
    models::{GenerateContentRequest, GenerateContentResponse},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiRecommender {
    client: Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
}

impl GeminiRecommender {
    /// Build the HTTP client for the configured model.
    pub fn new(config: GeminiConfig) -> RecommenderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| RecommenderError::ClientBuilder { source })?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint: Arc::from(endpoint),
            api_key: Arc::from(config.api_key),
        })
    }

    async fn generate(&self, prompt: &str) -> RecommenderResult<String> {
        let response = self
            .client
            .post(self.endpoint.as_ref())
            .header(API_KEY_HEADER, self.api_key.as_ref())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|source| RecommenderError::RequestSend {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecommenderError::RequestStatus { status });
        }

        let payload = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|source| RecommenderError::DecodeResponse { source })?;
        Ok(payload.text())
    }
}

impl Recommender for GeminiRecommender {
    fn recommend(
        &self,
        prompt: RecommendationPrompt,
    ) -> BoxFuture<'static, RecommenderResult<RawRecommendation>> {
        let recommender = self.clone();
        Box::pin(async move {
            let text = recommender.generate(&prompt.render()).await?;
            debug!(bytes = text.len(), "received recommendation text");
            parse_recommendation(&text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_targets_the_configured_model() {
        let recommender = GeminiRecommender::new(GeminiConfig::new(
            "https://example.test/",
            "gemini-2.5-flash",
            "key",
        ))
        .unwrap();
        assert_eq!(
            recommender.endpoint.as_ref(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
