//! Error types shared by the recommender backends.

use thiserror::Error;

/// Convenient result alias returning [`RecommenderError`] failures.
pub type RecommenderResult<T> = Result<T, RecommenderError>;

/// Failures while asking a recommender for a suggestion.
#[derive(Debug, Error)]
pub enum RecommenderError {
    /// Required environment variable is missing.
    #[error("missing recommender environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed.
    #[cfg(feature = "gemini")]
    #[error("failed to build recommender client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or timed out.
    #[cfg(feature = "gemini")]
    #[error("failed to send recommendation request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[cfg(feature = "gemini")]
    #[error("unexpected recommendation API status {status}")]
    RequestStatus { status: reqwest::StatusCode },
    /// The API payload could not be decoded.
    #[cfg(feature = "gemini")]
    #[error("failed to decode recommendation API response")]
    DecodeResponse {
        #[source]
        source: reqwest::Error,
    },
    /// The model produced no text.
    #[error("recommender returned an empty response")]
    EmptyResponse,
    /// The text is not the expected JSON object.
    #[error("recommender answer is not a valid recommendation object")]
    MalformedAnswer {
        #[source]
        source: serde_json::Error,
    },
    /// Nothing to pick from.
    #[error("no candidate titles were offered")]
    NoCandidates,
}
