//! Recommender backed by the Gemini `generateContent` API.

mod client;
mod config;
mod models;

pub use self::{client::GeminiRecommender, config::GeminiConfig};
