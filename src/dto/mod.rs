//! Request and response payloads of the REST API.

pub mod catalog;
pub mod collection;
pub mod discover;
pub mod feed;
pub mod health;
pub mod lists;
pub mod user;
pub mod validation;
