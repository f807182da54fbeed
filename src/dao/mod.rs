pub mod fixture;
pub mod recommender;
