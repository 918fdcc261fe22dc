pub mod analysis;
pub mod engine;
pub mod narrative;
pub mod recommender;
pub mod statistics;

pub use recommender::Recommender;
