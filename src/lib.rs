//! Board game recommendations from two independent signals: ratings of
//! similar users (collaborative filtering) and characteristics shared with
//! a reference game (content-based filtering).

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;

pub use config::{Config, MergePolicy, RecommenderConfig};
pub use error::{AppError, AppResult};
pub use services::RecommendationEngine;
