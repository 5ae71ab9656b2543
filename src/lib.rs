//! Mentor Match - explainable student to alumni mentor matching
//!
//! This library scores students against alumni mentors with one of two
//! interchangeable strategies, ranks the candidates deterministically and
//! explains every suggestion in plain language.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{explain, FeatureProvider, FeatureStore, MatchError, Matcher, ScoringPolicy, ScoringStrategy};
pub use models::{Alumni, Recommendation, ScoreBreakdown, Student};
pub use services::ProfileDirectory;
