// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Alumni, Availability, FractionWeights, MatchSignals, PointWeights, Recommendation, ScoreBreakdown, ScoreComponent, Student};
pub use requests::{AnalysisQuery, CompareRequest, ExplainRequest, ProfileRecommendRequest, RecommendRequest};
pub use responses::{AnalysisResponse, CompareResponse, ErrorResponse, ExplainResponse, HealthResponse, RecommendResponse};
