use serde::{Deserialize, Serialize};
use crate::core::{StudentRecommendations, Verdict};
use crate::models::domain::{Recommendation, ScoreBreakdown};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub student_id: String,
    pub strategy: String,
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
    /// Set when the request deadline expired before every candidate was scored
    pub partial: bool,
}

/// Response for the explain endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResponse {
    pub student_id: String,
    pub alumni_id: String,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub details: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub students: usize,
    pub alumni: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the compare endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub student_id: String,
    pub first: ExplainResponse,
    pub second: ExplainResponse,
    pub verdict: Verdict,
    pub summary: String,
}

/// Response for the batch analysis endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub strategy: String,
    pub top_n: usize,
    pub students: Vec<StudentRecommendations>,
}
