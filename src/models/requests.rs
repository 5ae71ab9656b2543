use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Student;

/// Request to rank alumni for a student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: String,
    /// Falls back to `matching.default_top_n` when absent
    #[validate(range(min = 1))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}

/// Request to explain a single student/alumni pairing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExplainRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "alumni_id", rename = "alumniId")]
    pub alumni_id: String,
}

/// Request to rank alumni for a profile that is not in the dataset
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRecommendRequest {
    pub profile: Student,
    #[validate(range(min = 1))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}

/// Request to compare two alumni for one student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "first_alumni_id", rename = "firstAlumniId")]
    pub first_alumni_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "second_alumni_id", rename = "secondAlumniId")]
    pub second_alumni_id: String,
}

/// Query string of the batch analysis endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalysisQuery {
    #[validate(range(min = 1))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}
