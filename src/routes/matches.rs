use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, MatchExplanation, Matcher, RankResult};
use crate::models::{
    AnalysisQuery, AnalysisResponse, CompareRequest, CompareResponse, ErrorResponse, ExplainRequest,
    ExplainResponse, HealthResponse, ProfileRecommendRequest, RecommendRequest, RecommendResponse,
};
use crate::services::ProfileDirectory;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<ProfileDirectory>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/profile", web::post().to(recommend_profile))
        .route("/explain", web::post().to(explain_match))
        .route("/compare", web::post().to(compare_alumni))
        .route("/analysis", web::get().to(analysis))
        .route("/students", web::get().to(list_students))
        .route("/students/{id}", web::get().to(get_student))
        .route("/alumni", web::get().to(list_alumni))
        .route("/alumni/{id}", web::get().to(get_alumni));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        students: state.directory.students().len(),
        alumni: state.directory.alumni().len(),
        timestamp: chrono::Utc::now(),
    })
}

fn error_response(err: &MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound { .. } => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: err.to_string(),
            status_code: 404,
        }),
        MatchError::InvalidArgument(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid argument".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "topN": 5
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return validation_failed(errors);
    }

    let student_id = &req.student_id;
    let top_n = resolve_top_n(&state.matching, req.top_n);

    tracing::info!("Ranking alumni for student: {}, top_n: {}", student_id, top_n);

    match state
        .matcher
        .recommend(&state.directory, student_id, top_n, request_deadline(&state.matching))
    {
        Ok(result) => rank_response(&state, student_id, result),
        Err(e) => {
            tracing::warn!("Failed to rank alumni for {}: {}", student_id, e);
            error_response(&e)
        }
    }
}

/// Recommendations for a profile that is not in the dataset
///
/// POST /api/v1/recommendations/profile
///
/// Request body:
/// ```json
/// {
///   "profile": { "id": "guest", "name": "...", "university": "...", ... },
///   "topN": 5
/// }
/// ```
async fn recommend_profile(
    state: web::Data<AppState>,
    req: web::Json<ProfileRecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let profile = &req.profile;
    let top_n = resolve_top_n(&state.matching, req.top_n);

    tracing::info!("Ranking alumni for ad-hoc profile: {}, top_n: {}", profile.id, top_n);

    match state
        .matcher
        .recommend_profile(&state.directory, profile, top_n, request_deadline(&state.matching))
    {
        Ok(result) => rank_response(&state, &profile.id, result),
        Err(e) => {
            tracing::warn!("Failed to rank alumni for profile {}: {}", profile.id, e);
            error_response(&e)
        }
    }
}

/// Missing `topN` uses the configured default; larger values are capped
fn resolve_top_n(matching: &MatchingSettings, requested: Option<usize>) -> usize {
    requested
        .unwrap_or(matching.default_top_n)
        .min(matching.max_top_n)
}

fn request_deadline(matching: &MatchingSettings) -> Option<Instant> {
    matching
        .deadline_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms))
}

fn rank_response(state: &AppState, student_id: &str, result: RankResult) -> HttpResponse {
    tracing::info!(
        "Returning {} recommendations for student {} (from {} candidates{})",
        result.recommendations.len(),
        student_id,
        result.total_candidates,
        if result.partial { ", partial" } else { "" }
    );

    HttpResponse::Ok().json(RecommendResponse {
        student_id: student_id.to_string(),
        strategy: state.matcher.strategy_name().to_string(),
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
        partial: result.partial,
    })
}

fn explain_response(student_id: &str, alumni_id: &str, explanation: MatchExplanation) -> ExplainResponse {
    ExplainResponse {
        student_id: student_id.to_string(),
        alumni_id: alumni_id.to_string(),
        total_score: explanation.breakdown.total_score(),
        breakdown: explanation.breakdown,
        reasons: explanation.reasons,
        details: explanation.details,
    }
}

/// Explain a single pairing
///
/// POST /api/v1/explain
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "alumniId": "string"
/// }
/// ```
async fn explain_match(
    state: web::Data<AppState>,
    req: web::Json<ExplainRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.matcher.explain_match(&state.directory, &req.student_id, &req.alumni_id) {
        Ok(explanation) => {
            HttpResponse::Ok().json(explain_response(&req.student_id, &req.alumni_id, explanation))
        }
        Err(e) => {
            tracing::warn!(
                "Failed to explain {} -> {}: {}",
                req.student_id,
                req.alumni_id,
                e
            );
            error_response(&e)
        }
    }
}

/// Compare two alumni for one student
///
/// POST /api/v1/compare
///
/// Request body:
/// ```json
/// {
///   "studentId": "string",
///   "firstAlumniId": "string",
///   "secondAlumniId": "string"
/// }
/// ```
async fn compare_alumni(
    state: web::Data<AppState>,
    req: web::Json<CompareRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.matcher.compare(
        &state.directory,
        &req.student_id,
        &req.first_alumni_id,
        &req.second_alumni_id,
    ) {
        Ok(comparison) => {
            let summary = comparison.summary();
            HttpResponse::Ok().json(CompareResponse {
                student_id: req.student_id.clone(),
                first: explain_response(&req.student_id, &comparison.first.id, comparison.first_explanation),
                second: explain_response(&req.student_id, &comparison.second.id, comparison.second_explanation),
                verdict: comparison.verdict,
                summary,
            })
        }
        Err(e) => {
            tracing::warn!(
                "Failed to compare {} vs {} for {}: {}",
                req.first_alumni_id,
                req.second_alumni_id,
                req.student_id,
                e
            );
            error_response(&e)
        }
    }
}

/// Top recommendations for every known student
///
/// GET /api/v1/analysis?topN=5
async fn analysis(
    state: web::Data<AppState>,
    query: web::Query<AnalysisQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let top_n = resolve_top_n(&state.matching, query.top_n);

    match state.matcher.recommend_all(&state.directory, top_n) {
        Ok(students) => {
            tracing::info!("Analysed {} students, top_n: {}", students.len(), top_n);
            HttpResponse::Ok().json(AnalysisResponse {
                strategy: state.matcher.strategy_name().to_string(),
                top_n,
                students,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/students
async fn list_students(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.directory.students())
}

/// GET /api/v1/alumni
async fn list_alumni(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.directory.alumni())
}

/// GET /api/v1/students/{id}
async fn get_student(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.directory.student(&path) {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => error_response(&e),
    }
}

/// GET /api/v1/alumni/{id}
async fn get_alumni(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.directory.alumni_by_id(&path) {
        Ok(alumni) => HttpResponse::Ok().json(alumni),
        Err(e) => error_response(&e),
    }
}
