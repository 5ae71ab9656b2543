use std::sync::Arc;

use serde::Deserialize;

use crate::core::error::MatchError;
use crate::core::features::FeatureProvider;
use crate::core::similarity::{contains_folded, cosine_similarity, eq_folded, folded_set, jaccard, overlap};
use crate::models::{Alumni, FractionWeights, MatchSignals, PointWeights, ScoreBreakdown, Student};

/// Scores one student against one alumni record.
///
/// Implementations read immutable inputs only, so a single strategy can be
/// shared across threads and called concurrently for different candidates.
pub trait ScoringStrategy: Send + Sync {
    /// Short identifier used in breakdowns, logs and responses
    fn name(&self) -> &'static str;

    fn score(&self, student: &Student, alumni: &Alumni) -> ScoreBreakdown;
}

/// Which strategy the service runs, selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    #[default]
    WeightedFraction,
    HierarchicalPoints,
}

/// Build the configured strategy with an injected feature provider
pub fn build_strategy(
    policy: ScoringPolicy,
    fraction: FractionWeights,
    points: PointWeights,
    features: Arc<dyn FeatureProvider>,
) -> Result<Arc<dyn ScoringStrategy>, MatchError> {
    let strategy: Arc<dyn ScoringStrategy> = match policy {
        ScoringPolicy::WeightedFraction => Arc::new(WeightedFraction::new(fraction, features)?),
        ScoringPolicy::HierarchicalPoints => Arc::new(HierarchicalPoints::new(points, features)),
    };
    Ok(strategy)
}

fn skills_of<'a>(features: &'a dyn FeatureProvider, id: &str, own: &'a [String]) -> &'a [String] {
    features.skills(id).unwrap_or(own)
}

fn interests_of<'a>(features: &'a dyn FeatureProvider, id: &str, own: &'a [String]) -> &'a [String] {
    features.interests(id).unwrap_or(own)
}

/// Percentage-style policy: four weighted terms whose total stays in [0, 1].
///
/// ```text
/// semantic_similarity = clamp(cosine, 0, 1) * semantic   (or semantic_fallback)
/// skill_match         = jaccard(skills) * skills
/// industry_interest   = industry (if preferred industry is a substring)
///                       + interests * |common interests| / max(|student interests|, 1)
/// education_match     = university (same university) + degree (degree substring)
/// ```
pub struct WeightedFraction {
    weights: FractionWeights,
    features: Arc<dyn FeatureProvider>,
}

impl WeightedFraction {
    pub const NAME: &'static str = "weighted_fraction";

    /// Rejects negative or non-finite weights, and weights whose maximum
    /// possible total exceeds 1.0.
    pub fn new(weights: FractionWeights, features: Arc<dyn FeatureProvider>) -> Result<Self, MatchError> {
        let named = [
            ("semantic", weights.semantic),
            ("semantic_fallback", weights.semantic_fallback),
            ("skills", weights.skills),
            ("industry", weights.industry),
            ("interests", weights.interests),
            ("university", weights.university),
            ("degree", weights.degree),
        ];

        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::InvalidArgument(format!(
                    "weight '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let max_total = weights.semantic.max(weights.semantic_fallback)
            + weights.skills
            + weights.industry
            + weights.interests
            + weights.university
            + weights.degree;

        if max_total > 1.0 + 1e-9 {
            return Err(MatchError::InvalidArgument(format!(
                "fraction weights can sum to {:.3}, must not exceed 1.0",
                max_total
            )));
        }

        Ok(Self { weights, features })
    }

    /// Default weights are known to be valid, so this cannot fail
    pub fn with_default_weights(features: Arc<dyn FeatureProvider>) -> Self {
        Self {
            weights: FractionWeights::default(),
            features,
        }
    }

    fn semantic_term(&self, student: &Student, alumni: &Alumni) -> f64 {
        let similarity = match (
            self.features.embedding(&student.id),
            self.features.embedding(&alumni.id),
        ) {
            (Some(a), Some(b)) => cosine_similarity(a, b),
            _ => None,
        };

        match similarity {
            Some(cosine) => cosine.clamp(0.0, 1.0) * self.weights.semantic,
            None => self.weights.semantic_fallback,
        }
    }
}

impl ScoringStrategy for WeightedFraction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn score(&self, student: &Student, alumni: &Alumni) -> ScoreBreakdown {
        let features = self.features.as_ref();
        let student_skills = skills_of(features, &student.id, &student.skills);
        let alumni_skills = skills_of(features, &alumni.id, &alumni.skills);
        let student_interests = interests_of(features, &student.id, &student.interests);
        let alumni_interests = interests_of(features, &alumni.id, &alumni.interests);

        let semantic = self.semantic_term(student, alumni);

        let skill_match = jaccard(student_skills, alumni_skills) * self.weights.skills;

        let industry_match = contains_folded(&alumni.industry, &student.preferred_industry);
        let common_interests = overlap(student_interests, alumni_interests);
        let interest_ratio =
            common_interests.len() as f64 / folded_set(student_interests).len().max(1) as f64;
        let industry_interest = if industry_match { self.weights.industry } else { 0.0 }
            + interest_ratio.min(1.0) * self.weights.interests;

        let university_match = eq_folded(&student.university, &alumni.university);
        let degree_match = contains_folded(&alumni.degree, &student.degree);
        let education = if university_match { self.weights.university } else { 0.0 }
            + if degree_match { self.weights.degree } else { 0.0 };

        ScoreBreakdown::new(
            Self::NAME,
            [
                ("semantic_similarity", semantic),
                ("skill_match", skill_match),
                ("industry_interest", industry_interest),
                ("education_match", education),
            ],
            MatchSignals {
                common_skills: overlap(student_skills, alumni_skills),
                common_interests,
                matching_areas: overlap(&student.looking_for, &alumni.mentoring_areas),
                industry_match,
                university_match,
            },
        )
    }
}

/// Additive point policy, grouped by how direct a connection is:
///
/// - level 0, exact attribute matches: university, industry, degree
/// - level 1, per shared skill and per shared interest
/// - level 2, per need the mentor offers help with
/// - extras: same company, mentor available
pub struct HierarchicalPoints {
    weights: PointWeights,
    features: Arc<dyn FeatureProvider>,
}

impl HierarchicalPoints {
    pub const NAME: &'static str = "hierarchical_points";

    pub fn new(weights: PointWeights, features: Arc<dyn FeatureProvider>) -> Self {
        Self { weights, features }
    }
}

impl ScoringStrategy for HierarchicalPoints {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn score(&self, student: &Student, alumni: &Alumni) -> ScoreBreakdown {
        let features = self.features.as_ref();
        let w = &self.weights;
        let points = |hit: bool, value: u32| if hit { value as f64 } else { 0.0 };

        // Level 0
        let university_match = eq_folded(&student.university, &alumni.university);
        let industry_match = eq_folded(&student.preferred_industry, &alumni.industry);
        let degree_match = eq_folded(&student.degree, &alumni.degree);

        // Level 1
        let common_skills = overlap(
            skills_of(features, &student.id, &student.skills),
            skills_of(features, &alumni.id, &alumni.skills),
        );
        let common_interests = overlap(
            interests_of(features, &student.id, &student.interests),
            interests_of(features, &alumni.id, &alumni.interests),
        );

        // Level 2
        let matching_areas = overlap(&student.looking_for, &alumni.mentoring_areas);

        let company_match = student
            .company
            .as_deref()
            .is_some_and(|company| eq_folded(company, &alumni.company));

        ScoreBreakdown::new(
            Self::NAME,
            [
                ("university", points(university_match, w.university)),
                ("industry", points(industry_match, w.industry)),
                ("degree", points(degree_match, w.degree)),
                ("skills", (common_skills.len() as u64 * w.skill as u64) as f64),
                ("interests", (common_interests.len() as u64 * w.interest as u64) as f64),
                ("mentoring", (matching_areas.len() as u64 * w.mentoring as u64) as f64),
                ("company", points(company_match, w.company)),
                ("availability", points(alumni.availability.is_available(), w.availability)),
            ],
            MatchSignals {
                common_skills,
                common_interests,
                matching_areas,
                industry_match,
                university_match,
            },
        )
    }
}
