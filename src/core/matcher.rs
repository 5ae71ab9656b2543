use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::core::{
    error::MatchError,
    explain::{describe_breakdown, explain},
    features::NoFeatures,
    scoring::{ScoringStrategy, WeightedFraction},
};
use crate::models::{Alumni, Recommendation, ScoreBreakdown, Student};
use crate::services::ProfileDirectory;

/// Result of ranking one student against a candidate list
#[derive(Debug)]
pub struct RankResult {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
    /// Set when the deadline expired mid-scoring. Only the candidates scored
    /// before expiry were ranked.
    pub partial: bool,
}

/// Breakdown and reasons for one student/alumni pair
#[derive(Debug, Clone)]
pub struct MatchExplanation {
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub details: Vec<String>,
}

/// Which side of a comparison scored higher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    FirstBetter,
    SecondBetter,
    Equal,
}

/// Two alumni scored side by side for the same student
#[derive(Debug, Clone)]
pub struct AlumniComparison {
    pub first: Alumni,
    pub second: Alumni,
    pub first_explanation: MatchExplanation,
    pub second_explanation: MatchExplanation,
    pub verdict: Verdict,
}

impl AlumniComparison {
    /// One-line outcome, e.g. "Priya Raman is a better match (810 vs 190)"
    pub fn summary(&self) -> String {
        let a = self.first_explanation.breakdown.total_score();
        let b = self.second_explanation.breakdown.total_score();
        match self.verdict {
            Verdict::FirstBetter => format!("{} is a better match ({} vs {})", self.first.name, a, b),
            Verdict::SecondBetter => format!("{} is a better match ({} vs {})", self.second.name, b, a),
            Verdict::Equal => "Both alumni are equally matched".to_string(),
        }
    }
}

/// Top recommendations for one known student
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecommendations {
    pub student_id: String,
    pub student_name: String,
    pub recommendations: Vec<Recommendation>,
}

/// Ranking orchestrator: scores every candidate with the configured
/// strategy, orders them and keeps the best `top_n`.
///
/// # Pipeline Stages
/// 1. Resolve the student (unknown id is an error)
/// 2. Score each candidate independently
/// 3. Stable sort by total score, descending
/// 4. Truncate to `top_n`
#[derive(Clone)]
pub struct Matcher {
    strategy: Arc<dyn ScoringStrategy>,
}

impl Matcher {
    pub fn new(strategy: Arc<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    /// Weighted-fraction scoring with default weights and no feature provider
    pub fn with_default_weights() -> Self {
        Self::new(Arc::new(WeightedFraction::with_default_weights(Arc::new(NoFeatures))))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Rank `candidates` for a known student.
    ///
    /// Equal scores keep their candidate order. A `top_n` larger than the
    /// candidate list returns every candidate; an empty candidate list is a
    /// valid, empty result.
    pub fn rank(
        &self,
        directory: &ProfileDirectory,
        student_id: &str,
        candidates: &[Alumni],
        top_n: usize,
    ) -> Result<Vec<Recommendation>, MatchError> {
        self.rank_within(directory, student_id, candidates, top_n, None)
            .map(|result| result.recommendations)
    }

    /// Same as [`Matcher::rank`] with an optional deadline.
    ///
    /// The deadline is checked before each candidate is scored. Once it has
    /// passed, scoring stops; the candidates scored so far are still sorted
    /// and truncated to `top_n`, and the result is flagged as partial.
    pub fn rank_within(
        &self,
        directory: &ProfileDirectory,
        student_id: &str,
        candidates: &[Alumni],
        top_n: usize,
        deadline: Option<Instant>,
    ) -> Result<RankResult, MatchError> {
        let student = directory.student(student_id)?;
        self.rank_student(student, candidates, top_n, deadline)
    }

    fn rank_student(
        &self,
        student: &Student,
        candidates: &[Alumni],
        top_n: usize,
        deadline: Option<Instant>,
    ) -> Result<RankResult, MatchError> {
        validate_top_n(top_n)?;

        let total_candidates = candidates.len();
        let mut scored: Vec<(usize, ScoreBreakdown)> = Vec::with_capacity(total_candidates);
        let mut partial = false;

        for (position, alumni) in candidates.iter().enumerate() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                partial = true;
                break;
            }
            scored.push((position, self.strategy.score(student, alumni)));
        }

        if partial {
            tracing::warn!(
                "Deadline reached for student {} after scoring {} of {} candidates",
                student.id,
                scored.len(),
                total_candidates
            );
        }

        // Stable: equal totals stay in candidate order
        scored.sort_by(|a, b| b.1.total_score().total_cmp(&a.1.total_score()));
        scored.truncate(top_n);

        let recommendations = scored
            .into_iter()
            .enumerate()
            .map(|(i, (position, breakdown))| Recommendation {
                rank: i + 1,
                alumni: candidates[position].clone(),
                breakdown,
                reasons: Vec::new(),
            })
            .collect();

        tracing::debug!(
            "Ranked {} candidates for student {} using {}",
            total_candidates,
            student.id,
            self.strategy.name()
        );

        Ok(RankResult {
            recommendations,
            total_candidates,
            partial,
        })
    }

    /// Rank every known alumni for a student and attach explanations
    pub fn recommend(
        &self,
        directory: &ProfileDirectory,
        student_id: &str,
        top_n: usize,
        deadline: Option<Instant>,
    ) -> Result<RankResult, MatchError> {
        let student = directory.student(student_id)?;
        self.recommend_student(student, directory.alumni(), top_n, deadline)
    }

    /// Rank every known alumni for a profile that is not in the directory.
    ///
    /// The profile's id must not belong to a known student, since feature
    /// lookups are keyed by id and would mix the two records.
    pub fn recommend_profile(
        &self,
        directory: &ProfileDirectory,
        profile: &Student,
        top_n: usize,
        deadline: Option<Instant>,
    ) -> Result<RankResult, MatchError> {
        if directory.contains_student(&profile.id) {
            return Err(MatchError::InvalidArgument(format!(
                "profile id '{}' belongs to a known student",
                profile.id
            )));
        }
        self.recommend_student(profile, directory.alumni(), top_n, deadline)
    }

    fn recommend_student(
        &self,
        student: &Student,
        candidates: &[Alumni],
        top_n: usize,
        deadline: Option<Instant>,
    ) -> Result<RankResult, MatchError> {
        let mut result = self.rank_student(student, candidates, top_n, deadline)?;

        for rec in &mut result.recommendations {
            rec.reasons = explain(student, &rec.alumni, &rec.breakdown);
        }

        Ok(result)
    }

    /// Top `top_n` recommendations for every known student, in directory order
    pub fn recommend_all(
        &self,
        directory: &ProfileDirectory,
        top_n: usize,
    ) -> Result<Vec<StudentRecommendations>, MatchError> {
        validate_top_n(top_n)?;

        directory
            .students()
            .iter()
            .map(|student| {
                let result = self.recommend_student(student, directory.alumni(), top_n, None)?;
                Ok(StudentRecommendations {
                    student_id: student.id.clone(),
                    student_name: student.name.clone(),
                    recommendations: result.recommendations,
                })
            })
            .collect()
    }

    /// Score and explain a single pairing
    pub fn explain_match(
        &self,
        directory: &ProfileDirectory,
        student_id: &str,
        alumni_id: &str,
    ) -> Result<MatchExplanation, MatchError> {
        let student = directory.student(student_id)?;
        let alumni = directory.alumni_by_id(alumni_id)?;

        Ok(self.explain_pair(student, alumni))
    }

    /// Score two alumni for the same student and say which fits better
    pub fn compare(
        &self,
        directory: &ProfileDirectory,
        student_id: &str,
        first_id: &str,
        second_id: &str,
    ) -> Result<AlumniComparison, MatchError> {
        let student = directory.student(student_id)?;
        let first = directory.alumni_by_id(first_id)?;
        let second = directory.alumni_by_id(second_id)?;

        let first_explanation = self.explain_pair(student, first);
        let second_explanation = self.explain_pair(student, second);

        let verdict = match first_explanation
            .breakdown
            .total_score()
            .total_cmp(&second_explanation.breakdown.total_score())
        {
            Ordering::Greater => Verdict::FirstBetter,
            Ordering::Less => Verdict::SecondBetter,
            Ordering::Equal => Verdict::Equal,
        };

        Ok(AlumniComparison {
            first: first.clone(),
            second: second.clone(),
            first_explanation,
            second_explanation,
            verdict,
        })
    }

    fn explain_pair(&self, student: &Student, alumni: &Alumni) -> MatchExplanation {
        let breakdown = self.strategy.score(student, alumni);
        let reasons = explain(student, alumni, &breakdown);
        let details = describe_breakdown(&breakdown);

        MatchExplanation {
            breakdown,
            reasons,
            details,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

fn validate_top_n(top_n: usize) -> Result<(), MatchError> {
    if top_n < 1 {
        return Err(MatchError::InvalidArgument(
            "top_n must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::HierarchicalPoints;
    use crate::core::explain::FALLBACK_REASON;
    use crate::models::{Availability, MatchSignals, PointWeights};
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::time::Duration;

    fn create_student(id: &str) -> Student {
        Student {
            id: id.to_string(),
            name: format!("Student {}", id),
            email: None,
            university: "State University".to_string(),
            degree: "Computer Science".to_string(),
            preferred_industry: "Technology".to_string(),
            skills: vec!["python".to_string(), "java".to_string()],
            interests: vec!["ai".to_string()],
            looking_for: vec!["Career guidance".to_string()],
            career_goals: String::new(),
            projects: String::new(),
            gpa: None,
            company: None,
            expected_graduation: None,
        }
    }

    fn create_candidate(id: &str, university: &str, skills: &[&str], available: bool) -> Alumni {
        Alumni {
            id: id.to_string(),
            name: format!("Alumni {}", id),
            email: None,
            university: university.to_string(),
            degree: "History".to_string(),
            industry: "Retail".to_string(),
            company: "Shop".to_string(),
            current_position: "Manager".to_string(),
            location: None,
            years_experience: 10,
            availability: if available { Availability::Available } else { Availability::Unavailable },
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: vec![],
            mentoring_areas: vec![],
            bio: String::new(),
        }
    }

    fn points_matcher() -> Matcher {
        Matcher::new(Arc::new(HierarchicalPoints::new(
            PointWeights::default(),
            Arc::new(NoFeatures),
        )))
    }

    fn directory(alumni: Vec<Alumni>) -> ProfileDirectory {
        ProfileDirectory::new(vec![create_student("S001")], alumni).unwrap()
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let dir = directory(vec![
            create_candidate("A1", "Elsewhere", &[], false),
            create_candidate("A2", "State University", &["python"], true),
            create_candidate("A3", "Elsewhere", &["python"], false),
        ]);

        let recs = points_matcher().rank(&dir, "S001", dir.alumni(), 10).unwrap();

        let ids: Vec<&str> = recs.iter().map(|r| r.alumni.id.as_str()).collect();
        assert_eq!(ids, vec!["A2", "A3", "A1"]);
        assert_eq!(recs[0].total_score(), 200.0 + 90.0 + 50.0);
        assert_eq!(recs.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let dir = directory(vec![
            create_candidate("first", "Elsewhere", &["python"], false),
            create_candidate("second", "Elsewhere", &["java"], false),
        ]);

        let recs = points_matcher().rank(&dir, "S001", dir.alumni(), 2).unwrap();

        assert_eq!(recs[0].total_score(), recs[1].total_score());
        assert_eq!(recs[0].alumni.id, "first");
        assert_eq!(recs[1].alumni.id, "second");
    }

    #[test]
    fn test_respects_top_n() {
        let alumni: Vec<Alumni> = (0..20)
            .map(|i| create_candidate(&format!("A{}", i), "Elsewhere", &[], i % 2 == 0))
            .collect();
        let dir = directory(alumni);

        let recs = points_matcher().rank(&dir, "S001", dir.alumni(), 5).unwrap();
        assert_eq!(recs.len(), 5);

        let all = points_matcher().rank(&dir, "S001", dir.alumni(), 100).unwrap();
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn test_unknown_student_is_not_found() {
        let dir = directory(vec![]);

        let err = points_matcher().rank(&dir, "nobody", &[], 0).unwrap_err();
        assert_eq!(err, MatchError::student_not_found("nobody"));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let dir = directory(vec![create_candidate("A1", "Elsewhere", &[], true)]);

        let err = points_matcher().rank(&dir, "S001", dir.alumni(), 0).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_candidates_is_valid() {
        let dir = directory(vec![]);

        let recs = points_matcher().rank(&dir, "S001", &[], 3).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_expired_deadline_returns_partial() {
        let dir = directory(vec![
            create_candidate("A1", "Elsewhere", &[], false),
            create_candidate("A2", "State University", &[], true),
        ]);
        let deadline = Instant::now() - Duration::from_millis(1);

        let result = points_matcher()
            .rank_within(&dir, "S001", dir.alumni(), 2, Some(deadline))
            .unwrap();

        assert!(result.partial);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.total_candidates, 2);
    }

    /// Sleeps per candidate and scores by years of experience
    struct SlowStrategy {
        delay: Duration,
        calls: AtomicUsize,
    }

    impl ScoringStrategy for SlowStrategy {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn score(&self, _student: &Student, alumni: &Alumni) -> ScoreBreakdown {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            std::thread::sleep(self.delay);
            ScoreBreakdown::new(
                "slow",
                [("experience", alumni.years_experience as f64)],
                MatchSignals::default(),
            )
        }
    }

    #[test]
    fn test_partial_result_is_ranked_and_truncated() {
        let alumni: Vec<Alumni> = (0..10)
            .map(|i| {
                let mut a = create_candidate(&format!("A{}", i), "Elsewhere", &[], false);
                a.years_experience = i;
                a
            })
            .collect();
        let dir = directory(alumni);

        let slow = Arc::new(SlowStrategy {
            delay: Duration::from_millis(20),
            calls: AtomicUsize::new(0),
        });
        let matcher = Matcher::new(slow.clone());
        let deadline = Instant::now() + Duration::from_millis(50);

        let result = matcher
            .rank_within(&dir, "S001", dir.alumni(), 1, Some(deadline))
            .unwrap();

        let scored = slow.calls.load(AtomicOrdering::SeqCst);
        assert!(result.partial);
        assert!(scored >= 1 && scored < 10);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].rank, 1);
        // best of the scored prefix, not the first candidate
        assert_eq!(result.recommendations[0].total_score(), (scored - 1) as f64);
    }

    #[test]
    fn test_recommend_profile_ranks_unknown_student() {
        let dir = directory(vec![
            create_candidate("A1", "Elsewhere", &[], false),
            create_candidate("A2", "State University", &["python"], true),
        ]);
        let profile = create_student("guest");

        let result = points_matcher().recommend_profile(&dir, &profile, 1, None).unwrap();

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].alumni.id, "A2");
        assert_eq!(
            result.recommendations[0].reasons,
            vec!["Shared skills: python", "Alumni from State University"]
        );
    }

    #[test]
    fn test_recommend_profile_rejects_known_id() {
        let dir = directory(vec![create_candidate("A1", "Elsewhere", &[], false)]);

        let err = points_matcher()
            .recommend_profile(&dir, &create_student("S001"), 1, None)
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)));

        // rank keeps reporting unknown ids as not found
        let err = points_matcher().rank(&dir, "guest", dir.alumni(), 1).unwrap_err();
        assert_eq!(err, MatchError::student_not_found("guest"));
    }

    #[test]
    fn test_compare_verdicts() {
        let dir = directory(vec![
            create_candidate("A1", "Elsewhere", &[], false),
            create_candidate("A2", "State University", &["python"], true),
            create_candidate("A3", "Elsewhere", &[], false),
        ]);
        let matcher = points_matcher();

        let comparison = matcher.compare(&dir, "S001", "A1", "A2").unwrap();
        assert_eq!(comparison.verdict, Verdict::SecondBetter);
        assert_eq!(comparison.second_explanation.breakdown.total_score(), 340.0);
        assert_eq!(comparison.summary(), "Alumni A2 is a better match (340 vs 0)");

        let comparison = matcher.compare(&dir, "S001", "A2", "A1").unwrap();
        assert_eq!(comparison.verdict, Verdict::FirstBetter);

        let comparison = matcher.compare(&dir, "S001", "A1", "A3").unwrap();
        assert_eq!(comparison.verdict, Verdict::Equal);
        assert_eq!(comparison.summary(), "Both alumni are equally matched");
        assert_eq!(comparison.first_explanation.reasons, vec![FALLBACK_REASON]);

        let err = matcher.compare(&dir, "S001", "A1", "A404").unwrap_err();
        assert_eq!(err, MatchError::alumni_not_found("A404"));
    }

    #[test]
    fn test_recommend_all_covers_every_student() {
        let dir = ProfileDirectory::new(
            vec![create_student("S001"), create_student("S002")],
            vec![
                create_candidate("A1", "Elsewhere", &[], false),
                create_candidate("A2", "State University", &["python"], true),
            ],
        )
        .unwrap();

        let all = points_matcher().recommend_all(&dir, 1).unwrap();

        let ids: Vec<&str> = all.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(ids, vec!["S001", "S002"]);
        assert!(all.iter().all(|s| s.recommendations.len() == 1));
        assert_eq!(all[1].recommendations[0].alumni.id, "A2");
        assert!(!all[0].recommendations[0].reasons.is_empty());

        let err = points_matcher().recommend_all(&dir, 0).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument(_)));
    }

    #[test]
    fn test_recommend_attaches_reasons() {
        let dir = directory(vec![
            create_candidate("A1", "Elsewhere", &[], false),
            create_candidate("A2", "State University", &["Python"], true),
        ]);

        let result = points_matcher().recommend(&dir, "S001", 2, None).unwrap();

        assert!(!result.partial);
        assert_eq!(
            result.recommendations[0].reasons,
            vec!["Shared skills: python", "Alumni from State University"]
        );
        assert_eq!(result.recommendations[1].reasons, vec![FALLBACK_REASON]);
    }

    #[test]
    fn test_explain_match_unknown_alumni() {
        let dir = directory(vec![]);

        let err = points_matcher().explain_match(&dir, "S001", "A404").unwrap_err();
        assert_eq!(err, MatchError::alumni_not_found("A404"));
    }

    #[test]
    fn test_default_matcher_uses_weighted_fraction() {
        assert_eq!(Matcher::default().strategy_name(), "weighted_fraction");
    }
}
