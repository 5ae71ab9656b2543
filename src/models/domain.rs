use serde::{Deserialize, Serialize};

/// Whether an alumni mentor is currently taking mentees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    Available,
    #[default]
    Unavailable,
}

impl Availability {
    pub fn is_available(self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Student looking for a mentor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub university: String,
    pub degree: String,
    #[serde(default)]
    pub preferred_industry: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Mentorship needs, matched against `Alumni::mentoring_areas`
    #[serde(default)]
    pub looking_for: Vec<String>,
    #[serde(default)]
    pub career_goals: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub gpa: Option<f32>,
    /// Current or internship employer, if any
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub expected_graduation: Option<u16>,
}

impl Student {
    /// Flatten the profile into one text blob for embedding producers and
    /// keyword extraction.
    pub fn profile_text(&self) -> String {
        [
            format!("Degree: {}", self.degree),
            format!("University: {}", self.university),
            format!("Skills: {}", self.skills.join(", ")),
            format!("Interests: {}", self.interests.join(", ")),
            format!("Career Goals: {}", self.career_goals),
            format!("Looking For: {}", self.looking_for.join(", ")),
            format!("Industry: {}", self.preferred_industry),
            format!("Projects: {}", self.projects),
        ]
        .join(" ")
    }
}

/// Alumni mentor profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumni {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub university: String,
    pub degree: String,
    pub industry: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub current_position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Areas the mentor offers help with
    #[serde(default)]
    pub mentoring_areas: Vec<String>,
    #[serde(default)]
    pub bio: String,
}

impl Alumni {
    pub fn profile_text(&self) -> String {
        [
            format!("Position: {}", self.current_position),
            format!("Company: {}", self.company),
            format!("Industry: {}", self.industry),
            format!("Degree: {}", self.degree),
            format!("University: {}", self.university),
            format!("Skills: {}", self.skills.join(", ")),
            format!("Bio: {}", self.bio),
            format!("Interests: {}", self.interests.join(", ")),
            format!("Mentoring: {}", self.mentoring_areas.join(", ")),
        ]
        .join(" ")
    }
}

/// One named term of a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub name: &'static str,
    pub value: f64,
}

/// Overlaps and match flags a strategy observed while scoring a pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSignals {
    pub common_skills: Vec<String>,
    pub common_interests: Vec<String>,
    pub matching_areas: Vec<String>,
    pub industry_match: bool,
    pub university_match: bool,
}

/// Named decomposition of a pair's total score.
///
/// Fields are private: a breakdown is built once by a scoring strategy and
/// never changes afterwards. `total_score` is always the sum of `components`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    strategy: &'static str,
    components: Vec<ScoreComponent>,
    common_skills: Vec<String>,
    common_interests: Vec<String>,
    matching_areas: Vec<String>,
    industry_match: bool,
    university_match: bool,
    total_score: f64,
}

impl ScoreBreakdown {
    /// Build a breakdown. Negative or non-finite component values are
    /// stored as 0.0.
    pub fn new(
        strategy: &'static str,
        components: impl IntoIterator<Item = (&'static str, f64)>,
        signals: MatchSignals,
    ) -> Self {
        let components: Vec<ScoreComponent> = components
            .into_iter()
            .map(|(name, value)| ScoreComponent {
                name,
                value: if value.is_finite() { value.max(0.0) } else { 0.0 },
            })
            .collect();

        let total_score = components.iter().map(|c| c.value).sum();

        Self {
            strategy,
            components,
            common_skills: signals.common_skills,
            common_interests: signals.common_interests,
            matching_areas: signals.matching_areas,
            industry_match: signals.industry_match,
            university_match: signals.university_match,
            total_score,
        }
    }

    pub fn strategy(&self) -> &'static str {
        self.strategy
    }

    pub fn components(&self) -> &[ScoreComponent] {
        &self.components
    }

    /// Value of a named component, if the strategy emits it
    pub fn component(&self, name: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    pub fn common_skills(&self) -> &[String] {
        &self.common_skills
    }

    pub fn common_interests(&self) -> &[String] {
        &self.common_interests
    }

    pub fn matching_areas(&self) -> &[String] {
        &self.matching_areas
    }

    pub fn industry_match(&self) -> bool {
        self.industry_match
    }

    pub fn university_match(&self) -> bool {
        self.university_match
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }
}

/// Ranked alumni suggestion for one student
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub alumni: Alumni,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

impl Recommendation {
    pub fn total_score(&self) -> f64 {
        self.breakdown.total_score()
    }
}

/// Weights for the weighted-fraction policy.
///
/// Defaults add up to exactly 1.0 (taking the larger of the two semantic
/// values), which keeps totals inside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionWeights {
    pub semantic: f64,
    /// Used in place of the semantic term when no embedding pair exists
    pub semantic_fallback: f64,
    pub skills: f64,
    pub industry: f64,
    pub interests: f64,
    pub university: f64,
    pub degree: f64,
}

impl Default for FractionWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            semantic_fallback: 0.2,
            skills: 0.3,
            industry: 0.15,
            interests: 0.05,
            university: 0.08,
            degree: 0.02,
        }
    }
}

/// Point values for the hierarchical policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointWeights {
    pub university: u32,
    pub industry: u32,
    pub degree: u32,
    pub skill: u32,
    pub interest: u32,
    pub mentoring: u32,
    pub company: u32,
    pub availability: u32,
}

impl Default for PointWeights {
    fn default() -> Self {
        Self {
            university: 200,
            industry: 160,
            degree: 100,
            skill: 90,
            interest: 70,
            mentoring: 50,
            company: 50,
            availability: 50,
        }
    }
}
