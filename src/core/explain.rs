use crate::models::{Alumni, ScoreBreakdown, Student};

/// Returned when no other reason applies
pub const FALLBACK_REASON: &str =
    "General profile compatibility based on overall career goals and background";

const MAX_SKILLS: usize = 3;
const MAX_INTERESTS: usize = 3;
const MAX_AREAS: usize = 2;

/// Human-readable reasons behind a pairing.
///
/// Categories are emitted in a fixed order (skills, industry, interests,
/// university, mentoring) and only when they matched. When nothing matched the
/// result is exactly one fallback reason.
///
/// Reasons come from the breakdown and the alumni record only; the student is
/// accepted so callers pass the full pair.
pub fn explain(_student: &Student, alumni: &Alumni, breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut reasons = Vec::new();

    if !breakdown.common_skills().is_empty() {
        reasons.push(format!(
            "Shared skills: {}",
            summarize(breakdown.common_skills(), MAX_SKILLS)
        ));
    }

    if breakdown.industry_match() {
        reasons.push(format!("Works in your preferred industry: {}", alumni.industry));
    }

    if !breakdown.common_interests().is_empty() {
        reasons.push(format!(
            "Common interests: {}",
            summarize(breakdown.common_interests(), MAX_INTERESTS)
        ));
    }

    if breakdown.university_match() {
        reasons.push(format!("Alumni from {}", alumni.university));
    }

    if !breakdown.matching_areas().is_empty() {
        reasons.push(format!(
            "Can help with: {}",
            summarize(breakdown.matching_areas(), MAX_AREAS)
        ));
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons
}

/// One line per non-zero score component, in evaluation order
pub fn describe_breakdown(breakdown: &ScoreBreakdown) -> Vec<String> {
    breakdown
        .components()
        .iter()
        .filter(|c| c.value > 0.0)
        .map(|c| format!("{}: {}", c.name, format_value(c.value)))
        .collect()
}

/// Join up to `limit` items, noting how many were left out
fn summarize(items: &[String], limit: usize) -> String {
    let shown = items[..items.len().min(limit)].join(", ");
    match items.len().saturating_sub(limit) {
        0 => shown,
        rest => format!("{} and {} more", shown, rest),
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, MatchSignals};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn create_pair() -> (Student, Alumni) {
        let student = Student {
            id: "S001".to_string(),
            name: "Student".to_string(),
            email: None,
            university: "North University".to_string(),
            degree: "Physics".to_string(),
            preferred_industry: "Energy".to_string(),
            skills: vec![],
            interests: vec![],
            looking_for: vec![],
            career_goals: String::new(),
            projects: String::new(),
            gpa: None,
            company: None,
            expected_graduation: None,
        };
        let alumni = Alumni {
            id: "A001".to_string(),
            name: "Alumni".to_string(),
            email: None,
            university: "North University".to_string(),
            degree: "Physics".to_string(),
            industry: "Renewable Energy".to_string(),
            company: "Sunworks".to_string(),
            current_position: "Engineer".to_string(),
            location: None,
            years_experience: 8,
            availability: Availability::Available,
            skills: vec![],
            interests: vec![],
            mentoring_areas: vec![],
            bio: String::new(),
        };
        (student, alumni)
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let (student, alumni) = create_pair();
        let breakdown = ScoreBreakdown::new("test", [("x", 0.2)], MatchSignals::default());

        assert_eq!(explain(&student, &alumni, &breakdown), vec![FALLBACK_REASON]);
    }

    #[test]
    fn test_reason_order() {
        let (student, alumni) = create_pair();
        let breakdown = ScoreBreakdown::new(
            "test",
            [("none", 0.0)],
            MatchSignals {
                common_skills: strings(&["python"]),
                common_interests: strings(&["solar"]),
                matching_areas: strings(&["Career guidance"]),
                industry_match: true,
                university_match: true,
            },
        );

        assert_eq!(
            explain(&student, &alumni, &breakdown),
            vec![
                "Shared skills: python",
                "Works in your preferred industry: Renewable Energy",
                "Common interests: solar",
                "Alumni from North University",
                "Can help with: Career guidance",
            ]
        );
    }

    #[test]
    fn test_lists_are_truncated_consistently() {
        let (student, alumni) = create_pair();
        let breakdown = ScoreBreakdown::new(
            "test",
            [("none", 0.0)],
            MatchSignals {
                common_skills: strings(&["a", "b", "c", "d", "e"]),
                common_interests: strings(&["f", "g", "h", "i"]),
                matching_areas: strings(&["j", "k", "l"]),
                ..MatchSignals::default()
            },
        );

        assert_eq!(
            explain(&student, &alumni, &breakdown),
            vec![
                "Shared skills: a, b, c and 2 more",
                "Common interests: f, g, h and 1 more",
                "Can help with: j, k and 1 more",
            ]
        );
    }

    #[test]
    fn test_describe_breakdown_skips_zero_terms() {
        let breakdown = ScoreBreakdown::new(
            "test",
            [("university", 200.0), ("industry", 0.0), ("skill_match", 0.1)],
            MatchSignals::default(),
        );

        assert_eq!(
            describe_breakdown(&breakdown),
            vec!["university: 200", "skill_match: 0.1000"]
        );
    }
}
