//! Feature providers hand the scorer per-entity attribute lists and optional
//! dense vectors. Embedding models live outside this crate; a provider only
//! stores what they produced.

use std::collections::HashMap;

use crate::core::similarity::fold;
use crate::services::ProfileDirectory;

/// Source of per-entity features, keyed by entity id.
///
/// Returning `None` for skills or interests means the provider has nothing
/// for that entity and the scorer should use the record's own list. A missing
/// embedding puts the semantic term into its fallback mode.
pub trait FeatureProvider: Send + Sync {
    fn skills(&self, entity_id: &str) -> Option<&[String]>;
    fn interests(&self, entity_id: &str) -> Option<&[String]>;
    fn embedding(&self, entity_id: &str) -> Option<&[f32]>;
}

/// Provider with no features at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeatures;

impl FeatureProvider for NoFeatures {
    fn skills(&self, _entity_id: &str) -> Option<&[String]> {
        None
    }

    fn interests(&self, _entity_id: &str) -> Option<&[String]> {
        None
    }

    fn embedding(&self, _entity_id: &str) -> Option<&[f32]> {
        None
    }
}

#[derive(Debug, Clone, Default)]
struct EntityFeatures {
    skills: Option<Vec<String>>,
    interests: Option<Vec<String>>,
    embedding: Option<Vec<f32>>,
}

/// In-memory feature store, built once by the caller and shared read-only
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    entities: HashMap<String, EntityFeatures>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed skills and interests from every record in the directory.
    ///
    /// With `extract_skills` set, technical skills mentioned anywhere in a
    /// profile's text (goals, projects, bio) are appended to the declared
    /// skill lists.
    pub fn from_directory(directory: &ProfileDirectory, extract_skills: bool) -> Self {
        let mut store = Self::new();

        for student in directory.students() {
            let mut skills = student.skills.clone();
            if extract_skills {
                merge_skills(&mut skills, extract_skill_keywords(&student.profile_text()));
            }
            store.set_skills(&student.id, skills);
            store.set_interests(&student.id, student.interests.clone());
        }

        for alumni in directory.alumni() {
            let mut skills = alumni.skills.clone();
            if extract_skills {
                merge_skills(&mut skills, extract_skill_keywords(&alumni.profile_text()));
            }
            store.set_skills(&alumni.id, skills);
            store.set_interests(&alumni.id, alumni.interests.clone());
        }

        store
    }

    pub fn set_skills(&mut self, entity_id: &str, skills: Vec<String>) {
        self.entry(entity_id).skills = Some(skills);
    }

    pub fn set_interests(&mut self, entity_id: &str, interests: Vec<String>) {
        self.entry(entity_id).interests = Some(interests);
    }

    pub fn set_embedding(&mut self, entity_id: &str, embedding: Vec<f32>) {
        self.entry(entity_id).embedding = Some(embedding);
    }

    /// Attach a batch of embeddings, e.g. loaded from an embeddings file
    pub fn with_embeddings(mut self, embeddings: HashMap<String, Vec<f32>>) -> Self {
        for (id, vector) in embeddings {
            self.set_embedding(&id, vector);
        }
        self
    }

    pub fn embedding_count(&self) -> usize {
        self.entities
            .values()
            .filter(|e| e.embedding.is_some())
            .count()
    }

    fn entry(&mut self, entity_id: &str) -> &mut EntityFeatures {
        self.entities.entry(entity_id.to_string()).or_default()
    }
}

impl FeatureProvider for FeatureStore {
    fn skills(&self, entity_id: &str) -> Option<&[String]> {
        self.entities.get(entity_id)?.skills.as_deref()
    }

    fn interests(&self, entity_id: &str) -> Option<&[String]> {
        self.entities.get(entity_id)?.interests.as_deref()
    }

    fn embedding(&self, entity_id: &str) -> Option<&[f32]> {
        self.entities.get(entity_id)?.embedding.as_deref()
    }
}

/// Vocabulary for keyword skill extraction
const TECH_SKILLS: &[&str] = &[
    "python", "java", "javascript", "c++", "sql", "r", "scala",
    "machine learning", "deep learning", "data science", "ai",
    "cloud computing", "docker", "kubernetes", "aws", "azure",
    "react", "node.js", "angular", "vue.js", "tensorflow",
    "pytorch", "scikit-learn", "pandas", "numpy",
];

/// Technical skills mentioned in free text, in vocabulary order.
///
/// Matching is on whole tokens, so "r" only matches the standalone word.
pub fn extract_skill_keywords(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '.' | '-' | '#')))
        .map(|t| t.trim_matches(|c: char| c == '.' || c == '-').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let normalized = format!(" {} ", tokens.join(" "));

    TECH_SKILLS
        .iter()
        .filter(|skill| normalized.contains(&format!(" {} ", skill)))
        .map(|skill| skill.to_string())
        .collect()
}

fn merge_skills(skills: &mut Vec<String>, extracted: Vec<String>) {
    for skill in extracted {
        if !skills.iter().any(|s| fold(s) == skill) {
            skills.push(skill);
        }
    }
}
