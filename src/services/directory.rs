use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::error::MatchError;
use crate::models::{Alumni, Student};

/// Errors that can occur while loading profile data
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported data file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// On-disk layout of a dataset
#[derive(Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub alumni: Vec<Alumni>,
}

/// Read-only set of known students and alumni.
///
/// Records keep their input order, which is the candidate order the ranker
/// uses to break ties.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    students: Vec<Student>,
    alumni: Vec<Alumni>,
    student_index: HashMap<String, usize>,
    alumni_index: HashMap<String, usize>,
}

impl ProfileDirectory {
    pub fn new(students: Vec<Student>, alumni: Vec<Alumni>) -> Result<Self, DirectoryError> {
        let student_index = index_ids("student", students.iter().map(|s| s.id.as_str()))?;
        let alumni_index = index_ids("alumni", alumni.iter().map(|a| a.id.as_str()))?;

        Ok(Self {
            students,
            alumni,
            student_index,
            alumni_index,
        })
    }

    /// Load a dataset from a `.json` or `.toml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let dataset: Dataset = match extension.as_str() {
            "json" => serde_json::from_str(&raw)?,
            "toml" => toml::from_str(&raw)?,
            other => return Err(DirectoryError::UnsupportedFormat(other.to_string())),
        };

        Self::new(dataset.students, dataset.alumni)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn alumni(&self) -> &[Alumni] {
        &self.alumni
    }

    pub fn student(&self, id: &str) -> Result<&Student, MatchError> {
        self.student_index
            .get(id)
            .map(|&i| &self.students[i])
            .ok_or_else(|| MatchError::student_not_found(id))
    }

    pub fn alumni_by_id(&self, id: &str) -> Result<&Alumni, MatchError> {
        self.alumni_index
            .get(id)
            .map(|&i| &self.alumni[i])
            .ok_or_else(|| MatchError::alumni_not_found(id))
    }

    pub fn contains_student(&self, id: &str) -> bool {
        self.student_index.contains_key(id)
    }
}

fn index_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>, DirectoryError> {
    let mut index = HashMap::new();
    let mut seen = HashSet::new();

    for (position, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(DirectoryError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
        index.insert(id.to_string(), position);
    }

    Ok(index)
}

/// Load an embeddings file: a JSON object mapping entity id to vector
pub fn load_embeddings<P: AsRef<Path>>(path: P) -> Result<HashMap<String, Vec<f32>>, DirectoryError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
