use std::fmt;
use thiserror::Error;

/// Which kind of record a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Alumni,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Student => write!(f, "student"),
            EntityKind::Alumni => write!(f, "alumni"),
        }
    }
}

/// Errors surfaced by the scoring and ranking engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MatchError {
    pub fn student_not_found(id: &str) -> Self {
        MatchError::NotFound {
            kind: EntityKind::Student,
            id: id.to_string(),
        }
    }

    pub fn alumni_not_found(id: &str) -> Self {
        MatchError::NotFound {
            kind: EntityKind::Alumni,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = MatchError::student_not_found("S042");
        assert_eq!(err.to_string(), "student not found: S042");
    }
}
