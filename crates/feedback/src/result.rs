//! Success/failure envelope returned by every service operation.
//!
//! Expected outcomes (bad input, unknown id) and storage faults are all
//! represented as a [`Failure`] value; nothing is raised past the service.

use serde::Serialize;
use thiserror::Error;

use feedback_core::DomainError;

pub type ServiceResult<T> = Result<T, Failure>;

pub const FEEDBACK_NOT_FOUND: &str = "Feedback not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Caller-supplied data violates an invariant.
    Validation,
    /// No live record with the requested id.
    NotFound,
    /// The repository raised an unexpected fault.
    Persistence,
}

/// Failed service outcome: a human-readable message plus the ordered list of
/// individual error strings it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub errors: Vec<String>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            errors: vec![message.clone()],
            message,
        }
    }

    /// Build a failure from several messages; `message` joins them with `", "`.
    pub fn from_errors(kind: FailureKind, errors: Vec<String>) -> Self {
        Self {
            kind,
            message: errors.join(", "),
            errors,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn not_found() -> Self {
        Self::new(FailureKind::NotFound, FEEDBACK_NOT_FOUND)
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Persistence, message)
    }
}

impl From<DomainError> for Failure {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => Failure::not_found(),
            DomainError::Validation(msg) => Failure::validation(msg),
            other @ DomainError::InvalidId(_) => Failure::validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_message_is_also_the_only_error() {
        let f = Failure::validation("Customer name is required");
        assert_eq!(f.kind, FailureKind::Validation);
        assert_eq!(f.message, "Customer name is required");
        assert_eq!(f.errors, vec!["Customer name is required".to_string()]);
    }

    #[test]
    fn multiple_errors_are_joined_in_order() {
        let f = Failure::from_errors(
            FailureKind::Validation,
            vec!["first".to_string(), "second".to_string()],
        );
        assert_eq!(f.message, "first, second");
        assert_eq!(f.errors.len(), 2);
        assert_eq!(f.to_string(), "first, second");
    }

    #[test]
    fn domain_not_found_maps_to_feedback_not_found() {
        let f = Failure::from(DomainError::NotFound);
        assert_eq!(f.kind, FailureKind::NotFound);
        assert_eq!(f.message, FEEDBACK_NOT_FOUND);
    }
}
