//! Common types used across the platform

use serde::{Deserialize, Serialize};

use crate::validation::INVALID_INPUT_MESSAGE;

/// A single field-level validation violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result envelope returned by every flow endpoint.
///
/// Mirrors the `{success} | {failure}` contract the browser forms consume.
/// Failures carry a human-readable message plus optional per-field details
/// so the form can annotate each offending input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlowOutcome<T> {
    Success {
        success: T,
    },
    Failure {
        failure: String,
        #[serde(
            rename = "fieldErrors",
            default,
            skip_serializing_if = "Vec::is_empty"
        )]
        field_errors: Vec<FieldViolation>,
    },
}

impl<T> FlowOutcome<T> {
    pub fn success(value: T) -> Self {
        Self::Success { success: value }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            failure: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Failure envelope for a rejected submission, annotated per field.
    pub fn invalid(violations: Vec<FieldViolation>) -> Self {
        Self::Failure {
            failure: INVALID_INPUT_MESSAGE.to_string(),
            field_errors: violations,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
