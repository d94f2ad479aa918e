//! Validation for CropCast form submissions
//!
//! Submissions arrive as raw JSON from the browser forms and are checked
//! against a declared field specification before anything is sent to the
//! model. All violations are collected rather than stopping at the first,
//! so a form can annotate every offending input at once.

use serde_json::Value;
use thiserror::Error;

use crate::models::{
    CropType, RecommendationRequest, ReportSummaryRequest, YieldPredictionRequest,
};
use crate::types::FieldViolation;

/// User-facing message attached to every rejected submission.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input provided. Please check the form fields.";

// ============================================================================
// Field Specifications
// ============================================================================

/// Constraint kinds a field can declare.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A number, optionally bounded on either side (bounds inclusive).
    Number { min: Option<f64>, max: Option<f64> },
    /// Free text that must be non-blank after trimming.
    Text,
    /// One of a fixed set of names, matched exactly.
    Enum { allowed: &'static [&'static str] },
}

/// Declared constraints for a single field of a submission.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn number(name: &'static str, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            name,
            required: true,
            kind: FieldKind::Number { min, max },
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: FieldKind::Text,
        }
    }

    pub const fn enumeration(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self {
            name,
            required: true,
            kind: FieldKind::Enum { allowed },
        }
    }
}

/// Field specification for the recommendation form.
///
/// Nitrogen is capped by the form slider at 200 ppm but the platform only
/// rejects negatives; rainfall likewise. Temperature is unbounded because
/// both frost and extreme-heat profiles are legitimate input.
pub const RECOMMENDATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("location"),
    FieldSpec::enumeration("cropType", CropType::NAMES),
    FieldSpec::number("soilPh", Some(0.0), Some(14.0)),
    FieldSpec::number("nitrogenLevels", Some(0.0), None),
    FieldSpec::number("rainfall", Some(0.0), None),
    FieldSpec::number("temperature", None, None),
    FieldSpec::number("humidity", Some(0.0), Some(100.0)),
    FieldSpec::text("historicalYieldTrends"),
];

/// Field specification for the yield-prediction upload.
pub const YIELD_PREDICTION_FIELDS: &[FieldSpec] = &[FieldSpec::text("agriculturalData")];

/// Field specification for the report summarizer.
pub const REPORT_SUMMARY_FIELDS: &[FieldSpec] = &[FieldSpec::text("reportText")];

// ============================================================================
// Validation Engine
// ============================================================================

/// A rejected submission, carrying every offending field.
#[derive(Debug, Clone, Error)]
#[error("validation failed for {} field(s)", .violations.len())]
pub struct ValidationRejection {
    pub violations: Vec<FieldViolation>,
}

impl ValidationRejection {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

/// Check a raw JSON submission against a field specification.
///
/// Pure function over its inputs; collects every violation instead of
/// returning at the first one.
pub fn validate_object(value: &Value, fields: &[FieldSpec]) -> Result<(), ValidationRejection> {
    let Some(object) = value.as_object() else {
        return Err(ValidationRejection::new(vec![FieldViolation::new(
            "$",
            "Expected a JSON object",
        )]));
    };

    let mut violations = Vec::new();
    for spec in fields {
        match object.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    violations.push(FieldViolation::new(spec.name, "This field is required"));
                }
            }
            Some(present) => check_field(spec, present, &mut violations),
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationRejection::new(violations))
    }
}

fn check_field(spec: &FieldSpec, value: &Value, violations: &mut Vec<FieldViolation>) {
    match spec.kind {
        FieldKind::Number { min, max } => match value.as_f64() {
            Some(number) => {
                if let Some(min) = min {
                    if number < min {
                        violations.push(FieldViolation::new(
                            spec.name,
                            format!("Must be at least {min}"),
                        ));
                    }
                }
                if let Some(max) = max {
                    if number > max {
                        violations.push(FieldViolation::new(
                            spec.name,
                            format!("Must be at most {max}"),
                        ));
                    }
                }
            }
            None => violations.push(FieldViolation::new(spec.name, "Must be a number")),
        },
        FieldKind::Text => match value.as_str() {
            Some(text) if text.trim().is_empty() => {
                violations.push(FieldViolation::new(spec.name, "Must not be empty"));
            }
            Some(_) => {}
            None => violations.push(FieldViolation::new(spec.name, "Must be a string")),
        },
        FieldKind::Enum { allowed } => match value.as_str() {
            Some(name) if allowed.contains(&name) => {}
            Some(_) => violations.push(FieldViolation::new(
                spec.name,
                format!("Must be one of: {}", allowed.join(", ")),
            )),
            None => violations.push(FieldViolation::new(spec.name, "Must be a string")),
        },
    }
}

// ============================================================================
// Typed Request Parsers
// ============================================================================

/// Validate a raw recommendation submission and build the typed request.
pub fn parse_recommendation_request(
    value: &Value,
) -> Result<RecommendationRequest, ValidationRejection> {
    validate_object(value, RECOMMENDATION_FIELDS)?;
    serde_json::from_value(value.clone()).map_err(malformed)
}

/// Validate a raw yield-prediction submission and build the typed request.
pub fn parse_yield_prediction_request(
    value: &Value,
) -> Result<YieldPredictionRequest, ValidationRejection> {
    validate_object(value, YIELD_PREDICTION_FIELDS)?;
    serde_json::from_value(value.clone()).map_err(malformed)
}

/// Validate a raw report submission and build the typed request.
pub fn parse_report_summary_request(
    value: &Value,
) -> Result<ReportSummaryRequest, ValidationRejection> {
    validate_object(value, REPORT_SUMMARY_FIELDS)?;
    serde_json::from_value(value.clone()).map_err(malformed)
}

fn malformed(error: serde_json::Error) -> ValidationRejection {
    ValidationRejection::new(vec![FieldViolation::new(
        "$",
        format!("Malformed request: {error}"),
    )])
}
