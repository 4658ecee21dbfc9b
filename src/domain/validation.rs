//! Client-side request validation.
//!
//! Cross-field rules run before a request is encoded, so an invalid request
//! never reaches the network.

use std::fmt;

use thiserror::Error;

/// A single rule violation, keyed by the logical field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Logical (`snake_case`) name of the offending field
    pub field: &'static str,
    /// Human readable description of the rule that failed
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One or more violations collected from a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Request validation failed: {}", format_violations(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Collect violations, returning `Ok(())` when there are none.
    pub fn check(violations: Vec<FieldViolation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// True if any violation names `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Cross-field validation run before a request is serialized.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
