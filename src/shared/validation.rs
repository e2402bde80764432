//! Validation Utilities
//!
//! Rule violations collected by the catalog services, and the adapter that
//! folds `validator` request errors into the same shape.

use std::fmt;

use rust_decimal::Decimal;
use validator::ValidationErrors;

use super::error::{AppError, FieldError};

/// Kind of rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and not blank.
    Required,
    /// Value must be strictly greater than zero.
    Positive,
    /// Value must reference an existing row.
    Exists,
    /// Rule reported by a request-level `validator` derive.
    Format,
}

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

/// Every rule a payload violated. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Turn a collected list into a result; an empty list means the payload passed.
    pub fn check(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether `field` failed `rule`.
    pub fn has(&self, field: &str, rule: Rule) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.rule == rule)
    }

    /// True when a dangling reference is among the violations.
    pub fn is_referential(&self) -> bool {
        self.violations.iter().any(|v| v.rule == Rule::Exists)
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.violations
            .iter()
            .map(|v| FieldError {
                field: v.field.clone(),
                message: v.message.clone(),
            })
            .collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

/// True for empty or whitespace-only input.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Client-chosen ids must be positive; zero means "let the store assign".
pub fn explicit_id_violation(id: Option<i32>) -> Option<Violation> {
    id.filter(|id| *id < 0).map(|id| {
        Violation::new("id", Rule::Positive, format!("ID {} must be a positive number.", id))
    })
}

/// Fractional digits a stored price keeps (`NUMERIC(18, 2)`).
pub const PRICE_SCALE: u32 = 2;

/// True when `price` is representable at the stored scale without rounding.
pub fn has_price_scale(price: Decimal) -> bool {
    price.normalize().scale() <= PRICE_SCALE
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                Violation::new(
                    field.to_string(),
                    Rule::Format,
                    e.message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                )
            })
        })
        .collect();

    // HashMap order is unstable; keep responses deterministic.
    violations.sort_by(|a, b| a.field.cmp(&b.field));

    AppError::Validation(ValidationFailure::new(violations))
}
