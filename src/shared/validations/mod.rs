//! Input validation
//!
//! Field constraints are declared with `validator` derives on the input
//! DTOs. [`validate_first`] evaluates them in the order the DTO declares
//! and reports only the first violation, so callers always see one
//! deterministic message.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{DomainError, DomainResult};

/// Typed constraint set for an input DTO.
pub trait ValidationSchema: Validate {
    /// Order in which field violations are reported.
    const FIELD_ORDER: &'static [&'static str];

    /// Rules spanning several fields, checked after every field passed.
    fn check_cross_fields(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Validate `value` and return the first violation as [`DomainError::Validation`].
pub fn validate_first<T: ValidationSchema>(value: &T) -> DomainResult<()> {
    if let Err(errors) = value.validate() {
        return Err(DomainError::Validation(first_message(
            &errors,
            T::FIELD_ORDER,
        )));
    }
    value.check_cross_fields().map_err(DomainError::Validation)
}

fn first_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    let ordered = order.iter().find_map(|field| {
        field_errors
            .get(*field)
            .and_then(|errs| errs.first())
            .map(|e| describe(field, e))
    });
    if let Some(message) = ordered {
        return message;
    }

    // Fields missing from FIELD_ORDER: fall back to name order so the result stays stable.
    let mut rest: Vec<(String, &ValidationError)> = field_errors
        .iter()
        .filter_map(|(field, errs)| errs.first().map(|e| (field.to_string(), e)))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(&b.0));

    rest.first()
        .map(|(field, e)| describe(field, e))
        .unwrap_or_else(|| "Validation failed".to_string())
}

fn describe(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code))
}
