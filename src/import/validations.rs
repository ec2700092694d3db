//! Validation converter
//!
//! Turns the raw validation list of a field into [`Validation`] values,
//! substituting constants and checking each value against the rule registry.

use super::parsed::ParsedValidation;
use super::{ConversionContext, ImportError};
use crate::models::{Validation, ValidationKind, ValidationValue};
use crate::validation::rules::{self, ValueRequirement};
use serde_json::Value;

/// Convert the validations of one field
///
/// # Arguments
///
/// * `field` - Field name, used in error messages
/// * `parsed` - Raw validations in declaration order
/// * `context` - Supplies constant values
pub fn convert_validations(
    field: &str,
    parsed: &[ParsedValidation],
    context: &ConversionContext,
) -> Result<Vec<Validation>, ImportError> {
    parsed
        .iter()
        .map(|validation| convert_validation(field, validation, context))
        .collect()
}

fn convert_validation(
    field: &str,
    parsed: &ParsedValidation,
    context: &ConversionContext,
) -> Result<Validation, ImportError> {
    let rule = rules::lookup(&parsed.key).ok_or_else(|| ImportError::UnknownValidation {
        field: field.to_string(),
        key: parsed.key.clone(),
    })?;

    let value = match rule.value {
        ValueRequirement::None => return Ok(Validation::new(rule.kind)),
        ValueRequirement::Number => {
            numeric_value(field, rule.kind, required_value(field, parsed, context, true)?)?
        }
        ValueRequirement::Text => {
            pattern_value(field, rule.kind, required_value(field, parsed, context, false)?)?
        }
    };
    Ok(Validation::with_value(rule.kind, value))
}

fn required_value<'a>(
    field: &str,
    parsed: &'a ParsedValidation,
    context: &'a ConversionContext,
    implicit_constants: bool,
) -> Result<&'a Value, ImportError> {
    let raw = parsed
        .value
        .as_ref()
        .ok_or_else(|| ImportError::MissingValidationValue {
            field: field.to_string(),
            key: parsed.key.clone(),
        })?;
    resolve_value(raw, parsed.constant, implicit_constants, context)
}

/// Substitute a constant reference. With `implicit_constants`, a string naming
/// a declared constant is a reference even without the `constant` flag; a
/// pattern only ever refers to a constant through the flag.
fn resolve_value<'a>(
    raw: &'a Value,
    constant: bool,
    implicit_constants: bool,
    context: &'a ConversionContext,
) -> Result<&'a Value, ImportError> {
    match raw {
        Value::String(name) if constant => context
            .resolve_constant(name)
            .ok_or_else(|| ImportError::UnknownConstant(name.clone())),
        Value::String(name) if implicit_constants => {
            Ok(context.resolve_constant(name).unwrap_or(raw))
        }
        _ => Ok(raw),
    }
}

fn numeric_value(
    field: &str,
    kind: ValidationKind,
    value: &Value,
) -> Result<ValidationValue, ImportError> {
    let invalid = |reason: String| ImportError::InvalidValidationValue {
        field: field.to_string(),
        key: kind.as_str().to_string(),
        reason,
    };

    let number = match value {
        Value::Number(number) => number.clone(),
        Value::String(text) => parse_number(text.trim())
            .ok_or_else(|| invalid(format!("'{}' is not a number", text)))?,
        other => return Err(invalid(format!("'{}' is not a number", other))),
    };

    let is_size_bound = matches!(
        kind,
        ValidationKind::MinLength
            | ValidationKind::MaxLength
            | ValidationKind::MinBytes
            | ValidationKind::MaxBytes
    );
    if is_size_bound && number.as_f64().is_some_and(|n| n < 0.0) {
        return Err(invalid(format!("{} must not be negative", number)));
    }

    Ok(ValidationValue::Number(number))
}

fn parse_number(text: &str) -> Option<serde_json::Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(integer.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}

fn pattern_value(
    field: &str,
    kind: ValidationKind,
    value: &Value,
) -> Result<ValidationValue, ImportError> {
    match value {
        Value::String(pattern) => Ok(ValidationValue::Text(escape_pattern(pattern))),
        other => Err(ImportError::InvalidValidationValue {
            field: field.to_string(),
            key: kind.as_str().to_string(),
            reason: format!("'{}' is not a string", other),
        }),
    }
}

/// Escape single quotes so the pattern can be embedded in generated string literals
fn escape_pattern(pattern: &str) -> String {
    pattern.replace('\'', "\\'")
}
