//! Field converter
//!
//! Converts the raw field blocks of an entity. Field names get their first
//! letter lower-cased, Javadoc-style comments are unwrapped, and the type is
//! resolved against the primitive types and the enums known to the context.

use super::parsed::{ParsedAnnotation, ParsedField};
use super::validations::convert_validations;
use super::{ConversionContext, ImportError};
use crate::models::naming::lower_first;
use crate::models::{Field, FieldType};
use crate::validation::rules;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static COMMENT_OPENING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*/\*+\s?").unwrap());
static COMMENT_CLOSING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\*+/\s*$").unwrap());
static COMMENT_LINE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*\s?").unwrap());

/// Convert the fields of one entity, in declaration order
pub fn convert_fields(
    entity: &str,
    parsed: &[ParsedField],
    context: &ConversionContext,
) -> Result<Vec<Field>, ImportError> {
    parsed
        .iter()
        .map(|field| convert_field(entity, field, context))
        .collect()
}

fn convert_field(
    entity: &str,
    parsed: &ParsedField,
    context: &ConversionContext,
) -> Result<Field, ImportError> {
    let name = lower_first(&parsed.name);
    let field_type = resolve_type(entity, &name, &parsed.field_type, context)?;

    let mut field = Field::new(name, field_type);
    field.comment = parsed.javadoc.as_deref().and_then(normalize_comment);

    for validation in convert_validations(&field.name, &parsed.validations, context)? {
        if !rules::rule_for(validation.kind).accepts(&field.field_type) {
            return Err(ImportError::UnsupportedValidationForType {
                field: field.name.clone(),
                key: validation.kind.as_str().to_string(),
                field_type: parsed.field_type.clone(),
            });
        }
        field.add_validation(validation);
    }

    field.options = annotation_bag(&parsed.options);
    Ok(field)
}

fn resolve_type(
    entity: &str,
    field: &str,
    type_name: &str,
    context: &ConversionContext,
) -> Result<FieldType, ImportError> {
    if let Some(primitive) = FieldType::primitive(type_name) {
        return Ok(primitive);
    }
    if context.is_enum(type_name) {
        return Ok(FieldType::Enum(type_name.to_string()));
    }
    Err(ImportError::UnknownFieldType {
        entity: entity.to_string(),
        field: field.to_string(),
        field_type: type_name.to_string(),
    })
}

/// Annotation list to option bag; a bare annotation maps to `true`
pub(crate) fn annotation_bag(annotations: &[ParsedAnnotation]) -> BTreeMap<String, serde_json::Value> {
    annotations
        .iter()
        .map(|annotation| {
            let value = annotation
                .option_value
                .clone()
                .unwrap_or(serde_json::Value::Bool(true));
            (annotation.option_name.clone(), value)
        })
        .collect()
}

/// Unwrap a `/** ... */` comment into plain text
///
/// Leading `*` on continuation lines is stripped and blank edges trimmed.
/// Returns `None` when nothing is left.
pub fn normalize_comment(comment: &str) -> Option<String> {
    let opened = COMMENT_OPENING.replace(comment, "");
    let unwrapped = COMMENT_CLOSING.replace(&opened, "");
    let lines: Vec<String> = unwrapped
        .lines()
        .map(|line| COMMENT_LINE_PREFIX.replace(line, "").trim_end().to_string())
        .collect();
    let text = lines.join("\n").trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parsed::ParsedValidation;
    use crate::models::{BlobContent, ValidationKind};

    fn context() -> ConversionContext {
        ConversionContext::default().with_enums(["Language"])
    }

    #[test]
    fn test_field_name_is_lower_first() {
        let fields = convert_fields("A", &[ParsedField::new("MyField", "String")], &context()).unwrap();
        assert_eq!(fields[0].name, "myField");
        assert_eq!(fields[0].field_type, FieldType::String);
    }

    #[test]
    fn test_enum_and_blob_types() {
        let parsed = vec![
            ParsedField::new("language", "Language"),
            ParsedField::new("picture", "ImageBlob"),
        ];
        let fields = convert_fields("A", &parsed, &context()).unwrap();
        assert_eq!(fields[0].field_type, FieldType::Enum("Language".to_string()));
        assert_eq!(fields[1].field_type.blob_content(), Some(BlobContent::Image));
    }

    #[test]
    fn test_unknown_type() {
        let result = convert_fields("A", &[ParsedField::new("x", "Colour")], &context());
        assert_eq!(
            result,
            Err(ImportError::UnknownFieldType {
                entity: "A".to_string(),
                field: "x".to_string(),
                field_type: "Colour".to_string(),
            })
        );
    }

    #[test]
    fn test_validation_must_fit_type() {
        let mut parsed = ParsedField::new("age", "Integer");
        parsed.validations.push(ParsedValidation::with_value("maxlength", 3));
        assert!(matches!(
            convert_fields("A", &[parsed], &context()),
            Err(ImportError::UnsupportedValidationForType { .. })
        ));

        let mut parsed = ParsedField::new("age", "Integer");
        parsed.validations.push(ParsedValidation::flag("required"));
        parsed.validations.push(ParsedValidation::with_value("max", 120));
        let fields = convert_fields("A", &[parsed], &context()).unwrap();
        assert!(fields[0].validation(ValidationKind::Max).is_some());
    }

    #[test]
    fn test_custom_options() {
        let mut parsed = ParsedField::new("code", "String");
        parsed.options.push(ParsedAnnotation::flag("Id"));
        parsed
            .options
            .push(ParsedAnnotation::with_value("Sequence", "code_seq"));
        let fields = convert_fields("A", &[parsed], &context()).unwrap();
        assert_eq!(fields[0].options["Id"], serde_json::json!(true));
        assert_eq!(fields[0].options["Sequence"], serde_json::json!("code_seq"));
    }

    #[test]
    fn test_normalize_comment() {
        assert_eq!(
            normalize_comment("/** The title */"),
            Some("The title".to_string())
        );
        assert_eq!(
            normalize_comment("/**\n * First line\n * second line\n */"),
            Some("First line\nsecond line".to_string())
        );
        assert_eq!(normalize_comment("plain"), Some("plain".to_string()));
        assert_eq!(normalize_comment("/** */"), None);
    }
}
