//! Entity converter
//!
//! Builds [`Entity`] values with their fields. Each entity gets the 1-based
//! position at which it appears in the input as its `sequence`.

use super::fields::{convert_fields, normalize_comment};
use super::options::parse_annotation;
use super::parsed::ParsedEntity;
use super::{ConversionContext, ImportError};
use crate::models::Entity;
use crate::models::naming::default_table_name;
use serde_json::Value;

/// Annotation pinning the changelog date of an entity
const CHANGELOG_DATE_ANNOTATION: &str = "changelogDate";

pub fn convert_entities(
    parsed: Option<&[ParsedEntity]>,
    context: &ConversionContext,
) -> Result<Vec<Entity>, ImportError> {
    let parsed = parsed.ok_or(ImportError::MissingInput("entities"))?;
    parsed
        .iter()
        .enumerate()
        .map(|(index, entity)| convert_entity(entity, index as u32 + 1, context))
        .collect()
}

fn convert_entity(
    parsed: &ParsedEntity,
    sequence: u32,
    context: &ConversionContext,
) -> Result<Entity, ImportError> {
    let table_name = parsed
        .table_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| default_table_name(&parsed.name));

    let mut entity = Entity::new(parsed.name.clone(), table_name, sequence);
    entity.comment = parsed.javadoc.as_deref().and_then(normalize_comment);
    entity.fields = convert_fields(&parsed.name, &parsed.body, context)?;

    for annotation in &parsed.annotations {
        if annotation.option_name == CHANGELOG_DATE_ANNOTATION {
            entity.changelog_date = Some(changelog_date(&parsed.name, annotation.option_value.as_ref())?);
            continue;
        }
        entity.annotations.push(parse_annotation(
            &annotation.option_name,
            annotation.option_value.as_ref(),
        )?);
    }

    Ok(entity)
}

/// `YYYYMMDDHHmmss`, given as a string or a number
fn changelog_date(entity: &str, value: Option<&Value>) -> Result<String, ImportError> {
    let text = match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        other => {
            return Err(ImportError::InvalidChangelogDate {
                entity: entity.to_string(),
                value: other.map(Value::to_string).unwrap_or_default(),
            });
        }
    };
    if text.len() != 14 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ImportError::InvalidChangelogDate {
            entity: entity.to_string(),
            value: text,
        });
    }
    Ok(text)
}
