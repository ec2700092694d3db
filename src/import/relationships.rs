//! Relationship converter
//!
//! Converts relationship declarations. Sides are taken as declared; pairing
//! and owner-side rules are left to the relationship resolver.

use super::fields::{annotation_bag, normalize_comment};
use super::parsed::{ParsedAnnotation, ParsedRelationship, ParsedRelationshipSide};
use super::ImportError;
use crate::models::naming::lower_first;
use crate::models::{Relationship, RelationshipOptionBag, RelationshipOptions, RelationshipSide};
use once_cell::sync::Lazy;
use regex::Regex;

/// `field` or `field(otherEntityField)`
static INJECTED_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_$][\w$]*)\s*(?:\(\s*([A-Za-z_$][\w$]*)\s*\))?\s*$").unwrap()
});

/// Default option normalisation: a bare annotation becomes `true`, a value is kept
pub fn normalize_relationship_options(annotations: &[ParsedAnnotation]) -> RelationshipOptionBag {
    annotation_bag(annotations)
}

/// Convert relationship declarations
///
/// `normalize` turns each per-side annotation list into an option bag;
/// [`normalize_relationship_options`] is the usual choice.
pub fn convert_relationships<F>(
    parsed: Option<&[ParsedRelationship]>,
    normalize: F,
) -> Result<Vec<Relationship>, ImportError>
where
    F: Fn(&[ParsedAnnotation]) -> RelationshipOptionBag,
{
    let parsed = parsed.ok_or(ImportError::MissingInput("relationships"))?;
    Ok(parsed
        .iter()
        .map(|relationship| convert_relationship(relationship, &normalize))
        .collect())
}

fn convert_relationship<F>(parsed: &ParsedRelationship, normalize: &F) -> Relationship
where
    F: Fn(&[ParsedAnnotation]) -> RelationshipOptionBag,
{
    let mut from = convert_side(&parsed.from);
    let to = convert_side(&parsed.to);

    if from.injected_field.is_none() && to.injected_field.is_none() {
        from.injected_field = Some(lower_first(&to.entity));
    }

    let mut relationship = Relationship::new(parsed.cardinality, from, to);
    relationship.options = RelationshipOptions {
        global: normalize(&parsed.options.global),
        source: normalize(&parsed.options.source),
        destination: normalize(&parsed.options.destination),
    };
    relationship
}

fn convert_side(parsed: &ParsedRelationshipSide) -> RelationshipSide {
    let mut side = RelationshipSide::new(parsed.name.clone());
    side.required = parsed.required;
    side.comment = parsed.javadoc.as_deref().and_then(normalize_comment);

    if let Some(raw) = parsed
        .injected_field
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
    {
        match INJECTED_FIELD.captures(raw) {
            Some(captures) => {
                side.injected_field = captures.get(1).map(|m| m.as_str().to_string());
                side.other_entity_field = captures.get(2).map(|m| m.as_str().to_string());
            }
            None => side.injected_field = Some(raw.trim().to_string()),
        }
    }
    side
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cardinality;
    use serde_json::json;

    fn side(name: &str, injected: Option<&str>) -> ParsedRelationshipSide {
        let side = ParsedRelationshipSide::new(name);
        match injected {
            Some(field) => side.injected(field),
            None => side,
        }
    }

    #[test]
    fn test_custom_display_field() {
        let parsed = vec![ParsedRelationship::new(
            Cardinality::ManyToOne,
            side("A", Some("b(name)")),
            side("B", None),
        )];
        let relationships =
            convert_relationships(Some(&parsed), normalize_relationship_options).unwrap();
        let from = &relationships[0].from;
        assert_eq!(from.injected_field.as_deref(), Some("b"));
        assert_eq!(from.other_entity_field.as_deref(), Some("name"));
        assert!(relationships[0].to.injected_field.is_none());
    }

    #[test]
    fn test_source_default_when_no_side_is_named() {
        let parsed = vec![ParsedRelationship::new(
            Cardinality::OneToOne,
            side("Car", None),
            side("Driver", None),
        )];
        let relationships =
            convert_relationships(Some(&parsed), normalize_relationship_options).unwrap();
        assert_eq!(relationships[0].from.injected_field.as_deref(), Some("driver"));
        assert!(relationships[0].to.injected_field.is_none());
    }

    #[test]
    fn test_options_and_per_side_data() {
        let mut relationship =
            ParsedRelationship::new(Cardinality::OneToOne, side("A", Some("b")), side("B", None));
        relationship.from.required = true;
        relationship.to.javadoc = Some("/** Back reference */".to_string());
        relationship
            .options
            .global
            .push(ParsedAnnotation::flag("jpaDerivedIdentifier"));
        relationship
            .options
            .source
            .push(ParsedAnnotation::with_value("onDelete", "CASCADE"));

        let relationships =
            convert_relationships(Some(&[relationship]), normalize_relationship_options).unwrap();
        let converted = &relationships[0];
        assert!(converted.from.required);
        assert!(!converted.to.required);
        assert!(converted.from.comment.is_none());
        assert_eq!(converted.to.comment.as_deref(), Some("Back reference"));
        assert_eq!(converted.options.global["jpaDerivedIdentifier"], json!(true));
        assert_eq!(converted.options.source["onDelete"], json!("CASCADE"));
    }

    #[test]
    fn test_custom_normalizer() {
        let mut relationship =
            ParsedRelationship::new(Cardinality::OneToMany, side("A", Some("b")), side("B", None));
        relationship
            .options
            .global
            .push(ParsedAnnotation::flag("Whatever"));
        let relationships = convert_relationships(Some(&[relationship]), |annotations| {
            annotations
                .iter()
                .map(|a| (a.option_name.to_lowercase(), json!("seen")))
                .collect()
        })
        .unwrap();
        assert_eq!(relationships[0].options.global["whatever"], json!("seen"));
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(
            convert_relationships(None, normalize_relationship_options),
            Err(ImportError::MissingInput("relationships"))
        );
    }
}
