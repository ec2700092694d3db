//! Field model for entities

use super::enums::BlobContent;
use super::validation::{Validation, ValidationKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse grouping of field types used to decide which validations apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Text,
    Numeric,
    Blob,
    Other,
}

/// Type of a field: a primitive, a blob with its sub-kind, or a reference to a declared enum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Integer,
    Long,
    BigDecimal,
    Float,
    Double,
    Boolean,
    LocalDate,
    ZonedDateTime,
    Instant,
    Duration,
    Uuid,
    Blob(BlobContent),
    Enum(String),
}

impl FieldType {
    /// Parse a primitive JDL type name. Enum references are resolved by the
    /// field converter, which knows the declared enum names.
    pub fn primitive(type_name: &str) -> Option<Self> {
        let field_type = match type_name {
            "String" => FieldType::String,
            "Integer" => FieldType::Integer,
            "Long" => FieldType::Long,
            "BigDecimal" => FieldType::BigDecimal,
            "Float" => FieldType::Float,
            "Double" => FieldType::Double,
            "Boolean" => FieldType::Boolean,
            "LocalDate" => FieldType::LocalDate,
            "ZonedDateTime" => FieldType::ZonedDateTime,
            "Instant" => FieldType::Instant,
            "Duration" => FieldType::Duration,
            "UUID" => FieldType::Uuid,
            "Blob" | "AnyBlob" => FieldType::Blob(BlobContent::Any),
            "ImageBlob" => FieldType::Blob(BlobContent::Image),
            "TextBlob" => FieldType::Blob(BlobContent::Text),
            _ => return None,
        };
        Some(field_type)
    }

    /// Type name written to `fieldType`
    pub fn descriptor_name(&self) -> &str {
        match self {
            FieldType::String => "String",
            FieldType::Integer => "Integer",
            FieldType::Long => "Long",
            FieldType::BigDecimal => "BigDecimal",
            FieldType::Float => "Float",
            FieldType::Double => "Double",
            FieldType::Boolean => "Boolean",
            FieldType::LocalDate => "LocalDate",
            FieldType::ZonedDateTime => "ZonedDateTime",
            FieldType::Instant => "Instant",
            FieldType::Duration => "Duration",
            FieldType::Uuid => "UUID",
            FieldType::Blob(_) => "byte[]",
            FieldType::Enum(name) => name,
        }
    }

    pub fn family(&self) -> TypeFamily {
        match self {
            FieldType::String => TypeFamily::Text,
            FieldType::Integer
            | FieldType::Long
            | FieldType::BigDecimal
            | FieldType::Float
            | FieldType::Double => TypeFamily::Numeric,
            FieldType::Blob(_) => TypeFamily::Blob,
            _ => TypeFamily::Other,
        }
    }

    pub fn blob_content(&self) -> Option<BlobContent> {
        match self {
            FieldType::Blob(content) => Some(*content),
            _ => None,
        }
    }

    pub fn enum_name(&self) -> Option<&str> {
        match self {
            FieldType::Enum(name) => Some(name),
            _ => None,
        }
    }
}

/// A field of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name, first letter lower-cased
    pub name: String,
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Validations in declaration order, one per kind
    #[serde(default)]
    pub validations: Vec<Validation>,
    /// Custom options (annotations) attached to the field
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            comment: None,
            validations: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    /// Add a validation, replacing any existing one of the same kind in place
    pub fn add_validation(&mut self, validation: Validation) {
        match self
            .validations
            .iter_mut()
            .find(|existing| existing.kind == validation.kind)
        {
            Some(existing) => *existing = validation,
            None => self.validations.push(validation),
        }
    }

    pub fn validation(&self, kind: ValidationKind) -> Option<&Validation> {
        self.validations.iter().find(|v| v.kind == kind)
    }

    pub fn is_required(&self) -> bool {
        self.validation(ValidationKind::Required).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::ValidationValue;

    #[test]
    fn test_blob_aliases() {
        assert_eq!(
            FieldType::primitive("Blob"),
            Some(FieldType::Blob(BlobContent::Any))
        );
        assert_eq!(
            FieldType::primitive("TextBlob"),
            Some(FieldType::Blob(BlobContent::Text))
        );
        assert_eq!(FieldType::primitive("ImageBlob").unwrap().descriptor_name(), "byte[]");
        assert_eq!(FieldType::primitive("Language"), None);
    }

    #[test]
    fn test_add_validation_keeps_order_and_replaces() {
        let mut field = Field::new("title", FieldType::String);
        field.add_validation(Validation::new(ValidationKind::Required));
        field.add_validation(Validation::with_value(
            ValidationKind::MaxLength,
            ValidationValue::Number(10.into()),
        ));
        field.add_validation(Validation::with_value(
            ValidationKind::MaxLength,
            ValidationValue::Number(20.into()),
        ));

        assert_eq!(field.validations.len(), 2);
        assert_eq!(field.validations[0].kind, ValidationKind::Required);
        assert_eq!(
            field.validations[1].value,
            Some(ValidationValue::Number(20.into()))
        );
        assert!(field.is_required());
    }
}
