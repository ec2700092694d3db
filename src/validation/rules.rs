//! Validation rule registry
//!
//! Static catalog of the supported field validations: whether each one takes
//! a value, what kind of value, and which field type families accept it.

use crate::models::{FieldType, TypeFamily, ValidationKind};

/// Value a validation must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRequirement {
    /// Flag validation (`required`, `unique`)
    None,
    /// Numeric bound
    Number,
    /// Regular expression
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRule {
    pub kind: ValidationKind,
    pub value: ValueRequirement,
    families: &'static [TypeFamily],
}

const ALL_FAMILIES: &[TypeFamily] = &[
    TypeFamily::Text,
    TypeFamily::Numeric,
    TypeFamily::Blob,
    TypeFamily::Other,
];

static RULES: [ValidationRule; 9] = [
    ValidationRule {
        kind: ValidationKind::Required,
        value: ValueRequirement::None,
        families: ALL_FAMILIES,
    },
    ValidationRule {
        kind: ValidationKind::Unique,
        value: ValueRequirement::None,
        families: ALL_FAMILIES,
    },
    ValidationRule {
        kind: ValidationKind::Min,
        value: ValueRequirement::Number,
        families: &[TypeFamily::Numeric],
    },
    ValidationRule {
        kind: ValidationKind::Max,
        value: ValueRequirement::Number,
        families: &[TypeFamily::Numeric],
    },
    ValidationRule {
        kind: ValidationKind::MinLength,
        value: ValueRequirement::Number,
        families: &[TypeFamily::Text],
    },
    ValidationRule {
        kind: ValidationKind::MaxLength,
        value: ValueRequirement::Number,
        families: &[TypeFamily::Text],
    },
    ValidationRule {
        kind: ValidationKind::MinBytes,
        value: ValueRequirement::Number,
        families: &[TypeFamily::Blob],
    },
    ValidationRule {
        kind: ValidationKind::MaxBytes,
        value: ValueRequirement::Number,
        families: &[TypeFamily::Blob],
    },
    ValidationRule {
        kind: ValidationKind::Pattern,
        value: ValueRequirement::Text,
        families: &[TypeFamily::Text],
    },
];

impl ValidationRule {
    pub fn accepts(&self, field_type: &FieldType) -> bool {
        self.families.contains(&field_type.family())
    }
}

/// Rule for a validation name as written in the JDL
pub fn lookup(key: &str) -> Option<&'static ValidationRule> {
    ValidationKind::from_jdl(key).map(rule_for)
}

pub fn rule_for(kind: ValidationKind) -> &'static ValidationRule {
    // RULES holds exactly one entry per kind, in ValidationKind::ALL order
    &RULES[kind as usize]
}
