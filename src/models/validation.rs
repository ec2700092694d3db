//! Field validation model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported validation kinds
///
/// The set is closed; the rule registry in [`crate::validation::rules`] says
/// which kinds take a value and which field types accept them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Required,
    Unique,
    Min,
    Max,
    MinLength,
    MaxLength,
    MinBytes,
    MaxBytes,
    Pattern,
}

impl ValidationKind {
    pub const ALL: [ValidationKind; 9] = [
        ValidationKind::Required,
        ValidationKind::Unique,
        ValidationKind::Min,
        ValidationKind::Max,
        ValidationKind::MinLength,
        ValidationKind::MaxLength,
        ValidationKind::MinBytes,
        ValidationKind::MaxBytes,
        ValidationKind::Pattern,
    ];

    pub fn from_jdl(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }

    /// Rule name as it appears in `fieldValidateRules`
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::Required => "required",
            ValidationKind::Unique => "unique",
            ValidationKind::Min => "min",
            ValidationKind::Max => "max",
            ValidationKind::MinLength => "minlength",
            ValidationKind::MaxLength => "maxlength",
            ValidationKind::MinBytes => "minbytes",
            ValidationKind::MaxBytes => "maxbytes",
            ValidationKind::Pattern => "pattern",
        }
    }

    /// Descriptor key holding the rule's value, e.g. `fieldValidateRulesMinlength`
    pub fn descriptor_key(&self) -> String {
        let name = self.as_str();
        let mut key = String::with_capacity(18 + name.len());
        key.push_str("fieldValidateRules");
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
        key
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved value of a validation, after constant substitution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationValue {
    Number(serde_json::Number),
    Text(String),
}

impl ValidationValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ValidationValue::Number(number) => serde_json::Value::Number(number.clone()),
            ValidationValue::Text(text) => serde_json::Value::String(text.clone()),
        }
    }
}

/// A single validation attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub kind: ValidationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ValidationValue>,
}

impl Validation {
    pub fn new(kind: ValidationKind) -> Self {
        Self { kind, value: None }
    }

    pub fn with_value(kind: ValidationKind, value: ValidationValue) -> Self {
        Self {
            kind,
            value: Some(value),
        }
    }
}
