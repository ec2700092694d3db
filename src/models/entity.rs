//! Entity model

use super::field::Field;
use super::option::OptionSetting;
use serde::{Deserialize, Serialize};

/// Entities that exist without being declared and may always be relationship targets
pub const BUILT_IN_ENTITIES: [&str; 2] = ["User", "Authority"];

pub fn is_built_in_entity(name: &str) -> bool {
    BUILT_IN_ENTITIES
        .iter()
        .any(|built_in| built_in.eq_ignore_ascii_case(name))
}

/// A named record type with ordered fields
///
/// `sequence` is the 1-based position at which the entity was first seen in
/// the input. Changelog dates are derived from it, never from collection
/// iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Fields in declaration order, names unique
    pub fields: Vec<Field>,
    pub sequence: u32,
    /// Options declared directly on the entity (`@dto(mapstruct)`)
    #[serde(default)]
    pub annotations: Vec<OptionSetting>,
    /// Changelog date pinned by a `@changelogDate` annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_date: Option<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>, sequence: u32) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            comment: None,
            fields: Vec::new(),
            sequence,
            annotations: Vec::new(),
            changelog_date: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// Case-insensitive name comparison, the rule used for collisions
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_built_in(&self) -> bool {
        is_built_in_entity(&self.name)
    }
}
