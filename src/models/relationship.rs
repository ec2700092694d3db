//! Relationship model
//!
//! A [`Relationship`] is the declaration as converted from the input. The
//! relationship resolver turns it into zero, one or two [`RelationshipEntry`]
//! values, one per entity that ends up knowing about the relationship.

use super::enums::Cardinality;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Normalised option bag of a relationship side
pub type RelationshipOptionBag = BTreeMap<String, serde_json::Value>;

/// One end of a relationship declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSide {
    /// Entity name at this end
    pub entity: String,
    /// Name of the field injected into this entity, without any `(field)` suffix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injected_field: Option<String>,
    /// Field of the other entity used for display, from `name(field)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RelationshipSide {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            injected_field: None,
            other_entity_field: None,
            required: false,
            comment: None,
        }
    }

    pub fn with_injected_field(mut self, field: impl Into<String>) -> Self {
        self.injected_field = Some(field.into());
        self
    }
}

/// Options of a relationship, keyed by where they were declared
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipOptions {
    #[serde(default)]
    pub global: RelationshipOptionBag,
    #[serde(default)]
    pub source: RelationshipOptionBag,
    #[serde(default)]
    pub destination: RelationshipOptionBag,
}

/// A relationship declaration between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: Uuid,
    pub cardinality: Cardinality,
    pub from: RelationshipSide,
    pub to: RelationshipSide,
    #[serde(default)]
    pub options: RelationshipOptions,
}

impl Relationship {
    pub fn new(cardinality: Cardinality, from: RelationshipSide, to: RelationshipSide) -> Self {
        let id = Self::generate_id(cardinality, &from, &to);
        Self {
            id,
            cardinality,
            from,
            to,
            options: RelationshipOptions::default(),
        }
    }

    /// Generate a deterministic UUID v5 from the relationship's identity
    ///
    /// Two declarations with the same cardinality, endpoints and injected
    /// fields get the same id, which is how duplicates are collapsed.
    pub fn generate_id(cardinality: Cardinality, from: &RelationshipSide, to: &RelationshipSide) -> Uuid {
        let key = format!(
            "{}:{}{{{}}}:{}{{{}}}",
            cardinality.as_str(),
            from.entity,
            from.injected_field.as_deref().unwrap_or(""),
            to.entity,
            to.injected_field.as_deref().unwrap_or("")
        );
        Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
    }

    /// Human readable form used in error messages, `OneToMany A{b} to B`
    pub fn describe(&self) -> String {
        let side = |side: &RelationshipSide| match &side.injected_field {
            Some(field) => format!("{}{{{}}}", side.entity, field),
            None => side.entity.clone(),
        };
        format!(
            "{} {} to {}",
            self.cardinality.as_str(),
            side(&self.from),
            side(&self.to)
        )
    }
}

/// Relationship as seen from one entity, after resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEntry {
    /// Entity this entry is attached to
    pub entity: String,
    pub relationship_id: Uuid,
    pub relationship_type: Cardinality,
    pub relationship_name: String,
    /// Declared name of the other entity
    pub other_entity: String,
    pub other_entity_relationship_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    /// Set for one-to-one and many-to-many only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_side: Option<bool>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub options: RelationshipOptionBag,
    /// The other entity is `User` or `Authority`
    #[serde(default)]
    pub with_built_in_entity: bool,
}

impl RelationshipEntry {
    /// Whether this side stores the foreign key (or join table) of the relationship
    pub fn holds_foreign_key(&self) -> bool {
        match self.relationship_type {
            Cardinality::ManyToOne => true,
            Cardinality::OneToMany => false,
            Cardinality::OneToOne | Cardinality::ManyToMany => self.owner_side.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_deterministic() {
        let from = RelationshipSide::new("A").with_injected_field("b");
        let to = RelationshipSide::new("B");
        let first = Relationship::new(Cardinality::OneToMany, from.clone(), to.clone());
        let second = Relationship::new(Cardinality::OneToMany, from.clone(), to.clone());
        let other = Relationship::new(Cardinality::ManyToOne, from, to);
        assert_eq!(first.id, second.id);
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn test_describe() {
        let relationship = Relationship::new(
            Cardinality::OneToOne,
            RelationshipSide::new("A").with_injected_field("b"),
            RelationshipSide::new("B"),
        );
        assert_eq!(relationship.describe(), "one-to-one A{b} to B");
    }
}
