//! Relationship resolution
//!
//! Turns each relationship declaration into the entries seen by the entities
//! at its ends.
//!
//! A side that declares an injected field always gets an entry. A side without
//! one only gets an entry when it is the "many" side of a one-to-many or
//! many-to-one relationship, because that side holds the foreign key. So
//! one-to-one and many-to-many relationships, and the "one" side of a
//! many-to-one, stay unidirectional when the other side is not named.

use crate::models::naming::lower_first;
use crate::models::{
    Cardinality, DomainModel, Notice, Relationship, RelationshipEntry, RelationshipOptionBag,
    RelationshipSide, is_built_in_entity,
};
use crate::validation::RelationshipValidator;
use std::collections::BTreeMap;
use tracing::debug;

/// Field of the other entity used when no custom display field is declared
pub const DEFAULT_OTHER_ENTITY_FIELD: &str = "id";

/// Resolved relationship entries, grouped by entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRelationships {
    entries: BTreeMap<String, Vec<RelationshipEntry>>,
    /// Advisory notices, such as cycles of required foreign keys
    pub notices: Vec<Notice>,
}

impl ResolvedRelationships {
    /// Entries attached to `entity`, in relationship declaration order
    pub fn entries_for(&self, entity: &str) -> &[RelationshipEntry] {
        self.entries.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_entries(&self) -> impl Iterator<Item = &RelationshipEntry> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which end of a declaration an entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Destination,
}

/// Relationship resolver
#[derive(Debug, Default)]
pub struct RelationshipResolver;

impl RelationshipResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every relationship of the model
    pub fn resolve(&self, model: &DomainModel) -> ResolvedRelationships {
        let mut resolved = ResolvedRelationships::default();

        for relationship in &model.relationships {
            for entry in self.resolve_relationship(relationship, model) {
                resolved
                    .entries
                    .entry(entry.entity.clone())
                    .or_default()
                    .push(entry);
            }
        }

        let entries: Vec<RelationshipEntry> = resolved.all_entries().cloned().collect();
        resolved.notices = RelationshipValidator::new().required_cycle_notices(&entries);

        debug!(
            relationships = model.relationships.len(),
            entries = resolved.len(),
            "Resolved relationships"
        );
        resolved
    }

    /// Entries produced by one declaration: source first, then destination
    pub fn resolve_relationship(
        &self,
        relationship: &Relationship,
        model: &DomainModel,
    ) -> Vec<RelationshipEntry> {
        let cardinality = relationship.cardinality;
        let source_named = relationship.from.injected_field.is_some();
        let destination_named = relationship.to.injected_field.is_some();

        // With no side named, the source takes the default name
        let source =
            source_named || !destination_named || cardinality == Cardinality::ManyToOne;
        let destination = destination_named || cardinality == Cardinality::OneToMany;

        let has_source = source && !is_undeclared_built_in(&relationship.from.entity, model);
        let has_destination =
            destination && !is_undeclared_built_in(&relationship.to.entity, model);
        let bidirectional = has_source && has_destination;

        let mut entries = Vec::with_capacity(2);
        if has_source {
            entries.push(self.entry(relationship, End::Source, bidirectional, model));
        }
        if has_destination {
            entries.push(self.entry(relationship, End::Destination, bidirectional, model));
        }
        entries
    }

    fn entry(
        &self,
        relationship: &Relationship,
        end: End,
        bidirectional: bool,
        model: &DomainModel,
    ) -> RelationshipEntry {
        let (side, other, relationship_type, side_options) = match end {
            End::Source => (
                &relationship.from,
                &relationship.to,
                relationship.cardinality,
                &relationship.options.source,
            ),
            End::Destination => (
                &relationship.to,
                &relationship.from,
                relationship.cardinality.inverse(),
                &relationship.options.destination,
            ),
        };

        let owner_side = relationship_type
            .has_owner_side()
            .then(|| !bidirectional || end == End::Source);
        let holds_foreign_key = match relationship_type {
            Cardinality::ManyToOne => true,
            Cardinality::OneToMany => false,
            Cardinality::OneToOne | Cardinality::ManyToMany => owner_side.unwrap_or(false),
        };
        let other_entity_field = side
            .other_entity_field
            .clone()
            .or_else(|| holds_foreign_key.then(|| DEFAULT_OTHER_ENTITY_FIELD.to_string()));

        RelationshipEntry {
            entity: side.entity.clone(),
            relationship_id: relationship.id,
            relationship_type,
            relationship_name: relationship_name(side, other),
            other_entity: other.entity.clone(),
            other_entity_relationship_name: relationship_name(other, side),
            other_entity_field,
            owner_side,
            required: side.required,
            comment: side.comment.clone(),
            options: merge_options(&relationship.options.global, side_options),
            with_built_in_entity: is_undeclared_built_in(&other.entity, model),
        }
    }
}

/// Injected field of `side`, or the lower-first name of the other entity
fn relationship_name(side: &RelationshipSide, other: &RelationshipSide) -> String {
    side.injected_field
        .clone()
        .unwrap_or_else(|| lower_first(&other.entity))
}

fn merge_options(
    global: &RelationshipOptionBag,
    side: &RelationshipOptionBag,
) -> RelationshipOptionBag {
    let mut merged = global.clone();
    merged.extend(side.iter().map(|(key, value)| (key.clone(), value.clone())));
    merged
}

/// `User`/`Authority` referenced without being declared
fn is_undeclared_built_in(entity: &str, model: &DomainModel) -> bool {
    is_built_in_entity(entity) && !model.has_entity(entity)
}
