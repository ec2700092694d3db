//! Relationship validation functionality
//!
//! Detects cycles made only of required foreign keys. Such a model can be
//! generated, but no row of any entity in the cycle can be inserted first, so
//! the condition is reported as an advisory notice.

use crate::models::{Notice, RelationshipEntry};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::info;

/// Relationship validator
#[derive(Debug, Default)]
pub struct RelationshipValidator;

impl RelationshipValidator {
    pub fn new() -> Self {
        Self
    }

    /// Find cycles of required foreign keys among resolved relationship entries
    ///
    /// An edge goes from the entity holding a required foreign key to the
    /// entity it references. Built-in targets are ignored. Each cycle is
    /// returned as its entity names sorted alphabetically.
    pub fn find_required_cycles(&self, entries: &[RelationshipEntry]) -> Vec<Vec<String>> {
        let mut graph = DiGraph::<&str, ()>::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for entry in entries
            .iter()
            .filter(|entry| entry.required && entry.holds_foreign_key() && !entry.with_built_in_entity)
        {
            let source = *nodes
                .entry(entry.entity.as_str())
                .or_insert_with(|| graph.add_node(entry.entity.as_str()));
            let target = *nodes
                .entry(entry.other_entity.as_str())
                .or_insert_with(|| graph.add_node(entry.other_entity.as_str()));
            graph.update_edge(source, target, ());
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut names: Vec<String> = component
                    .into_iter()
                    .map(|node| graph[node].to_string())
                    .collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Same as [`find_required_cycles`](Self::find_required_cycles), as notices
    pub fn required_cycle_notices(&self, entries: &[RelationshipEntry]) -> Vec<Notice> {
        self.find_required_cycles(entries)
            .into_iter()
            .map(|entities| {
                info!(entities = ?entities, "Required relationships form a cycle");
                Notice::required_cycle(entities)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cardinality;
    use uuid::Uuid;

    fn many_to_one(entity: &str, other: &str, required: bool) -> RelationshipEntry {
        RelationshipEntry {
            entity: entity.to_string(),
            relationship_id: Uuid::nil(),
            relationship_type: Cardinality::ManyToOne,
            relationship_name: other.to_lowercase(),
            other_entity: other.to_string(),
            other_entity_relationship_name: entity.to_lowercase(),
            other_entity_field: Some("id".to_string()),
            owner_side: None,
            required,
            comment: None,
            options: Default::default(),
            with_built_in_entity: false,
        }
    }

    #[test]
    fn test_required_cycle_is_found() {
        let entries = vec![
            many_to_one("A", "B", true),
            many_to_one("B", "C", true),
            many_to_one("C", "A", true),
            many_to_one("D", "A", true),
        ];
        let cycles = RelationshipValidator::new().find_required_cycles(&entries);
        assert_eq!(cycles, vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_optional_link_breaks_cycle() {
        let entries = vec![many_to_one("A", "B", true), many_to_one("B", "A", false)];
        assert!(
            RelationshipValidator::new()
                .find_required_cycles(&entries)
                .is_empty()
        );
    }

    #[test]
    fn test_required_self_reference() {
        let entries = vec![many_to_one("Employee", "Employee", true)];
        let notices = RelationshipValidator::new().required_cycle_notices(&entries);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Required relationships form a cycle between Employee");
    }
}
