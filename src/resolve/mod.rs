//! Graph-wide resolution passes
//!
//! Both passes read an assembled [`DomainModel`](crate::models::DomainModel).
//! Relationships are resolved before options, and both before lowering.

pub mod options;
pub mod relationships;

pub use options::{OptionResolver, ResolvedOptions};
pub use relationships::{RelationshipResolver, ResolvedRelationships};
