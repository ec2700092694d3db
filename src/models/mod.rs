//! Models module
//!
//! Defines the in-memory domain model built from parsed JDL: entities,
//! fields, enums, relationships, options, applications and deployments,
//! gathered into one [`DomainModel`] graph.

pub mod application;
pub mod deployment;
pub mod domain_model;
pub mod entity;
pub mod enums;
pub mod field;
pub mod jdl_enum;
pub mod naming;
pub mod notice;
pub mod option;
pub mod relationship;
pub mod validation;

pub use application::{Application, ApplicationConfig};
pub use deployment::Deployment;
pub use domain_model::DomainModel;
pub use entity::{BUILT_IN_ENTITIES, Entity, is_built_in_entity};
pub use enums::*;
pub use field::{Field, FieldType, TypeFamily};
pub use jdl_enum::{EnumValue, JdlEnum};
pub use notice::{Notice, NoticeKind};
pub use option::{
    BinaryOption, BinaryOptionKind, DtoValue, EntityOptions, EntitySelection, JdlOption,
    OptionKind, OptionSetting, PaginationValue, SearchEngine, ServiceValue, UnaryOption,
};
pub use relationship::{
    Relationship, RelationshipEntry, RelationshipOptionBag, RelationshipOptions, RelationshipSide,
};
pub use validation::{Validation, ValidationKind, ValidationValue};
