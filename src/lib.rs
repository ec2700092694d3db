//! JDL conversion core
//!
//! Builds a validated domain model from parsed JDL (JHipster Domain Language)
//! and lowers it to the JSON descriptors consumed by code generation:
//! - Converters from parsed blocks to model objects
//! - Object graph assembly and integrity checks
//! - Relationship and option resolution
//! - Lowering to entity, application and deployment JSON
//!
//! The library never installs a `tracing` subscriber and never prints.
//! Advisory conditions come back as [`Notice`] values next to the output.

pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod model;
pub mod models;
pub mod resolve;
pub mod validation;

// Re-export commonly used types
pub use config::{ConversionConfig, ConversionConfigBuilder, DefaultApplication};
pub use convert::{ConversionError, convert_jdl};
pub use export::{EntityDescriptor, ExportError, JdlExport};
pub use import::{ConversionContext, ImportError, ParsedJdl};
pub use model::{AssembledModel, ModelAssembler};
pub use resolve::{OptionResolver, RelationshipResolver};
pub use validation::{ModelValidationError, ModelValidator, RelationshipValidator};

// Re-export models
pub use models::enums::*;
pub use models::{
    Application, Deployment, DomainModel, Entity, EntityOptions, Field, FieldType, JdlEnum,
    JdlOption, Notice, NoticeKind, Relationship, RelationshipEntry,
};
