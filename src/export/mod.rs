//! Export functionality
//!
//! Lowers the resolved domain model to the JSON read by the code generator:
//! - Entity descriptors, one per application owning the entity
//! - Application configuration
//! - Deployment configuration

pub mod application;
pub mod changelog;
pub mod entity;
pub mod lowering;

/// Error during export
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("The changelog date of entity '{entity}' (sequence {sequence}) is out of range")]
    ChangelogDateOverflow { entity: String, sequence: u32 },

    #[error("The field '{field}' of entity '{entity}' refers to the undeclared enum '{enum_name}'")]
    UnknownEnum {
        entity: String,
        field: String,
        enum_name: String,
    },

    #[error("Entity '{0}' is owned by an application but not declared")]
    UnknownEntity(String),

    #[error("No options were resolved for entity '{entity}' in application '{application}'")]
    UnresolvedOptions { application: String, entity: String },
}

// Re-export for convenience
pub use application::{ApplicationExporter, DeploymentExporter};
pub use entity::{EntityDescriptor, EntityExporter, FieldDescriptor, RelationshipDescriptor};
pub use lowering::{JdlExport, lower};
