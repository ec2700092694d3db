//! Import functionality
//!
//! Converters from parsed JDL blocks to model objects:
//! - enums
//! - fields and their validations
//! - entities
//! - relationships
//! - options (unary, binary and `use` presets)
//! - applications
//! - deployments
//!
//! Every converter is a pure function of its own raw blocks and a
//! [`ConversionContext`]. None of them looks at the rest of the graph; the
//! cross-referential checks belong to the assembler.

pub mod applications;
pub mod deployments;
pub mod entities;
pub mod enums;
pub mod fields;
pub mod options;
pub mod parsed;
pub mod relationships;
pub mod validations;

use std::collections::{BTreeMap, BTreeSet};

/// Error during conversion of parsed blocks
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    /// A converter was called without its mandatory collection
    #[error("No {0} passed to the converter")]
    MissingInput(&'static str),

    #[error("The type '{field_type}' is an unknown field type for field '{field}' of entity '{entity}'")]
    UnknownFieldType {
        entity: String,
        field: String,
        field_type: String,
    },

    #[error("Unknown validation '{key}' on field '{field}'")]
    UnknownValidation { field: String, key: String },

    #[error("The validation '{key}' on field '{field}' requires a value")]
    MissingValidationValue { field: String, key: String },

    #[error("Invalid value for validation '{key}' on field '{field}': {reason}")]
    InvalidValidationValue {
        field: String,
        key: String,
        reason: String,
    },

    #[error("The validation '{key}' is not supported for field '{field}' of type '{field_type}'")]
    UnsupportedValidationForType {
        field: String,
        key: String,
        field_type: String,
    },

    #[error("Unknown constant '{0}'")]
    UnknownConstant(String),

    #[error("Duplicate key '{key}' in enum '{enum_name}'")]
    DuplicateEnumKey { enum_name: String, key: String },

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("The option '{option}' is {expected}, but was given as {found}")]
    InvalidOptionShape {
        option: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOptionValue { option: String, value: String },

    #[error("Unknown value '{0}' in a use clause")]
    UnknownUsePreset(String),

    #[error("Invalid changelog date '{value}' for entity '{entity}', expected YYYYMMDDHHmmss")]
    InvalidChangelogDate { entity: String, value: String },

    #[error("An application is missing its baseName")]
    MissingBaseName,

    #[error("Unknown application type '{application_type}' for application '{base_name}'")]
    UnknownApplicationType {
        base_name: String,
        application_type: String,
    },

    #[error("Unknown deployment type '{0}'")]
    UnknownDeploymentType(String),
}

/// Shared, read-only state handed to every converter
///
/// Replaces parser-wide globals: the constants declared in the input and the
/// names of the declared enums travel explicitly with each call.
#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    constants: BTreeMap<String, serde_json::Value>,
    enum_names: BTreeSet<String>,
}

impl ConversionContext {
    pub fn new(constants: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            constants,
            enum_names: BTreeSet::new(),
        }
    }

    /// Register the enum names fields may refer to
    pub fn with_enums<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn resolve_constant(&self, name: &str) -> Option<&serde_json::Value> {
        self.constants.get(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enum_names.contains(name)
    }
}

// Re-export for convenience
pub use applications::convert_applications;
pub use deployments::convert_deployments;
pub use entities::convert_entities;
pub use enums::convert_enums;
pub use fields::{convert_fields, normalize_comment};
pub use options::convert_options;
pub use parsed::ParsedJdl;
pub use relationships::{convert_relationships, normalize_relationship_options};
pub use validations::convert_validations;
