//! Validation functionality
//!
//! Provides validation logic for:
//! - Field validations (the rule registry used by the converters)
//! - Domain model integrity (duplicates, reserved words, dangling references)
//! - Relationship validation (cycles of required foreign keys)

pub mod model;
pub mod relationships;
pub mod reserved;
pub mod rules;

pub use model::{ModelValidationError, ModelValidator};
pub use relationships::RelationshipValidator;
pub use rules::{ValidationRule, ValueRequirement};
