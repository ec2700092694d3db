//! Model assembly functionality
//!
//! Builds the validated domain model graph from parsed JDL.

pub mod assembler;

pub use assembler::{AssembledModel, ModelAssembler};
