//! Conversion pipeline
//!
//! Parsed JDL -> converters -> assembler -> relationship resolver -> option
//! resolver -> lowering. The run is synchronous and pure: given the same
//! input and configuration it returns the same export.

use crate::config::ConversionConfig;
use crate::export::{ExportError, JdlExport, lower};
use crate::import::{ImportError, ParsedJdl};
use crate::model::ModelAssembler;
use crate::resolve::{OptionResolver, RelationshipResolver};
use crate::validation::ModelValidationError;
use tracing::{debug, info_span};

/// Any fatal error of a conversion run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Validation(#[from] ModelValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Convert parsed JDL into entity, application and deployment JSON
///
/// # Example
///
/// ```rust
/// use jdl_core::config::{ConversionConfig, DefaultApplication};
/// use jdl_core::convert::convert_jdl;
/// use jdl_core::import::parsed::{ParsedEntity, ParsedField, ParsedJdl};
///
/// let mut parsed = ParsedJdl::new();
/// let mut book = ParsedEntity::new("Book");
/// book.body.push(ParsedField::new("title", "String"));
/// parsed.entities = Some(vec![book]);
///
/// let config = ConversionConfig::builder()
///     .default_application(DefaultApplication::new("library"))
///     .build();
/// let export = convert_jdl(&parsed, &config).unwrap();
/// assert_eq!(export.entities_of("library")[0].name, "Book");
/// ```
pub fn convert_jdl(
    parsed: &ParsedJdl,
    config: &ConversionConfig,
) -> Result<JdlExport, ConversionError> {
    let span = info_span!("jdl_conversion");
    let _guard = span.enter();

    let assembled = ModelAssembler::new(config).assemble(parsed)?;
    let model = &assembled.model;

    let relationships = RelationshipResolver::new().resolve(model);
    let options = OptionResolver::new().resolve(model);
    let export = lower(model, &relationships, &options, config)?;

    debug!(
        applications = export.entities.len(),
        descriptors = export.entities.values().map(Vec::len).sum::<usize>(),
        notices = export.notices.len(),
        "Conversion finished"
    );
    Ok(export)
}
