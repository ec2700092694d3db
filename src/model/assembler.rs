//! Object graph assembly
//!
//! Runs every converter on the parsed input, gathers the results into one
//! [`DomainModel`] and validates it as a whole.

use crate::config::ConversionConfig;
use crate::convert::ConversionError;
use crate::import::parsed::ParsedApplication;
use crate::import::{
    ConversionContext, ParsedJdl, convert_applications, convert_deployments, convert_entities,
    convert_enums, convert_options, convert_relationships, normalize_relationship_options,
};
use crate::models::DomainModel;
use crate::validation::{ModelValidationError, ModelValidator};
use std::borrow::Cow;
use tracing::debug;

/// Result of assembling a model
#[derive(Debug, Clone)]
pub struct AssembledModel {
    /// The validated graph
    pub model: DomainModel,
    /// Entities owned by no application, in declaration order. They are kept
    /// in the model but never lowered.
    pub unattached_entities: Vec<String>,
    /// Identical relationship declarations dropped after the first
    pub duplicate_relationships: usize,
}

/// Object graph assembler
pub struct ModelAssembler<'a> {
    config: &'a ConversionConfig,
}

impl<'a> ModelAssembler<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    /// Convert and assemble the parsed input
    ///
    /// Fails on the first conversion or integrity error; there is no
    /// partially assembled result.
    pub fn assemble(&self, parsed: &ParsedJdl) -> Result<AssembledModel, ConversionError> {
        let enums = convert_enums(parsed.enums.as_deref())?;
        let context = ConversionContext::new(parsed.constants.clone())
            .with_enums(enums.iter().map(|jdl_enum| jdl_enum.name.clone()));

        let entities = convert_entities(parsed.entities.as_deref(), &context)?;
        let relationships =
            convert_relationships(parsed.relationships.as_deref(), normalize_relationship_options)?;
        let options = convert_options(parsed.options.as_ref(), parsed.use_options.as_deref())?;
        let applications = convert_applications(&self.application_blocks(parsed))?;
        let deployments = convert_deployments(&parsed.deployments)?;

        let mut model = DomainModel::new();
        for jdl_enum in enums {
            model.add_enum(jdl_enum);
        }
        for entity in entities {
            model.add_entity(entity);
        }

        let mut duplicate_relationships = 0;
        for relationship in relationships {
            let description = relationship.describe();
            if model
                .relationship(relationship.id)
                .is_some_and(|existing| *existing != relationship)
            {
                return Err(ModelValidationError::ConflictingRelationship(description).into());
            }
            if !model.add_relationship(relationship) {
                debug!(relationship = %description, "Skipping duplicate relationship");
                duplicate_relationships += 1;
            }
        }
        for option in options {
            model.add_option(option);
        }
        for application in applications {
            model.add_application(application);
        }
        for deployment in deployments {
            model.add_deployment(deployment);
        }

        attach_entities(&mut model);

        ModelValidator::new()
            .with_reserved_keyword_checks(self.config.check_reserved_keywords)
            .with_skip_user_management(self.config.skip_user_management)
            .validate(&model)?;

        let unattached_entities: Vec<String> = model
            .unattached_entities()
            .into_iter()
            .map(str::to_string)
            .collect();
        for entity in &unattached_entities {
            debug!(entity = %entity, "Entity belongs to no application and will not be generated");
        }

        debug!(
            entities = model.entities.len(),
            enums = model.enums.len(),
            relationships = model.relationships.len(),
            options = model.options.len(),
            applications = model.applications.len(),
            deployments = model.deployments.len(),
            "Assembled domain model"
        );

        Ok(AssembledModel {
            model,
            unattached_entities,
            duplicate_relationships,
        })
    }

    /// Declared application blocks, or the configured default application
    fn application_blocks<'p>(&self, parsed: &'p ParsedJdl) -> Cow<'p, [ParsedApplication]> {
        match &self.config.default_application {
            Some(default) if parsed.applications.is_empty() => {
                Cow::Owned(vec![default.to_parsed()])
            }
            _ => Cow::Borrowed(parsed.applications.as_slice()),
        }
    }
}

/// Fill each application's owned entity list, in entity declaration order
fn attach_entities(model: &mut DomainModel) {
    let names: Vec<String> = model.entity_names().map(str::to_string).collect();
    for application in &mut model.applications {
        application.entity_names = names
            .iter()
            .filter(|name| application.entity_selection.selects(name))
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultApplication;
    use crate::import::ImportError;
    use crate::import::parsed::{ParsedEntity, ParsedRelationship, ParsedRelationshipSide};
    use crate::models::Cardinality;

    fn input(entities: &[&str]) -> ParsedJdl {
        let mut parsed = ParsedJdl::new();
        parsed.entities = Some(entities.iter().map(|name| ParsedEntity::new(*name)).collect());
        parsed
    }

    #[test]
    fn test_membership_and_unattached_entities() {
        let mut parsed = input(&["A", "B", "C"]);
        let mut application = ParsedApplication::new("shop").with_entities(&["*"]);
        application.entities.excluded = vec!["C".to_string()];
        parsed.applications.push(application);

        let config = ConversionConfig::default();
        let assembled = ModelAssembler::new(&config).assemble(&parsed).unwrap();
        assert_eq!(assembled.model.applications[0].entity_names, vec!["A", "B"]);
        assert_eq!(assembled.unattached_entities, vec!["C"]);
    }

    #[test]
    fn test_default_application() {
        let parsed = input(&["A"]);
        let config = ConversionConfig::builder()
            .default_application(DefaultApplication::new("store"))
            .build();
        let assembled = ModelAssembler::new(&config).assemble(&parsed).unwrap();
        assert_eq!(assembled.model.applications[0].base_name, "store");
        assert!(assembled.unattached_entities.is_empty());
    }

    #[test]
    fn test_duplicate_relationships_collapse() {
        let mut parsed = input(&["A", "B"]);
        let relationship = ParsedRelationship::new(
            Cardinality::OneToMany,
            ParsedRelationshipSide::new("A").injected("b"),
            ParsedRelationshipSide::new("B"),
        );
        parsed.relationships = Some(vec![relationship.clone(), relationship]);

        let config = ConversionConfig::default();
        let assembled = ModelAssembler::new(&config).assemble(&parsed).unwrap();
        assert_eq!(assembled.model.relationships.len(), 1);
        assert_eq!(assembled.duplicate_relationships, 1);
    }

    #[test]
    fn test_conflicting_duplicate_relationship() {
        let mut parsed = input(&["A", "B"]);
        let relationship = ParsedRelationship::new(
            Cardinality::ManyToOne,
            ParsedRelationshipSide::new("A").injected("b"),
            ParsedRelationshipSide::new("B"),
        );
        let mut required = relationship.clone();
        required.from.required = true;
        parsed.relationships = Some(vec![relationship, required]);

        let config = ConversionConfig::default();
        assert_eq!(
            ModelAssembler::new(&config).assemble(&parsed).map(|_| ()),
            Err(ConversionError::Validation(
                ModelValidationError::ConflictingRelationship("many-to-one A{b} to B".to_string())
            ))
        );
    }

    #[test]
    fn test_errors_propagate() {
        let mut parsed = input(&["A"]);
        parsed.relationships = None;
        let config = ConversionConfig::default();
        assert!(matches!(
            ModelAssembler::new(&config).assemble(&parsed),
            Err(ConversionError::Import(ImportError::MissingInput("relationships")))
        ));

        let parsed = input(&["A", "a"]);
        assert!(matches!(
            ModelAssembler::new(&config).assemble(&parsed),
            Err(ConversionError::Validation(ModelValidationError::DuplicateEntity(_)))
        ));
    }
}
