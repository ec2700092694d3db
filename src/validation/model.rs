//! Domain model validation
//!
//! Cross-referential checks the converters cannot make on their own. They run
//! on a fully populated [`DomainModel`] in a fixed order and stop at the first
//! violation.

use super::reserved;
use crate::models::{DomainModel, EntitySelection, JdlOption, is_built_in_entity};
use std::collections::HashSet;
use tracing::debug;

/// Referential-integrity violation found while assembling the model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelValidationError {
    #[error("The enum '{0}' is declared more than once")]
    DuplicateEnum(String),

    #[error("The entity '{0}' is declared more than once")]
    DuplicateEntity(String),

    #[error("The field '{field}' is declared more than once in entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    #[error("The entity '{0}' collides with a built-in entity, enable skipUserManagement to declare it")]
    BuiltInEntityCollision(String),

    #[error("The name '{0}' is a reserved keyword and cannot be used as an entity name")]
    ReservedEntityName(String),

    #[error("The name '{field}' is a reserved keyword and cannot be used as a field name in entity '{entity}'")]
    ReservedFieldName { entity: String, field: String },

    #[error("The table name '{table}' of entity '{entity}' is a reserved keyword for {database}")]
    ReservedTableName {
        entity: String,
        table: String,
        database: String,
    },

    #[error("The relationship '{0}' is declared more than once with different sides or options")]
    ConflictingRelationship(String),

    #[error("The relationship '{relationship}' targets the undeclared entity '{entity}'")]
    UnknownRelationshipTarget { relationship: String, entity: String },

    #[error("The application '{0}' is declared more than once")]
    DuplicateApplication(String),

    #[error("The application '{application}' lists the undeclared entity '{entity}'")]
    UnknownApplicationEntity { application: String, entity: String },

    #[error("More than one '{0}' deployment is declared")]
    DuplicateDeployment(String),

    #[error("The entity '{entity}' in the '{option}' option is not declared")]
    UnknownGlobalOptionTarget { option: String, entity: String },

    #[error("The entity '{entity}' in the '{option}' option is not declared in application '{application}'")]
    UnknownApplicationOptionTarget {
        option: String,
        entity: String,
        application: String,
    },
}

/// Model validator
///
/// Application membership (`Application::entity_names`) must already be
/// computed; the reserved table name and option checks rely on it.
#[derive(Debug, Clone)]
pub struct ModelValidator {
    check_reserved_keywords: bool,
    skip_user_management: bool,
}

impl Default for ModelValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelValidator {
    pub fn new() -> Self {
        Self {
            check_reserved_keywords: true,
            skip_user_management: false,
        }
    }

    pub fn with_reserved_keyword_checks(mut self, enabled: bool) -> Self {
        self.check_reserved_keywords = enabled;
        self
    }

    pub fn with_skip_user_management(mut self, enabled: bool) -> Self {
        self.skip_user_management = enabled;
        self
    }

    /// Run every check in order
    pub fn validate(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        self.check_declarations(model)?;
        self.check_built_in_collisions(model)?;
        if self.check_reserved_keywords {
            self.check_reserved_words(model)?;
        }
        self.check_relationship_targets(model)?;
        self.check_applications(model)?;
        self.check_deployments(model)?;
        self.check_option_targets(model)?;
        debug!(entities = model.entities.len(), "Domain model validated");
        Ok(())
    }

    /// Duplicate enums, entities (case-insensitive) and fields
    pub fn check_declarations(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        let mut enum_names = HashSet::new();
        for jdl_enum in &model.enums {
            if !enum_names.insert(jdl_enum.name.as_str()) {
                return Err(ModelValidationError::DuplicateEnum(jdl_enum.name.clone()));
            }
        }

        let mut entity_names = HashSet::new();
        for entity in &model.entities {
            if !entity_names.insert(entity.name.to_lowercase()) {
                return Err(ModelValidationError::DuplicateEntity(entity.name.clone()));
            }
            let mut field_names = HashSet::new();
            for field in &entity.fields {
                if !field_names.insert(field.name.as_str()) {
                    return Err(ModelValidationError::DuplicateField {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// `User` and `Authority` may only be declared when user management is skipped,
    /// either run-wide or by every application owning the entity
    pub fn check_built_in_collisions(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        if self.skip_user_management {
            return Ok(());
        }
        for entity in model.entities.iter().filter(|entity| entity.is_built_in()) {
            let mut owners = model.applications_of(&entity.name).peekable();
            let skipped_by_owners = owners.peek().is_some()
                && owners.all(|application| application.config_bool("skipUserManagement"));
            if !skipped_by_owners {
                return Err(ModelValidationError::BuiltInEntityCollision(entity.name.clone()));
            }
        }
        Ok(())
    }

    pub fn check_reserved_words(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        for entity in &model.entities {
            if reserved::is_reserved_entity_name(&entity.name) {
                return Err(ModelValidationError::ReservedEntityName(entity.name.clone()));
            }
            if let Some(field) = entity
                .fields
                .iter()
                .find(|field| reserved::is_reserved_field_name(&field.name))
            {
                return Err(ModelValidationError::ReservedFieldName {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                });
            }
            for database in model
                .applications_of(&entity.name)
                .filter_map(|application| application.prod_database_type())
            {
                if reserved::is_reserved_table_name(&entity.table_name, database) {
                    return Err(ModelValidationError::ReservedTableName {
                        entity: entity.name.clone(),
                        table: entity.table_name.clone(),
                        database: database.as_str().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Both ends must be declared entities or built-ins
    pub fn check_relationship_targets(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        for relationship in &model.relationships {
            for side in [&relationship.from, &relationship.to] {
                if !model.has_entity(&side.entity) && !is_built_in_entity(&side.entity) {
                    return Err(ModelValidationError::UnknownRelationshipTarget {
                        relationship: relationship.describe(),
                        entity: side.entity.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn check_applications(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        let mut base_names = HashSet::new();
        for application in &model.applications {
            if !base_names.insert(application.base_name.as_str()) {
                return Err(ModelValidationError::DuplicateApplication(
                    application.base_name.clone(),
                ));
            }
            if let Some(entity) = unknown_name(&application.entity_selection, |name| {
                model.has_entity(name)
            }) {
                return Err(ModelValidationError::UnknownApplicationEntity {
                    application: application.base_name.clone(),
                    entity,
                });
            }
        }
        Ok(())
    }

    pub fn check_deployments(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        let mut types = HashSet::new();
        for deployment in &model.deployments {
            if !types.insert(deployment.deployment_type) {
                return Err(ModelValidationError::DuplicateDeployment(
                    deployment.deployment_type.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Option targets and exclusions must exist in the scope owning the option
    ///
    /// Entity annotations are attached to their entity and need no check.
    pub fn check_option_targets(&self, model: &DomainModel) -> Result<(), ModelValidationError> {
        for option in &model.options {
            if let Some(entity) = unknown_option_name(option, |name| model.has_entity(name)) {
                return Err(ModelValidationError::UnknownGlobalOptionTarget {
                    option: option.kind().to_string(),
                    entity,
                });
            }
        }

        for application in &model.applications {
            for option in &application.options {
                if let Some(entity) = unknown_option_name(option, |name| application.owns(name)) {
                    return Err(ModelValidationError::UnknownApplicationOptionTarget {
                        option: option.kind().to_string(),
                        entity,
                        application: application.base_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn unknown_name<F>(selection: &EntitySelection, known: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    selection
        .referenced_names()
        .find(|name| !known(name.as_str()))
        .cloned()
}

fn unknown_option_name<F>(option: &JdlOption, known: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    unknown_name(&option.selection, known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Application, ApplicationType, Cardinality, Entity, Field, FieldType, OptionSetting,
        Relationship, RelationshipSide, UnaryOption,
    };
    use serde_json::json;

    fn model_with(names: &[&str]) -> DomainModel {
        let mut model = DomainModel::new();
        for (index, name) in names.iter().enumerate() {
            model.add_entity(Entity::new(*name, name.to_lowercase(), index as u32 + 1));
        }
        model
    }

    fn application(base_name: &str, entities: &[&str]) -> Application {
        let mut application = Application::new(base_name, ApplicationType::Monolith);
        let names: Vec<String> = entities.iter().map(|name| name.to_string()).collect();
        application.entity_selection = EntitySelection::from_lists(&names, &[]);
        application.entity_names = names;
        application
    }

    #[test]
    fn test_duplicate_entities_are_case_insensitive() {
        let model = model_with(&["Book", "BOOK"]);
        assert_eq!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::DuplicateEntity("BOOK".to_string()))
        );
    }

    #[test]
    fn test_duplicate_field() {
        let mut model = model_with(&["Book"]);
        model.entities[0].fields.push(Field::new("title", FieldType::String));
        model.entities[0].fields.push(Field::new("title", FieldType::Integer));
        assert!(matches!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_built_in_collision() {
        let model = model_with(&["User"]);
        assert_eq!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::BuiltInEntityCollision("User".to_string()))
        );
        assert!(
            ModelValidator::new()
                .with_skip_user_management(true)
                .validate(&model)
                .is_ok()
        );

        let mut model = model_with(&["User"]);
        let mut app = application("shop", &["User"]);
        app.config.insert("skipUserManagement".to_string(), json!(true));
        model.add_application(app);
        assert!(ModelValidator::new().validate(&model).is_ok());
    }

    #[test]
    fn test_reserved_words() {
        let model = model_with(&["Class"]);
        assert!(matches!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::ReservedEntityName(_))
        ));
        assert!(
            ModelValidator::new()
                .with_reserved_keyword_checks(false)
                .validate(&model)
                .is_ok()
        );

        let mut model = model_with(&["Order"]);
        let mut app = application("shop", &["Order"]);
        app.config
            .insert("prodDatabaseType".to_string(), json!("postgresql"));
        model.add_application(app);
        assert_eq!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::ReservedTableName {
                entity: "Order".to_string(),
                table: "order".to_string(),
                database: "postgresql".to_string(),
            })
        );
    }

    #[test]
    fn test_relationship_targets() {
        let mut model = model_with(&["A"]);
        model.add_relationship(Relationship::new(
            Cardinality::ManyToOne,
            RelationshipSide::new("A").with_injected_field("user"),
            RelationshipSide::new("User"),
        ));
        assert!(ModelValidator::new().validate(&model).is_ok());

        model.add_relationship(Relationship::new(
            Cardinality::OneToMany,
            RelationshipSide::new("A").with_injected_field("c"),
            RelationshipSide::new("C"),
        ));
        assert!(matches!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::UnknownRelationshipTarget { entity, .. }) if entity == "C"
        ));
    }

    #[test]
    fn test_application_option_target() {
        let mut model = model_with(&["A", "B", "C"]);
        let mut app = application("shop", &["A", "B"]);
        app.options.push(JdlOption::new(
            OptionSetting::Unary(UnaryOption::ReadOnly),
            EntitySelection::from_lists(&["C".to_string()], &[]),
        ));
        model.add_application(app);

        let error = ModelValidator::new().validate(&model).unwrap_err();
        assert_eq!(
            error,
            ModelValidationError::UnknownApplicationOptionTarget {
                option: "readOnly".to_string(),
                entity: "C".to_string(),
                application: "shop".to_string(),
            }
        );
        let message = error.to_string();
        assert!(message.contains("'C'") && message.contains("readOnly") && message.contains("shop"));
    }

    #[test]
    fn test_unknown_application_entity() {
        let mut model = model_with(&["A"]);
        model.add_application(application("shop", &["A", "Z"]));
        assert_eq!(
            ModelValidator::new().validate(&model),
            Err(ModelValidationError::UnknownApplicationEntity {
                application: "shop".to_string(),
                entity: "Z".to_string(),
            })
        );
    }
}
