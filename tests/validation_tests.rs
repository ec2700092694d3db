//! Model assembly and validation tests

use jdl_core::config::{ConversionConfig, DefaultApplication};
use jdl_core::convert::ConversionError;
use jdl_core::import::ImportError;
use jdl_core::import::parsed::{
    ParsedApplication, ParsedEntity, ParsedEnum, ParsedEnumValue, ParsedField, ParsedJdl,
    ParsedRelationship, ParsedRelationshipSide, ParsedValidation,
};
use jdl_core::model::ModelAssembler;
use jdl_core::models::Cardinality;
use jdl_core::validation::ModelValidationError;
use serde_json::json;
use std::collections::BTreeMap;

fn config() -> ConversionConfig {
    ConversionConfig::builder()
        .default_application(DefaultApplication::new("app"))
        .build()
}

fn entity(name: &str, fields: &[(&str, &str)]) -> ParsedEntity {
    let mut entity = ParsedEntity::new(name);
    entity.body = fields
        .iter()
        .map(|(field, field_type)| ParsedField::new(*field, *field_type))
        .collect();
    entity
}

fn input(entities: Vec<ParsedEntity>) -> ParsedJdl {
    let mut parsed = ParsedJdl::new();
    parsed.entities = Some(entities);
    parsed
}

fn assemble(parsed: &ParsedJdl) -> Result<(), ConversionError> {
    ModelAssembler::new(&config()).assemble(parsed).map(|_| ())
}

fn validation_error(parsed: &ParsedJdl) -> ModelValidationError {
    match assemble(parsed) {
        Err(ConversionError::Validation(error)) => error,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

fn import_error(parsed: &ParsedJdl) -> ImportError {
    match assemble(parsed) {
        Err(ConversionError::Import(error)) => error,
        other => panic!("expected an import error, got {:?}", other),
    }
}

mod declaration_tests {
    use super::*;

    #[test]
    fn test_duplicate_entity() {
        let parsed = input(vec![entity("A", &[]), entity("A", &[])]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::DuplicateEntity("A".to_string())
        );
    }

    #[test]
    fn test_duplicate_field() {
        let parsed = input(vec![entity("A", &[("name", "String"), ("name", "Integer")])]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::DuplicateField {
                entity: "A".to_string(),
                field: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_enum() {
        let language = ParsedEnum {
            name: "Language".to_string(),
            javadoc: None,
            values: vec![ParsedEnumValue {
                key: "FRENCH".to_string(),
                value: None,
                comment: None,
            }],
        };
        let mut parsed = input(Vec::new());
        parsed.enums = Some(vec![language.clone(), language]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::DuplicateEnum("Language".to_string())
        );
    }

    #[test]
    fn test_duplicate_relationships_collapse() {
        let declaration = ParsedRelationship::new(
            Cardinality::ManyToOne,
            ParsedRelationshipSide::new("A").injected("b"),
            ParsedRelationshipSide::new("B"),
        );
        let mut parsed = input(vec![entity("A", &[]), entity("B", &[])]);
        parsed.relationships = Some(vec![declaration.clone(), declaration]);

        let assembled = ModelAssembler::new(&config()).assemble(&parsed).unwrap();
        assert_eq!(assembled.model.relationships.len(), 1);
        assert_eq!(assembled.duplicate_relationships, 1);
    }

    #[test]
    fn test_duplicate_relationship_with_different_sides() {
        let declaration = ParsedRelationship::new(
            Cardinality::OneToMany,
            ParsedRelationshipSide::new("A").injected("bs"),
            ParsedRelationshipSide::new("B"),
        );
        let mut commented = declaration.clone();
        commented.to.javadoc = Some("Owning side".to_string());
        let mut parsed = input(vec![entity("A", &[]), entity("B", &[])]);
        parsed.relationships = Some(vec![declaration, commented]);

        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::ConflictingRelationship("one-to-many A{bs} to B".to_string())
        );
    }

    #[test]
    fn test_unknown_relationship_target() {
        let mut parsed = input(vec![entity("A", &[])]);
        parsed.relationships = Some(vec![ParsedRelationship::new(
            Cardinality::OneToMany,
            ParsedRelationshipSide::new("A").injected("items"),
            ParsedRelationshipSide::new("Item"),
        )]);
        match validation_error(&parsed) {
            ModelValidationError::UnknownRelationshipTarget { entity, .. } => {
                assert_eq!(entity, "Item")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_collection() {
        let mut parsed = input(Vec::new());
        parsed.relationships = None;
        assert_eq!(
            import_error(&parsed),
            ImportError::MissingInput("relationships")
        );
    }
}

mod built_in_tests {
    use super::*;

    #[test]
    fn test_declaring_user_collides() {
        let parsed = input(vec![entity("User", &[("login", "String")])]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::BuiltInEntityCollision("User".to_string())
        );
    }

    #[test]
    fn test_skip_user_management_allows_user() {
        let mut user = entity("User", &[("login", "String")]);
        user.table_name = Some("jhi_user".to_string());
        let parsed = input(vec![user]);
        let config = ConversionConfig::builder()
            .default_application(DefaultApplication::new("app"))
            .skip_user_management(true)
            .build();
        assert!(ModelAssembler::new(&config).assemble(&parsed).is_ok());
    }

    #[test]
    fn test_owning_application_skips_user_management() {
        let mut parsed = input(vec![entity("Authority", &[("label", "String")])]);
        let mut application = ParsedApplication::new("store").with_entities(&["*"]);
        application
            .config
            .insert("skipUserManagement".to_string(), json!(true));
        parsed.applications = vec![application];
        assert!(assemble(&parsed).is_ok());
    }
}

mod reserved_word_tests {
    use super::*;

    #[test]
    fn test_reserved_entity_name() {
        let parsed = input(vec![entity("Class", &[])]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::ReservedEntityName("Class".to_string())
        );
    }

    #[test]
    fn test_reserved_field_name() {
        let parsed = input(vec![entity("Ticket", &[("public", "Boolean")])]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::ReservedFieldName {
                entity: "Ticket".to_string(),
                field: "public".to_string(),
            }
        );
    }

    #[test]
    fn test_reserved_table_name_for_database() {
        let parsed = input(vec![entity("Order", &[("total", "BigDecimal")])]);
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::ReservedTableName {
                entity: "Order".to_string(),
                table: "order".to_string(),
                database: "mysql".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_table_name_avoids_reserved_word() {
        let mut order = entity("Order", &[("total", "BigDecimal")]);
        order.table_name = Some("jhi_order".to_string());
        assert!(assemble(&input(vec![order])).is_ok());
    }

    #[test]
    fn test_reserved_checks_can_be_disabled() {
        let parsed = input(vec![entity("Order", &[("public", "Boolean")])]);
        let config = ConversionConfig::builder()
            .default_application(DefaultApplication::new("app"))
            .check_reserved_keywords(false)
            .build();
        assert!(ModelAssembler::new(&config).assemble(&parsed).is_ok());
    }
}

mod application_tests {
    use super::*;

    #[test]
    fn test_duplicate_application() {
        let mut parsed = input(vec![entity("A", &[])]);
        parsed.applications = vec![
            ParsedApplication::new("store"),
            ParsedApplication::new("store"),
        ];
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::DuplicateApplication("store".to_string())
        );
    }

    #[test]
    fn test_application_lists_undeclared_entity() {
        let mut parsed = input(vec![entity("A", &[])]);
        parsed.applications = vec![ParsedApplication::new("store").with_entities(&["A", "Z"])];
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::UnknownApplicationEntity {
                application: "store".to_string(),
                entity: "Z".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_base_name() {
        let mut parsed = input(Vec::new());
        parsed.applications = vec![ParsedApplication {
            config: BTreeMap::new(),
            entities: Default::default(),
            options: Default::default(),
            use_options: Vec::new(),
        }];
        assert_eq!(import_error(&parsed), ImportError::MissingBaseName);
    }

    #[test]
    fn test_unknown_application_type() {
        let mut application = ParsedApplication::new("store");
        application
            .config
            .insert("applicationType".to_string(), json!("desktop"));
        let mut parsed = input(Vec::new());
        parsed.applications = vec![application];
        assert!(matches!(
            import_error(&parsed),
            ImportError::UnknownApplicationType { .. }
        ));
    }

    #[test]
    fn test_duplicate_deployment() {
        let mut deployment = BTreeMap::new();
        deployment.insert("deploymentType".to_string(), json!("kubernetes"));
        let mut parsed = input(Vec::new());
        parsed.deployments = vec![deployment.clone(), deployment];
        assert_eq!(
            validation_error(&parsed),
            ModelValidationError::DuplicateDeployment("kubernetes".to_string())
        );
    }
}

mod field_tests {
    use super::*;

    #[test]
    fn test_unknown_field_type() {
        let parsed = input(vec![entity("A", &[("size", "Shoe")])]);
        assert_eq!(
            import_error(&parsed),
            ImportError::UnknownFieldType {
                entity: "A".to_string(),
                field: "size".to_string(),
                field_type: "Shoe".to_string(),
            }
        );
    }

    #[test]
    fn test_validation_not_accepted_by_type() {
        let mut a = entity("A", &[]);
        let mut count = ParsedField::new("count", "Integer");
        count
            .validations
            .push(ParsedValidation::with_value("minlength", 1));
        a.body.push(count);
        assert!(matches!(
            import_error(&input(vec![a])),
            ImportError::UnsupportedValidationForType { .. }
        ));
    }

    #[test]
    fn test_enum_field_is_accepted() {
        let mut parsed = input(vec![entity("A", &[("language", "Language")])]);
        parsed.enums = Some(vec![ParsedEnum {
            name: "Language".to_string(),
            javadoc: None,
            values: vec![ParsedEnumValue {
                key: "FRENCH".to_string(),
                value: Some("fr".to_string()),
                comment: None,
            }],
        }]);

        let assembled = ModelAssembler::new(&config()).assemble(&parsed).unwrap();
        let field = &assembled.model.entities[0].fields[0];
        assert_eq!(field.field_type.enum_name(), Some("Language"));
    }
}
