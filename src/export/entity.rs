//! Entity descriptor exporter
//!
//! Lowers a resolved entity to the JSON descriptor read by the code generator.
//! Struct field order is the key order of the emitted JSON.

use super::ExportError;
use super::changelog::changelog_date;
use crate::config::ConversionConfig;
use crate::models::naming::lower_first;
use crate::models::{
    BlobContent, Cardinality, DomainModel, DtoValue, Entity, EntityOptions, Field,
    PaginationValue, RelationshipEntry, RelationshipOptionBag, SearchEngine, ServiceValue,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relationship option mapped to `useJPADerivedIdentifier`
const JPA_DERIVED_IDENTIFIER: &str = "jpaDerivedIdentifier";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
    pub changelog_date: String,
    pub entity_table_name: String,
    pub dto: DtoValue,
    pub pagination: PaginationValue,
    pub service: ServiceValue,
    pub jpa_metamodel_filtering: bool,
    pub fluent_methods: bool,
    pub read_only: bool,
    pub embedded: bool,
    /// Base names of every application owning the entity
    pub applications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_root_folder: Option<String>,
    #[serde(rename = "angularJSSuffix", skip_serializing_if = "Option::is_none")]
    pub angular_js_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<SearchEngine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_server: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field_name: String,
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    /// Enum values, `KEY` or `KEY (value)`, comma-joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_values_javadocs: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type_blob_content: Option<BlobContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_validate_rules: Vec<String>,
    /// `fieldValidateRulesMaxlength` and friends, one per valued rule
    #[serde(flatten)]
    pub field_validate_rule_values: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDescriptor {
    pub relationship_type: Cardinality,
    pub relationship_name: String,
    pub other_entity_name: String,
    pub other_entity_relationship_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_side: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_validate_rules: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(rename = "useJPADerivedIdentifier", skip_serializing_if = "Option::is_none")]
    pub use_jpa_derived_identifier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_with_built_in_entity: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: RelationshipOptionBag,
}

/// Exporter for entity descriptors
pub struct EntityExporter;

impl EntityExporter {
    /// Lower one entity as seen from one of its applications
    ///
    /// # Arguments
    ///
    /// * `model` - The assembled model, used for enum lookups and ownership
    /// * `entity` - The entity to lower
    /// * `relationships` - Resolved entries attached to `entity`
    /// * `options` - Effective options of `entity` in this application
    /// * `config` - Supplies the changelog clock
    pub fn export_entity(
        model: &DomainModel,
        entity: &Entity,
        relationships: &[RelationshipEntry],
        options: &EntityOptions,
        config: &ConversionConfig,
    ) -> Result<EntityDescriptor, ExportError> {
        let fields = entity
            .fields
            .iter()
            .map(|field| Self::export_field(model, &entity.name, field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntityDescriptor {
            name: entity.name.clone(),
            fields,
            relationships: relationships.iter().map(Self::export_relationship).collect(),
            changelog_date: changelog_date(entity, config)?,
            entity_table_name: entity.table_name.clone(),
            dto: options.dto,
            pagination: options.pagination,
            service: options.service,
            jpa_metamodel_filtering: options.jpa_metamodel_filtering,
            fluent_methods: options.fluent_methods,
            read_only: options.read_only,
            embedded: options.embedded,
            applications: model
                .applications_of(&entity.name)
                .map(|application| application.base_name.clone())
                .collect(),
            javadoc: entity.comment.clone(),
            microservice_name: options.microservice_name.clone(),
            client_root_folder: options.client_root_folder.clone(),
            angular_js_suffix: options.angular_suffix.clone(),
            search_engine: (options.search_engine != SearchEngine::No)
                .then_some(options.search_engine),
            skip_client: options.skip_client.then_some(true),
            skip_server: options.skip_server.then_some(true),
        })
    }

    pub fn export_field(
        model: &DomainModel,
        entity: &str,
        field: &Field,
    ) -> Result<FieldDescriptor, ExportError> {
        let (field_values, field_values_javadocs) = match field.field_type.enum_name() {
            Some(name) => {
                let jdl_enum = model.get_enum(name).ok_or_else(|| ExportError::UnknownEnum {
                    entity: entity.to_string(),
                    field: field.name.clone(),
                    enum_name: name.to_string(),
                })?;
                let javadocs = jdl_enum.has_value_comments().then(|| {
                    jdl_enum
                        .values
                        .iter()
                        .filter_map(|value| {
                            value
                                .comment
                                .clone()
                                .map(|comment| (value.key.clone(), comment))
                        })
                        .collect()
                });
                (Some(jdl_enum.joined_values()), javadocs)
            }
            None => (None, None),
        };

        let mut field_validate_rules = Vec::with_capacity(field.validations.len());
        let mut field_validate_rule_values = BTreeMap::new();
        for validation in &field.validations {
            field_validate_rules.push(validation.kind.as_str().to_string());
            if let Some(value) = &validation.value {
                field_validate_rule_values.insert(validation.kind.descriptor_key(), value.to_json());
            }
        }

        Ok(FieldDescriptor {
            field_name: field.name.clone(),
            field_type: field.field_type.descriptor_name().to_string(),
            javadoc: field.comment.clone(),
            field_values,
            field_values_javadocs,
            field_type_blob_content: field.field_type.blob_content(),
            field_validate_rules,
            field_validate_rule_values,
            options: field.options.clone(),
        })
    }

    pub fn export_relationship(entry: &RelationshipEntry) -> RelationshipDescriptor {
        let use_jpa_derived_identifier = entry
            .options
            .get(JPA_DERIVED_IDENTIFIER)
            .and_then(serde_json::Value::as_bool)
            .filter(|derived| *derived);
        let options: RelationshipOptionBag = entry
            .options
            .iter()
            .filter(|(key, _)| key.as_str() != JPA_DERIVED_IDENTIFIER)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        RelationshipDescriptor {
            relationship_type: entry.relationship_type,
            relationship_name: entry.relationship_name.clone(),
            other_entity_name: lower_first(&entry.other_entity),
            other_entity_relationship_name: entry.other_entity_relationship_name.clone(),
            other_entity_field: entry.other_entity_field.clone(),
            owner_side: entry.owner_side,
            relationship_validate_rules: entry.required.then(|| "required".to_string()),
            javadoc: entry.comment.clone(),
            use_jpa_derived_identifier,
            relationship_with_built_in_entity: entry.with_built_in_entity.then_some(true),
            options,
        }
    }
}
