//! Lowering stage
//!
//! Walks the resolved model and produces the complete [`JdlExport`]: one
//! entity descriptor per `(application, entity)` pair, plus application and
//! deployment configuration.

use super::application::{ApplicationExporter, DeploymentExporter};
use super::entity::{EntityDescriptor, EntityExporter};
use super::ExportError;
use crate::config::ConversionConfig;
use crate::models::{DomainModel, Notice};
use crate::resolve::{ResolvedOptions, ResolvedRelationships};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Output of a conversion run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdlExport {
    /// Entity descriptors by application base name, in entity declaration order
    pub entities: BTreeMap<String, Vec<EntityDescriptor>>,
    /// Application configuration by base name
    pub applications: BTreeMap<String, serde_json::Value>,
    /// Deployment configuration by deployment type
    pub deployments: BTreeMap<String, serde_json::Value>,
    /// Advisory notices raised during the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

impl JdlExport {
    /// Descriptors lowered for one application
    pub fn entities_of(&self, application: &str) -> &[EntityDescriptor] {
        self.entities
            .get(application)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn entity(&self, application: &str, entity: &str) -> Option<&EntityDescriptor> {
        self.entities_of(application)
            .iter()
            .find(|descriptor| descriptor.name == entity)
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::SerializationError(e.to_string()))
    }

    /// Pretty JSON of a single entity descriptor, as written to `.jhipster/<Entity>.json`
    pub fn entity_json_pretty(
        &self,
        application: &str,
        entity: &str,
    ) -> Result<Option<String>, ExportError> {
        self.entity(application, entity)
            .map(|descriptor| {
                serde_json::to_string_pretty(descriptor)
                    .map_err(|e| ExportError::SerializationError(e.to_string()))
            })
            .transpose()
    }
}

/// Lower a resolved model
///
/// Entities owned by no application are skipped.
pub fn lower(
    model: &DomainModel,
    relationships: &ResolvedRelationships,
    options: &ResolvedOptions,
    config: &ConversionConfig,
) -> Result<JdlExport, ExportError> {
    let mut export = JdlExport::default();

    for application in &model.applications {
        let mut descriptors = Vec::with_capacity(application.entity_names.len());
        for name in &application.entity_names {
            let entity = model
                .entity(name)
                .ok_or_else(|| ExportError::UnknownEntity(name.clone()))?;
            let entity_options = options
                .options_for(&application.base_name, name)
                .ok_or_else(|| ExportError::UnresolvedOptions {
                    application: application.base_name.clone(),
                    entity: name.clone(),
                })?;
            descriptors.push(EntityExporter::export_entity(
                model,
                entity,
                relationships.entries_for(name),
                entity_options,
                config,
            )?);
        }
        debug!(
            application = %application.base_name,
            entities = descriptors.len(),
            "Lowered application entities"
        );

        export
            .entities
            .insert(application.base_name.clone(), descriptors);
        export.applications.insert(
            application.base_name.clone(),
            ApplicationExporter::export_application(application),
        );
    }

    for deployment in &model.deployments {
        export.deployments.insert(
            deployment.deployment_type.as_str().to_string(),
            DeploymentExporter::export_deployment(deployment),
        );
    }

    export.notices.extend(relationships.notices.iter().cloned());
    export.notices.extend(options.notices.iter().cloned());
    Ok(export)
}
