//! The domain model graph
//!
//! [`DomainModel`] owns every converted collection. It is filled by the
//! assembler, then read by the resolvers and the lowering stage. Nothing is
//! removed once added.

use super::application::Application;
use super::deployment::Deployment;
use super::entity::Entity;
use super::jdl_enum::JdlEnum;
use super::option::JdlOption;
use super::relationship::Relationship;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainModel {
    pub entities: Vec<Entity>,
    pub enums: Vec<JdlEnum>,
    pub relationships: Vec<Relationship>,
    /// Global options, in declaration order
    pub options: Vec<JdlOption>,
    pub applications: Vec<Application>,
    pub deployments: Vec<Deployment>,
}

impl DomainModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn add_enum(&mut self, jdl_enum: JdlEnum) {
        self.enums.push(jdl_enum);
    }

    /// Add a relationship unless an identical declaration is already present
    ///
    /// Returns `false` when the relationship was a duplicate.
    pub fn add_relationship(&mut self, relationship: Relationship) -> bool {
        if self.relationships.iter().any(|r| r.id == relationship.id) {
            return false;
        }
        self.relationships.push(relationship);
        true
    }

    pub fn relationship(&self, id: Uuid) -> Option<&Relationship> {
        self.relationships.iter().find(|relationship| relationship.id == id)
    }

    pub fn add_option(&mut self, option: JdlOption) {
        self.options.push(option);
    }

    pub fn add_application(&mut self, application: Application) {
        self.applications.push(application);
    }

    pub fn add_deployment(&mut self, deployment: Deployment) {
        self.deployments.push(deployment);
    }

    /// Look up an entity by its exact declared name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    pub fn has_entity(&self, name: &str) -> bool {
        self.entity(name).is_some()
    }

    pub fn get_enum(&self, name: &str) -> Option<&JdlEnum> {
        self.enums.iter().find(|jdl_enum| jdl_enum.name == name)
    }

    pub fn application(&self, base_name: &str) -> Option<&Application> {
        self.applications
            .iter()
            .find(|application| application.base_name == base_name)
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|entity| entity.name.as_str())
    }

    /// Applications owning `entity`, in application declaration order
    pub fn applications_of<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Application> {
        self.applications
            .iter()
            .filter(move |application| application.owns(entity))
    }

    /// Entities that belong to no application and will not be lowered
    pub fn unattached_entities(&self) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|entity| self.applications_of(&entity.name).next().is_none())
            .map(|entity| entity.name.as_str())
            .collect()
    }
}
