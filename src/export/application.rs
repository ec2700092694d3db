//! Application and deployment configuration exporters
//!
//! Both are written under a `generator-jhipster` key, the layout of the
//! generator's project configuration file.

use crate::models::{Application, Deployment};
use serde_json::{Map, Value};

/// Key wrapping the generator configuration
pub const GENERATOR_KEY: &str = "generator-jhipster";

/// Exporter for application configuration
pub struct ApplicationExporter;

impl ApplicationExporter {
    /// Application configuration with its owned entity names
    pub fn export_application(application: &Application) -> Value {
        let mut config: Map<String, Value> = application
            .config
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        config.insert(
            "baseName".to_string(),
            Value::String(application.base_name.clone()),
        );
        config.insert(
            "entities".to_string(),
            Value::Array(
                application
                    .entity_names
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        );
        wrap(config)
    }
}

/// Exporter for deployment configuration
pub struct DeploymentExporter;

impl DeploymentExporter {
    pub fn export_deployment(deployment: &Deployment) -> Value {
        let mut config: Map<String, Value> = deployment
            .config
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        config.insert(
            "deploymentType".to_string(),
            Value::String(deployment.deployment_type.as_str().to_string()),
        );
        config.insert(
            "appsFolders".to_string(),
            Value::Array(
                deployment
                    .apps_folders
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        );
        wrap(config)
    }
}

fn wrap(config: Map<String, Value>) -> Value {
    let mut root = Map::new();
    root.insert(GENERATOR_KEY.to_string(), Value::Object(config));
    Value::Object(root)
}
