//! Deployment model

use super::enums::DeploymentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A deployment block. It has no cross-entity invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub deployment_type: DeploymentType,
    /// Application folders to deploy
    #[serde(default)]
    pub apps_folders: Vec<String>,
    /// Infrastructure settings (namespace, replicas, repository name, ...)
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl Deployment {
    pub fn new(deployment_type: DeploymentType) -> Self {
        Self {
            deployment_type,
            apps_folders: Vec::new(),
            config: BTreeMap::new(),
        }
    }
}
