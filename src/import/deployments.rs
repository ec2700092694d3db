//! Deployment converter

use super::parsed::ParsedDeployment;
use super::ImportError;
use crate::models::{Deployment, DeploymentType};
use serde_json::{Value, json};

pub fn convert_deployments(parsed: &[ParsedDeployment]) -> Result<Vec<Deployment>, ImportError> {
    parsed.iter().map(convert_deployment).collect()
}

fn convert_deployment(parsed: &ParsedDeployment) -> Result<Deployment, ImportError> {
    let deployment_type = match parsed.get("deploymentType") {
        None => DeploymentType::default(),
        Some(Value::String(raw)) => DeploymentType::from_jdl(raw)
            .ok_or_else(|| ImportError::UnknownDeploymentType(raw.clone()))?,
        Some(other) => return Err(ImportError::UnknownDeploymentType(other.to_string())),
    };

    let mut deployment = Deployment::new(deployment_type);
    deployment.apps_folders = match parsed.get("appsFolders") {
        Some(Value::Array(folders)) => folders
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(folder)) => vec![folder.clone()],
        _ => Vec::new(),
    };

    deployment.config = parsed
        .iter()
        .filter(|(key, _)| key.as_str() != "deploymentType" && key.as_str() != "appsFolders")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, value) in defaults(deployment_type) {
        deployment.config.entry(key.to_string()).or_insert(value);
    }
    Ok(deployment)
}

fn defaults(deployment_type: DeploymentType) -> Vec<(&'static str, Value)> {
    let mut defaults = vec![
        ("directoryPath", json!("../")),
        ("monitoring", json!("no")),
        ("serviceDiscoveryType", json!("eureka")),
        ("dockerRepositoryName", json!("")),
        ("dockerPushCommand", json!("docker push")),
        ("clusteredDbApps", json!([])),
    ];
    match deployment_type {
        DeploymentType::DockerCompose => {
            defaults.push(("gatewayType", json!("SpringCloudGateway")));
        }
        DeploymentType::Kubernetes => {
            defaults.push(("kubernetesNamespace", json!("default")));
            defaults.push(("kubernetesServiceType", json!("LoadBalancer")));
            defaults.push(("ingressDomain", json!("")));
            defaults.push(("istio", json!(false)));
        }
        DeploymentType::Openshift => {
            defaults.push(("openshiftNamespace", json!("default")));
            defaults.push(("storageType", json!("ephemeral")));
            defaults.push(("registryReplicas", json!(2)));
        }
    }
    defaults
}
