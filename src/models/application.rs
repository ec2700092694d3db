//! Application model

use super::enums::{ApplicationType, DatabaseType};
use super::option::{EntitySelection, JdlOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration bag of an application, keyed like `.yo-rc.json`
pub type ApplicationConfig = BTreeMap<String, serde_json::Value>;

/// An application block: configuration, owned entities and scoped options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub base_name: String,
    pub application_type: ApplicationType,
    pub config: ApplicationConfig,
    /// Entity selection as declared (`entities * except C`)
    pub entity_selection: EntitySelection,
    /// Owned entity names in model declaration order, filled in by the assembler
    #[serde(default)]
    pub entity_names: Vec<String>,
    /// Options scoped to this application, in declaration order
    #[serde(default)]
    pub options: Vec<JdlOption>,
}

impl Application {
    pub fn new(base_name: impl Into<String>, application_type: ApplicationType) -> Self {
        Self {
            base_name: base_name.into(),
            application_type,
            config: ApplicationConfig::new(),
            entity_selection: EntitySelection::default(),
            entity_names: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn owns(&self, entity: &str) -> bool {
        self.entity_names.iter().any(|name| name == entity)
    }

    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(|value| value.as_str())
    }

    pub fn config_bool(&self, key: &str) -> bool {
        self.config
            .get(key)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    pub fn prod_database_type(&self) -> Option<DatabaseType> {
        self.config_str("prodDatabaseType")
            .and_then(DatabaseType::from_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_accessors() {
        let mut app = Application::new("shop", ApplicationType::Monolith);
        app.config
            .insert("prodDatabaseType".to_string(), json!("postgresql"));
        app.config.insert("skipUserManagement".to_string(), json!(true));
        assert_eq!(app.prod_database_type(), Some(DatabaseType::Postgresql));
        assert!(app.config_bool("skipUserManagement"));
        assert!(!app.config_bool("missing"));
    }
}
