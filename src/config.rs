//! Conversion configuration
//!
//! Everything a conversion run depends on besides its input. The creation
//! timestamp is the only clock the pipeline reads, so two runs with the same
//! input and configuration produce the same output.

use crate::import::parsed::ParsedApplication;
use crate::models::ApplicationType;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionConfig {
    /// Base timestamp for changelog dates of newly introduced entities
    pub creation_timestamp: DateTime<Utc>,

    /// Allow `User` and `Authority` to be declared as regular entities
    pub skip_user_management: bool,

    /// Reject entity, field and table names that are reserved words
    pub check_reserved_keywords: bool,

    /// Application every entity is attached to when the input declares none
    pub default_application: Option<DefaultApplication>,

    /// Changelog dates of entities that already exist, keyed by entity name
    pub existing_changelog_dates: BTreeMap<String, String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            creation_timestamp: Utc::now().trunc_subsecs(0),
            skip_user_management: false,
            check_reserved_keywords: true,
            default_application: None,
            existing_changelog_dates: BTreeMap::new(),
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Implicit application used for single-application imports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultApplication {
    pub base_name: String,
    #[serde(default)]
    pub application_type: ApplicationType,
    /// Extra configuration keys, e.g. `prodDatabaseType`
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl DefaultApplication {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            application_type: ApplicationType::default(),
            config: BTreeMap::new(),
        }
    }

    /// Application block owning every entity
    pub fn to_parsed(&self) -> ParsedApplication {
        let mut parsed = ParsedApplication::new(&self.base_name).with_entities(&["*"]);
        parsed.config.extend(self.config.clone());
        parsed.config.insert(
            "baseName".to_string(),
            serde_json::Value::String(self.base_name.clone()),
        );
        parsed.config.insert(
            "applicationType".to_string(),
            serde_json::Value::String(self.application_type.as_str().to_string()),
        );
        parsed
    }
}

/// Builder for ConversionConfig
#[derive(Debug, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Set the base timestamp for changelog dates
    pub fn creation_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.config.creation_timestamp = timestamp.trunc_subsecs(0);
        self
    }

    pub fn skip_user_management(mut self, skip: bool) -> Self {
        self.config.skip_user_management = skip;
        self
    }

    pub fn check_reserved_keywords(mut self, check: bool) -> Self {
        self.config.check_reserved_keywords = check;
        self
    }

    pub fn default_application(mut self, application: DefaultApplication) -> Self {
        self.config.default_application = Some(application);
        self
    }

    /// Keep the changelog date of an entity generated by an earlier run
    pub fn existing_changelog_date(
        mut self,
        entity: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        self.config
            .existing_changelog_dates
            .insert(entity.into(), date.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
