//! Parsed JDL input
//!
//! These structures are what the grammar (or the interactive prompt layer)
//! hands over. They mirror the raw shape of each construct and carry no
//! semantics; the converters in this module's siblings give them meaning.
//!
//! Option maps are [`IndexMap`]s: declaration order decides which of two
//! settings of the same kind wins.
//!
//! Collections on [`ParsedJdl`] are optional on purpose: a converter called
//! without its collection is a caller bug and fails with
//! [`ImportError::MissingInput`](super::ImportError::MissingInput).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the parsed input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedJdl {
    pub entities: Option<Vec<ParsedEntity>>,
    pub enums: Option<Vec<ParsedEnum>>,
    pub relationships: Option<Vec<ParsedRelationship>>,
    pub options: Option<ParsedOptions>,
    pub use_options: Option<Vec<ParsedUseOption>>,
    #[serde(default)]
    pub applications: Vec<ParsedApplication>,
    #[serde(default)]
    pub deployments: Vec<ParsedDeployment>,
    #[serde(default)]
    pub constants: BTreeMap<String, serde_json::Value>,
}

impl Default for ParsedJdl {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsedJdl {
    /// An empty input with every mandatory collection present
    pub fn new() -> Self {
        Self {
            entities: Some(Vec::new()),
            enums: Some(Vec::new()),
            relationships: Some(Vec::new()),
            options: Some(ParsedOptions::new()),
            use_options: Some(Vec::new()),
            applications: Vec::new(),
            deployments: Vec::new(),
            constants: BTreeMap::new(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Annotation or option attached to an entity, field or relationship side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAnnotation {
    pub option_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_value: Option<serde_json::Value>,
}

impl ParsedAnnotation {
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            option_name: name.into(),
            option_value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            option_name: name.into(),
            option_value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEntity {
    pub name: String,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub body: Vec<ParsedField>,
    #[serde(default)]
    pub annotations: Vec<ParsedAnnotation>,
}

impl ParsedEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            javadoc: None,
            body: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub validations: Vec<ParsedValidation>,
    #[serde(default)]
    pub options: Vec<ParsedAnnotation>,
}

impl ParsedField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            javadoc: None,
            validations: Vec::new(),
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedValidation {
    pub key: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// The value names a constant rather than a literal
    #[serde(default)]
    pub constant: bool,
}

impl ParsedValidation {
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            constant: false,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            constant: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEnumValue {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEnum {
    pub name: String,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub values: Vec<ParsedEnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRelationshipSide {
    pub name: String,
    /// Injected field, optionally with a display field: `b` or `b(name)`
    #[serde(default)]
    pub injected_field: Option<String>,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl ParsedRelationshipSide {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            injected_field: None,
            javadoc: None,
            required: false,
        }
    }

    pub fn injected(mut self, field: impl Into<String>) -> Self {
        self.injected_field = Some(field.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRelationshipOptions {
    #[serde(default)]
    pub global: Vec<ParsedAnnotation>,
    #[serde(default)]
    pub source: Vec<ParsedAnnotation>,
    #[serde(default)]
    pub destination: Vec<ParsedAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRelationship {
    pub cardinality: crate::models::Cardinality,
    pub from: ParsedRelationshipSide,
    pub to: ParsedRelationshipSide,
    #[serde(default)]
    pub options: ParsedRelationshipOptions,
}

impl ParsedRelationship {
    pub fn new(
        cardinality: crate::models::Cardinality,
        from: ParsedRelationshipSide,
        to: ParsedRelationshipSide,
    ) -> Self {
        Self {
            cardinality,
            from,
            to,
            options: ParsedRelationshipOptions::default(),
        }
    }
}

/// Entity list of an option or application, `*` allowed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParsedEntityList {
    pub list: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl ParsedEntityList {
    pub fn of(list: &[&str]) -> Self {
        Self {
            list: list.iter().map(|name| name.to_string()).collect(),
            excluded: Vec::new(),
        }
    }

    pub fn except(mut self, excluded: &[&str]) -> Self {
        self.excluded = excluded.iter().map(|name| name.to_string()).collect();
        self
    }
}

/// Raw option payload: `{list, excluded}` for unary options,
/// `{value: {list, excluded}}` for binary ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedOptionValue {
    Unary(ParsedEntityList),
    Binary(ParsedOptionValues),
}

/// Values of one binary option, in declaration order
pub type ParsedOptionValues = IndexMap<String, ParsedEntityList>;

/// Option declarations keyed by option name, in declaration order
pub type ParsedOptions = IndexMap<String, ParsedOptionValue>;

/// `use mapstruct, serviceImpl for * except C`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUseOption {
    pub option_values: Vec<String>,
    #[serde(default)]
    pub list: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    /// Number of option map entries declared before this clause; `None`
    /// places it after all of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl ParsedUseOption {
    pub fn new(presets: &[&str], list: &[&str]) -> Self {
        Self {
            option_values: presets.iter().map(|preset| preset.to_string()).collect(),
            list: list.iter().map(|name| name.to_string()).collect(),
            excluded: Vec::new(),
            position: None,
        }
    }

    pub fn except(mut self, excluded: &[&str]) -> Self {
        self.excluded = excluded.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedApplicationEntities {
    #[serde(default)]
    pub entity_list: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedApplication {
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub entities: ParsedApplicationEntities,
    #[serde(default)]
    pub options: ParsedOptions,
    #[serde(default)]
    pub use_options: Vec<ParsedUseOption>,
}

impl ParsedApplication {
    pub fn new(base_name: &str) -> Self {
        let mut config = BTreeMap::new();
        config.insert(
            "baseName".to_string(),
            serde_json::Value::String(base_name.to_string()),
        );
        Self {
            config,
            entities: ParsedApplicationEntities::default(),
            options: ParsedOptions::new(),
            use_options: Vec::new(),
        }
    }

    pub fn with_entities(mut self, entities: &[&str]) -> Self {
        self.entities.entity_list = entities.iter().map(|name| name.to_string()).collect();
        self
    }
}

/// Flat key/value bag of a deployment block
pub type ParsedDeployment = BTreeMap<String, serde_json::Value>;
