//! Enumeration model

use serde::{Deserialize, Serialize};

/// One value of an enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub key: String,
    /// Custom value, e.g. `FRENCH (french)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl EnumValue {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            comment: None,
        }
    }

    /// `KEY` or `KEY (value)`, the form joined into `fieldValues`
    pub fn descriptor_form(&self) -> String {
        match &self.value {
            Some(value) => format!("{} ({})", self.key, value),
            None => self.key.clone(),
        }
    }
}

/// A JDL enumeration with its ordered values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdlEnum {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub values: Vec<EnumValue>,
}

impl JdlEnum {
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            values,
        }
    }

    /// Comma-joined value list as written to `fieldValues`
    pub fn joined_values(&self) -> String {
        self.values
            .iter()
            .map(EnumValue::descriptor_form)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn has_value_comments(&self) -> bool {
        self.values.iter().any(|v| v.comment.is_some())
    }
}
