//! Advisory notices
//!
//! Notices are non-fatal. They are returned to the caller with the output
//! and mirrored as `tracing` events.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NoticeKind {
    /// `service=serviceClass` was set because another option needs a service layer
    DerivedService { trigger: String },
    /// Entities linked only by required foreign keys, sorted by name
    RequiredRelationshipCycle { entities: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(flatten)]
    pub kind: NoticeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn derived_service(entity: &str, application: &str, trigger: &str) -> Self {
        Self {
            kind: NoticeKind::DerivedService {
                trigger: trigger.to_string(),
            },
            entity: Some(entity.to_string()),
            application: Some(application.to_string()),
            message: format!(
                "The {} option is set for {}, the 'serviceClass' value for the 'service' option is added (application {})",
                trigger, entity, application
            ),
        }
    }

    pub fn required_cycle(entities: Vec<String>) -> Self {
        let message = format!(
            "Required relationships form a cycle between {}",
            entities.join(", ")
        );
        Self {
            kind: NoticeKind::RequiredRelationshipCycle { entities },
            entity: None,
            application: None,
            message,
        }
    }
}
