//! Closed enumerations shared across the model
//!
//! Every string-keyed concept of the JDL (cardinalities, blob sub-kinds,
//! application and deployment types, database families) is a closed enum here
//! so resolvers and lowering can match exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship cardinality as declared from the source entity's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    #[serde(alias = "OneToOne")]
    OneToOne,
    #[serde(alias = "OneToMany")]
    OneToMany,
    #[serde(alias = "ManyToOne")]
    ManyToOne,
    #[serde(alias = "ManyToMany")]
    ManyToMany,
}

impl Cardinality {
    pub const ALL: [Cardinality; 4] = [
        Cardinality::OneToOne,
        Cardinality::OneToMany,
        Cardinality::ManyToOne,
        Cardinality::ManyToMany,
    ];

    /// Kebab-case name used in entity descriptors (`one-to-many`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::ManyToMany => "many-to-many",
        }
    }

    /// Cardinality seen from the destination entity
    pub fn inverse(&self) -> Self {
        match self {
            Cardinality::OneToOne => Cardinality::OneToOne,
            Cardinality::OneToMany => Cardinality::ManyToOne,
            Cardinality::ManyToOne => Cardinality::OneToMany,
            Cardinality::ManyToMany => Cardinality::ManyToMany,
        }
    }

    /// One-to-one and many-to-many carry an owner side
    pub fn has_owner_side(&self) -> bool {
        matches!(self, Cardinality::OneToOne | Cardinality::ManyToMany)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-kind of a binary large object field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobContent {
    Any,
    Image,
    Text,
}

impl BlobContent {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobContent::Any => "any",
            BlobContent::Image => "image",
            BlobContent::Text => "text",
        }
    }
}

/// Application flavours understood by the application converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    #[default]
    Monolith,
    Microservice,
    Gateway,
}

impl ApplicationType {
    pub fn from_jdl(value: &str) -> Option<Self> {
        match value {
            "monolith" => Some(ApplicationType::Monolith),
            "microservice" => Some(ApplicationType::Microservice),
            "gateway" => Some(ApplicationType::Gateway),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::Monolith => "monolith",
            ApplicationType::Microservice => "microservice",
            ApplicationType::Gateway => "gateway",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    #[default]
    DockerCompose,
    Kubernetes,
    Openshift,
}

impl DeploymentType {
    pub fn from_jdl(value: &str) -> Option<Self> {
        match value {
            "docker-compose" => Some(DeploymentType::DockerCompose),
            "kubernetes" => Some(DeploymentType::Kubernetes),
            "openshift" => Some(DeploymentType::Openshift),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::DockerCompose => "docker-compose",
            DeploymentType::Kubernetes => "kubernetes",
            DeploymentType::Openshift => "openshift",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Production database families, used for reserved-word checks on table names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Mysql,
    Mariadb,
    Postgresql,
    Oracle,
    Mssql,
    Cassandra,
    Mongodb,
    Couchbase,
    Neo4j,
}

impl DatabaseType {
    /// Parse a `prodDatabaseType` value; unknown or `no` yields `None`
    pub fn from_config(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "mysql" => Some(DatabaseType::Mysql),
            "mariadb" => Some(DatabaseType::Mariadb),
            "postgresql" => Some(DatabaseType::Postgresql),
            "oracle" => Some(DatabaseType::Oracle),
            "mssql" => Some(DatabaseType::Mssql),
            "cassandra" => Some(DatabaseType::Cassandra),
            "mongodb" => Some(DatabaseType::Mongodb),
            "couchbase" => Some(DatabaseType::Couchbase),
            "neo4j" => Some(DatabaseType::Neo4j),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Mysql => "mysql",
            DatabaseType::Mariadb => "mariadb",
            DatabaseType::Postgresql => "postgresql",
            DatabaseType::Oracle => "oracle",
            DatabaseType::Mssql => "mssql",
            DatabaseType::Cassandra => "cassandra",
            DatabaseType::Mongodb => "mongodb",
            DatabaseType::Couchbase => "couchbase",
            DatabaseType::Neo4j => "neo4j",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_inverse_is_involution() {
        for cardinality in Cardinality::ALL {
            assert_eq!(cardinality.inverse().inverse(), cardinality);
        }
        assert_eq!(Cardinality::OneToMany.inverse(), Cardinality::ManyToOne);
    }

    #[test]
    fn test_cardinality_accepts_jdl_keyword() {
        let parsed: Cardinality = serde_json::from_str("\"OneToMany\"").unwrap();
        assert_eq!(parsed, Cardinality::OneToMany);
        let parsed: Cardinality = serde_json::from_str("\"many-to-many\"").unwrap();
        assert_eq!(parsed, Cardinality::ManyToMany);
    }

    #[test]
    fn test_database_type_from_config() {
        assert_eq!(
            DatabaseType::from_config("postgresql"),
            Some(DatabaseType::Postgresql)
        );
        assert_eq!(DatabaseType::from_config("no"), None);
    }
}
