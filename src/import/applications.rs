//! Application converter
//!
//! Turns application blocks into [`Application`] values. Configuration keys
//! that were not written in the block are filled with the defaults for the
//! application type; explicit keys are never overridden.

use super::options::convert_options;
use super::parsed::ParsedApplication;
use super::ImportError;
use crate::models::{Application, ApplicationConfig, ApplicationType, EntitySelection};
use serde_json::{Value, json};

const DEFAULT_PACKAGE_NAME: &str = "com.mycompany.myapp";

pub fn convert_applications(parsed: &[ParsedApplication]) -> Result<Vec<Application>, ImportError> {
    parsed.iter().map(convert_application).collect()
}

fn convert_application(parsed: &ParsedApplication) -> Result<Application, ImportError> {
    let base_name = parsed
        .config
        .get("baseName")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ImportError::MissingBaseName)?
        .to_string();

    let application_type = match parsed.config.get("applicationType") {
        None => ApplicationType::default(),
        Some(Value::String(raw)) => ApplicationType::from_jdl(raw).ok_or_else(|| {
            ImportError::UnknownApplicationType {
                base_name: base_name.clone(),
                application_type: raw.clone(),
            }
        })?,
        Some(other) => {
            return Err(ImportError::UnknownApplicationType {
                base_name,
                application_type: other.to_string(),
            });
        }
    };

    let mut application = Application::new(base_name, application_type);
    application.config = parsed.config.clone();
    fill_defaults(&mut application.config, application_type);
    application.entity_selection =
        EntitySelection::from_lists(&parsed.entities.entity_list, &parsed.entities.excluded);

    application.options = convert_options(Some(&parsed.options), Some(&parsed.use_options))?;

    Ok(application)
}

fn fill_defaults(config: &mut ApplicationConfig, application_type: ApplicationType) {
    let microservice = application_type == ApplicationType::Microservice;

    let package_name = config
        .get("packageName")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PACKAGE_NAME)
        .to_string();
    let server_port = if microservice { 8081 } else { 8080 };
    let service_discovery = match application_type {
        ApplicationType::Monolith => "no",
        ApplicationType::Microservice | ApplicationType::Gateway => "eureka",
    };
    let cache_provider = match application_type {
        ApplicationType::Monolith => "ehcache",
        ApplicationType::Microservice | ApplicationType::Gateway => "hazelcast",
    };

    let defaults = [
        ("applicationType", json!(application_type.as_str())),
        ("packageName", json!(package_name)),
        ("packageFolder", json!(package_name.replace('.', "/"))),
        ("serverPort", json!(server_port)),
        ("authenticationType", json!("jwt")),
        ("buildTool", json!("maven")),
        ("databaseType", json!("sql")),
        ("devDatabaseType", json!("h2Disk")),
        ("prodDatabaseType", json!("mysql")),
        ("cacheProvider", json!(cache_provider)),
        ("enableHibernateCache", json!(true)),
        ("serviceDiscoveryType", json!(service_discovery)),
        ("clientFramework", json!("angularX")),
        ("clientPackageManager", json!("npm")),
        ("enableTranslation", json!(true)),
        ("nativeLanguage", json!("en")),
        ("languages", json!(["en"])),
        ("jhiPrefix", json!("jhi")),
        ("dtoSuffix", json!("DTO")),
        ("entitySuffix", json!("")),
        ("searchEngine", json!(false)),
        ("messageBroker", json!(false)),
        ("websocket", json!(false)),
        ("testFrameworks", json!([])),
        ("skipClient", json!(microservice)),
        ("skipServer", json!(false)),
        ("skipUserManagement", json!(microservice)),
    ];

    for (key, value) in defaults {
        config.entry(key.to_string()).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parsed::{ParsedEntityList, ParsedOptionValue, ParsedUseOption};

    #[test]
    fn test_monolith_defaults() {
        let parsed = ParsedApplication::new("shop").with_entities(&["*"]);
        let applications = convert_applications(&[parsed]).unwrap();
        let app = &applications[0];
        assert_eq!(app.base_name, "shop");
        assert_eq!(app.application_type, ApplicationType::Monolith);
        assert_eq!(app.config["serverPort"], json!(8080));
        assert_eq!(app.config["packageFolder"], json!("com/mycompany/myapp"));
        assert!(app.entity_selection.wildcard);
    }

    #[test]
    fn test_explicit_keys_win() {
        let mut parsed = ParsedApplication::new("billing");
        parsed
            .config
            .insert("applicationType".to_string(), json!("microservice"));
        parsed
            .config
            .insert("prodDatabaseType".to_string(), json!("postgresql"));
        parsed
            .config
            .insert("packageName".to_string(), json!("org.acme.billing"));

        let app = &convert_applications(&[parsed]).unwrap()[0];
        assert_eq!(app.application_type, ApplicationType::Microservice);
        assert_eq!(app.config["prodDatabaseType"], json!("postgresql"));
        assert_eq!(app.config["serverPort"], json!(8081));
        assert_eq!(app.config["packageFolder"], json!("org/acme/billing"));
        assert_eq!(app.config["skipClient"], json!(true));
    }

    #[test]
    fn test_scoped_options() {
        let mut parsed = ParsedApplication::new("shop").with_entities(&["A", "B"]);
        parsed.options.insert(
            "skipClient".to_string(),
            ParsedOptionValue::Unary(ParsedEntityList::of(&["A"])),
        );
        parsed
            .use_options
            .push(ParsedUseOption::new(&["pagination"], &["B"]));
        let app = &convert_applications(&[parsed]).unwrap()[0];
        assert_eq!(app.options.len(), 2);
        assert!(app.options[1].selection.selects("B"));
    }

    #[test]
    fn test_errors() {
        let mut nameless = ParsedApplication::new("x");
        nameless.config.remove("baseName");
        assert_eq!(
            convert_applications(&[nameless]),
            Err(ImportError::MissingBaseName)
        );

        let mut unknown = ParsedApplication::new("x");
        unknown
            .config
            .insert("applicationType".to_string(), json!("uaa"));
        assert!(matches!(
            convert_applications(&[unknown]),
            Err(ImportError::UnknownApplicationType { .. })
        ));
    }
}
