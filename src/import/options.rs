//! Option converter
//!
//! Handles the three places options come from: the global option map
//! (`dto * with mapstruct except C`), `use` clauses with their presets, and
//! annotations on entity declarations. All of them end up as closed
//! [`OptionSetting`] values.

use super::parsed::{ParsedOptionValue, ParsedOptions, ParsedUseOption};
use super::ImportError;
use crate::models::{
    BinaryOption, BinaryOptionKind, DtoValue, EntitySelection, JdlOption, OptionSetting,
    PaginationValue, SearchEngine, ServiceValue, UnaryOption,
};
use serde_json::Value;
use tracing::debug;

/// Convert an option map and its `use` clauses into options, one per
/// `(setting, selection)` pair, in declaration order
///
/// Each `use` clause is placed before the option map entry at its
/// `position`; clauses without one come last.
pub fn convert_options(
    parsed: Option<&ParsedOptions>,
    use_options: Option<&[ParsedUseOption]>,
) -> Result<Vec<JdlOption>, ImportError> {
    let parsed = parsed.ok_or(ImportError::MissingInput("options"))?;
    let use_options = use_options.ok_or(ImportError::MissingInput("use options"))?;
    let mut options = Vec::new();

    for (index, (name, value)) in parsed.iter().enumerate() {
        for use_option in use_options.iter().filter(|u| u.position == Some(index)) {
            push_use_option(use_option, &mut options)?;
        }
        push_option(name, value, &mut options)?;
    }
    for use_option in use_options
        .iter()
        .filter(|u| u.position.is_none_or(|position| position >= parsed.len()))
    {
        push_use_option(use_option, &mut options)?;
    }

    debug!(count = options.len(), "Converted options");
    Ok(options)
}

fn push_option(
    name: &str,
    value: &ParsedOptionValue,
    options: &mut Vec<JdlOption>,
) -> Result<(), ImportError> {
    match value {
        ParsedOptionValue::Unary(entities) => {
            let setting = parse_setting(name, None)?;
            options.push(JdlOption::new(
                setting,
                EntitySelection::from_lists(&entities.list, &entities.excluded),
            ));
        }
        ParsedOptionValue::Binary(values) => {
            for (option_value, entities) in values {
                let setting = parse_setting(name, Some(option_value))?;
                options.push(JdlOption::new(
                    setting,
                    EntitySelection::from_lists(&entities.list, &entities.excluded),
                ));
            }
        }
    }
    Ok(())
}

/// Expand a `use` clause, one option per preset
fn push_use_option(
    use_option: &ParsedUseOption,
    options: &mut Vec<JdlOption>,
) -> Result<(), ImportError> {
    let selection = EntitySelection::from_lists(&use_option.list, &use_option.excluded);
    for preset in &use_option.option_values {
        options.push(JdlOption::new(use_preset(preset)?, selection.clone()));
    }
    Ok(())
}

/// Build a setting from an option name and its optional value
///
/// Unary options must come without a value, binary ones with one.
pub fn parse_setting(name: &str, value: Option<&str>) -> Result<OptionSetting, ImportError> {
    if let Some(unary) = UnaryOption::from_jdl(name) {
        return match value {
            None => Ok(OptionSetting::Unary(unary)),
            Some(_) => Err(ImportError::InvalidOptionShape {
                option: name.to_string(),
                expected: "a unary option",
                found: "a value",
            }),
        };
    }

    let kind = binary_kind(name).ok_or_else(|| ImportError::UnknownOption(name.to_string()))?;
    let value = value.ok_or_else(|| ImportError::InvalidOptionShape {
        option: name.to_string(),
        expected: "a binary option",
        found: "no value",
    })?;
    binary_option(kind, value).map(OptionSetting::Binary)
}

/// Setting from an annotation value, which may be any JSON scalar
pub fn parse_annotation(name: &str, value: Option<&Value>) -> Result<OptionSetting, ImportError> {
    match value {
        None | Some(Value::Bool(true)) => parse_setting(name, None),
        Some(Value::String(text)) => parse_setting(name, Some(text)),
        Some(other) => Err(ImportError::InvalidOptionValue {
            option: name.to_string(),
            value: other.to_string(),
        }),
    }
}

fn binary_kind(name: &str) -> Option<BinaryOptionKind> {
    match name {
        // Annotation spelling, `@paginate(infinite-scroll)`
        "paginate" => Some(BinaryOptionKind::Pagination),
        _ => BinaryOptionKind::from_jdl(name),
    }
}

fn binary_option(kind: BinaryOptionKind, value: &str) -> Result<BinaryOption, ImportError> {
    let invalid = || ImportError::InvalidOptionValue {
        option: kind.as_str().to_string(),
        value: value.to_string(),
    };

    let option = match kind {
        BinaryOptionKind::Dto => BinaryOption::Dto(match value {
            "mapstruct" => DtoValue::Mapstruct,
            "no" => DtoValue::No,
            _ => return Err(invalid()),
        }),
        BinaryOptionKind::Service => BinaryOption::Service(match value {
            "serviceClass" => ServiceValue::ServiceClass,
            "serviceImpl" => ServiceValue::ServiceImpl,
            "no" => ServiceValue::No,
            _ => return Err(invalid()),
        }),
        BinaryOptionKind::Pagination => BinaryOption::Pagination(match value {
            "pagination" | "pager" => PaginationValue::Pagination,
            "infinite-scroll" => PaginationValue::InfiniteScroll,
            "no" => PaginationValue::No,
            _ => return Err(invalid()),
        }),
        BinaryOptionKind::Search => BinaryOption::Search(match value {
            "elasticsearch" => SearchEngine::Elasticsearch,
            "couchbase" => SearchEngine::Couchbase,
            "no" => SearchEngine::No,
            _ => return Err(invalid()),
        }),
        BinaryOptionKind::Microservice
        | BinaryOptionKind::AngularSuffix
        | BinaryOptionKind::ClientRootFolder => {
            let text = value.trim();
            if text.is_empty() {
                return Err(invalid());
            }
            match kind {
                BinaryOptionKind::Microservice => BinaryOption::Microservice(text.to_string()),
                BinaryOptionKind::AngularSuffix => BinaryOption::AngularSuffix(text.to_string()),
                _ => BinaryOption::ClientRootFolder(text.to_string()),
            }
        }
    };
    Ok(option)
}

fn use_preset(preset: &str) -> Result<OptionSetting, ImportError> {
    let setting = match preset {
        "mapstruct" => OptionSetting::Binary(BinaryOption::Dto(DtoValue::Mapstruct)),
        "serviceClass" => OptionSetting::Binary(BinaryOption::Service(ServiceValue::ServiceClass)),
        "serviceImpl" => OptionSetting::Binary(BinaryOption::Service(ServiceValue::ServiceImpl)),
        "pagination" => {
            OptionSetting::Binary(BinaryOption::Pagination(PaginationValue::Pagination))
        }
        "infinite-scroll" => {
            OptionSetting::Binary(BinaryOption::Pagination(PaginationValue::InfiniteScroll))
        }
        "elasticsearch" => OptionSetting::Binary(BinaryOption::Search(SearchEngine::Elasticsearch)),
        "couchbase" => OptionSetting::Binary(BinaryOption::Search(SearchEngine::Couchbase)),
        "filtering" => OptionSetting::Unary(UnaryOption::Filter),
        other => return Err(ImportError::UnknownUsePreset(other.to_string())),
    };
    Ok(setting)
}
