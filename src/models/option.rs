//! Entity option model
//!
//! Options are either unary flags (`readOnly`) or binary key/value settings
//! (`dto mapstruct`). Both apply to an [`EntitySelection`], which may be the
//! `*` wildcard with an `except` list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Wildcard entity name
pub const WILDCARD: &str = "*";

/// Unary (flag) options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOption {
    SkipClient,
    SkipServer,
    NoFluentMethod,
    Filter,
    ReadOnly,
    Embedded,
}

impl UnaryOption {
    pub const ALL: [UnaryOption; 6] = [
        UnaryOption::SkipClient,
        UnaryOption::SkipServer,
        UnaryOption::NoFluentMethod,
        UnaryOption::Filter,
        UnaryOption::ReadOnly,
        UnaryOption::Embedded,
    ];

    pub fn from_jdl(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOption::SkipClient => "skipClient",
            UnaryOption::SkipServer => "skipServer",
            UnaryOption::NoFluentMethod => "noFluentMethod",
            UnaryOption::Filter => "filter",
            UnaryOption::ReadOnly => "readOnly",
            UnaryOption::Embedded => "embedded",
        }
    }
}

/// Binary option kinds, without their value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOptionKind {
    Dto,
    Service,
    Pagination,
    Search,
    Microservice,
    AngularSuffix,
    ClientRootFolder,
}

impl BinaryOptionKind {
    pub const ALL: [BinaryOptionKind; 7] = [
        BinaryOptionKind::Dto,
        BinaryOptionKind::Service,
        BinaryOptionKind::Pagination,
        BinaryOptionKind::Search,
        BinaryOptionKind::Microservice,
        BinaryOptionKind::AngularSuffix,
        BinaryOptionKind::ClientRootFolder,
    ];

    pub fn from_jdl(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOptionKind::Dto => "dto",
            BinaryOptionKind::Service => "service",
            BinaryOptionKind::Pagination => "pagination",
            BinaryOptionKind::Search => "search",
            BinaryOptionKind::Microservice => "microservice",
            BinaryOptionKind::AngularSuffix => "angularSuffix",
            BinaryOptionKind::ClientRootFolder => "clientRootFolder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DtoValue {
    Mapstruct,
    #[default]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ServiceValue {
    ServiceClass,
    ServiceImpl,
    #[default]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationValue {
    Pagination,
    InfiniteScroll,
    #[default]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Elasticsearch,
    Couchbase,
    #[default]
    No,
}

/// A binary option together with its typed value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum BinaryOption {
    Dto(DtoValue),
    Service(ServiceValue),
    Pagination(PaginationValue),
    Search(SearchEngine),
    Microservice(String),
    AngularSuffix(String),
    ClientRootFolder(String),
}

impl BinaryOption {
    pub fn kind(&self) -> BinaryOptionKind {
        match self {
            BinaryOption::Dto(_) => BinaryOptionKind::Dto,
            BinaryOption::Service(_) => BinaryOptionKind::Service,
            BinaryOption::Pagination(_) => BinaryOptionKind::Pagination,
            BinaryOption::Search(_) => BinaryOptionKind::Search,
            BinaryOption::Microservice(_) => BinaryOptionKind::Microservice,
            BinaryOption::AngularSuffix(_) => BinaryOptionKind::AngularSuffix,
            BinaryOption::ClientRootFolder(_) => BinaryOptionKind::ClientRootFolder,
        }
    }
}

/// What an option sets: a flag or a key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionSetting {
    Unary(UnaryOption),
    Binary(BinaryOption),
}

impl OptionSetting {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionSetting::Unary(option) => OptionKind::Unary(*option),
            OptionSetting::Binary(option) => OptionKind::Binary(option.kind()),
        }
    }
}

/// Option identity used for precedence: two settings of the same kind override each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKind {
    Unary(UnaryOption),
    Binary(BinaryOptionKind),
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Unary(option) => option.as_str(),
            OptionKind::Binary(option) => option.as_str(),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities an option applies to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySelection {
    /// `*` was listed
    pub wildcard: bool,
    /// Explicitly listed entity names, wildcard removed
    pub names: BTreeSet<String>,
    /// Names from the `except` clause
    pub excluded: BTreeSet<String>,
}

impl EntitySelection {
    pub fn from_lists(list: &[String], excluded: &[String]) -> Self {
        let wildcard = list.iter().any(|name| name == WILDCARD);
        Self {
            wildcard,
            names: list
                .iter()
                .filter(|name| name.as_str() != WILDCARD)
                .cloned()
                .collect(),
            excluded: excluded.iter().cloned().collect(),
        }
    }

    pub fn all() -> Self {
        Self {
            wildcard: true,
            ..Self::default()
        }
    }

    pub fn excludes(&self, entity: &str) -> bool {
        self.excluded.contains(entity)
    }

    /// Whether the selection applies to `entity`, exclusions taken into account
    pub fn selects(&self, entity: &str) -> bool {
        !self.excludes(entity) && (self.wildcard || self.names.contains(entity))
    }

    /// Every name mentioned explicitly, listed or excluded
    pub fn referenced_names(&self) -> impl Iterator<Item = &String> {
        self.names.iter().chain(self.excluded.iter())
    }
}

/// An option declared globally, inside an application, or on an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdlOption {
    pub setting: OptionSetting,
    pub selection: EntitySelection,
}

impl JdlOption {
    pub fn new(setting: OptionSetting, selection: EntitySelection) -> Self {
        Self { setting, selection }
    }

    pub fn kind(&self) -> OptionKind {
        self.setting.kind()
    }
}

/// Effective options of one entity inside one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityOptions {
    pub dto: DtoValue,
    pub service: ServiceValue,
    pub pagination: PaginationValue,
    pub search_engine: SearchEngine,
    pub microservice_name: Option<String>,
    pub angular_suffix: Option<String>,
    pub client_root_folder: Option<String>,
    pub skip_client: bool,
    pub skip_server: bool,
    pub fluent_methods: bool,
    pub jpa_metamodel_filtering: bool,
    pub read_only: bool,
    pub embedded: bool,
}

impl Default for EntityOptions {
    fn default() -> Self {
        Self {
            dto: DtoValue::No,
            service: ServiceValue::No,
            pagination: PaginationValue::No,
            search_engine: SearchEngine::No,
            microservice_name: None,
            angular_suffix: None,
            client_root_folder: None,
            skip_client: false,
            skip_server: false,
            fluent_methods: true,
            jpa_metamodel_filtering: false,
            read_only: false,
            embedded: false,
        }
    }
}

impl EntityOptions {
    /// Apply a setting, overriding whatever the same kind held before
    pub fn apply(&mut self, setting: &OptionSetting) {
        match setting {
            OptionSetting::Unary(option) => self.set_flag(*option, true),
            OptionSetting::Binary(option) => match option {
                BinaryOption::Dto(value) => self.dto = *value,
                BinaryOption::Service(value) => self.service = *value,
                BinaryOption::Pagination(value) => self.pagination = *value,
                BinaryOption::Search(value) => self.search_engine = *value,
                BinaryOption::Microservice(value) => self.microservice_name = Some(value.clone()),
                BinaryOption::AngularSuffix(value) => self.angular_suffix = Some(value.clone()),
                BinaryOption::ClientRootFolder(value) => {
                    self.client_root_folder = Some(value.clone())
                }
            },
        }
    }

    /// Put one option kind back to its default value
    pub fn reset(&mut self, kind: OptionKind) {
        let defaults = EntityOptions::default();
        match kind {
            OptionKind::Unary(option) => {
                let value = defaults.flag(option);
                self.set_flag(option, value);
            }
            OptionKind::Binary(option) => match option {
                BinaryOptionKind::Dto => self.dto = defaults.dto,
                BinaryOptionKind::Service => self.service = defaults.service,
                BinaryOptionKind::Pagination => self.pagination = defaults.pagination,
                BinaryOptionKind::Search => self.search_engine = defaults.search_engine,
                BinaryOptionKind::Microservice => self.microservice_name = None,
                BinaryOptionKind::AngularSuffix => self.angular_suffix = None,
                BinaryOptionKind::ClientRootFolder => self.client_root_folder = None,
            },
        }
    }

    /// Whether the unary option is in effect
    pub fn flag(&self, option: UnaryOption) -> bool {
        match option {
            UnaryOption::SkipClient => self.skip_client,
            UnaryOption::SkipServer => self.skip_server,
            UnaryOption::NoFluentMethod => !self.fluent_methods,
            UnaryOption::Filter => self.jpa_metamodel_filtering,
            UnaryOption::ReadOnly => self.read_only,
            UnaryOption::Embedded => self.embedded,
        }
    }

    fn set_flag(&mut self, option: UnaryOption, enabled: bool) {
        match option {
            UnaryOption::SkipClient => self.skip_client = enabled,
            UnaryOption::SkipServer => self.skip_server = enabled,
            UnaryOption::NoFluentMethod => self.fluent_methods = !enabled,
            UnaryOption::Filter => self.jpa_metamodel_filtering = enabled,
            UnaryOption::ReadOnly => self.read_only = enabled,
            UnaryOption::Embedded => self.embedded = enabled,
        }
    }
}
