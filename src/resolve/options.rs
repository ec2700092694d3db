//! Option resolution
//!
//! Flattens option precedence into one [`EntityOptions`] per
//! `(application, entity)` pair. Scopes are applied from least to most
//! specific: global options, then the application's own options, then the
//! annotations written on the entity. A later scope overrides an earlier one
//! for the same option kind; different kinds accumulate.
//!
//! A derived `service` value is set in every application that needs it, but
//! noticed once per entity and trigger, naming the first such application.
//!
//! Option targets were checked by the assembler, so nothing is re-validated
//! here.

use crate::models::{
    Application, ApplicationType, BinaryOption, BinaryOptionKind, DomainModel, DtoValue, Entity,
    EntityOptions, Notice, NoticeKind, OptionKind, OptionSetting, ServiceValue,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Effective options of every lowered `(application, entity)` pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    options: BTreeMap<(String, String), EntityOptions>,
    /// Advisory notices for options derived from others
    pub notices: Vec<Notice>,
}

impl ResolvedOptions {
    pub fn options_for(&self, application: &str, entity: &str) -> Option<&EntityOptions> {
        self.options
            .get(&(application.to_string(), entity.to_string()))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Option resolver
#[derive(Debug, Default)]
pub struct OptionResolver;

impl OptionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve options for every entity owned by every application
    pub fn resolve(&self, model: &DomainModel) -> ResolvedOptions {
        let mut resolved = ResolvedOptions::default();
        let mut noticed: BTreeSet<(String, NoticeKind)> = BTreeSet::new();

        for application in &model.applications {
            for entity in application
                .entity_names
                .iter()
                .filter_map(|name| model.entity(name))
            {
                let (options, notice) = self.resolve_entity(model, application, entity);
                if let Some(notice) = notice {
                    if noticed.insert((entity.name.clone(), notice.kind.clone())) {
                        resolved.notices.push(notice);
                    }
                }
                resolved.options.insert(
                    (application.base_name.clone(), entity.name.clone()),
                    options,
                );
            }
        }

        debug!(
            pairs = resolved.len(),
            notices = resolved.notices.len(),
            "Resolved entity options"
        );
        resolved
    }

    /// Effective options of one entity inside one application
    ///
    /// Also returns the notice of a derived `service` value, if one was derived.
    pub fn resolve_entity(
        &self,
        model: &DomainModel,
        application: &Application,
        entity: &Entity,
    ) -> (EntityOptions, Option<Notice>) {
        let name = entity.name.as_str();
        let mut options = EntityOptions::default();
        let mut explicit: BTreeSet<OptionKind> = BTreeSet::new();
        let mut from_global: BTreeSet<OptionKind> = BTreeSet::new();

        for option in model.options.iter().filter(|o| o.selection.selects(name)) {
            options.apply(&option.setting);
            explicit.insert(option.kind());
            from_global.insert(option.kind());
        }

        for option in &application.options {
            let kind = option.kind();
            if option.selection.selects(name) {
                options.apply(&option.setting);
                explicit.insert(kind);
                from_global.remove(&kind);
            } else if option.selection.excludes(name) && from_global.remove(&kind) {
                // The application carves the entity out of a global setting
                options.reset(kind);
                explicit.remove(&kind);
            }
        }

        for setting in &entity.annotations {
            options.apply(setting);
            explicit.insert(setting.kind());
        }

        if application.application_type == ApplicationType::Microservice
            && options.microservice_name.is_none()
        {
            options.microservice_name = Some(application.base_name.clone());
        }

        let notice = derive_service(&mut options, &explicit, application, name);
        (options, notice)
    }
}

/// `dto=mapstruct` or `filter` without an explicit `service` imply `service=serviceClass`
fn derive_service(
    options: &mut EntityOptions,
    explicit: &BTreeSet<OptionKind>,
    application: &Application,
    entity: &str,
) -> Option<Notice> {
    if explicit.contains(&OptionKind::Binary(BinaryOptionKind::Service)) {
        return None;
    }
    let trigger = if options.dto == DtoValue::Mapstruct {
        "dto"
    } else if options.jpa_metamodel_filtering {
        "filter"
    } else {
        return None;
    };

    options.apply(&OptionSetting::Binary(BinaryOption::Service(
        ServiceValue::ServiceClass,
    )));
    info!(
        entity = %entity,
        application = %application.base_name,
        trigger = %trigger,
        "Derived service=serviceClass"
    );
    Some(Notice::derived_service(entity, &application.base_name, trigger))
}
