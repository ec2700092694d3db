//! Changelog dates
//!
//! An entity keeps the date it already has on disk, then the date pinned by a
//! `@changelogDate` annotation. A newly introduced entity is dated
//! `creation timestamp + sequence minutes`, so entities are dated in the order
//! they first appear in the input and a second run over the same input gives
//! the same dates.

use super::ExportError;
use crate::config::ConversionConfig;
use crate::models::Entity;
use chrono::{DateTime, TimeDelta, Utc};

/// Format used by changelog dates, `YYYYMMDDHHmmss`
pub const CHANGELOG_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

pub fn changelog_date(entity: &Entity, config: &ConversionConfig) -> Result<String, ExportError> {
    if let Some(existing) = config.existing_changelog_dates.get(&entity.name) {
        return Ok(existing.clone());
    }
    if let Some(pinned) = &entity.changelog_date {
        return Ok(pinned.clone());
    }
    dated_from_sequence(config.creation_timestamp, entity)
}

fn dated_from_sequence(base: DateTime<Utc>, entity: &Entity) -> Result<String, ExportError> {
    let offset = TimeDelta::try_minutes(i64::from(entity.sequence)).ok_or_else(|| {
        ExportError::ChangelogDateOverflow {
            entity: entity.name.clone(),
            sequence: entity.sequence,
        }
    })?;
    let date = base
        .checked_add_signed(offset)
        .ok_or_else(|| ExportError::ChangelogDateOverflow {
            entity: entity.name.clone(),
            sequence: entity.sequence,
        })?;
    Ok(date.format(CHANGELOG_DATE_FORMAT).to_string())
}
