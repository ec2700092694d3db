//! Enum converter

use super::fields::normalize_comment;
use super::parsed::ParsedEnum;
use super::ImportError;
use crate::models::{EnumValue, JdlEnum};
use std::collections::HashSet;

/// Convert enum blocks, keeping declaration order of enums and values
pub fn convert_enums(parsed: Option<&[ParsedEnum]>) -> Result<Vec<JdlEnum>, ImportError> {
    let parsed = parsed.ok_or(ImportError::MissingInput("enums"))?;
    parsed.iter().map(convert_enum).collect()
}

fn convert_enum(parsed: &ParsedEnum) -> Result<JdlEnum, ImportError> {
    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(parsed.values.len());

    for raw in &parsed.values {
        if !seen.insert(raw.key.as_str()) {
            return Err(ImportError::DuplicateEnumKey {
                enum_name: parsed.name.clone(),
                key: raw.key.clone(),
            });
        }
        values.push(EnumValue {
            key: raw.key.clone(),
            value: raw.value.clone().filter(|value| !value.is_empty()),
            comment: raw.comment.as_deref().and_then(normalize_comment),
        });
    }

    let mut jdl_enum = JdlEnum::new(parsed.name.clone(), values);
    jdl_enum.comment = parsed.javadoc.as_deref().and_then(normalize_comment);
    Ok(jdl_enum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parsed::ParsedEnumValue;

    fn value(key: &str, custom: Option<&str>) -> ParsedEnumValue {
        ParsedEnumValue {
            key: key.to_string(),
            value: custom.map(str::to_string),
            comment: None,
        }
    }

    #[test]
    fn test_convert_enum() {
        let parsed = vec![ParsedEnum {
            name: "Language".to_string(),
            javadoc: Some("/** Spoken languages */".to_string()),
            values: vec![value("FRENCH", Some("french")), value("ENGLISH", None)],
        }];
        let enums = convert_enums(Some(&parsed)).unwrap();
        assert_eq!(enums[0].comment.as_deref(), Some("Spoken languages"));
        assert_eq!(enums[0].joined_values(), "FRENCH (french),ENGLISH");
    }

    #[test]
    fn test_duplicate_key() {
        let parsed = vec![ParsedEnum {
            name: "Language".to_string(),
            javadoc: None,
            values: vec![value("FRENCH", None), value("FRENCH", None)],
        }];
        assert_eq!(
            convert_enums(Some(&parsed)),
            Err(ImportError::DuplicateEnumKey {
                enum_name: "Language".to_string(),
                key: "FRENCH".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(convert_enums(None), Err(ImportError::MissingInput("enums")));
    }
}
