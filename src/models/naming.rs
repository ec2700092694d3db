//! Naming conventions shared by converters, resolvers and lowering

use convert_case::{Case, Casing};

/// Lower-case the first character, leaving the rest untouched (`MyField` -> `myField`)
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Default table name of an entity (`OrderLine` -> `order_line`)
pub fn default_table_name(entity_name: &str) -> String {
    entity_name.to_case(Case::Snake)
}
