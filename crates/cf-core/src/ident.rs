//! Deterministic string transforms over type identifiers.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// Category prefixes stripped by [`trim`], checked in order.
pub const CATEGORY_PREFIXES: &[&str] = &[
    "CIVILIZATION_",
    "LEADER_",
    "UNIT_",
    "BUILDING_",
    "IMPROVEMENT_",
    "QUARTER_",
    "TRADITION_",
    "TREE_",
    "NODE_",
    "MODIFIER_",
    "TRAIT_",
    "UNLOCK_",
];

/// Strip the first known category prefix from a type identifier.
///
/// `CIVILIZATION_BABYLON` becomes `BABYLON`. Identifiers without a known
/// prefix are returned unchanged.
pub fn trim(type_id: &str) -> &str {
    CATEGORY_PREFIXES
        .iter()
        .find_map(|prefix| type_id.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(type_id)
}

/// Convert an identifier into its lowercase hyphenated, path-safe form.
///
/// Distinct inputs may collide (`A_B` and `A-B` both become `a-b`); callers
/// that need uniqueness must check for it themselves.
pub fn kebab_case(value: &str) -> String {
    value.to_kebab_case()
}

/// Path segment for an entity: `kebab_case(trim(type_id))`.
pub fn path_segment(type_id: &str) -> String {
    kebab_case(trim(type_id))
}

/// Derive a localization key from an entity identifier and a field name.
///
/// The prefix is kept verbatim; the field is converted to shouty snake case,
/// so `locale("CIVILIZATION_X", "cityNames_1")` is
/// `LOC_CIVILIZATION_X_CITY_NAMES_1`.
pub fn locale(prefix: &str, field: &str) -> String {
    format!("LOC_{prefix}_{}", field.to_shouty_snake_case())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trim_strips_known_prefix() {
        assert_eq!(trim("CIVILIZATION_BABYLON"), "BABYLON");
        assert_eq!(trim("UNIT_BABYLON_SABUM_KIBITTUM"), "BABYLON_SABUM_KIBITTUM");
        assert_eq!(trim("TREE_CIVICS_AQ_MAIN"), "CIVICS_AQ_MAIN");
    }

    #[test]
    fn trim_only_strips_once() {
        assert_eq!(trim("TRAIT_UNIT_X"), "UNIT_X");
    }

    #[test]
    fn trim_leaves_unknown_and_bare_prefixes() {
        assert_eq!(trim("AGE_ANTIQUITY"), "AGE_ANTIQUITY");
        assert_eq!(trim("UNIT_"), "UNIT_");
    }

    #[test]
    fn kebab_case_lowercases_and_hyphenates() {
        assert_eq!(kebab_case("BABYLON"), "babylon");
        assert_eq!(kebab_case("SABUM_KIBITTUM"), "sabum-kibittum");
        assert_eq!(path_segment("CIVILIZATION_NEW_BABYLON"), "new-babylon");
    }

    #[test]
    fn locale_builds_keys() {
        assert_eq!(locale("CIVILIZATION_X", "name"), "LOC_CIVILIZATION_X_NAME");
        assert_eq!(
            locale("CIVILIZATION_X", "fullName"),
            "LOC_CIVILIZATION_X_FULL_NAME"
        );
        assert_eq!(
            locale("CIVILIZATION_X", "cityNames_1"),
            "LOC_CIVILIZATION_X_CITY_NAMES_1"
        );
        assert_eq!(
            locale("TRAIT_X_ABILITY", "description"),
            "LOC_TRAIT_X_ABILITY_DESCRIPTION"
        );
    }

    proptest! {
        #[test]
        fn locale_city_names_shape(prefix in "\\PC*") {
            prop_assert_eq!(
                locale(&prefix, "cityNames_1"),
                format!("LOC_{prefix}_CITY_NAMES_1")
            );
        }

        #[test]
        fn path_segment_is_deterministic(id in "[A-Z_]{1,24}") {
            prop_assert_eq!(path_segment(&id), path_segment(&id));
        }

        #[test]
        fn path_segment_is_path_safe(id in "[A-Za-z0-9_ ]{1,24}") {
            let segment = path_segment(&id);
            prop_assert!(segment.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
