//! Identifier constants understood by the engine.

#![allow(missing_docs)]

/// `Types.Kind` values.
pub mod kind {
    pub const CIVILIZATION: &str = "KIND_CIVILIZATION";
    pub const TRAIT: &str = "KIND_TRAIT";
    pub const UNIT: &str = "KIND_UNIT";
    pub const CONSTRUCTIBLE: &str = "KIND_CONSTRUCTIBLE";
    pub const QUARTER: &str = "KIND_QUARTER";
    pub const TRADITION: &str = "KIND_TRADITION";
    pub const TREE: &str = "KIND_TREE";
    pub const TREE_NODE: &str = "KIND_TREE_NODE";
    pub const MODIFIER: &str = "KIND_MODIFIER";
    pub const LEADER: &str = "KIND_LEADER";
}

/// Age identifiers.
pub mod age {
    pub const ANTIQUITY: &str = "AGE_ANTIQUITY";
    pub const EXPLORATION: &str = "AGE_EXPLORATION";
    pub const MODERN: &str = "AGE_MODERN";
}

/// `Constructibles.ConstructibleClass` values.
pub mod constructible_class {
    pub const BUILDING: &str = "BUILDING";
    pub const IMPROVEMENT: &str = "IMPROVEMENT";
}

/// Tag categories.
pub mod tag_category {
    pub const UNIT_CLASS: &str = "UNIT_CLASS";
}

/// Default domains used by unlock tables.
pub mod domain {
    pub const STANDARD_CIVILIZATIONS: &str = "StandardCivilizations";
    pub const STANDARD_LEADERS: &str = "StandardLeaders";
    pub const STANDARD_AGES: &str = "StandardAges";
}
