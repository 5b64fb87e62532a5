use std::fmt;

/// Every target-schema table civforge can populate.
///
/// Declaration order is output order: a document always serializes its
/// tables in this order regardless of which builder touched them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Table {
    Types,
    Tags,
    TypeTags,
    Traits,
    TraitModifiers,

    Civilizations,
    LegacyCivilizations,
    CivilizationTraits,
    LegacyCivilizationTraits,
    CivilizationTags,
    CivilizationItems,
    CivilizationFavoredWonders,
    CityNames,
    StartBiasBiomes,
    StartBiasTerrains,
    StartBiasRivers,
    StartBiasFeatureClasses,
    StartBiasResources,
    StartBiasAdjacentToCoasts,

    Units,
    UnitCosts,
    UnitStats,
    UnitReplaces,
    UnitUpgrades,
    UnitAdvisories,

    Constructibles,
    Buildings,
    Improvements,
    ConstructibleValidDistricts,
    ConstructibleValidBiomes,
    ConstructibleValidTerrains,
    ConstructibleValidFeatures,
    ConstructibleValidResources,
    ConstructibleMaintenances,
    ConstructibleYieldChanges,
    ConstructiblePlunders,
    ConstructibleAdjacencies,

    UniqueQuarters,

    Traditions,
    TraditionModifiers,

    ProgressionTrees,
    ProgressionTreeNodes,
    ProgressionTreeNodeUnlocks,
    ProgressionTreePrereqs,
    ProgressionTreeAdvisories,

    Unlocks,
    UnlockRewards,
    UnlockRequirements,
    UnlockConfigurationValues,
    CivilizationUnlocks,
    LeaderUnlocks,
    LeaderCivilizationBias,

    RequirementSets,
    RequirementSetRequirements,
    Requirements,
    RequirementArguments,

    IconDefinitions,
    LocalizedText,

    /// Modifier elements of a `GameEffects` document.
    Modifiers,
}

impl Table {
    /// Name of the container element wrapping this table's rows.
    ///
    /// `None` means rows are written directly under the document root.
    pub fn container(self) -> Option<&'static str> {
        let name = match self {
            Self::Types => "Types",
            Self::Tags => "Tags",
            Self::TypeTags => "TypeTags",
            Self::Traits => "Traits",
            Self::TraitModifiers => "TraitModifiers",
            Self::Civilizations => "Civilizations",
            Self::LegacyCivilizations => "LegacyCivilizations",
            Self::CivilizationTraits => "CivilizationTraits",
            Self::LegacyCivilizationTraits => "LegacyCivilizationTraits",
            Self::CivilizationTags => "CivilizationTags",
            Self::CivilizationItems => "CivilizationItems",
            Self::CivilizationFavoredWonders => "CivilizationFavoredWonders",
            Self::CityNames => "CityNames",
            Self::StartBiasBiomes => "StartBiasBiomes",
            Self::StartBiasTerrains => "StartBiasTerrains",
            Self::StartBiasRivers => "StartBiasRivers",
            Self::StartBiasFeatureClasses => "StartBiasFeatureClasses",
            Self::StartBiasResources => "StartBiasResources",
            Self::StartBiasAdjacentToCoasts => "StartBiasAdjacentToCoasts",
            Self::Units => "Units",
            Self::UnitCosts => "Unit_Costs",
            Self::UnitStats => "Unit_Stats",
            Self::UnitReplaces => "UnitReplaces",
            Self::UnitUpgrades => "UnitUpgrades",
            Self::UnitAdvisories => "UnitAdvisories",
            Self::Constructibles => "Constructibles",
            Self::Buildings => "Buildings",
            Self::Improvements => "Improvements",
            Self::ConstructibleValidDistricts => "Constructible_ValidDistricts",
            Self::ConstructibleValidBiomes => "Constructible_ValidBiomes",
            Self::ConstructibleValidTerrains => "Constructible_ValidTerrains",
            Self::ConstructibleValidFeatures => "Constructible_ValidFeatures",
            Self::ConstructibleValidResources => "Constructible_ValidResources",
            Self::ConstructibleMaintenances => "Constructible_Maintenances",
            Self::ConstructibleYieldChanges => "Constructible_YieldChanges",
            Self::ConstructiblePlunders => "Constructible_Plunders",
            Self::ConstructibleAdjacencies => "Constructible_Adjacencies",
            Self::UniqueQuarters => "UniqueQuarters",
            Self::Traditions => "Traditions",
            Self::TraditionModifiers => "TraditionModifiers",
            Self::ProgressionTrees => "ProgressionTrees",
            Self::ProgressionTreeNodes => "ProgressionTreeNodes",
            Self::ProgressionTreeNodeUnlocks => "ProgressionTreeNodeUnlocks",
            Self::ProgressionTreePrereqs => "ProgressionTreePrereqs",
            Self::ProgressionTreeAdvisories => "ProgressionTreeAdvisories",
            Self::Unlocks => "Unlocks",
            Self::UnlockRewards => "UnlockRewards",
            Self::UnlockRequirements => "UnlockRequirements",
            Self::UnlockConfigurationValues => "UnlockConfigurationValues",
            Self::CivilizationUnlocks => "CivilizationUnlocks",
            Self::LeaderUnlocks => "LeaderUnlocks",
            Self::LeaderCivilizationBias => "LeaderCivilizationBias",
            Self::RequirementSets => "RequirementSets",
            Self::RequirementSetRequirements => "RequirementSetRequirements",
            Self::Requirements => "Requirements",
            Self::RequirementArguments => "RequirementArguments",
            Self::IconDefinitions => "IconDefinitions",
            Self::LocalizedText => "LocalizedText",
            Self::Modifiers => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.container() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{self:?}"),
        }
    }
}
