table_row! {
    /// `Civilizations`: the core civilization record.
    CivilizationRow => Civilizations {
        civilization_type: String => "CivilizationType",
        domain: String => "Domain",
        name: String => "Name",
        description: String => "Description",
        full_name: String => "FullName",
        adjective: String => "Adjective",
        starting_civilization_level_type: String => "StartingCivilizationLevelType",
        capital_name: String => "CapitalName",
        random_city_name_depth: i32 => "RandomCityNameDepth",
        unique_culture_progression_tree: String => "UniqueCultureProgressionTree",
    }
}

table_row! {
    /// `LegacyCivilizations`: how later ages refer to this civilization.
    LegacyCivilizationRow => LegacyCivilizations {
        civilization_type: String => "CivilizationType",
        age: String => "Age",
        name: String => "Name",
        full_name: String => "FullName",
        adjective: String => "Adjective",
    }
}

table_row! {
    /// `CivilizationTraits`.
    CivilizationTraitRow => CivilizationTraits {
        civilization_type: String => "CivilizationType",
        trait_type: String => "TraitType",
    }
}

table_row! {
    /// `LegacyCivilizationTraits`.
    LegacyCivilizationTraitRow => LegacyCivilizationTraits {
        civilization_type: String => "CivilizationType",
        trait_type: String => "TraitType",
    }
}

table_row! {
    /// `CivilizationTags`.
    CivilizationTagRow => CivilizationTags {
        civilization_type: String => "CivilizationType",
        tag_type: String => "TagType",
    }
}

table_row! {
    /// `CivilizationItems`: items shown on the civilization selection screen.
    CivilizationItemRow => CivilizationItems {
        civilization_domain: String => "CivilizationDomain",
        civilization_type: String => "CivilizationType",
        ty: String => "Type",
        kind: String => "Kind",
        name: String => "Name",
        description: String => "Description",
        icon: String => "Icon",
    }
}

table_row! {
    /// `CivilizationFavoredWonders`.
    CivilizationFavoredWonderRow => CivilizationFavoredWonders {
        civilization_type: String => "CivilizationType",
        favored_wonder_type: String => "FavoredWonderType",
        favored_wonder_name: String => "FavoredWonderName",
    }
}

table_row! {
    /// `CityNames`.
    CityNameRow => CityNames {
        civilization_type: String => "CivilizationType",
        city_name: String => "CityName",
    }
}

table_row! {
    /// `StartBiasBiomes`.
    StartBiasBiomeRow => StartBiasBiomes {
        civilization_type: String => "CivilizationType",
        biome_type: String => "BiomeType",
        score: i32 => "Score",
    }
}

table_row! {
    /// `StartBiasTerrains`.
    StartBiasTerrainRow => StartBiasTerrains {
        civilization_type: String => "CivilizationType",
        terrain_type: String => "TerrainType",
        score: i32 => "Score",
    }
}

table_row! {
    /// `StartBiasRivers`.
    StartBiasRiverRow => StartBiasRivers {
        civilization_type: String => "CivilizationType",
        score: i32 => "Score",
    }
}

table_row! {
    /// `StartBiasFeatureClasses`.
    StartBiasFeatureClassRow => StartBiasFeatureClasses {
        civilization_type: String => "CivilizationType",
        feature_class_type: String => "FeatureClassType",
        score: i32 => "Score",
    }
}

table_row! {
    /// `StartBiasResources`.
    StartBiasResourceRow => StartBiasResources {
        civilization_type: String => "CivilizationType",
        resource_type: String => "ResourceType",
        score: i32 => "Score",
    }
}

table_row! {
    /// `StartBiasAdjacentToCoasts`.
    StartBiasAdjacentToCoastRow => StartBiasAdjacentToCoasts {
        civilization_type: String => "CivilizationType",
        score: i32 => "Score",
    }
}
