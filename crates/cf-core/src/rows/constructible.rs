table_row! {
    /// `Constructibles`: shared record for buildings and improvements.
    ConstructibleRow => Constructibles {
        constructible_type: String => "ConstructibleType",
        constructible_class: String => "ConstructibleClass",
        name: String => "Name",
        description: String => "Description",
        tooltip: String => "Tooltip",
        age: String => "Age",
        population: i32 => "Population",
        cost: i32 => "Cost",
        cost_progression_model: String => "CostProgressionModel",
        cost_progression_param1: i32 => "CostProgressionParam1",
        repairable: bool => "Repairable",
        district_defense: bool => "DistrictDefense",
        immune_damage: bool => "ImmuneDamage",
        adjacent_district: String => "AdjacentDistrict",
        adjacent_lake: bool => "AdjacentLake",
        adjacent_river: bool => "AdjacentRiver",
        military_domain: String => "MilitaryDomain",
        discovery: bool => "Discovery",
        archaeology: bool => "Archaeology",
    }
}

table_row! {
    /// `Buildings`.
    BuildingRow => Buildings {
        constructible_type: String => "ConstructibleType",
        movable: bool => "Movable",
        purchasable: bool => "Purchasable",
        town: bool => "Town",
        multiple_per_city: bool => "MultiplePerCity",
        allows_holy_city: bool => "AllowsHolyCity",
        grant_fortification: i32 => "GrantFortification",
        trait_type: String => "TraitType",
    }
}

table_row! {
    /// `Improvements`.
    ImprovementRow => Improvements {
        constructible_type: String => "ConstructibleType",
        build_in_line: bool => "BuildInLine",
        can_build_on_non_district: bool => "CanBuildOnNonDistrict",
        can_build_outside_territory: bool => "CanBuildOutsideTerritory",
        city_buildable: bool => "CityBuildable",
        defense_modifier: i32 => "DefenseModifier",
        dispersal_gold: i32 => "DispersalGold",
        one_per_settlement: bool => "OnePerSettlement",
        same_adjacent_valid: bool => "SameAdjacentValid",
        workable: bool => "Workable",
        trait_type: String => "TraitType",
    }
}

table_row! {
    /// `Constructible_ValidDistricts`.
    ConstructibleValidDistrictRow => ConstructibleValidDistricts {
        constructible_type: String => "ConstructibleType",
        district_type: String => "DistrictType",
    }
}

table_row! {
    /// `Constructible_ValidBiomes`.
    ConstructibleValidBiomeRow => ConstructibleValidBiomes {
        constructible_type: String => "ConstructibleType",
        biome_type: String => "BiomeType",
    }
}

table_row! {
    /// `Constructible_ValidTerrains`.
    ConstructibleValidTerrainRow => ConstructibleValidTerrains {
        constructible_type: String => "ConstructibleType",
        terrain_type: String => "TerrainType",
    }
}

table_row! {
    /// `Constructible_ValidFeatures`.
    ConstructibleValidFeatureRow => ConstructibleValidFeatures {
        constructible_type: String => "ConstructibleType",
        feature_type: String => "FeatureType",
    }
}

table_row! {
    /// `Constructible_ValidResources`.
    ConstructibleValidResourceRow => ConstructibleValidResources {
        constructible_type: String => "ConstructibleType",
        resource_type: String => "ResourceType",
    }
}

table_row! {
    /// `Constructible_Maintenances`.
    ConstructibleMaintenanceRow => ConstructibleMaintenances {
        constructible_type: String => "ConstructibleType",
        yield_type: String => "YieldType",
        amount: i32 => "Amount",
    }
}

table_row! {
    /// `Constructible_YieldChanges`.
    ConstructibleYieldChangeRow => ConstructibleYieldChanges {
        constructible_type: String => "ConstructibleType",
        yield_type: String => "YieldType",
        yield_change: f64 => "YieldChange",
    }
}

table_row! {
    /// `Constructible_Plunders`.
    ConstructiblePlunderRow => ConstructiblePlunders {
        constructible_type: String => "ConstructibleType",
        plunder_type: String => "PlunderType",
        amount: i32 => "Amount",
    }
}

table_row! {
    /// `Constructible_Adjacencies`.
    ConstructibleAdjacencyRow => ConstructibleAdjacencies {
        constructible_type: String => "ConstructibleType",
        yield_change_id: String => "YieldChangeId",
        requires_activation: bool => "RequiresActivation",
    }
}

table_row! {
    /// `UniqueQuarters`: two buildings forming a civilization-unique quarter.
    UniqueQuarterRow => UniqueQuarters {
        unique_quarter_type: String => "UniqueQuarterType",
        building_type1: String => "BuildingType1",
        building_type2: String => "BuildingType2",
        name: String => "Name",
        description: String => "Description",
        trait_type: String => "TraitType",
    }
}
