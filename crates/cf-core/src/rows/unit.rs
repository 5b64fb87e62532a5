table_row! {
    /// `Units`: the core unit record.
    UnitRow => Units {
        unit_type: String => "UnitType",
        name: String => "Name",
        description: String => "Description",
        base_moves: i32 => "BaseMoves",
        base_sight_range: i32 => "BaseSightRange",
        zone_of_control: bool => "ZoneOfControl",
        domain: String => "Domain",
        formation_class: String => "FormationClass",
        unit_movement_class: String => "UnitMovementClass",
        core_class: String => "CoreClass",
        tier: i32 => "Tier",
        maintenance: i32 => "Maintenance",
        can_train: bool => "CanTrain",
        can_purchase: bool => "CanPurchase",
        cost_progression_model: String => "CostProgressionModel",
        cost_progression_param1: i32 => "CostProgressionParam1",
        purchase_yield: String => "PurchaseYield",
        trait_type: String => "TraitType",
    }
}

table_row! {
    /// `Unit_Costs`.
    UnitCostRow => UnitCosts {
        unit_type: String => "UnitType",
        yield_type: String => "YieldType",
        cost: i32 => "Cost",
    }
}

table_row! {
    /// `Unit_Stats`.
    UnitStatRow => UnitStats {
        unit_type: String => "UnitType",
        combat: i32 => "Combat",
        ranged_combat: i32 => "RangedCombat",
        range: i32 => "Range",
        bombard: i32 => "Bombard",
    }
}

table_row! {
    /// `UnitReplaces`: a unique unit replacing a generic one.
    UnitReplaceRow => UnitReplaces {
        civ_unique_unit_type: String => "CivUniqueUnitType",
        replaces_unit_type: String => "ReplacesUnitType",
    }
}

table_row! {
    /// `UnitUpgrades`.
    UnitUpgradeRow => UnitUpgrades {
        unit: String => "Unit",
        upgrade_unit: String => "UpgradeUnit",
    }
}

table_row! {
    /// `UnitAdvisories`.
    UnitAdvisoryRow => UnitAdvisories {
        unit_type: String => "UnitType",
        advisory_class_type: String => "AdvisoryClassType",
    }
}
