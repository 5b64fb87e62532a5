table_row! {
    /// `Unlocks`.
    UnlockRow => Unlocks {
        unlock_type: String => "UnlockType",
    }
}

table_row! {
    /// `UnlockRewards`.
    UnlockRewardRow => UnlockRewards {
        unlock_type: String => "UnlockType",
        name: String => "Name",
        description: String => "Description",
        icon: String => "Icon",
        civ_unlock: bool => "CivUnlock",
    }
}

table_row! {
    /// `UnlockRequirements`.
    UnlockRequirementRow => UnlockRequirements {
        unlock_type: String => "UnlockType",
        requirement_set_id: String => "RequirementSetId",
        description: String => "Description",
        tooltip: String => "Tooltip",
    }
}

table_row! {
    /// `UnlockConfigurationValues`.
    UnlockConfigurationValueRow => UnlockConfigurationValues {
        unlock_type: String => "UnlockType",
        configuration_value: String => "ConfigurationValue",
    }
}

table_row! {
    /// `CivilizationUnlocks`: which civilization a civilization can become.
    CivilizationUnlockRow => CivilizationUnlocks {
        age_domain: String => "AgeDomain",
        age_type: String => "AgeType",
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
    /// `LeaderUnlocks`: which civilization a leader unlocks in an age.
    LeaderUnlockRow => LeaderUnlocks {
        leader_domain: String => "LeaderDomain",
        leader_type: String => "LeaderType",
        age_domain: String => "AgeDomain",
        age_type: String => "AgeType",
        ty: String => "Type",
        kind: String => "Kind",
        name: String => "Name",
        description: String => "Description",
        icon: String => "Icon",
    }
}

table_row! {
    /// `LeaderCivilizationBias`.
    LeaderCivilizationBiasRow => LeaderCivilizationBias {
        civilization_domain: String => "CivilizationDomain",
        civilization_type: String => "CivilizationType",
        leader_domain: String => "LeaderDomain",
        leader_type: String => "LeaderType",
        bias: i32 => "Bias",
        reason_type: String => "ReasonType",
        choice_type: String => "ChoiceType",
    }
}

table_row! {
    /// `RequirementSets`.
    RequirementSetRow => RequirementSets {
        requirement_set_id: String => "RequirementSetId",
        requirement_set_type: String => "RequirementSetType",
    }
}

table_row! {
    /// `RequirementSetRequirements`.
    RequirementSetRequirementRow => RequirementSetRequirements {
        requirement_set_id: String => "RequirementSetId",
        requirement_id: String => "RequirementId",
    }
}

table_row! {
    /// `Requirements`.
    RequirementRow => Requirements {
        requirement_id: String => "RequirementId",
        requirement_type: String => "RequirementType",
        inverse: bool => "Inverse",
    }
}

table_row! {
    /// `RequirementArguments`.
    RequirementArgumentRow => RequirementArguments {
        requirement_id: String => "RequirementId",
        name: String => "Name",
        value: String => "Value",
    }
}
