table_row! {
    /// `ProgressionTrees`.
    ProgressionTreeRow => ProgressionTrees {
        progression_tree_type: String => "ProgressionTreeType",
        age_type: String => "AgeType",
        system_type: String => "SystemType",
        name: String => "Name",
    }
}

table_row! {
    /// `ProgressionTreeNodes`.
    ProgressionTreeNodeRow => ProgressionTreeNodes {
        progression_tree_node_type: String => "ProgressionTreeNodeType",
        progression_tree: String => "ProgressionTree",
        cost: i32 => "Cost",
        name: String => "Name",
        icon_string: String => "IconString",
    }
}

table_row! {
    /// `ProgressionTreeNodeUnlocks`: what researching a node unlocks.
    ProgressionTreeNodeUnlockRow => ProgressionTreeNodeUnlocks {
        progression_tree_node_type: String => "ProgressionTreeNodeType",
        target_kind: String => "TargetKind",
        target_type: String => "TargetType",
        unlock_depth: i32 => "UnlockDepth",
        hidden: bool => "Hidden",
        ai_ignore_unlock_value: bool => "AIIgnoreUnlockValue",
    }
}

table_row! {
    /// `ProgressionTreePrereqs`.
    ProgressionTreePrereqRow => ProgressionTreePrereqs {
        node: String => "Node",
        prereq_node: String => "PrereqNode",
    }
}

table_row! {
    /// `ProgressionTreeAdvisories`.
    ProgressionTreeAdvisoryRow => ProgressionTreeAdvisories {
        progression_tree_node_type: String => "ProgressionTreeNodeType",
        advisory_class_type: String => "AdvisoryClassType",
    }
}

table_row! {
    /// `Traditions`.
    TraditionRow => Traditions {
        tradition_type: String => "TraditionType",
        name: String => "Name",
        description: String => "Description",
        age_type: String => "AgeType",
        is_crisis: bool => "IsCrisis",
        trait_type: String => "TraitType",
    }
}

table_row! {
    /// `TraditionModifiers`.
    TraditionModifierRow => TraditionModifiers {
        tradition_type: String => "TraditionType",
        modifier_id: String => "ModifierId",
    }
}
