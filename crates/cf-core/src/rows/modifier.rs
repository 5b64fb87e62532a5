use serde::{Deserialize, Serialize};

use crate::{impl_overlay, impl_replace};
use crate::row::{Row, TableRow, Value};
use crate::table::Table;

/// A named modifier or requirement argument, `<Argument name="..">value</Argument>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name, e.g. `Amount`.
    pub name: String,
    /// Argument value.
    pub value: Value,
}

impl Argument {
    /// A new argument.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    fn to_row(&self) -> Row {
        Row::element("Argument")
            .with_attr("name", self.name.as_str())
            .with_text(self.value.clone())
    }
}

/// A requirement attached to a modifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirement {
    /// Requirement type, e.g. `REQUIREMENT_UNIT_TAG_MATCHES`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Negate the requirement.
    pub inverse: Option<bool>,
    /// Requirement arguments.
    pub arguments: Vec<Argument>,
}

impl Requirement {
    fn to_row(&self) -> Row {
        let mut row = Row::element("Requirement").with_attr("type", self.ty.as_str());
        row.set("inverse", self.inverse);
        self.arguments
            .iter()
            .fold(row, |row, arg| row.with_child(arg.to_row()))
    }
}

/// One `<Modifier>` element in a `GameEffects` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierRow {
    /// Modifier id; generated by the modifier builder when unset.
    pub id: Option<String>,
    /// Collection the modifier iterates, e.g. `COLLECTION_PLAYER_UNITS`.
    pub collection: Option<String>,
    /// Effect applied to each subject, e.g. `EFFECT_ADJUST_UNIT_MOVEMENT`.
    pub effect: Option<String>,
    /// Keep the effect after its requirements stop being met.
    pub permanent: Option<bool>,
    /// Apply the effect a single time.
    pub run_once: Option<bool>,
    /// Requirements every subject must meet.
    pub requirements: Vec<Requirement>,
    /// Requirements the modifier's owner must meet.
    pub owner_requirements: Vec<Requirement>,
    /// Effect arguments.
    pub arguments: Vec<Argument>,
    /// Localization key of the description string.
    pub description: Option<String>,
}

impl_overlay!(ModifierRow {
    id,
    collection,
    effect,
    permanent,
    run_once,
    requirements,
    owner_requirements,
    arguments,
    description,
});
impl_replace!(ModifierRow);

fn requirement_block(name: &'static str, requirements: &[Requirement]) -> Row {
    requirements
        .iter()
        .fold(Row::element(name), |block, req| block.with_child(req.to_row()))
}

impl TableRow for ModifierRow {
    const TABLE: Table = Table::Modifiers;

    fn to_row(&self) -> Row {
        let mut row = Row::element("Modifier");
        row.set("id", self.id.as_deref())
            .set("collection", self.collection.as_deref())
            .set("effect", self.effect.as_deref())
            .set("permanent", self.permanent)
            .set("run-once", self.run_once);

        let mut row = row
            .with_child(requirement_block("SubjectRequirements", &self.requirements))
            .with_child(requirement_block("OwnerRequirements", &self.owner_requirements));
        for arg in &self.arguments {
            row = row.with_child(arg.to_row());
        }
        if let Some(key) = &self.description {
            row = row.with_child(
                Row::element("String")
                    .with_attr("context", "Description")
                    .with_text(key),
            );
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_renders_nested_elements() {
        let modifier = ModifierRow {
            id: Some("MOD_SCOUT_MOVES".into()),
            collection: Some("COLLECTION_PLAYER_UNITS".into()),
            effect: Some("EFFECT_ADJUST_UNIT_MOVEMENT".into()),
            permanent: Some(true),
            requirements: vec![Requirement {
                ty: "REQUIREMENT_UNIT_TAG_MATCHES".into(),
                arguments: vec![Argument::new("Tag", "UNIT_CLASS_RECON")],
                ..Default::default()
            }],
            arguments: vec![Argument::new("Amount", 1)],
            ..Default::default()
        };
        let row = modifier.to_row();
        assert_eq!(row.element, "Modifier");
        assert_eq!(row.attr_str("id"), Some("MOD_SCOUT_MOVES"));
        let children: Vec<_> = row.children.iter().map(|c| c.element).collect();
        assert_eq!(children, vec!["SubjectRequirements", "Argument"]);
    }

    #[test]
    fn empty_requirement_blocks_are_dropped() {
        let row = ModifierRow {
            id: Some("MOD_X".into()),
            description: Some("LOC_MOD_X_DESCRIPTION".into()),
            ..Default::default()
        }
        .to_row();
        assert_eq!(row.children.len(), 1);
        assert_eq!(row.children[0].attr_str("context"), Some("Description"));
    }
}
