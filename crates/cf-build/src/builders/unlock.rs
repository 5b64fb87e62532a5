use std::rc::Rc;

use serde::Deserialize;

use cf_core::ident::{locale, path_segment, trim};
use cf_core::rows::{
    Requirement, RequirementArgumentRow, RequirementRow, RequirementSetRequirementRow,
    RequirementSetRow, UnlockConfigurationValueRow, UnlockRequirementRow, UnlockRewardRow,
    UnlockRow,
};
use cf_core::{Action, ActionGroupBundle, Document, OutputFile, Overlay, impl_fill};

use crate::builder::{
    Builder, Documents, EntityKind, EntityLocalization, non_empty, shell_and_always,
};

const TEST_ALL: &str = "REQUIREMENTSET_TEST_ALL";

/// One requirement set gating an unlock.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnlockRequirement {
    /// Set id; generated from the unlock type and position when unset.
    pub requirement_set_id: Option<String>,
    /// Set semantics, `REQUIREMENTSET_TEST_ALL` when unset.
    pub requirement_set_type: Option<String>,
    /// LOC key describing the requirement.
    pub description: Option<String>,
    /// LOC key of the progress tooltip.
    pub tooltip: Option<String>,
    /// Requirements in the set.
    pub requirements: Vec<Requirement>,
}

/// Generic unlock configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnlockConfig {
    /// Primary type, e.g. `UNLOCK_CIVILIZATION_BABYLON`.
    pub unlock_type: Option<String>,
    /// Columns of the `UnlockRewards` row.
    pub unlock_reward: UnlockRewardRow,
    /// Requirement sets, all of which must be met.
    pub requirements: Vec<UnlockRequirement>,
    /// Configuration values the unlock grants.
    pub configuration_values: Vec<String>,
    /// Reward text.
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(UnlockConfig {
    unlock_type,
    unlock_reward,
    requirements,
    configuration_values,
    localizations,
});

/// Builds an unlock, its reward and its requirement sets.
#[derive(Debug, Default)]
pub struct UnlockBuilder {
    config: UnlockConfig,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl UnlockBuilder {
    /// A builder with an always-loaded scope bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a shared scope bundle.
    pub fn with_scopes(mut self, scopes: Rc<ActionGroupBundle>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Overlay configuration.
    pub fn fill(&mut self, config: UnlockConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }
}

fn push_requirement_set(doc: &mut Document, unlock: &str, index: usize, set: &UnlockRequirement) {
    let stem = trim(unlock);
    let set_id = set
        .requirement_set_id
        .clone()
        .unwrap_or_else(|| format!("REQSET_{stem}_{index}"));

    doc.push(&UnlockRequirementRow {
        unlock_type: Some(unlock.into()),
        requirement_set_id: Some(set_id.clone()),
        description: set.description.clone(),
        tooltip: set.tooltip.clone(),
    });
    doc.push(&RequirementSetRow {
        requirement_set_id: Some(set_id.clone()),
        requirement_set_type: Some(
            set.requirement_set_type
                .clone()
                .unwrap_or_else(|| TEST_ALL.into()),
        ),
    });
    for (j, requirement) in set.requirements.iter().enumerate() {
        let requirement_id = format!("REQ_{stem}_{index}_{}", j + 1);
        doc.push(&RequirementSetRequirementRow {
            requirement_set_id: Some(set_id.clone()),
            requirement_id: Some(requirement_id.clone()),
        });
        doc.push(&RequirementRow {
            requirement_id: Some(requirement_id.clone()),
            requirement_type: Some(requirement.ty.clone()),
            inverse: requirement.inverse,
        });
        for argument in &requirement.arguments {
            doc.push(&RequirementArgumentRow {
                requirement_id: Some(requirement_id.clone()),
                name: Some(argument.name.clone()),
                value: Some(argument.value.to_string()),
            });
        }
    }
}

impl Builder for UnlockBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::Unlock
    }

    fn primary_type(&self) -> Option<String> {
        self.config.unlock_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(unlock) = self.config.unlock_type.clone() else {
            return;
        };
        let current = &mut self.documents.current;

        current.push(&UnlockRow {
            unlock_type: Some(unlock.clone()),
        });
        let mut reward = UnlockRewardRow {
            name: Some(locale(&unlock, "name")),
            description: Some(locale(&unlock, "description")),
            ..Default::default()
        };
        reward.overlay(self.config.unlock_reward.clone());
        reward.unlock_type = Some(unlock.clone());
        current.push(&reward);

        for (i, set) in self.config.requirements.iter().enumerate() {
            push_requirement_set(current, &unlock, i + 1, set);
        }
        for value in &self.config.configuration_values {
            current.push(&UnlockConfigurationValueRow {
                unlock_type: Some(unlock.clone()),
                configuration_value: Some(value.clone()),
            });
        }
        for text in &self.config.localizations {
            text.push_rows(&mut self.documents.localizations, &unlock);
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(unlock) = &self.config.unlock_type else {
            return Vec::new();
        };
        let dir = format!("unlocks/{}", path_segment(unlock));
        non_empty([
            OutputFile::xml(
                &dir,
                "current.xml",
                self.documents.current.clone(),
                vec![self.scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "localization.xml",
                self.documents.localizations.clone(),
                shell_and_always(&self.scopes),
                vec![Action::UpdateText],
            ),
        ])
    }
}
