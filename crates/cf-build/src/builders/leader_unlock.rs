use std::rc::Rc;

use serde::Deserialize;

use cf_core::constants::{domain, kind};
use cf_core::ident::{locale, path_segment, trim};
use cf_core::rows::{LeaderCivilizationBiasRow, LeaderUnlockRow};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, impl_fill};

use crate::builder::{
    Builder, Documents, EntityKind, civilization_domain, non_empty, push_text, shell_and_always,
};

/// Reason text shown when the leader suggests the civilization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeaderUnlockLocalization {
    /// Language code, `en_US` when unset.
    pub language: Option<String>,
    /// Why the leader favours this civilization.
    pub reason: Option<String>,
}

/// Leader → civilization unlock configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeaderUnlockConfig {
    /// Leader, e.g. `LEADER_HAMMURABI`.
    pub leader_type: Option<String>,
    /// The civilization the leader unlocks.
    pub unlocked_civilization_type: Option<String>,
    /// Age of the unlocked civilization.
    pub age_type: Option<String>,
    /// Remaining columns of the `LeaderUnlocks` row.
    pub leader_unlock: LeaderUnlockRow,
    /// Remaining columns of the `LeaderCivilizationBias` row.
    pub leader_civilization_bias: LeaderCivilizationBiasRow,
    /// Reason text.
    pub localizations: Vec<LeaderUnlockLocalization>,
}

impl_fill!(LeaderUnlockConfig {
    leader_type,
    unlocked_civilization_type,
    age_type,
    leader_unlock,
    leader_civilization_bias,
    localizations,
});

/// Builds a leader unlock with its civilization bias.
#[derive(Debug, Default)]
pub struct LeaderUnlockBuilder {
    config: LeaderUnlockConfig,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl LeaderUnlockBuilder {
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
    pub fn fill(&mut self, config: LeaderUnlockConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    fn endpoints(&self) -> Option<(String, String)> {
        Some((
            self.config.leader_type.clone()?,
            self.config.unlocked_civilization_type.clone()?,
        ))
    }
}

/// `UNLOCK_PLAY_AS_HAMMURABI_BABYLON`, the stem of the reason text key.
fn reason_stem(leader: &str, civ: &str) -> String {
    format!("UNLOCK_PLAY_AS_{}_{}", trim(leader), trim(civ))
}

impl Builder for LeaderUnlockBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::LeaderUnlock
    }

    fn primary_type(&self) -> Option<String> {
        self.config.leader_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some((leader, civ)) = self.endpoints() else {
            return;
        };
        let age_type = self
            .config
            .age_type
            .clone()
            .or_else(|| self.scopes.age.clone());
        let stem = reason_stem(&leader, &civ);
        let reason = locale(&stem, "tooltip");

        let mut unlock = LeaderUnlockRow {
            leader_domain: Some(domain::STANDARD_LEADERS.into()),
            age_domain: Some(domain::STANDARD_AGES.into()),
            kind: Some(kind::CIVILIZATION.into()),
            name: Some(locale(&civ, "name")),
            description: Some(reason.clone()),
            icon: Some(civ.clone()),
            ..Default::default()
        };
        unlock.overlay(self.config.leader_unlock.clone());
        unlock.leader_type = Some(leader.clone());
        unlock.ty = Some(civ.clone());
        unlock.age_type.overlay(age_type.clone());
        self.documents.shell.push(&unlock);

        let mut bias = LeaderCivilizationBiasRow {
            civilization_domain: age_type.as_deref().and_then(civilization_domain),
            leader_domain: Some(domain::STANDARD_LEADERS.into()),
            bias: Some(1),
            reason_type: Some(reason),
            ..Default::default()
        };
        bias.overlay(self.config.leader_civilization_bias.clone());
        bias.leader_type = Some(leader.clone());
        bias.civilization_type = Some(civ.clone());
        self.documents.shell.push(&bias);

        for text in &self.config.localizations {
            push_text(
                &mut self.documents.localizations,
                &stem,
                "tooltip",
                text.language.as_deref(),
                text.reason.as_deref(),
            );
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some((leader, civ)) = self.endpoints() else {
            return Vec::new();
        };
        let stem = format!("leader-{}-{}", path_segment(&leader), path_segment(&civ));
        non_empty([
            OutputFile::xml(
                "unlocks",
                format!("{stem}.xml"),
                self.documents.shell.clone(),
                shell_and_always(&self.scopes),
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                "unlocks",
                format!("{stem}-localization.xml"),
                self.documents.localizations.clone(),
                shell_and_always(&self.scopes),
                vec![Action::UpdateText],
            ),
        ])
    }
}
