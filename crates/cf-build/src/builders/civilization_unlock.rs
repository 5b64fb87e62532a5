use std::rc::Rc;

use serde::Deserialize;

use cf_core::constants::{domain, kind};
use cf_core::ident::{locale, path_segment};
use cf_core::rows::CivilizationUnlockRow;
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, impl_fill};

use crate::builder::{
    Builder, Documents, EntityKind, civilization_domain, non_empty, shell_and_always,
};

/// Civilization → civilization unlock configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CivilizationUnlockConfig {
    /// The civilization that grants the unlock.
    pub civilization_type: Option<String>,
    /// The civilization made playable in the next age.
    pub unlocked_civilization_type: Option<String>,
    /// Age of the unlocked civilization.
    pub age_type: Option<String>,
    /// Remaining columns of the `CivilizationUnlocks` row.
    pub civilization_unlock: CivilizationUnlockRow,
}

impl_fill!(CivilizationUnlockConfig {
    civilization_type,
    unlocked_civilization_type,
    age_type,
    civilization_unlock,
});

/// Builds one row linking a civilization to the one it unlocks.
#[derive(Debug, Default)]
pub struct CivilizationUnlockBuilder {
    config: CivilizationUnlockConfig,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl CivilizationUnlockBuilder {
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
    pub fn fill(&mut self, config: CivilizationUnlockConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    fn endpoints(&self) -> Option<(String, String)> {
        Some((
            self.config.civilization_type.clone()?,
            self.config.unlocked_civilization_type.clone()?,
        ))
    }
}

impl Builder for CivilizationUnlockBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::CivilizationUnlock
    }

    fn primary_type(&self) -> Option<String> {
        self.config.civilization_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some((from, to)) = self.endpoints() else {
            return;
        };
        let mut row = CivilizationUnlockRow {
            age_domain: Some(domain::STANDARD_AGES.into()),
            civilization_domain: self.scopes.age.as_deref().and_then(civilization_domain),
            kind: Some(kind::CIVILIZATION.into()),
            name: Some(locale(&to, "name")),
            description: Some(locale(&to, "description")),
            icon: Some(to.clone()),
            ..Default::default()
        };
        row.overlay(self.config.civilization_unlock.clone());
        row.civilization_type = Some(from);
        row.ty = Some(to);
        row.age_type.overlay(self.config.age_type.clone());
        self.documents.shell.push(&row);
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some((from, to)) = self.endpoints() else {
            return Vec::new();
        };
        let name = format!("civilization-{}-{}.xml", path_segment(&from), path_segment(&to));
        non_empty([OutputFile::xml(
            "unlocks",
            name,
            self.documents.shell.clone(),
            shell_and_always(&self.scopes),
            vec![Action::UpdateDatabase],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Table;

    #[test]
    fn links_civilizations_across_ages() {
        let mut builder = CivilizationUnlockBuilder::new()
            .with_scopes(Rc::new(ActionGroupBundle::for_age("AGE_ANTIQUITY")));
        builder.fill(CivilizationUnlockConfig {
            civilization_type: Some("CIVILIZATION_BABYLON".into()),
            unlocked_civilization_type: Some("CIVILIZATION_ABBASID".into()),
            age_type: Some("AGE_EXPLORATION".into()),
            ..Default::default()
        });
        let files = builder.build();
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].relative_path(),
            "unlocks/civilization-babylon-abbasid.xml"
        );
        assert_eq!(
            files[0].action_groups,
            vec![builder.scopes().shell.clone(), builder.scopes().always.clone()]
        );
        let row = &builder.documents().shell.rows(Table::CivilizationUnlocks)[0];
        assert_eq!(row.attr_str("CivilizationType"), Some("CIVILIZATION_BABYLON"));
        assert_eq!(row.attr_str("Type"), Some("CIVILIZATION_ABBASID"));
        assert_eq!(row.attr_str("AgeType"), Some("AGE_EXPLORATION"));
        assert_eq!(
            row.attr_str("CivilizationDomain"),
            Some("AntiquityAgeCivilizations")
        );
    }

    #[test]
    fn missing_target_emits_nothing() {
        let mut builder = CivilizationUnlockBuilder::new();
        builder.fill(CivilizationUnlockConfig {
            civilization_type: Some("CIVILIZATION_BABYLON".into()),
            ..Default::default()
        });
        assert!(builder.build().is_empty());
    }
}
