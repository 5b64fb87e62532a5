use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use cf_core::constants::kind;
use cf_core::ident::{locale, path_segment};
use cf_core::rows::{TraditionModifierRow, TraditionRow, TypeRow};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, impl_fill};

use crate::builder::{
    AnyBuilder, Builder, Documents, EntityKind, EntityLocalization, Icon, adopt_modifiers,
    non_empty, push_icon, shell_and_always,
};

/// Tradition configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TraditionConfig {
    /// Primary type, e.g. `TRADITION_BABYLON_CODE`.
    pub tradition_type: Option<String>,
    /// Columns of the `Traditions` row.
    pub tradition: TraditionRow,
    /// Tradition card icon.
    pub icon: Option<Icon>,
    /// Display text.
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(TraditionConfig {
    tradition_type,
    tradition,
    icon,
    localizations
});

/// Builds a tradition and links the modifiers bound to it.
#[derive(Debug, Default)]
pub struct TraditionBuilder {
    config: TraditionConfig,
    children: Vec<AnyBuilder>,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl TraditionBuilder {
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
    pub fn fill(&mut self, config: TraditionConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Attach modifiers granted while the tradition is slotted.
    pub fn bind(&mut self, children: impl IntoIterator<Item = AnyBuilder>) -> &mut Self {
        self.children.extend(children);
        self
    }
}

impl Builder for TraditionBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::Tradition
    }

    fn primary_type(&self) -> Option<String> {
        self.config.tradition_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(tradition) = self.config.tradition_type.clone() else {
            return;
        };

        self.documents
            .current
            .push(&TypeRow::of(&tradition, kind::TRADITION));
        let mut row = TraditionRow {
            name: Some(locale(&tradition, "name")),
            description: Some(locale(&tradition, "description")),
            age_type: self.scopes.age.clone(),
            ..Default::default()
        };
        row.overlay(self.config.tradition.clone());
        row.tradition_type = Some(tradition.clone());
        self.documents.current.push(&row);

        push_icon(&mut self.documents.icons, &tradition, self.config.icon.as_ref());
        for text in &self.config.localizations {
            text.push_rows(&mut self.documents.localizations, &tradition);
        }

        for handle in &self.children {
            let Some(child) = handle.migrated() else {
                continue;
            };
            if child.kind() != EntityKind::Modifier {
                debug!(kind = %child.kind(), %tradition, "tradition only binds modifiers; skipped");
                continue;
            }
            adopt_modifiers(&*child, &mut self.documents);
            for id in child.documents().modifier_ids() {
                self.documents.current.push(&TraditionModifierRow {
                    tradition_type: Some(tradition.clone()),
                    modifier_id: Some(id),
                });
            }
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(tradition) = &self.config.tradition_type else {
            return Vec::new();
        };
        let dir = format!("traditions/{}", path_segment(tradition));
        let docs = &self.documents;
        non_empty([
            OutputFile::xml(
                &dir,
                "current.xml",
                docs.current.clone(),
                vec![self.scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "game-effects.xml",
                docs.game_effects.clone(),
                vec![self.scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "icons.xml",
                docs.icons.clone(),
                shell_and_always(&self.scopes),
                vec![Action::UpdateIcons],
            ),
            OutputFile::xml(
                &dir,
                "localization.xml",
                docs.localizations.clone(),
                shell_and_always(&self.scopes),
                vec![Action::UpdateText],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Shared;
    use crate::builders::modifier::{ModifierBuilder, ModifierConfig};
    use cf_core::Table;
    use cf_core::rows::ModifierRow;

    #[test]
    fn bound_modifiers_become_tradition_modifiers() {
        let modifier = Shared::new(ModifierBuilder::new());
        modifier.borrow_mut().fill(ModifierConfig {
            modifier: ModifierRow {
                id: Some("MOD_CODE_SCIENCE".into()),
                effect: Some("EFFECT_CITY_ADJUST_YIELD".into()),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut tradition = TraditionBuilder::new();
        tradition
            .fill(TraditionConfig {
                tradition_type: Some("TRADITION_BABYLON_CODE".into()),
                ..Default::default()
            })
            .bind([modifier.erased()]);
        let files = tradition.build();

        let links = tradition.documents().current.rows(Table::TraditionModifiers);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr_str("ModifierId"), Some("MOD_CODE_SCIENCE"));
        assert_eq!(
            tradition.documents().game_effects.rows(Table::Modifiers).len(),
            1
        );
        assert!(
            files
                .iter()
                .any(|f| f.relative_path() == "traditions/babylon-code/game-effects.xml")
        );
    }

    #[test]
    fn icon_gets_its_own_document() {
        let mut tradition = TraditionBuilder::new();
        tradition.fill(TraditionConfig {
            tradition_type: Some("TRADITION_BABYLON_CODE".into()),
            ..Default::default()
        });
        let files = tradition.build();
        assert!(!files.iter().any(|f| f.name == "icons.xml"));

        tradition.fill(TraditionConfig {
            icon: Some(Icon {
                path: "fs://game/trad_babylon_code".into(),
            }),
            ..Default::default()
        });
        let files = tradition.build();
        let icons = files
            .iter()
            .find(|f| f.relative_path() == "traditions/babylon-code/icons.xml")
            .unwrap();
        assert_eq!(icons.actions, vec![Action::UpdateIcons]);
        let rows = tradition.documents().icons.rows(Table::IconDefinitions);
        assert_eq!(rows.len(), 1);
        let texts: Vec<_> = rows[0].children.iter().map(|c| c.text.clone()).collect();
        assert_eq!(
            texts,
            vec![
                Some("TRADITION_BABYLON_CODE".into()),
                Some("fs://game/trad_babylon_code".into()),
            ]
        );
    }
}
