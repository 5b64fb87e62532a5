use std::rc::Rc;

use serde::Deserialize;

use cf_core::constants::kind;
use cf_core::ident::{locale, path_segment};
use cf_core::rows::{TypeRow, UniqueQuarterRow};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, Table, impl_fill};

use crate::builder::{
    Builder, Documents, EntityKind, EntityLocalization, Icon, non_empty, patch_rows, push_icon,
    shell_and_always,
};

/// Unique quarter configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UniqueQuarterConfig {
    /// Primary type, e.g. `QUARTER_BABYLON_GATE`.
    pub unique_quarter_type: Option<String>,
    /// Columns of the `UniqueQuarters` row; name both buildings here.
    pub unique_quarter: UniqueQuarterRow,
    /// Quarter icon.
    pub icon: Option<Icon>,
    /// Display text.
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(UniqueQuarterConfig {
    unique_quarter_type,
    unique_quarter,
    icon,
    localizations,
});

/// Builds a civilization-unique quarter from two buildings.
#[derive(Debug, Default)]
pub struct UniqueQuarterBuilder {
    config: UniqueQuarterConfig,
    owner_trait: Option<String>,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl UniqueQuarterBuilder {
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
    pub fn fill(&mut self, config: UniqueQuarterConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }
}

impl Builder for UniqueQuarterBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::UniqueQuarter
    }

    fn primary_type(&self) -> Option<String> {
        self.config.unique_quarter_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(quarter) = self.config.unique_quarter_type.clone() else {
            return;
        };

        self.documents
            .current
            .push(&TypeRow::of(&quarter, kind::QUARTER));
        let mut row = UniqueQuarterRow {
            name: Some(locale(&quarter, "name")),
            description: Some(locale(&quarter, "description")),
            ..Default::default()
        };
        row.overlay(self.config.unique_quarter.clone());
        row.unique_quarter_type = Some(quarter.clone());
        row.trait_type.overlay(self.owner_trait.clone());
        self.documents.current.push(&row);

        push_icon(&mut self.documents.icons, &quarter, self.config.icon.as_ref());
        for text in &self.config.localizations {
            text.push_rows(&mut self.documents.localizations, &quarter);
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(quarter) = &self.config.unique_quarter_type else {
            return Vec::new();
        };
        let dir = format!("unique-quarters/{}", path_segment(quarter));
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

    fn assign_trait(&mut self, trait_type: &str) {
        self.owner_trait = Some(trait_type.to_string());
        patch_rows(
            &mut self.documents.current,
            Table::UniqueQuarters,
            "TraitType",
            trait_type,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_row_names_buildings() {
        let mut builder = UniqueQuarterBuilder::new();
        builder.fill(UniqueQuarterConfig {
            unique_quarter_type: Some("QUARTER_BABYLON_GATE".into()),
            unique_quarter: UniqueQuarterRow {
                building_type1: Some("BUILDING_ETEMENANKI".into()),
                building_type2: Some("BUILDING_ISHTAR_GATE".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        let files = builder.build();
        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].relative_path(),
            "unique-quarters/babylon-gate/current.xml"
        );
        let row = &builder.documents().current.rows(Table::UniqueQuarters)[0];
        assert_eq!(row.attr_str("BuildingType2"), Some("BUILDING_ISHTAR_GATE"));
        assert_eq!(row.attr_str("Name"), Some("LOC_QUARTER_BABYLON_GATE_NAME"));
    }

    #[test]
    fn owner_trait_survives_remigration() {
        let mut builder = UniqueQuarterBuilder::new();
        builder.fill(UniqueQuarterConfig {
            unique_quarter_type: Some("QUARTER_X".into()),
            ..Default::default()
        });
        builder.assign_trait("TRAIT_X");
        builder.migrate();
        assert_eq!(
            builder.documents().current.rows(Table::UniqueQuarters)[0].attr_str("TraitType"),
            Some("TRAIT_X")
        );
    }
}
