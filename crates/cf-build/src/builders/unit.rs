use std::rc::Rc;

use serde::Deserialize;

use cf_core::constants::{kind, tag_category};
use cf_core::ident::{locale, path_segment};
use cf_core::rows::{
    TagRow, TypeRow, TypeTagRow, UnitAdvisoryRow, UnitCostRow, UnitReplaceRow, UnitRow,
    UnitStatRow, UnitUpgradeRow,
};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, Table, impl_fill};

use crate::builder::{
    Builder, Documents, EntityKind, EntityLocalization, Icon, non_empty, patch_rows, push_icon,
    shell_and_always,
};

/// Unit configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Primary type, e.g. `UNIT_BABYLON_SCOUT`.
    pub unit_type: Option<String>,
    /// Extra tags attached to the unit, e.g. `UNIT_CLASS_RECON`.
    pub type_tags: Vec<String>,
    /// Columns of the `Units` row.
    pub unit: UnitRow,
    /// Production and purchase costs.
    pub unit_costs: Vec<UnitCostRow>,
    /// Combat stats.
    pub unit_stat: UnitStatRow,
    /// The base unit this one replaces.
    pub replaces: Option<String>,
    /// The unit this one upgrades to.
    pub upgrades_to: Option<String>,
    /// Advisor classes, e.g. `ADVISORY_CLASS_MILITARY`.
    pub advisories: Vec<String>,
    /// Unit icon.
    pub icon: Option<Icon>,
    /// Display text.
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(UnitConfig {
    unit_type,
    type_tags,
    unit,
    unit_costs,
    unit_stat,
    replaces,
    upgrades_to,
    advisories,
    icon,
    localizations,
});

/// Builds a unit and its ancillary tables.
#[derive(Debug, Default)]
pub struct UnitBuilder {
    config: UnitConfig,
    owner_trait: Option<String>,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl UnitBuilder {
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
    pub fn fill(&mut self, config: UnitConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    /// The trait assigned by an owning civilization, if any.
    pub fn owner_trait(&self) -> Option<&str> {
        self.owner_trait.as_deref()
    }
}

/// `UNIT_BABYLON_SCOUT` → `UNIT_CLASS_BABYLON_SCOUT`.
fn class_tag(unit_type: &str) -> String {
    match unit_type.strip_prefix("UNIT_") {
        Some(rest) => format!("UNIT_CLASS_{rest}"),
        None => format!("UNIT_CLASS_{unit_type}"),
    }
}

impl Builder for UnitBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::Unit
    }

    fn primary_type(&self) -> Option<String> {
        self.config.unit_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(unit) = self.config.unit_type.clone() else {
            return;
        };
        let cfg = &self.config;
        let current = &mut self.documents.current;

        let tag = class_tag(&unit);
        current.push(&TypeRow::of(&unit, kind::UNIT));
        current.push(&TagRow {
            tag: Some(tag.clone()),
            category: Some(tag_category::UNIT_CLASS.into()),
        });
        current.push(&TypeTagRow::of(&unit, &tag));
        for extra in &cfg.type_tags {
            current.push(&TypeTagRow::of(&unit, extra));
        }

        let mut row = UnitRow {
            name: Some(locale(&unit, "name")),
            description: Some(locale(&unit, "description")),
            ..Default::default()
        };
        row.overlay(cfg.unit.clone());
        row.unit_type = Some(unit.clone());
        if let Some(owner) = &self.owner_trait {
            row.trait_type = Some(owner.clone());
        }
        current.push(&row);

        for cost in &cfg.unit_costs {
            current.push(&UnitCostRow {
                unit_type: Some(unit.clone()),
                ..cost.clone()
            });
        }
        if cfg.unit_stat != UnitStatRow::default() {
            current.push(&UnitStatRow {
                unit_type: Some(unit.clone()),
                ..cfg.unit_stat.clone()
            });
        }
        if let Some(base) = &cfg.replaces {
            current.push(&UnitReplaceRow {
                civ_unique_unit_type: Some(unit.clone()),
                replaces_unit_type: Some(base.clone()),
            });
        }
        if let Some(next) = &cfg.upgrades_to {
            current.push(&UnitUpgradeRow {
                unit: Some(unit.clone()),
                upgrade_unit: Some(next.clone()),
            });
        }
        for class in &cfg.advisories {
            current.push(&UnitAdvisoryRow {
                unit_type: Some(unit.clone()),
                advisory_class_type: Some(class.clone()),
            });
        }

        push_icon(&mut self.documents.icons, &unit, cfg.icon.as_ref());
        for text in &cfg.localizations {
            text.push_rows(&mut self.documents.localizations, &unit);
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(unit) = &self.config.unit_type else {
            return Vec::new();
        };
        let dir = format!("units/{}", path_segment(unit));
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
        patch_rows(&mut self.documents.current, Table::Units, "TraitType", trait_type);
    }
}
