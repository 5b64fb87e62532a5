use std::rc::Rc;

use serde::Deserialize;

use cf_core::constants::{constructible_class, kind};
use cf_core::ident::{locale, path_segment};
use cf_core::rows::{
    BuildingRow, ConstructibleAdjacencyRow, ConstructibleMaintenanceRow, ConstructiblePlunderRow,
    ConstructibleRow, ConstructibleValidBiomeRow, ConstructibleValidDistrictRow,
    ConstructibleValidFeatureRow, ConstructibleValidResourceRow, ConstructibleValidTerrainRow,
    ConstructibleYieldChangeRow, ImprovementRow, TypeRow, TypeTagRow,
};
use cf_core::{Action, ActionGroupBundle, Document, OutputFile, Overlay, Table, impl_fill};

use crate::builder::{
    Builder, Documents, EntityKind, EntityLocalization, Icon, non_empty, patch_rows, push_icon,
    shell_and_always,
};

/// Building or improvement configuration.
///
/// The class comes from whichever of `building` / `improvement` is set, and
/// otherwise from the type prefix (`IMPROVEMENT_*` is an improvement).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ConstructibleConfig {
    pub constructible_type: Option<String>,
    pub constructible: ConstructibleRow,
    pub building: Option<BuildingRow>,
    pub improvement: Option<ImprovementRow>,
    pub type_tags: Vec<String>,
    pub valid_districts: Vec<String>,
    pub valid_biomes: Vec<String>,
    pub valid_terrains: Vec<String>,
    pub valid_features: Vec<String>,
    pub valid_resources: Vec<String>,
    pub maintenances: Vec<ConstructibleMaintenanceRow>,
    pub yield_changes: Vec<ConstructibleYieldChangeRow>,
    pub plunders: Vec<ConstructiblePlunderRow>,
    /// Adjacency yield-change ids.
    pub adjacencies: Vec<String>,
    pub icon: Option<Icon>,
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(ConstructibleConfig {
    constructible_type,
    constructible,
    building,
    improvement,
    type_tags,
    valid_districts,
    valid_biomes,
    valid_terrains,
    valid_features,
    valid_resources,
    maintenances,
    yield_changes,
    plunders,
    adjacencies,
    icon,
    localizations,
});

impl ConstructibleConfig {
    /// True when this constructible is an improvement rather than a building.
    pub fn is_improvement(&self) -> bool {
        if self.building.is_some() {
            return false;
        }
        self.improvement.is_some()
            || self
                .constructible_type
                .as_deref()
                .is_some_and(|t| t.starts_with("IMPROVEMENT_"))
    }
}

/// Builds a building or improvement.
#[derive(Debug, Default)]
pub struct ConstructibleBuilder {
    config: ConstructibleConfig,
    owner_trait: Option<String>,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl ConstructibleBuilder {
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
    pub fn fill(&mut self, config: ConstructibleConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ConstructibleConfig {
        &self.config
    }

    fn class_table(&self) -> Table {
        if self.config.is_improvement() {
            Table::Improvements
        } else {
            Table::Buildings
        }
    }
}

/// One row per listed value, keyed by the constructible type.
fn push_each<R, F>(doc: &mut Document, constructible: &str, values: &[String], make: F)
where
    R: cf_core::TableRow,
    F: Fn(String, String) -> R,
{
    for value in values {
        doc.push(&make(constructible.to_string(), value.clone()));
    }
}

impl Builder for ConstructibleBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::Constructible
    }

    fn primary_type(&self) -> Option<String> {
        self.config.constructible_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(ty) = self.config.constructible_type.clone() else {
            return;
        };
        let cfg = &self.config;
        let owner = self.owner_trait.clone();
        let current = &mut self.documents.current;

        current.push(&TypeRow::of(&ty, kind::CONSTRUCTIBLE));
        for tag in &cfg.type_tags {
            current.push(&TypeTagRow::of(&ty, tag));
        }

        let class = if cfg.is_improvement() {
            constructible_class::IMPROVEMENT
        } else {
            constructible_class::BUILDING
        };
        let mut row = ConstructibleRow {
            constructible_class: Some(class.into()),
            name: Some(locale(&ty, "name")),
            description: Some(locale(&ty, "description")),
            tooltip: Some(locale(&ty, "tooltip")),
            age: self.scopes.age.clone(),
            ..Default::default()
        };
        row.overlay(cfg.constructible.clone());
        row.constructible_type = Some(ty.clone());
        current.push(&row);

        if cfg.is_improvement() {
            let mut improvement = cfg.improvement.clone().unwrap_or_default();
            improvement.constructible_type = Some(ty.clone());
            improvement.trait_type.overlay(owner);
            current.push(&improvement);
        } else {
            let mut building = cfg.building.clone().unwrap_or_default();
            building.constructible_type = Some(ty.clone());
            building.trait_type.overlay(owner);
            current.push(&building);
        }

        push_each(current, &ty, &cfg.valid_districts, |c, v| {
            ConstructibleValidDistrictRow {
                constructible_type: Some(c),
                district_type: Some(v),
            }
        });
        push_each(current, &ty, &cfg.valid_biomes, |c, v| {
            ConstructibleValidBiomeRow {
                constructible_type: Some(c),
                biome_type: Some(v),
            }
        });
        push_each(current, &ty, &cfg.valid_terrains, |c, v| {
            ConstructibleValidTerrainRow {
                constructible_type: Some(c),
                terrain_type: Some(v),
            }
        });
        push_each(current, &ty, &cfg.valid_features, |c, v| {
            ConstructibleValidFeatureRow {
                constructible_type: Some(c),
                feature_type: Some(v),
            }
        });
        push_each(current, &ty, &cfg.valid_resources, |c, v| {
            ConstructibleValidResourceRow {
                constructible_type: Some(c),
                resource_type: Some(v),
            }
        });
        for maintenance in &cfg.maintenances {
            current.push(&ConstructibleMaintenanceRow {
                constructible_type: Some(ty.clone()),
                ..maintenance.clone()
            });
        }
        for change in &cfg.yield_changes {
            current.push(&ConstructibleYieldChangeRow {
                constructible_type: Some(ty.clone()),
                ..change.clone()
            });
        }
        for plunder in &cfg.plunders {
            current.push(&ConstructiblePlunderRow {
                constructible_type: Some(ty.clone()),
                ..plunder.clone()
            });
        }
        for id in &cfg.adjacencies {
            current.push(&ConstructibleAdjacencyRow {
                constructible_type: Some(ty.clone()),
                yield_change_id: Some(id.clone()),
                requires_activation: None,
            });
        }

        push_icon(&mut self.documents.icons, &ty, cfg.icon.as_ref());
        for text in &cfg.localizations {
            text.push_rows(&mut self.documents.localizations, &ty);
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(ty) = &self.config.constructible_type else {
            return Vec::new();
        };
        let dir = format!("constructibles/{}", path_segment(ty));
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
        let table = self.class_table();
        patch_rows(&mut self.documents.current, table, "TraitType", trait_type);
    }
}
