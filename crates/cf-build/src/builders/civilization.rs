use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use cf_core::constants::kind;
use cf_core::ident::{locale, path_segment, trim};
use cf_core::rows::{
    CityNameRow, CivilizationFavoredWonderRow, CivilizationItemRow, CivilizationRow,
    CivilizationTagRow, CivilizationTraitRow, LegacyCivilizationRow, LegacyCivilizationTraitRow,
    StartBiasAdjacentToCoastRow, StartBiasBiomeRow, StartBiasFeatureClassRow, StartBiasResourceRow,
    StartBiasRiverRow, StartBiasTerrainRow, TraitModifierRow, TraitRow, TypeRow,
};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, Table, impl_fill};

use crate::builder::{
    AnyBuilder, Builder, Documents, EntityKind, Icon, adopt_modifiers, civilization_domain,
    non_empty, patch_rows, push_icon, push_insert_or_ignore, push_text, shell_and_always,
};

const FULL_CIV: &str = "CIVILIZATION_LEVEL_FULL_CIV";

/// Civilization text for one language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CivilizationLocalization {
    /// Language code, `en_US` when unset.
    pub language: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub full_name: Option<String>,
    pub adjective: Option<String>,
    /// Name of the civilization ability.
    pub ability_name: Option<String>,
    /// Description of the civilization ability.
    pub ability_description: Option<String>,
    /// City names in founding order; the first is the capital.
    pub city_names: Vec<String>,
}

/// Civilization configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CivilizationConfig {
    /// Primary type, e.g. `CIVILIZATION_BABYLON`.
    pub civilization_type: Option<String>,
    /// Derived trait override; defaults to `TRAIT_<trimmed type>`.
    pub trait_type: Option<String>,
    /// Ability trait override; defaults to `<trait>_ABILITY`.
    pub trait_ability_type: Option<String>,
    /// Columns of the `Civilizations` row.
    pub civilization: CivilizationRow,
    /// Columns of the `LegacyCivilizations` row.
    pub civilization_legacy: LegacyCivilizationRow,
    /// Extra traits already defined elsewhere.
    pub civilization_traits: Vec<String>,
    pub civilization_tags: Vec<String>,
    pub civilization_items: Vec<CivilizationItemRow>,
    pub favored_wonders: Vec<CivilizationFavoredWonderRow>,
    pub start_bias_biomes: Vec<StartBiasBiomeRow>,
    pub start_bias_terrains: Vec<StartBiasTerrainRow>,
    pub start_bias_feature_classes: Vec<StartBiasFeatureClassRow>,
    pub start_bias_resources: Vec<StartBiasResourceRow>,
    /// Score for starting near a river.
    pub start_bias_river: Option<i32>,
    /// Score for starting on the coast.
    pub start_bias_adjacent_to_coast: Option<i32>,
    pub icon: Option<Icon>,
    pub localizations: Vec<CivilizationLocalization>,
}

impl_fill!(CivilizationConfig {
    civilization_type,
    trait_type,
    trait_ability_type,
    civilization,
    civilization_legacy,
    civilization_traits,
    civilization_tags,
    civilization_items,
    favored_wonders,
    start_bias_biomes,
    start_bias_terrains,
    start_bias_feature_classes,
    start_bias_resources,
    start_bias_river,
    start_bias_adjacent_to_coast,
    icon,
    localizations,
});

/// Builds a civilization, its derived traits, and everything bound to it.
///
/// Binding rules by child kind:
/// - modifiers are registered here and linked to the ability trait unless detached
/// - units, constructibles and unique quarters get the derived trait assigned
/// - a progression tree hands its modifiers over and becomes the unique
///   culture tree unless one is configured
#[derive(Debug, Default)]
pub struct CivilizationBuilder {
    config: CivilizationConfig,
    children: Vec<AnyBuilder>,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl CivilizationBuilder {
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
    pub fn fill(&mut self, config: CivilizationConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Attach children. Rules are applied at migration, in bind order.
    pub fn bind(&mut self, children: impl IntoIterator<Item = AnyBuilder>) -> &mut Self {
        self.children.extend(children);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &CivilizationConfig {
        &self.config
    }

    /// The derived trait, e.g. `TRAIT_BABYLON`.
    pub fn trait_type(&self) -> Option<String> {
        let civ = self.config.civilization_type.as_deref()?;
        Some(
            self.config
                .trait_type
                .clone()
                .unwrap_or_else(|| format!("TRAIT_{}", trim(civ))),
        )
    }

    /// The ability trait, e.g. `TRAIT_BABYLON_ABILITY`.
    pub fn ability_trait_type(&self) -> Option<String> {
        let base = self.trait_type()?;
        Some(
            self.config
                .trait_ability_type
                .clone()
                .unwrap_or_else(|| format!("{base}_ABILITY")),
        )
    }

    fn city_name_count(&self) -> usize {
        self.config
            .localizations
            .iter()
            .map(|l| l.city_names.len())
            .max()
            .unwrap_or(0)
    }

    fn civilization_row(&self, civ: &str) -> CivilizationRow {
        let mut row = CivilizationRow {
            domain: self.scopes.age.as_deref().and_then(civilization_domain),
            name: Some(locale(civ, "name")),
            description: Some(locale(civ, "description")),
            full_name: Some(locale(civ, "fullName")),
            adjective: Some(locale(civ, "adjective")),
            starting_civilization_level_type: Some(FULL_CIV.into()),
            capital_name: (self.city_name_count() > 0).then(|| locale(civ, "cityNames_1")),
            ..Default::default()
        };
        row.overlay(self.config.civilization.clone());
        row.civilization_type = Some(civ.to_string());
        row
    }

    fn populate_current(&mut self, civ: &str, trait_type: &str, ability: &str) {
        let cfg = &self.config;
        let civ_row = self.civilization_row(civ);
        let current = &mut self.documents.current;

        current.push(&TypeRow::of(civ, kind::CIVILIZATION));
        current.push(&TypeRow::of(trait_type, kind::TRAIT));
        current.push(&TypeRow::of(ability, kind::TRAIT));
        current.push(&TraitRow {
            trait_type: Some(trait_type.into()),
            internal_only: Some(true),
            ..Default::default()
        });
        current.push(&TraitRow {
            trait_type: Some(ability.into()),
            name: Some(locale(ability, "name")),
            description: Some(locale(ability, "description")),
            internal_only: None,
        });
        current.push(&civ_row);

        let traits = cfg
            .civilization_traits
            .iter()
            .map(String::as_str)
            .chain([trait_type, ability]);
        for t in traits {
            current.push(&CivilizationTraitRow {
                civilization_type: Some(civ.into()),
                trait_type: Some(t.into()),
            });
        }
        for tag in &cfg.civilization_tags {
            current.push(&CivilizationTagRow {
                civilization_type: Some(civ.into()),
                tag_type: Some(tag.clone()),
            });
        }
        for item in &cfg.civilization_items {
            let mut row = CivilizationItemRow {
                civilization_domain: civ_row.domain.clone(),
                ..Default::default()
            };
            row.overlay(item.clone());
            row.civilization_type = Some(civ.into());
            current.push(&row);
        }
        for wonder in &cfg.favored_wonders {
            current.push(&CivilizationFavoredWonderRow {
                civilization_type: Some(civ.into()),
                ..wonder.clone()
            });
        }

        for bias in &cfg.start_bias_biomes {
            current.push(&StartBiasBiomeRow {
                civilization_type: Some(civ.into()),
                ..bias.clone()
            });
        }
        for bias in &cfg.start_bias_terrains {
            current.push(&StartBiasTerrainRow {
                civilization_type: Some(civ.into()),
                ..bias.clone()
            });
        }
        for bias in &cfg.start_bias_feature_classes {
            current.push(&StartBiasFeatureClassRow {
                civilization_type: Some(civ.into()),
                ..bias.clone()
            });
        }
        for bias in &cfg.start_bias_resources {
            current.push(&StartBiasResourceRow {
                civilization_type: Some(civ.into()),
                ..bias.clone()
            });
        }
        if let Some(score) = cfg.start_bias_river {
            current.push(&StartBiasRiverRow {
                civilization_type: Some(civ.into()),
                score: Some(score),
            });
        }
        if let Some(score) = cfg.start_bias_adjacent_to_coast {
            current.push(&StartBiasAdjacentToCoastRow {
                civilization_type: Some(civ.into()),
                score: Some(score),
            });
        }

        let city_names = cfg.localizations.iter().map(|l| l.city_names.len()).max();
        for i in 1..=city_names.unwrap_or(0) {
            current.push(&CityNameRow {
                civilization_type: Some(civ.into()),
                city_name: Some(locale(civ, &format!("cityNames_{i}"))),
            });
        }
    }

    fn populate_shell(&mut self, civ: &str) {
        let full = self.civilization_row(civ);
        let shell = &mut self.documents.shell;
        shell.push(&CivilizationRow {
            civilization_type: full.civilization_type,
            domain: full.domain,
            name: full.name,
            description: full.description,
            full_name: full.full_name,
            adjective: full.adjective,
            ..Default::default()
        });
        for tag in &self.config.civilization_tags {
            shell.push(&CivilizationTagRow {
                civilization_type: Some(civ.into()),
                tag_type: Some(tag.clone()),
            });
        }
    }

    fn populate_legacy(&mut self, civ: &str, trait_type: &str, ability: &str) {
        let Some(age) = self.scopes.age.clone() else {
            return;
        };
        let legacy = &mut self.documents.legacy;
        push_insert_or_ignore(legacy, &TypeRow::of(civ, kind::CIVILIZATION));
        push_insert_or_ignore(legacy, &TypeRow::of(trait_type, kind::TRAIT));
        push_insert_or_ignore(legacy, &TypeRow::of(ability, kind::TRAIT));
        push_insert_or_ignore(
            legacy,
            &TraitRow {
                trait_type: Some(trait_type.into()),
                internal_only: Some(true),
                ..Default::default()
            },
        );
        push_insert_or_ignore(
            legacy,
            &TraitRow {
                trait_type: Some(ability.into()),
                name: Some(locale(ability, "name")),
                description: Some(locale(ability, "description")),
                internal_only: None,
            },
        );

        let mut row = LegacyCivilizationRow {
            age: Some(age),
            name: Some(locale(civ, "name")),
            full_name: Some(locale(civ, "fullName")),
            adjective: Some(locale(civ, "adjective")),
            ..Default::default()
        };
        row.overlay(self.config.civilization_legacy.clone());
        row.civilization_type = Some(civ.into());
        legacy.push(&row);
        for t in [trait_type, ability] {
            legacy.push(&LegacyCivilizationTraitRow {
                civilization_type: Some(civ.into()),
                trait_type: Some(t.into()),
            });
        }
    }

    fn populate_localizations(&mut self, civ: &str, ability: &str) {
        let doc = &mut self.documents.localizations;
        for text in &self.config.localizations {
            let lang = text.language.as_deref();
            push_text(doc, civ, "name", lang, text.name.as_deref());
            push_text(doc, civ, "description", lang, text.description.as_deref());
            push_text(doc, civ, "fullName", lang, text.full_name.as_deref());
            push_text(doc, civ, "adjective", lang, text.adjective.as_deref());
            push_text(doc, ability, "name", lang, text.ability_name.as_deref());
            push_text(
                doc,
                ability,
                "description",
                lang,
                text.ability_description.as_deref(),
            );
            for (i, city) in text.city_names.iter().enumerate() {
                let field = format!("cityNames_{}", i + 1);
                push_text(doc, civ, &field, lang, Some(city));
            }
        }
    }

    fn apply_bindings(&mut self, trait_type: &str, ability: &str) {
        for handle in &self.children {
            let Some(mut child) = handle.migrated() else {
                continue;
            };
            match child.kind() {
                EntityKind::Modifier => {
                    adopt_modifiers(&*child, &mut self.documents);
                    if child.is_detached() {
                        continue;
                    }
                    for id in child.documents().modifier_ids() {
                        self.documents.current.push(&TraitModifierRow {
                            trait_type: Some(ability.into()),
                            modifier_id: Some(id),
                        });
                    }
                }
                EntityKind::Unit | EntityKind::Constructible | EntityKind::UniqueQuarter => {
                    child.assign_trait(trait_type);
                }
                EntityKind::ProgressionTree => {
                    self.documents.game_effects.extend_rows(
                        Table::Modifiers,
                        child
                            .documents()
                            .game_effects
                            .rows(Table::Modifiers)
                            .iter()
                            .cloned(),
                    );
                    child.hand_off_modifiers();
                    let culture_tree = child.primary_type().filter(|_| {
                        self.config
                            .civilization
                            .unique_culture_progression_tree
                            .is_none()
                    });
                    if let Some(tree) = culture_tree {
                        patch_rows(
                            &mut self.documents.current,
                            Table::Civilizations,
                            "UniqueCultureProgressionTree",
                            &tree,
                        );
                    }
                }
                other => {
                    debug!(kind = %other, "civilization has no binding rule for this kind; skipped");
                }
            }
        }
    }
}

impl Builder for CivilizationBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::Civilization
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
        let (Some(civ), Some(trait_type), Some(ability)) = (
            self.config.civilization_type.clone(),
            self.trait_type(),
            self.ability_trait_type(),
        ) else {
            return;
        };

        self.populate_current(&civ, &trait_type, &ability);
        self.populate_shell(&civ);
        self.populate_legacy(&civ, &trait_type, &ability);
        push_icon(&mut self.documents.icons, &civ, self.config.icon.as_ref());
        self.populate_localizations(&civ, &ability);
        self.apply_bindings(&trait_type, &ability);
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(civ) = &self.config.civilization_type else {
            return Vec::new();
        };
        let dir = format!("civilizations/{}", path_segment(civ));
        let scopes = &self.scopes;
        let docs = &self.documents;
        non_empty([
            OutputFile::xml(
                &dir,
                "current.xml",
                docs.current.clone(),
                vec![scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "legacy.xml",
                docs.legacy.clone(),
                vec![scopes.persist.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "shell.xml",
                docs.shell.clone(),
                vec![scopes.shell.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "icons.xml",
                docs.icons.clone(),
                shell_and_always(scopes),
                vec![Action::UpdateIcons],
            ),
            OutputFile::xml(
                &dir,
                "localization.xml",
                docs.localizations.clone(),
                shell_and_always(scopes),
                vec![Action::UpdateText],
            ),
            OutputFile::xml(
                &dir,
                "game-effects.xml",
                docs.game_effects.clone(),
                vec![scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ),
        ])
    }
}
