use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use cf_core::constants::kind;
use cf_core::ident::{locale, path_segment};
use cf_core::rows::{ProgressionTreePrereqRow, ProgressionTreeRow, TypeRow};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, Table, impl_fill};

use crate::builder::{
    AnyBuilder, Builder, Documents, EntityKind, EntityLocalization, non_empty, patch_rows,
    shell_and_always,
};

/// Progression tree configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressionTreeConfig {
    /// Primary type, e.g. `TREE_CIVICS_BABYLON`.
    pub progression_tree_type: Option<String>,
    /// Columns of the `ProgressionTrees` row.
    pub progression_tree: ProgressionTreeRow,
    /// Prerequisite edges between nodes.
    pub prereqs: Vec<ProgressionTreePrereqRow>,
    /// Display text.
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(ProgressionTreeConfig {
    progression_tree_type,
    progression_tree,
    prereqs,
    localizations,
});

/// Builds a tree by merging the documents of its bound nodes.
#[derive(Debug, Default)]
pub struct ProgressionTreeBuilder {
    config: ProgressionTreeConfig,
    nodes: Vec<AnyBuilder>,
    modifiers_handed_off: bool,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl ProgressionTreeBuilder {
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
    pub fn fill(&mut self, config: ProgressionTreeConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Attach nodes, merged in bind order.
    pub fn bind(&mut self, nodes: impl IntoIterator<Item = AnyBuilder>) -> &mut Self {
        self.nodes.extend(nodes);
        self
    }

    /// True once a civilization has taken over this tree's modifiers.
    pub fn modifiers_handed_off(&self) -> bool {
        self.modifiers_handed_off
    }
}

impl Builder for ProgressionTreeBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::ProgressionTree
    }

    fn primary_type(&self) -> Option<String> {
        self.config.progression_tree_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(tree) = self.config.progression_tree_type.clone() else {
            return;
        };

        let current = &mut self.documents.current;
        current.push(&TypeRow::of(&tree, kind::TREE));
        let mut row = ProgressionTreeRow {
            name: Some(locale(&tree, "name")),
            age_type: self.scopes.age.clone(),
            ..Default::default()
        };
        row.overlay(self.config.progression_tree.clone());
        row.progression_tree_type = Some(tree.clone());
        current.push(&row);
        current.push_all(&self.config.prereqs);
        for text in &self.config.localizations {
            text.push_rows(&mut self.documents.localizations, &tree);
        }

        for handle in &self.nodes {
            let Some(node) = handle.migrated() else {
                continue;
            };
            if node.kind() != EntityKind::ProgressionTreeNode {
                debug!(kind = %node.kind(), %tree, "tree only binds nodes; skipped");
                continue;
            }
            let docs = node.documents();
            let mut rows = docs.current.clone();
            patch_rows(
                &mut rows,
                Table::ProgressionTreeNodes,
                "ProgressionTree",
                &tree,
            );
            self.documents.current.merge(&rows);
            self.documents.game_effects.merge(&docs.game_effects);
            self.documents.localizations.merge(&docs.localizations);
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(tree) = &self.config.progression_tree_type else {
            return Vec::new();
        };
        let dir = format!("progression-trees/{}", path_segment(tree));
        let docs = &self.documents;
        let mut files = vec![OutputFile::xml(
            &dir,
            "current.xml",
            docs.current.clone(),
            vec![self.scopes.current.clone()],
            vec![Action::UpdateDatabase],
        )];
        if !self.modifiers_handed_off {
            files.push(OutputFile::xml(
                &dir,
                "game-effects.xml",
                docs.game_effects.clone(),
                vec![self.scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ));
        }
        files.push(OutputFile::xml(
            &dir,
            "localization.xml",
            docs.localizations.clone(),
            shell_and_always(&self.scopes),
            vec![Action::UpdateText],
        ));
        non_empty(files)
    }

    fn hand_off_modifiers(&mut self) {
        self.modifiers_handed_off = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Shared;
    use crate::builders::constructible::{ConstructibleBuilder, ConstructibleConfig};
    use crate::builders::modifier::{ModifierBuilder, ModifierConfig};
    use crate::builders::progression_tree_node::{
        ProgressionTreeNodeBuilder, ProgressionTreeNodeConfig,
    };
    use cf_core::Row;
    use cf_core::rows::ModifierRow;

    fn node_unlocking(node: &str, building: &str) -> Shared<ProgressionTreeNodeBuilder> {
        let constructible = Shared::new(ConstructibleBuilder::new());
        constructible.borrow_mut().fill(ConstructibleConfig {
            constructible_type: Some(building.into()),
            ..Default::default()
        });
        let modifier = Shared::new(ModifierBuilder::new());
        modifier.borrow_mut().fill(ModifierConfig {
            modifier: ModifierRow {
                id: Some(format!("MOD_{node}")),
                effect: Some("EFFECT_X".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        let handle = Shared::new(ProgressionTreeNodeBuilder::new());
        handle
            .borrow_mut()
            .fill(ProgressionTreeNodeConfig {
                progression_tree_node_type: Some(node.into()),
                advisories: vec![format!("ADVISORY_CLASS_{node}")],
                localizations: vec![EntityLocalization {
                    name: Some(node.to_lowercase()),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .bind([constructible.erased(), modifier.erased()]);
        handle
    }

    fn tree(nodes: &[&Shared<ProgressionTreeNodeBuilder>]) -> ProgressionTreeBuilder {
        let mut tree = ProgressionTreeBuilder::new();
        tree.fill(ProgressionTreeConfig {
            progression_tree_type: Some("TREE_CIVICS_BABYLON".into()),
            ..Default::default()
        })
        .bind(nodes.iter().map(|n| n.erased()));
        tree
    }

    #[test]
    fn merged_rows_are_concatenated_in_bind_order() {
        let a = node_unlocking("NODE_A", "BUILDING_A");
        let b = node_unlocking("NODE_B", "BUILDING_B");
        let mut tree = tree(&[&a, &b]);
        tree.migrate();

        let concat = |pick: fn(&Documents) -> &[Row]| -> Vec<Row> {
            [&a, &b]
                .iter()
                .flat_map(|n| pick(n.borrow().documents()).to_vec())
                .collect()
        };
        let docs = tree.documents();
        let unlocks: fn(&Documents) -> &[Row] =
            |d| d.current.rows(Table::ProgressionTreeNodeUnlocks);
        let advisories: fn(&Documents) -> &[Row] =
            |d| d.current.rows(Table::ProgressionTreeAdvisories);
        let modifiers: fn(&Documents) -> &[Row] = |d| d.game_effects.rows(Table::Modifiers);
        let texts: fn(&Documents) -> &[Row] = |d| d.localizations.rows(Table::LocalizedText);

        assert_eq!(unlocks(docs).len(), 4);
        assert_eq!(unlocks(docs), concat(unlocks).as_slice());
        assert_eq!(advisories(docs).len(), 2);
        assert_eq!(advisories(docs), concat(advisories).as_slice());
        let ids: Vec<_> = modifiers(docs)
            .iter()
            .filter_map(|r| r.attr_str("id"))
            .collect();
        assert_eq!(ids, vec!["MOD_NODE_A", "MOD_NODE_B"]);
        assert_eq!(modifiers(docs), concat(modifiers).as_slice());
        assert_eq!(texts(docs).len(), 2);
        assert_eq!(texts(docs), concat(texts).as_slice());
    }

    #[test]
    fn node_rows_get_owning_tree() {
        let a = node_unlocking("NODE_A", "BUILDING_A");
        let mut tree = tree(&[&a]);
        tree.migrate();
        let nodes = tree.documents().current.rows(Table::ProgressionTreeNodes);
        assert_eq!(nodes[0].attr_str("ProgressionTree"), Some("TREE_CIVICS_BABYLON"));
        // The node's own documents are left untouched.
        assert_eq!(
            a.borrow().documents().current.rows(Table::ProgressionTreeNodes)[0]
                .attr_str("ProgressionTree"),
            None
        );
    }

    #[test]
    fn handed_off_tree_skips_game_effects() {
        let mut tree = tree(&[]);
        tree.migrate();
        tree.documents.game_effects.push(&cf_core::rows::ModifierRow {
            id: Some("MOD_X".into()),
            ..Default::default()
        });
        assert!(
            tree.files()
                .iter()
                .any(|f| f.name == "game-effects.xml")
        );
        tree.hand_off_modifiers();
        assert!(
            !tree
                .files()
                .iter()
                .any(|f| f.name == "game-effects.xml")
        );
    }
}
