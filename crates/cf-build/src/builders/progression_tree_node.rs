use std::rc::Rc;

use serde::Deserialize;
use tracing::debug;

use cf_core::constants::kind;
use cf_core::ident::{locale, path_segment};
use cf_core::rows::{
    ProgressionTreeAdvisoryRow, ProgressionTreeNodeRow, ProgressionTreeNodeUnlockRow, TypeRow,
};
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, impl_fill};

use crate::builder::{
    AnyBuilder, Builder, Documents, EntityKind, EntityLocalization, adopt_modifiers, non_empty,
    shell_and_always,
};

/// Progression tree node configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressionTreeNodeConfig {
    /// Primary type, e.g. `NODE_CIVIC_BABYLON_SCRIBES`.
    pub progression_tree_node_type: Option<String>,
    /// Columns of the `ProgressionTreeNodes` row.
    pub progression_tree_node: ProgressionTreeNodeRow,
    /// Advisor classes for the node.
    pub advisories: Vec<String>,
    /// Display text.
    pub localizations: Vec<EntityLocalization>,
}

impl_fill!(ProgressionTreeNodeConfig {
    progression_tree_node_type,
    progression_tree_node,
    advisories,
    localizations,
});

#[derive(Debug)]
struct NodeUnlock {
    child: AnyBuilder,
    unlock_depth: i32,
    hidden: Option<bool>,
}

/// Builds one node and the unlock rows for everything bound to it.
#[derive(Debug, Default)]
pub struct ProgressionTreeNodeBuilder {
    config: ProgressionTreeNodeConfig,
    unlocks: Vec<NodeUnlock>,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl ProgressionTreeNodeBuilder {
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
    pub fn fill(&mut self, config: ProgressionTreeNodeConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Unlock children at depth 1.
    pub fn bind(&mut self, children: impl IntoIterator<Item = AnyBuilder>) -> &mut Self {
        self.bind_with(children, 1, None)
    }

    /// Unlock children at a given mastery depth, optionally hidden.
    pub fn bind_with(
        &mut self,
        children: impl IntoIterator<Item = AnyBuilder>,
        unlock_depth: i32,
        hidden: Option<bool>,
    ) -> &mut Self {
        self.unlocks
            .extend(children.into_iter().map(|child| NodeUnlock {
                child,
                unlock_depth,
                hidden,
            }));
        self
    }
}

impl Builder for ProgressionTreeNodeBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::ProgressionTreeNode
    }

    fn primary_type(&self) -> Option<String> {
        self.config.progression_tree_node_type.clone()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let Some(node) = self.config.progression_tree_node_type.clone() else {
            return;
        };

        let current = &mut self.documents.current;
        current.push(&TypeRow::of(&node, kind::TREE_NODE));
        let mut row = ProgressionTreeNodeRow {
            name: Some(locale(&node, "name")),
            ..Default::default()
        };
        row.overlay(self.config.progression_tree_node.clone());
        row.progression_tree_node_type = Some(node.clone());
        current.push(&row);
        for class in &self.config.advisories {
            current.push(&ProgressionTreeAdvisoryRow {
                progression_tree_node_type: Some(node.clone()),
                advisory_class_type: Some(class.clone()),
            });
        }
        for text in &self.config.localizations {
            text.push_rows(&mut self.documents.localizations, &node);
        }

        for unlock in &self.unlocks {
            let Some(child) = unlock.child.migrated() else {
                continue;
            };
            let Some(target_kind) = child.kind().unlock_target_kind() else {
                debug!(kind = %child.kind(), %node, "node cannot unlock this kind; skipped");
                continue;
            };
            let Some(target) = child.primary_type() else {
                continue;
            };
            self.documents.current.push(&ProgressionTreeNodeUnlockRow {
                progression_tree_node_type: Some(node.clone()),
                target_kind: Some(target_kind.into()),
                target_type: Some(target),
                unlock_depth: Some(unlock.unlock_depth),
                hidden: unlock.hidden,
                ai_ignore_unlock_value: None,
            });
            if child.kind() == EntityKind::Modifier {
                adopt_modifiers(&*child, &mut self.documents);
            }
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let Some(node) = &self.config.progression_tree_node_type else {
            return Vec::new();
        };
        let dir = format!("progression-tree-nodes/{}", path_segment(node));
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
    use crate::builders::civilization::CivilizationBuilder;
    use crate::builders::modifier::ModifierBuilder;
    use crate::builders::unit::{UnitBuilder, UnitConfig};
    use cf_core::Table;

    fn node(ty: &str) -> ProgressionTreeNodeBuilder {
        let mut node = ProgressionTreeNodeBuilder::new();
        node.fill(ProgressionTreeNodeConfig {
            progression_tree_node_type: Some(ty.into()),
            ..Default::default()
        });
        node
    }

    #[test]
    fn unlock_rows_carry_target_kind_and_depth() {
        let unit = Shared::new(UnitBuilder::new());
        unit.borrow_mut().fill(UnitConfig {
            unit_type: Some("UNIT_BABYLON_SCOUT".into()),
            ..Default::default()
        });
        let modifier = Shared::new(ModifierBuilder::new());

        let mut builder = node("NODE_CIVIC_BABYLON_SCRIBES");
        builder
            .bind([unit.erased()])
            .bind_with([modifier.erased()], 2, Some(true));
        builder.migrate();

        let unlocks = builder
            .documents()
            .current
            .rows(Table::ProgressionTreeNodeUnlocks);
        assert_eq!(unlocks.len(), 2);
        assert_eq!(unlocks[0].attr_str("TargetKind"), Some("KIND_UNIT"));
        assert_eq!(unlocks[0].attr_str("TargetType"), Some("UNIT_BABYLON_SCOUT"));
        assert_eq!(unlocks[0].attr("UnlockDepth"), Some(&1.into()));
        assert_eq!(unlocks[1].attr_str("TargetKind"), Some("KIND_MODIFIER"));
        assert_eq!(unlocks[1].attr("UnlockDepth"), Some(&2.into()));
        assert_eq!(unlocks[1].attr("Hidden"), Some(&true.into()));
        assert_eq!(
            builder.documents().game_effects.rows(Table::Modifiers).len(),
            1
        );
    }

    #[test]
    fn unsupported_kinds_are_skipped() {
        let civ = Shared::new(CivilizationBuilder::new());
        let mut builder = node("NODE_X");
        builder.bind([civ.erased()]);
        builder.migrate();
        assert!(
            builder
                .documents()
                .current
                .rows(Table::ProgressionTreeNodeUnlocks)
                .is_empty()
        );
    }

    #[test]
    fn self_binding_is_skipped() {
        let node = Shared::new(node("NODE_X"));
        node.borrow_mut().bind([node.erased()]);
        node.borrow_mut().migrate();
        assert_eq!(
            node.borrow()
                .documents()
                .current
                .rows(Table::ProgressionTreeNodes)
                .len(),
            1
        );
    }
}
