//! The builder contract shared by every entity kind, plus the helpers
//! builders use to populate documents and read bound children.

use std::cell::{BorrowMutError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use cf_core::constants::{age, kind};
use cf_core::ident::locale;
use cf_core::rows::{IconDefinitionRow, LocalizedTextRow};
use cf_core::{ActionGroup, ActionGroupBundle, Document, OutputFile, Table};

/// The content kind of a builder. Binding rules dispatch on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A playable civilization.
    Civilization,
    /// A unit.
    Unit,
    /// A building or improvement.
    Constructible,
    /// A civic or technology tree.
    ProgressionTree,
    /// One node of a progression tree.
    ProgressionTreeNode,
    /// A game-effect modifier.
    Modifier,
    /// A tradition (policy card).
    Tradition,
    /// A civilization-unique quarter.
    UniqueQuarter,
    /// A leader → civilization unlock.
    LeaderUnlock,
    /// A civilization → civilization unlock across ages.
    CivilizationUnlock,
    /// A generic unlock with rewards and requirements.
    Unlock,
    /// An imported asset file.
    ImportFile,
}

impl EntityKind {
    /// The `TargetKind` a progression-tree node records when it unlocks an
    /// entity of this kind. `None` for kinds a node cannot unlock.
    pub fn unlock_target_kind(self) -> Option<&'static str> {
        match self {
            Self::Modifier => Some(kind::MODIFIER),
            Self::Unit => Some(kind::UNIT),
            Self::Constructible => Some(kind::CONSTRUCTIBLE),
            Self::Tradition => Some(kind::TRADITION),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Civilization => "civilization",
            Self::Unit => "unit",
            Self::Constructible => "constructible",
            Self::ProgressionTree => "progression tree",
            Self::ProgressionTreeNode => "progression tree node",
            Self::Modifier => "modifier",
            Self::Tradition => "tradition",
            Self::UniqueQuarter => "unique quarter",
            Self::LeaderUnlock => "leader unlock",
            Self::CivilizationUnlock => "civilization unlock",
            Self::Unlock => "unlock",
            Self::ImportFile => "import file",
        };
        write!(f, "{name}")
    }
}

/// The document variants a builder can populate. Each becomes at most one
/// output file; variants a builder never touches stay empty and are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Documents {
    /// Gameplay rows loaded with the current age.
    pub current: Document,
    /// Additive-only rows for later ages.
    pub legacy: Document,
    /// Front-end rows.
    pub shell: Document,
    /// Icon definitions.
    pub icons: Document,
    /// Localized text.
    pub localizations: Document,
    /// Modifier definitions.
    pub game_effects: Document,
}

impl Default for Documents {
    fn default() -> Self {
        Self {
            current: Document::database(),
            legacy: Document::database(),
            shell: Document::database(),
            icons: Document::database(),
            localizations: Document::database(),
            game_effects: Document::game_effects(),
        }
    }
}

impl Documents {
    /// Empty every variant.
    pub fn clear(&mut self) {
        self.current.clear();
        self.legacy.clear();
        self.shell.clear();
        self.icons.clear();
        self.localizations.clear();
        self.game_effects.clear();
    }

    /// Ids of every modifier registered in the game-effects variant.
    pub fn modifier_ids(&self) -> Vec<String> {
        self.game_effects
            .rows(Table::Modifiers)
            .iter()
            .filter_map(|row| row.attr_str("id"))
            .map(str::to_string)
            .collect()
    }
}

/// The lifecycle every entity builder implements.
///
/// Kind-specific configuration (`fill`) and child attachment (`bind`) are
/// inherent methods on each builder, since their arguments differ per kind.
pub trait Builder {
    /// The content kind, used by parents to pick a binding rule.
    fn kind(&self) -> EntityKind;

    /// The primary type identifier, `None` until configured.
    fn primary_type(&self) -> Option<String>;

    /// Load scopes for this builder's documents.
    fn scopes(&self) -> &Rc<ActionGroupBundle>;

    /// The documents populated by the last `migrate`.
    fn documents(&self) -> &Documents;

    /// Recompute every document from configuration and bound children.
    ///
    /// Clears the documents first, so calling it again yields the same rows.
    /// Without a primary type the documents stay empty.
    fn migrate(&mut self);

    /// Render the migrated documents into files, dropping empty ones.
    fn files(&self) -> Vec<OutputFile>;

    /// `migrate` then `files`.
    fn build(&mut self) -> Vec<OutputFile> {
        self.migrate();
        self.files()
    }

    /// Whether parents should skip link rows for this builder.
    fn is_detached(&self) -> bool {
        false
    }

    /// Record the trait that owns this entity and patch already-migrated rows.
    ///
    /// The assignment is kept and reapplied by later migrations.
    fn assign_trait(&mut self, _trait_type: &str) {}

    /// Stop emitting game effects because a parent now carries them.
    fn hand_off_modifiers(&mut self) {}
}

/// A shared, mutable handle to a builder.
///
/// Binding needs the parent to read (and sometimes patch) a child that the
/// author also adds to the mod, so both hold the same handle.
pub struct Shared<B: ?Sized>(Rc<RefCell<B>>);

/// A handle with the concrete builder type erased.
pub type AnyBuilder = Shared<dyn Builder>;

impl<B: Builder + 'static> Shared<B> {
    /// Wrap a builder.
    pub fn new(builder: B) -> Self {
        Self(Rc::new(RefCell::new(builder)))
    }

    /// A kind-erased handle to the same builder.
    pub fn erased(&self) -> AnyBuilder {
        let inner: Rc<RefCell<dyn Builder>> = self.0.clone();
        Shared(inner)
    }
}

impl<B: ?Sized> Shared<B> {
    /// Immutably borrow the builder.
    pub fn borrow(&self) -> Ref<'_, B> {
        self.0.borrow()
    }

    /// Mutably borrow the builder.
    pub fn borrow_mut(&self) -> RefMut<'_, B> {
        self.0.borrow_mut()
    }

    /// Mutably borrow the builder unless it is already borrowed.
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, B>, BorrowMutError> {
        self.0.try_borrow_mut()
    }

    /// True when both handles point to the same builder.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl AnyBuilder {
    /// Borrow and migrate a bound child so its rows can be read.
    ///
    /// A child that is already borrowed (bound to itself or in a cycle) is
    /// skipped with a warning.
    pub(crate) fn migrated(&self) -> Option<RefMut<'_, dyn Builder>> {
        match self.try_borrow_mut() {
            Ok(mut child) => {
                child.migrate();
                Some(child)
            }
            Err(_) => {
                warn!("bound child is already being migrated; skipping (binding cycle?)");
                None
            }
        }
    }
}

impl<B: ?Sized> Clone for Shared<B> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<B: Builder + ?Sized> fmt::Debug for Shared<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(b) => write!(f, "Shared({} {:?})", b.kind(), b.primary_type()),
            Err(_) => write!(f, "Shared(<borrowed>)"),
        }
    }
}

/// Icon configuration: the image path registered under the entity's type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    /// Image path, e.g. `fs://game/civ_sym_babylon`.
    pub path: String,
}

/// Name/description/tooltip text for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityLocalization {
    /// Language code, `en_US` when unset.
    pub language: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Tooltip.
    pub tooltip: Option<String>,
}

impl EntityLocalization {
    /// Push one text row per set field, keyed by `locale(prefix, field)`.
    pub(crate) fn push_rows(&self, doc: &mut Document, prefix: &str) {
        let lang = self.language.as_deref();
        push_text(doc, prefix, "name", lang, self.name.as_deref());
        push_text(doc, prefix, "description", lang, self.description.as_deref());
        push_text(doc, prefix, "tooltip", lang, self.tooltip.as_deref());
    }
}

/// Push a localized text row when `text` is set.
pub(crate) fn push_text(
    doc: &mut Document,
    prefix: &str,
    field: &str,
    language: Option<&str>,
    text: Option<&str>,
) {
    if let Some(text) = text {
        doc.push(&LocalizedTextRow::new(locale(prefix, field), language, text));
    }
}

/// Push an icon definition for `id` when an icon is configured.
pub(crate) fn push_icon(doc: &mut Document, id: &str, icon: Option<&Icon>) {
    if let Some(icon) = icon {
        doc.push(&IconDefinitionRow {
            id: Some(id.to_string()),
            path: Some(icon.path.clone()),
        });
    }
}

/// Push a typed record with the additive-only write policy.
pub(crate) fn push_insert_or_ignore<R: cf_core::TableRow>(doc: &mut Document, record: &R) {
    let mut row = record.to_row();
    row.element = "InsertOrIgnore";
    doc.push_row(R::TABLE, row);
}

/// Copy a modifier child's registration and text into the parent.
pub(crate) fn adopt_modifiers(child: &dyn Builder, parent: &mut Documents) {
    let docs = child.documents();
    parent.game_effects.extend_rows(
        Table::Modifiers,
        docs.game_effects.rows(Table::Modifiers).iter().cloned(),
    );
    parent.localizations.extend_rows(
        Table::LocalizedText,
        docs.localizations.rows(Table::LocalizedText).iter().cloned(),
    );
}

/// Overwrite an attribute on every row of a table.
pub(crate) fn patch_rows(doc: &mut Document, table: Table, attr: &'static str, value: &str) {
    if let Some(rows) = doc.rows_mut(table) {
        for row in rows.iter_mut() {
            row.set_attr(attr, value);
        }
    }
}

/// The shell and always-loaded groups, used by UI-facing files.
pub(crate) fn shell_and_always(scopes: &ActionGroupBundle) -> Vec<ActionGroup> {
    vec![scopes.shell.clone(), scopes.always.clone()]
}

/// Drop files with nothing to write.
pub(crate) fn non_empty(files: impl IntoIterator<Item = OutputFile>) -> Vec<OutputFile> {
    files.into_iter().filter(|f| !f.is_empty()).collect()
}

/// The civilization domain of an age, e.g. `AntiquityAgeCivilizations`.
pub(crate) fn civilization_domain(age_type: &str) -> Option<String> {
    let label = match age_type {
        age::ANTIQUITY => "Antiquity",
        age::EXPLORATION => "Exploration",
        age::MODERN => "Modern",
        _ => return None,
    };
    Some(format!("{label}AgeCivilizations"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_target_kinds() {
        assert_eq!(
            EntityKind::Modifier.unlock_target_kind(),
            Some("KIND_MODIFIER")
        );
        assert_eq!(
            EntityKind::Constructible.unlock_target_kind(),
            Some("KIND_CONSTRUCTIBLE")
        );
        assert_eq!(EntityKind::Civilization.unlock_target_kind(), None);
    }

    #[test]
    fn localization_skips_unset_fields() {
        let mut doc = Document::database();
        EntityLocalization {
            name: Some("Scout".into()),
            ..Default::default()
        }
        .push_rows(&mut doc, "UNIT_X");
        let rows = doc.rows(Table::LocalizedText);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].attr_str("Tag"), Some("LOC_UNIT_X_NAME"));
    }

    #[test]
    fn civilization_domains_follow_age() {
        assert_eq!(
            civilization_domain("AGE_EXPLORATION").as_deref(),
            Some("ExplorationAgeCivilizations")
        );
        assert_eq!(civilization_domain("AGE_FUTURE"), None);
    }

    #[test]
    fn insert_or_ignore_changes_element() {
        let mut doc = Document::database();
        push_insert_or_ignore(&mut doc, &cf_core::rows::TypeRow::of("TRAIT_X", "KIND_TRAIT"));
        assert_eq!(doc.rows(Table::Types)[0].element, "InsertOrIgnore");
    }
}
