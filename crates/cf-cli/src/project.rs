//! Project files: a `[mod]` table plus `[[entity]]` entries, in TOML or JSON.
//!
//! Each entry names its `kind`, an optional `key` other entries bind to, an
//! optional `age`, and the kind's configuration fields inline. Entries that
//! name the same age share one scope bundle; entries without an age get an
//! always-loaded bundle of their own.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use cf_build::builders::{
    CivilizationBuilder, CivilizationUnlockBuilder, ConstructibleBuilder, ImportFileBuilder,
    ImportFileConfig, LeaderUnlockBuilder, ModifierBuilder, ProgressionTreeBuilder,
    ProgressionTreeNodeBuilder, TraditionBuilder, UniqueQuarterBuilder, UnitBuilder,
    UnlockBuilder,
};
use cf_build::{AnyBuilder, Builder, EntityKind, Mod, ModInfo, Shared};
use cf_core::ActionGroupBundle;

/// Project file looked up when none is given.
pub const DEFAULT_FILE: &str = "civforge.toml";

/// Project file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, String> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(format!(
                "unsupported project file '{}' (expected .toml or .json)",
                path.display()
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(rename = "mod", default)]
    info: ModInfo,
    #[serde(default, alias = "entities")]
    entity: Vec<EntityEntry>,
}

#[derive(Debug, Deserialize)]
struct EntityEntry {
    kind: EntityKind,
    key: Option<String>,
    #[serde(default)]
    bind: Vec<String>,
    unlock_depth: Option<i32>,
    hidden: Option<bool>,
    age: Option<String>,
    #[serde(flatten)]
    config: Map<String, Value>,
}

/// A builder handle that keeps the kind-specific `bind` reachable.
enum Handle {
    Civilization(Shared<CivilizationBuilder>),
    Tree(Shared<ProgressionTreeBuilder>),
    Node(Shared<ProgressionTreeNodeBuilder>),
    Tradition(Shared<TraditionBuilder>),
    Leaf(AnyBuilder),
}

impl Handle {
    fn leaf<B: Builder + 'static>(builder: B) -> Self {
        Self::Leaf(Shared::new(builder).erased())
    }

    fn erased(&self) -> AnyBuilder {
        match self {
            Self::Civilization(b) => b.erased(),
            Self::Tree(b) => b.erased(),
            Self::Node(b) => b.erased(),
            Self::Tradition(b) => b.erased(),
            Self::Leaf(b) => b.clone(),
        }
    }

    fn bind(
        &self,
        children: Vec<AnyBuilder>,
        unlock_depth: Option<i32>,
        hidden: Option<bool>,
    ) -> Result<(), String> {
        if children.is_empty() {
            return Ok(());
        }
        match self {
            Self::Civilization(b) => {
                b.borrow_mut().bind(children);
            }
            Self::Tree(b) => {
                b.borrow_mut().bind(children);
            }
            Self::Node(b) => {
                b.borrow_mut()
                    .bind_with(children, unlock_depth.unwrap_or(1), hidden);
            }
            Self::Tradition(b) => {
                b.borrow_mut().bind(children);
            }
            Self::Leaf(b) => {
                return Err(format!("a {} cannot bind children", b.borrow().kind()));
            }
        }
        Ok(())
    }
}

/// One configured entity of a project.
pub struct Entity {
    /// Key other entities bind to; defaults to the primary type.
    pub key: String,
    /// Content kind.
    pub kind: EntityKind,
    /// Key of the first parent whose output carries this entity's rows.
    pub carried_by: Option<String>,
    handle: Handle,
}

impl Entity {
    /// Kind-erased handle to the builder.
    pub fn builder(&self) -> AnyBuilder {
        self.handle.erased()
    }

    /// The builder's primary type, if configured.
    pub fn primary_type(&self) -> Option<String> {
        self.builder().borrow().primary_type()
    }
}

/// A loaded project: mod metadata plus bound builders.
pub struct Project {
    /// Directory the project file lives in.
    pub root: PathBuf,
    /// Mod metadata.
    pub info: ModInfo,
    /// Entities in file order.
    pub entities: Vec<Entity>,
    /// `(parent, child)` key pairs where the parent has no binding rule for
    /// the child's kind. Those children keep their own output.
    pub ignored_binds: Vec<(String, String)>,
}

impl Project {
    /// Read and assemble a project file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let format = Format::from_path(path)?;
        let content =
            fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Self::parse(&content, format, root).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Assemble a project from source text. Relative import paths resolve
    /// against `root`.
    pub fn parse(content: &str, format: Format, root: &Path) -> Result<Self, String> {
        let file: ProjectFile = match format {
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
        };

        let mut bundles: HashMap<String, Rc<ActionGroupBundle>> = HashMap::new();
        let mut entities: Vec<Entity> = Vec::with_capacity(file.entity.len());
        for (index, entry) in file.entity.iter().enumerate() {
            let scopes = match &entry.age {
                Some(age) => Rc::clone(
                    bundles
                        .entry(age.clone())
                        .or_insert_with(|| Rc::new(ActionGroupBundle::for_age(age.as_str()))),
                ),
                None => Rc::new(ActionGroupBundle::always_loaded()),
            };
            let handle = instantiate(entry, scopes, root)
                .map_err(|e| format!("entity #{}: {e}", index + 1))?;
            let mut entity = Entity {
                key: String::new(),
                kind: entry.kind,
                carried_by: None,
                handle,
            };
            let key = entry
                .key
                .clone()
                .or_else(|| entity.primary_type())
                .unwrap_or_else(|| format!("#{}", index + 1));
            entity.key = key;
            if entities.iter().any(|e| e.key == entity.key) {
                return Err(format!("duplicate entity key '{}'", entity.key));
            }
            entities.push(entity);
        }

        let mut carried = Vec::new();
        let mut ignored_binds = Vec::new();
        for (position, (entry, entity)) in file.entity.iter().zip(&entities).enumerate() {
            let indices = entry
                .bind
                .iter()
                .map(|key| lookup(&entities, key))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("'{}': {e}", entity.key))?;
            for &index in &indices {
                if index == position {
                    continue;
                }
                let child = entities[index].kind;
                if absorbs(entity.kind, child) {
                    carried.push((index, entity.key.clone()));
                } else if !has_binding_rule(entity.kind, child) {
                    ignored_binds.push((entity.key.clone(), entities[index].key.clone()));
                }
            }
            let children = indices.iter().map(|&i| entities[i].builder()).collect();
            entity
                .handle
                .bind(children, entry.unlock_depth, entry.hidden)
                .map_err(|e| format!("'{}': {e}", entity.key))?;
        }
        for (index, parent) in carried {
            entities[index].carried_by.get_or_insert(parent);
        }
        debug!(
            entities = entities.len(),
            bundles = bundles.len(),
            "project assembled"
        );

        Ok(Self {
            root: root.to_path_buf(),
            info: file.info,
            entities,
            ignored_binds,
        })
    }

    /// A mod holding every entity not carried by a parent, in file order.
    pub fn to_mod(&self) -> Mod {
        let mut m = Mod::new(self.info.clone());
        m.add_all(
            self.entities
                .iter()
                .filter(|e| e.carried_by.is_none())
                .map(Entity::builder),
        );
        m
    }

    /// `dist/<mod id>` next to the project file.
    pub fn default_dist(&self) -> PathBuf {
        self.root.join("dist").join(&self.info.id)
    }
}

fn config<C: DeserializeOwned>(entry: &EntityEntry) -> Result<C, String> {
    serde_json::from_value(Value::Object(entry.config.clone()))
        .map_err(|e| format!("invalid {} configuration: {e}", entry.kind))
}

fn instantiate(
    entry: &EntityEntry,
    scopes: Rc<ActionGroupBundle>,
    root: &Path,
) -> Result<Handle, String> {
    let handle = match entry.kind {
        EntityKind::Civilization => {
            let mut b = CivilizationBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::Civilization(Shared::new(b))
        }
        EntityKind::ProgressionTree => {
            let mut b = ProgressionTreeBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::Tree(Shared::new(b))
        }
        EntityKind::ProgressionTreeNode => {
            let mut b = ProgressionTreeNodeBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::Node(Shared::new(b))
        }
        EntityKind::Tradition => {
            let mut b = TraditionBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::Tradition(Shared::new(b))
        }
        EntityKind::Unit => {
            let mut b = UnitBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::Constructible => {
            let mut b = ConstructibleBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::UniqueQuarter => {
            let mut b = UniqueQuarterBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::Modifier => {
            let mut b = ModifierBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::LeaderUnlock => {
            let mut b = LeaderUnlockBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::CivilizationUnlock => {
            let mut b = CivilizationUnlockBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::Unlock => {
            let mut b = UnlockBuilder::new().with_scopes(scopes);
            b.fill(config(entry)?);
            Handle::leaf(b)
        }
        EntityKind::ImportFile => {
            let mut cfg: ImportFileConfig = config(entry)?;
            cfg.content = cfg.content.map(|p| root.join(p));
            let mut b = ImportFileBuilder::new().with_scopes(scopes);
            b.fill(cfg);
            Handle::leaf(b)
        }
    };
    Ok(handle)
}

/// Whether `parent` copies a bound `child`'s rows into its own output.
/// Adding such a child to the mod as well would register its rows twice.
fn absorbs(parent: EntityKind, child: EntityKind) -> bool {
    matches!(
        (parent, child),
        (
            EntityKind::Civilization | EntityKind::ProgressionTreeNode | EntityKind::Tradition,
            EntityKind::Modifier,
        ) | (EntityKind::ProgressionTree, EntityKind::ProgressionTreeNode)
    )
}

/// Whether `parent` does anything with a bound child of kind `child`.
fn has_binding_rule(parent: EntityKind, child: EntityKind) -> bool {
    match parent {
        EntityKind::Civilization => matches!(
            child,
            EntityKind::Modifier
                | EntityKind::Unit
                | EntityKind::Constructible
                | EntityKind::UniqueQuarter
                | EntityKind::ProgressionTree
        ),
        EntityKind::ProgressionTreeNode => child.unlock_target_kind().is_some(),
        _ => absorbs(parent, child),
    }
}

/// Resolve a bind key to an entity index, suggesting the closest key on a miss.
fn lookup(entities: &[Entity], key: &str) -> Result<usize, String> {
    if let Some(index) = entities.iter().position(|e| e.key == key) {
        return Ok(index);
    }
    let hint = entities
        .iter()
        .map(|e| e.key.as_str())
        .min_by_key(|k| strsim::levenshtein(key, k))
        .filter(|k| strsim::levenshtein(key, k) <= 3);
    Err(match hint {
        Some(hint) => format!("unknown bind key '{key}' (did you mean '{hint}'?)"),
        None => format!("unknown bind key '{key}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Table;

    const BABYLON: &str = r#"
[mod]
id = "babylon"
name = "Babylon"

[[entity]]
kind = "civilization"
key = "civ"
age = "AGE_ANTIQUITY"
bind = ["scout", "MOD_BABYLON_TRADE"]
civilization_type = "CIVILIZATION_BABYLON"
favorite_color = "blue"

[[entity]]
kind = "unit"
key = "scout"
age = "AGE_ANTIQUITY"
unit_type = "UNIT_BABYLON_SCOUT"

[[entity]]
kind = "modifier"

[entity.modifier]
id = "MOD_BABYLON_TRADE"
effect = "EFFECT_PLAYER_ADJUST_TRADE_ROUTE_CAPACITY"
"#;

    fn babylon() -> Project {
        Project::parse(BABYLON, Format::Toml, Path::new(".")).unwrap()
    }

    #[test]
    fn keys_default_to_primary_type() {
        let project = babylon();
        let keys: Vec<_> = project.entities.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["civ", "scout", "MOD_BABYLON_TRADE"]);
        assert_eq!(project.info.id, "babylon");
    }

    #[test]
    fn bindings_apply_at_compile() {
        let project = babylon();
        project.to_mod().compile();
        let scout = project.entities[1].builder();
        let scout = scout.borrow();
        assert_eq!(
            scout.documents().current.rows(Table::Units)[0].attr_str("TraitType"),
            Some("TRAIT_BABYLON")
        );
        let civ = project.entities[0].builder();
        assert_eq!(
            civ.borrow().documents().current.rows(Table::TraitModifiers).len(),
            1
        );
    }

    #[test]
    fn bound_modifiers_are_left_to_their_parent() {
        let project = babylon();
        assert_eq!(project.entities[2].carried_by.as_deref(), Some("civ"));
        assert_eq!(project.entities[1].carried_by, None);
        let m = project.to_mod();
        assert_eq!(m.builders().len(), 2);
        let paths: Vec<_> = m.compile().iter().map(|f| f.relative_path()).collect();
        assert!(!paths.iter().any(|p| p.starts_with("modifiers/")));
    }

    #[test]
    fn children_without_a_binding_rule_keep_their_output() {
        let source = r#"
[[entity]]
kind = "progression_tree"
key = "tree"
bind = ["lost", "node"]
progression_tree_type = "TREE_X"

[[entity]]
kind = "progression_tree_node"
key = "node"
progression_tree_node_type = "NODE_X"

[[entity]]
kind = "modifier"
key = "lost"

[entity.modifier]
id = "MOD_LOST"
effect = "EFFECT_X"
"#;
        let project = Project::parse(source, Format::Toml, Path::new(".")).unwrap();
        assert_eq!(project.entities[1].carried_by.as_deref(), Some("tree"));
        assert_eq!(project.entities[2].carried_by, None);
        assert_eq!(
            project.ignored_binds,
            vec![("tree".to_string(), "lost".to_string())]
        );

        let paths: Vec<_> = project
            .to_mod()
            .compile()
            .iter()
            .map(|f| f.relative_path())
            .collect();
        assert!(paths.iter().any(|p| p.starts_with("modifiers/")), "{paths:?}");
        assert!(!paths.iter().any(|p| p.starts_with("progression-tree-nodes/")));
    }

    #[test]
    fn same_age_shares_one_bundle() {
        let project = babylon();
        let civ = project.entities[0].builder();
        let scout = project.entities[1].builder();
        let modifier = project.entities[2].builder();
        assert!(Rc::ptr_eq(civ.borrow().scopes(), scout.borrow().scopes()));
        assert!(!Rc::ptr_eq(civ.borrow().scopes(), modifier.borrow().scopes()));
        assert!(!modifier.borrow().scopes().is_age_scoped());
    }

    #[test]
    fn unknown_bind_key_suggests_closest() {
        let source = BABYLON.replace(r#"bind = ["scout","#, r#"bind = ["scuot","#);
        let err = Project::parse(&source, Format::Toml, Path::new("."))
            .err()
            .unwrap();
        assert!(err.contains("unknown bind key 'scuot'"), "{err}");
        assert!(err.contains("did you mean 'scout'"), "{err}");
    }

    #[test]
    fn leaves_cannot_bind() {
        let source = r#"
[[entity]]
kind = "unit"
unit_type = "UNIT_A"
bind = ["UNIT_A"]
"#;
        let err = Project::parse(source, Format::Toml, Path::new("."))
            .err()
            .unwrap();
        assert!(err.contains("a unit cannot bind children"), "{err}");
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let source = r#"
[[entity]]
kind = "unit"
unit_type = "UNIT_A"

[[entity]]
kind = "unit"
unit_type = "UNIT_A"
"#;
        let err = Project::parse(source, Format::Toml, Path::new("."))
            .err()
            .unwrap();
        assert_eq!(err, "duplicate entity key 'UNIT_A'");
    }

    #[test]
    fn json_projects_and_node_depths() {
        let source = r#"{
            "mod": { "id": "json-mod" },
            "entity": [
                { "kind": "progression_tree_node", "key": "node",
                  "progression_tree_node_type": "NODE_CIVIC_X",
                  "bind": ["unit"], "unlock_depth": 2, "hidden": true },
                { "kind": "unit", "key": "unit", "unit_type": "UNIT_X" }
            ]
        }"#;
        let project = Project::parse(source, Format::Json, Path::new(".")).unwrap();
        project.to_mod().compile();
        let node = project.entities[0].builder();
        let node = node.borrow();
        let unlock = &node
            .documents()
            .current
            .rows(Table::ProgressionTreeNodeUnlocks)[0];
        assert_eq!(unlock.attr_str("TargetType"), Some("UNIT_X"));
        assert_eq!(unlock.attr("UnlockDepth"), Some(&cf_core::Value::Int(2)));
        assert_eq!(unlock.attr("Hidden"), Some(&cf_core::Value::Bool(true)));
    }

    #[test]
    fn import_paths_resolve_against_root() {
        let source = r#"
[[entity]]
kind = "import_file"
content = "assets/icon.png"
"#;
        let project = Project::parse(source, Format::Toml, Path::new("/projects/babylon")).unwrap();
        let files = project.to_mod().compile();
        assert_eq!(
            files[0].content,
            cf_core::FileContent::Import(PathBuf::from("/projects/babylon/assets/icon.png"))
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = Format::from_path(Path::new("project.yaml")).unwrap_err();
        assert!(err.contains("expected .toml or .json"));
    }
}
