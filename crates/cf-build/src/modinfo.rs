//! The mod orchestrator: compiles builders into files and writes them with
//! a `.modinfo` manifest.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use cf_core::scope::Condition;
use cf_core::{Action, ActionGroup, CfError, CfResult, Criteria, OutputFile, Row, xml};

use crate::builder::AnyBuilder;

/// Id of the base game module every mod depends on by default.
pub const BASE_STANDARD: &str = "base-standard";

/// A module this mod requires.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Dependency {
    /// Module id.
    pub id: String,
    /// LOC key of the module title.
    pub title: String,
}

impl Default for Dependency {
    fn default() -> Self {
        Self {
            id: BASE_STANDARD.into(),
            title: "LOC_MODULE_BASE_STANDARD_NAME".into(),
        }
    }
}

/// Mod metadata written to the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModInfo {
    /// Mod id, also the manifest file stem.
    pub id: String,
    /// Version string.
    pub version: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Author list.
    pub authors: String,
    /// Whether saves made with the mod need it to load.
    pub affects_saved_games: bool,
    /// Required modules.
    pub dependencies: Vec<Dependency>,
}

impl Default for ModInfo {
    fn default() -> Self {
        Self {
            id: "civforge-mod".into(),
            version: "1".into(),
            name: "civforge mod".into(),
            description: String::new(),
            authors: String::new(),
            affects_saved_games: true,
            dependencies: vec![Dependency::default()],
        }
    }
}

/// What [`Mod::build`] wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// Path of the manifest.
    pub manifest: PathBuf,
    /// Compiled files, in manifest order.
    pub files: Vec<OutputFile>,
    /// Paths written, parallel to `files`.
    pub written: Vec<PathBuf>,
}

/// A mod: builders and staged files compiled together under one manifest.
#[derive(Debug, Default)]
pub struct Mod {
    /// Manifest metadata.
    pub info: ModInfo,
    builders: Vec<AnyBuilder>,
    staged: Vec<OutputFile>,
}

impl Mod {
    /// An empty mod.
    pub fn new(info: ModInfo) -> Self {
        Self {
            info,
            builders: Vec::new(),
            staged: Vec::new(),
        }
    }

    /// Add a builder. Output follows addition order.
    pub fn add(&mut self, builder: AnyBuilder) -> &mut Self {
        self.builders.push(builder);
        self
    }

    /// Add several builders.
    pub fn add_all(&mut self, builders: impl IntoIterator<Item = AnyBuilder>) -> &mut Self {
        self.builders.extend(builders);
        self
    }

    /// Stage a prebuilt file, appended after builder output.
    pub fn add_file(&mut self, file: OutputFile) -> &mut Self {
        self.staged.push(file);
        self
    }

    /// Builders in addition order.
    pub fn builders(&self) -> &[AnyBuilder] {
        &self.builders
    }

    /// Migrate every builder, then render every builder's files.
    ///
    /// All migrations finish before any file is rendered, so a civilization
    /// patching a unit lands in the unit's output whichever was added first.
    pub fn compile(&self) -> Vec<OutputFile> {
        for handle in &self.builders {
            match handle.try_borrow_mut() {
                Ok(mut builder) => builder.migrate(),
                Err(_) => warn!("builder is borrowed elsewhere; not migrated"),
            }
        }

        let mut files: Vec<OutputFile> = self
            .builders
            .iter()
            .flat_map(|handle| handle.borrow().files())
            .collect();
        files.extend(self.staged.iter().cloned());
        files.retain(|f| !f.is_empty());

        let mut seen = HashSet::new();
        for file in &files {
            let path = file.relative_path();
            if !seen.insert(path.clone()) {
                warn!(%path, "two files share an output path; the later one overwrites");
            }
        }
        debug!(
            builders = self.builders.len(),
            files = files.len(),
            "compiled mod"
        );
        files
    }

    /// File name of the manifest, `<id>.modinfo`.
    pub fn manifest_name(&self) -> String {
        format!("{}.modinfo", self.info.id)
    }

    /// Build the manifest element tree for a set of compiled files.
    pub fn manifest(&self, files: &[OutputFile]) -> Row {
        let info = &self.info;
        let properties = Row::element("Properties")
            .with_child(Row::element("Name").with_text(info.name.as_str()))
            .with_child(Row::element("Description").with_text(info.description.as_str()))
            .with_child(Row::element("Authors").with_text(info.authors.as_str()))
            .with_child(
                Row::element("AffectsSavedGames").with_text(i32::from(info.affects_saved_games)),
            );
        let dependencies = info
            .dependencies
            .iter()
            .fold(Row::element("Dependencies"), |block, dep| {
                block.with_child(
                    Row::element("Mod")
                        .with_attr("id", dep.id.as_str())
                        .with_attr("title", dep.title.as_str()),
                )
            });

        let groups = group_files(files);
        let mut criteria: Vec<&Criteria> = Vec::new();
        for (group, _) in &groups {
            if !criteria.iter().any(|c| c.id == group.criteria.id) {
                criteria.push(&group.criteria);
            }
        }
        let action_criteria = criteria
            .into_iter()
            .fold(Row::element("ActionCriteria"), |block, c| {
                block.with_child(criteria_element(c))
            });
        let action_groups = groups
            .iter()
            .fold(Row::element("ActionGroups"), |block, (group, actions)| {
                block.with_child(action_group_element(group, actions))
            });

        Row::element("Mod")
            .with_attr("id", info.id.as_str())
            .with_attr("version", info.version.as_str())
            .with_attr("xmlns", "ModInfo")
            .with_child(properties)
            .with_child(dependencies)
            .with_child(action_criteria)
            .with_child(action_groups)
    }

    /// Render the manifest for a set of compiled files.
    pub fn manifest_xml(&self, files: &[OutputFile]) -> String {
        xml::render(&self.manifest(files))
    }

    /// Compile and write every file plus the manifest under `dist`.
    ///
    /// With `clear`, `dist` is removed first. A missing import source aborts
    /// the write; files already written stay on disk.
    pub fn build(&self, dist: &Path, clear: bool) -> CfResult<BuildReport> {
        if clear && dist.exists() {
            fs::remove_dir_all(dist).map_err(|e| CfError::io(dist, e))?;
        }
        fs::create_dir_all(dist).map_err(|e| CfError::io(dist, e))?;

        let files = self.compile();
        let written = files
            .iter()
            .map(|file| file.write(dist))
            .collect::<CfResult<Vec<_>>>()?;

        let manifest = dist.join(self.manifest_name());
        fs::write(&manifest, self.manifest_xml(&files)).map_err(|e| CfError::io(&manifest, e))?;
        info!(files = files.len(), dist = %dist.display(), "mod written");

        Ok(BuildReport {
            manifest,
            files,
            written,
        })
    }
}

type GroupedActions<'a> = Vec<(&'a ActionGroup, Vec<(Action, Vec<String>)>)>;

/// Group file paths by action group, then by action, in first-seen order.
fn group_files(files: &[OutputFile]) -> GroupedActions<'_> {
    let mut groups: GroupedActions<'_> = Vec::new();
    for file in files {
        let path = file.relative_path();
        for group in &file.action_groups {
            let index = match groups.iter().position(|(g, _)| g.id == group.id) {
                Some(index) => index,
                None => {
                    groups.push((group, Vec::new()));
                    groups.len() - 1
                }
            };
            let actions = &mut groups[index].1;
            for action in &file.actions {
                match actions.iter_mut().find(|(a, _)| *a == *action) {
                    Some((_, items)) => items.push(path.clone()),
                    None => actions.push((*action, vec![path.clone()])),
                }
            }
        }
    }
    groups
}

fn criteria_element(criteria: &Criteria) -> Row {
    let condition = match &criteria.condition {
        Condition::AlwaysMet => Row::element("AlwaysMet"),
        Condition::AgeInUse(age) => Row::element("AgeInUse").with_text(age.as_str()),
        Condition::AgeEverInUse(age) => Row::element("AgeEverInUse").with_text(age.as_str()),
    };
    let mut row = Row::element("Criteria").with_attr("id", criteria.id.as_str());
    // Pushed directly: `<AlwaysMet/>` has no content and `with_child` drops empty rows.
    row.children.push(condition);
    row
}

fn action_group_element(group: &ActionGroup, actions: &[(Action, Vec<String>)]) -> Row {
    let actions = actions
        .iter()
        .fold(Row::element("Actions"), |block, (action, items)| {
            let element = items.iter().fold(Row::element(action.element()), |el, item| {
                el.with_child(Row::element("Item").with_text(item.as_str()))
            });
            block.with_child(element)
        });
    Row::element("ActionGroup")
        .with_attr("id", group.id.as_str())
        .with_attr("scope", group.scope.to_string())
        .with_attr("criteria", group.criteria.id.as_str())
        .with_child(actions)
}
