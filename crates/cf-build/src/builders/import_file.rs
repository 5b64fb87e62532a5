use std::path::PathBuf;
use std::rc::Rc;

use serde::Deserialize;

use cf_core::{ActionGroupBundle, OutputFile, Overlay, impl_fill};

use crate::builder::{Builder, Documents, EntityKind, shell_and_always};

const DEFAULT_DIR: &str = "imports";

/// Imported asset configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportFileConfig {
    /// Source file on disk. Checked when the mod is written, not before.
    pub content: Option<PathBuf>,
    /// Target file name; defaults to the source's file name.
    pub name: Option<String>,
    /// Target directory under the mod root; defaults to `imports`.
    pub directory: Option<String>,
}

impl_fill!(ImportFileConfig {
    content,
    name,
    directory
});

/// Copies an asset into the mod and registers it with `ImportFiles`.
#[derive(Debug, Default)]
pub struct ImportFileBuilder {
    config: ImportFileConfig,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl ImportFileBuilder {
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
    pub fn fill(&mut self, config: ImportFileConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    fn target_name(&self) -> Option<String> {
        self.config.name.clone().or_else(|| {
            self.config
                .content
                .as_ref()?
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
    }
}

impl Builder for ImportFileBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::ImportFile
    }

    fn primary_type(&self) -> Option<String> {
        self.target_name()
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {}

    fn files(&self) -> Vec<OutputFile> {
        let (Some(source), Some(name)) = (&self.config.content, self.target_name()) else {
            return Vec::new();
        };
        let dir = self.config.directory.as_deref().unwrap_or(DEFAULT_DIR);
        vec![OutputFile::import(
            dir,
            name,
            source,
            shell_and_always(&self.scopes),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Action;

    #[test]
    fn name_defaults_to_source_file_name() {
        let mut builder = ImportFileBuilder::new();
        builder.fill(ImportFileConfig {
            content: Some("assets/babylon.png".into()),
            ..Default::default()
        });
        let files = builder.build();
        assert_eq!(files[0].relative_path(), "imports/babylon.png");
        assert_eq!(files[0].actions, vec![Action::ImportFiles]);
    }

    #[test]
    fn without_source_nothing_is_imported() {
        let mut builder = ImportFileBuilder::new();
        builder.fill(ImportFileConfig {
            name: Some("icon.png".into()),
            ..Default::default()
        });
        assert!(builder.build().is_empty());
    }
}
