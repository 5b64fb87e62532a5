use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::error::{CfError, CfResult};
use crate::scope::ActionGroup;
use crate::xml;

/// What the engine does with a file when its action group loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Apply to the gameplay or shell database.
    UpdateDatabase,
    /// Apply to the localization database.
    UpdateText,
    /// Apply to the icon database.
    UpdateIcons,
    /// Make an asset available to the engine.
    ImportFiles,
}

impl Action {
    /// Element name used in the manifest.
    pub fn element(self) -> &'static str {
        match self {
            Self::UpdateDatabase => "UpdateDatabase",
            Self::UpdateText => "UpdateText",
            Self::UpdateIcons => "UpdateIcons",
            Self::ImportFiles => "ImportFiles",
        }
    }
}

/// Payload of an output file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// A document rendered to XML at write time.
    Xml(Document),
    /// An asset copied byte-for-byte from this source path at write time.
    Import(PathBuf),
}

/// One file of a compiled mod, tagged with its load scopes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    /// Directory relative to the mod root, without leading or trailing `/`.
    pub dir: String,
    /// File name.
    pub name: String,
    /// What to write.
    pub content: FileContent,
    /// Load scopes this file is registered under.
    pub action_groups: Vec<ActionGroup>,
    /// Manifest actions applied to this file.
    pub actions: Vec<Action>,
}

impl OutputFile {
    /// An XML document file.
    pub fn xml(
        dir: impl AsRef<str>,
        name: impl Into<String>,
        document: Document,
        action_groups: Vec<ActionGroup>,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            dir: normalize_dir(dir.as_ref()),
            name: name.into(),
            content: FileContent::Xml(document),
            action_groups,
            actions,
        }
    }

    /// An imported asset.
    pub fn import(
        dir: impl AsRef<str>,
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        action_groups: Vec<ActionGroup>,
    ) -> Self {
        Self {
            dir: normalize_dir(dir.as_ref()),
            name: name.into(),
            content: FileContent::Import(source.into()),
            action_groups,
            actions: vec![Action::ImportFiles],
        }
    }

    /// Path relative to the mod root, as listed in the manifest.
    pub fn relative_path(&self) -> String {
        if self.dir.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.dir, self.name)
        }
    }

    /// True when there is nothing to write. Imports are never empty.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            FileContent::Xml(doc) => doc.is_empty(),
            FileContent::Import(_) => false,
        }
    }

    /// The document, if this is an XML file.
    pub fn document(&self) -> Option<&Document> {
        match &self.content {
            FileContent::Xml(doc) => Some(doc),
            FileContent::Import(_) => None,
        }
    }

    /// Write under `dist`, creating parent directories. Returns the path written.
    pub fn write(&self, dist: &Path) -> CfResult<PathBuf> {
        let target = dist.join(self.relative_path());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| CfError::io(parent, e))?;
        }
        match &self.content {
            FileContent::Xml(doc) => {
                fs::write(&target, xml::to_xml(doc)).map_err(|e| CfError::io(&target, e))?;
            }
            FileContent::Import(source) => {
                if !source.is_file() {
                    return Err(CfError::ImportNotFound(source.clone()));
                }
                fs::copy(source, &target).map_err(|e| CfError::io(&target, e))?;
            }
        }
        debug!(path = %target.display(), "wrote file");
        Ok(target)
    }
}

fn normalize_dir(dir: &str) -> String {
    dir.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::TypeRow;
    use tempfile::TempDir;

    #[test]
    fn relative_path_normalizes_slashes() {
        let file = OutputFile::xml(
            "/civilizations/babylon/",
            "current.xml",
            Document::database(),
            Vec::new(),
            vec![Action::UpdateDatabase],
        );
        assert_eq!(file.relative_path(), "civilizations/babylon/current.xml");
        assert!(file.is_empty());
    }

    #[test]
    fn writes_xml_document() {
        let dist = TempDir::new().unwrap();
        let mut doc = Document::database();
        doc.push(&TypeRow::of("UNIT_X", "KIND_UNIT"));
        let file = OutputFile::xml("units/x", "current.xml", doc, Vec::new(), Vec::new());
        let written = file.write(dist.path()).unwrap();
        let content = fs::read_to_string(written).unwrap();
        assert!(content.starts_with(xml::HEADER));
        assert!(content.contains(r#"<Row Type="UNIT_X" Kind="KIND_UNIT"/>"#));
    }

    #[test]
    fn import_copies_bytes() {
        let dist = TempDir::new().unwrap();
        let source = dist.path().join("icon.png");
        fs::write(&source, [0x89, b'P', b'N', b'G']).unwrap();
        let file = OutputFile::import("/imports/", "icon.png", &source, Vec::new());
        let written = file.write(&dist.path().join("out")).unwrap();
        assert_eq!(fs::read(written).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn import_missing_source_fails_at_write_time() {
        let dist = TempDir::new().unwrap();
        let file = OutputFile::import("imports", "gone.png", "/nonexistent/gone.png", Vec::new());
        assert!(!file.is_empty());
        let err = file.write(dist.path()).unwrap_err();
        assert!(matches!(err, CfError::ImportNotFound(_)));
    }
}
