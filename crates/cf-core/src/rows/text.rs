use serde::{Deserialize, Serialize};

use crate::row::{Row, TableRow};
use crate::table::Table;

/// Language used when a localization block does not name one.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// `LocalizedText`: one translated string.
///
/// Rendered as `<Row Tag=".." Language=".."><Text>..</Text></Row>`. The row
/// only exists to wrap its text, so without text it renders as nothing at
/// all, even when the tag is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedTextRow {
    /// Localization key, e.g. `LOC_UNIT_X_NAME`.
    pub tag: Option<String>,
    /// Language code; defaults to [`DEFAULT_LANGUAGE`] on render.
    pub language: Option<String>,
    /// The translated text.
    pub text: Option<String>,
}

impl LocalizedTextRow {
    /// A text row for `tag` in `language` (or the default language).
    pub fn new(tag: impl Into<String>, language: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            language: language.map(str::to_string),
            text: Some(text.into()),
        }
    }
}

impl TableRow for LocalizedTextRow {
    const TABLE: Table = Table::LocalizedText;

    fn to_row(&self) -> Row {
        let Some(text) = &self.text else {
            return Row::new();
        };
        let mut row = Row::new();
        row.set("Tag", self.tag.as_deref());
        row.set_attr("Language", self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));
        row.with_child(Row::element("Text").with_text(text))
    }
}

/// `IconDefinitions`: maps an icon id to an image path.
///
/// Rendered with child elements, `<Row><ID>..</ID><Path>..</Path></Row>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconDefinitionRow {
    /// Icon id, usually the owning entity's type.
    pub id: Option<String>,
    /// Image path, e.g. `fs://game/civ_sym_babylon`.
    pub path: Option<String>,
}

impl TableRow for IconDefinitionRow {
    const TABLE: Table = Table::IconDefinitions;

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        if let Some(id) = &self.id {
            row = row.with_child(Row::element("ID").with_text(id));
        }
        if let Some(path) = &self.path {
            row = row.with_child(Row::element("Path").with_text(path));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_row_without_text_is_suppressed() {
        let row = LocalizedTextRow {
            tag: Some("LOC_X_NAME".into()),
            ..Default::default()
        }
        .to_row();
        assert!(row.is_empty());
    }

    #[test]
    fn text_row_defaults_language() {
        let row = LocalizedTextRow::new("LOC_X_NAME", None, "Babylon").to_row();
        assert_eq!(row.attr_str("Language"), Some(DEFAULT_LANGUAGE));
        assert_eq!(row.children.len(), 1);
        assert_eq!(row.children[0].element, "Text");
    }

    #[test]
    fn icon_row_uses_child_elements() {
        let row = IconDefinitionRow {
            id: Some("UNIT_X".into()),
            path: Some("fs://game/unit_x".into()),
        }
        .to_row();
        assert!(row.attributes.is_empty());
        let names: Vec<_> = row.children.iter().map(|c| c.element).collect();
        assert_eq!(names, vec!["ID", "Path"]);
    }
}
