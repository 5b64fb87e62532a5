//! Deterministic XML rendering for documents and manifests.

use std::borrow::Cow;

use crate::document::Document;
use crate::row::Row;

/// First line of every emitted document.
pub const HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Last line of every emitted document.
pub const FOOTER: &str = "<!-- generated by civforge -->";

const INDENT: &str = "    ";

/// Serialize a document: header, root element, one container per table in
/// schema order, one element per non-empty row, footer.
pub fn to_xml(doc: &Document) -> String {
    render(&document_tree(doc))
}

/// Render an element tree with the standard header and footer.
pub fn render(root: &Row) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    write_element(&mut out, root, 0);
    out.push_str(FOOTER);
    out.push('\n');
    out
}

/// Build the element tree for a document without rendering it.
pub fn document_tree(doc: &Document) -> Row {
    let root = doc.root();
    let mut tree = Row::element(root.element());
    for (name, value) in root.attributes() {
        tree.set_attr(*name, *value);
    }
    for (table, rows) in doc.tables() {
        let rows = rows.iter().filter(|r| !r.is_empty()).cloned();
        match table.container() {
            Some(container) => {
                let block = rows.fold(Row::element(container), Row::with_child);
                tree = tree.with_child(block);
            }
            None => tree = rows.fold(tree, Row::with_child),
        }
    }
    tree
}

/// Write one element and its descendants, one element per line.
pub fn write_element(out: &mut String, row: &Row, depth: usize) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(row.element);
    for (name, value) in &row.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(&value.to_string()));
        out.push('"');
    }

    match (&row.text, row.children.is_empty()) {
        (None, true) => out.push_str("/>\n"),
        (Some(text), true) => {
            out.push('>');
            out.push_str(&escape(&text.to_string()));
            close(out, row.element);
        }
        (text, false) => {
            out.push_str(">\n");
            if let Some(text) = text {
                out.push_str(&pad);
                out.push_str(INDENT);
                out.push_str(&escape(&text.to_string()));
                out.push('\n');
            }
            for child in &row.children {
                write_element(out, child, depth + 1);
            }
            out.push_str(&pad);
            close(out, row.element);
        }
    }
}

fn close(out: &mut String, element: &str) {
    out.push_str("</");
    out.push_str(element);
    out.push_str(">\n");
}

/// Escape the five XML special characters.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
