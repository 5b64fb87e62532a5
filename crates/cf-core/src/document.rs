use std::collections::BTreeMap;

use crate::row::{Row, TableRow};
use crate::table::Table;

/// Root element of an output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    /// `<Database>`: gameplay, shell, icon and text databases.
    Database,
    /// `<GameEffects xmlns="GameEffects">`: modifier definitions.
    GameEffects,
}

impl Root {
    /// The root element name.
    pub fn element(self) -> &'static str {
        match self {
            Self::Database => "Database",
            Self::GameEffects => "GameEffects",
        }
    }

    /// Attributes written on the root element.
    pub fn attributes(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Database => &[],
            Self::GameEffects => &[("xmlns", "GameEffects")],
        }
    }
}

/// An in-memory multi-table container backing one output document.
///
/// Tables are kept in schema order; rows within a table keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Root,
    tables: BTreeMap<Table, Vec<Row>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::database()
    }
}

impl Document {
    /// An empty document with the given root.
    pub fn new(root: Root) -> Self {
        Self {
            root,
            tables: BTreeMap::new(),
        }
    }

    /// An empty `<Database>` document.
    pub fn database() -> Self {
        Self::new(Root::Database)
    }

    /// An empty `<GameEffects>` document.
    pub fn game_effects() -> Self {
        Self::new(Root::GameEffects)
    }

    /// The root kind.
    pub fn root(&self) -> Root {
        self.root
    }

    /// Append a typed record to its table.
    pub fn push<R: TableRow>(&mut self, record: &R) {
        self.push_row(R::TABLE, record.to_row());
    }

    /// Append every record of an iterator to its table.
    pub fn push_all<'a, R, I>(&mut self, records: I)
    where
        R: TableRow + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        for record in records {
            self.push(record);
        }
    }

    /// Append a raw row to a table.
    pub fn push_row(&mut self, table: Table, row: Row) {
        self.tables.entry(table).or_default().push(row);
    }

    /// Append raw rows to a table, preserving their order.
    pub fn extend_rows(&mut self, table: Table, rows: impl IntoIterator<Item = Row>) {
        self.tables.entry(table).or_default().extend(rows);
    }

    /// Rows of a table, empty if the table was never touched.
    pub fn rows(&self, table: Table) -> &[Row] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutable rows of a table, if present.
    pub fn rows_mut(&mut self, table: Table) -> Option<&mut Vec<Row>> {
        self.tables.get_mut(&table)
    }

    /// Tables that contain at least one non-empty row, in schema order.
    pub fn tables(&self) -> impl Iterator<Item = (Table, &[Row])> {
        self.tables
            .iter()
            .filter(|(_, rows)| rows.iter().any(|r| !r.is_empty()))
            .map(|(table, rows)| (*table, rows.as_slice()))
    }

    /// Append every table of `other` onto this document, table by table.
    pub fn merge(&mut self, other: &Document) {
        for (table, rows) in &other.tables {
            self.extend_rows(*table, rows.iter().cloned());
        }
    }

    /// Drop every row, keeping the root kind.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// True when nothing in this document would be serialized.
    pub fn is_empty(&self) -> bool {
        self.tables().next().is_none()
    }
}
