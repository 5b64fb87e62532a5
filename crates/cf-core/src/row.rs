use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean, rendered as `true` / `false`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A text value.
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// One element of an output document.
///
/// Most rows are flat `<Row Attr="..."/>` elements. Some tables need a text
/// body (`<Text>` in localized text) or nested children (requirements under a
/// modifier), so a row can carry both.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Element name, `Row` unless a table needs something else.
    pub element: &'static str,
    /// Attributes in insertion order. Only set values are stored.
    pub attributes: Vec<(&'static str, Value)>,
    /// Text body of the element.
    pub text: Option<Value>,
    /// Nested child elements.
    pub children: Vec<Row>,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    /// An empty `<Row/>` element.
    pub fn new() -> Self {
        Self::element("Row")
    }

    /// An empty element with a custom name.
    pub fn element(name: &'static str) -> Self {
        Self {
            element: name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Set an attribute if the value is present. `None` leaves the row as is.
    pub fn set<V: Into<Value>>(&mut self, name: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set_attr(name, value);
        }
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Chainable [`Row::set_attr`].
    pub fn with_attr(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Chainable text body.
    pub fn with_text(mut self, text: impl Into<Value>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Chainable child element. Empty children are dropped.
    pub fn with_child(mut self, child: Row) -> Self {
        if !child.is_empty() {
            self.children.push(child);
        }
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Look up an attribute as text.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        match self.attr(name) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// True when the row carries nothing and must not be serialized.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.text.is_none() && self.children.is_empty()
    }
}

/// A typed record that renders into one row of a specific table.
pub trait TableRow {
    /// The table this record belongs to.
    const TABLE: Table;

    /// Render into a row, omitting unset attributes.
    fn to_row(&self) -> Row;
}

/// Shallow overlay of one configuration onto another.
///
/// Set values in `other` replace values in `self`; unset values leave
/// `self` untouched. This is what repeated `fill` calls rely on.
pub trait Overlay {
    /// Overlay `other` onto `self`.
    fn overlay(&mut self, other: Self);
}

impl<T> Overlay for Option<T> {
    fn overlay(&mut self, other: Self) {
        if other.is_some() {
            *self = other;
        }
    }
}

impl<T> Overlay for Vec<T> {
    fn overlay(&mut self, other: Self) {
        if !other.is_empty() {
            *self = other;
        }
    }
}

/// Whole-value replacement: a set value replaces `self` outright, an unset
/// one leaves it alone.
///
/// Configuration structs merge their fields this way, so a second `fill`
/// that supplies a nested record drops every column of the earlier one.
pub trait Replace {
    /// Replace `self` with `other` unless `other` is unset.
    fn replace_with(&mut self, other: Self);
}

impl<T> Replace for Option<T> {
    fn replace_with(&mut self, other: Self) {
        if other.is_some() {
            *self = other;
        }
    }
}

impl<T> Replace for Vec<T> {
    fn replace_with(&mut self, other: Self) {
        if !other.is_empty() {
            *self = other;
        }
    }
}

/// Implement [`Overlay`] for a struct by overlaying each listed field.
#[macro_export]
macro_rules! impl_overlay {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::row::Overlay for $ty {
            fn overlay(&mut self, other: Self) {
                $( $crate::row::Overlay::overlay(&mut self.$field, other.$field); )*
            }
        }
    };
}

/// Implement [`Replace`] for a record: an all-default record counts as unset.
#[macro_export]
macro_rules! impl_replace {
    ($ty:ty) => {
        impl $crate::row::Replace for $ty {
            fn replace_with(&mut self, other: Self) {
                if other != <$ty as Default>::default() {
                    *self = other;
                }
            }
        }
    };
}

/// Implement [`Overlay`] for a configuration struct by replacing each listed
/// field whole when the incoming value is set.
#[macro_export]
macro_rules! impl_fill {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::row::Overlay for $ty {
            fn overlay(&mut self, other: Self) {
                $( $crate::row::Replace::replace_with(&mut self.$field, other.$field); )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_skips_none() {
        let mut row = Row::new();
        row.set("Type", Some("UNIT_X")).set::<String>("Kind", None);
        assert_eq!(row.attributes.len(), 1);
        assert_eq!(row.attr_str("Type"), Some("UNIT_X"));
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let mut row = Row::new().with_attr("A", 1).with_attr("B", 2);
        row.set_attr("A", "patched");
        assert_eq!(row.attributes[0], ("A", Value::from("patched")));
        assert_eq!(row.attributes.len(), 2);
    }

    #[test]
    fn empty_row_detection() {
        assert!(Row::new().is_empty());
        assert!(!Row::new().with_text("x").is_empty());
        assert!(Row::new().with_child(Row::new()).is_empty());
    }

    #[test]
    fn option_and_vec_overlay() {
        let mut a = Some(1);
        a.overlay(None);
        assert_eq!(a, Some(1));
        a.overlay(Some(2));
        assert_eq!(a, Some(2));

        let mut v = vec![1, 2];
        v.overlay(Vec::new());
        assert_eq!(v, vec![1, 2]);
        v.overlay(vec![3]);
        assert_eq!(v, vec![3]);
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Record {
        a: Option<i32>,
        b: Option<i32>,
    }

    impl_overlay!(Record { a, b });
    impl_replace!(Record);

    #[derive(Debug, Default)]
    struct Config {
        record: Record,
        tags: Vec<&'static str>,
    }

    impl_fill!(Config { record, tags });

    #[test]
    fn fill_replaces_nested_records_whole() {
        let mut config = Config {
            record: Record {
                a: Some(1),
                b: None,
            },
            tags: vec!["x"],
        };
        config.overlay(Config {
            record: Record {
                a: None,
                b: Some(2),
            },
            tags: Vec::new(),
        });
        assert_eq!(config.record, Record { a: None, b: Some(2) });
        assert_eq!(config.tags, vec!["x"]);

        config.overlay(Config::default());
        assert_eq!(config.record.b, Some(2));
    }

    #[test]
    fn record_overlay_stays_field_wise() {
        let mut record = Record {
            a: Some(1),
            b: None,
        };
        record.overlay(Record {
            a: None,
            b: Some(2),
        });
        assert_eq!(record, Record { a: Some(1), b: Some(2) });
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(3).to_string(), "3");
    }
}
