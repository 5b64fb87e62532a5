//! Typed records, one per target-schema table.
//!
//! Every field is optional: unset fields are omitted from the rendered row,
//! so the same structs double as partial configuration that builders
//! complete with derived identifiers.

/// Declare a flat table record: an all-`Option` struct with serde support,
/// a [`TableRow`](crate::row::TableRow) impl mapping fields to attribute
/// names, a field-wise [`Overlay`](crate::row::Overlay) impl, and a
/// whole-record [`Replace`](crate::row::Replace) impl.
macro_rules! table_row {
    (
        $(#[$meta:meta])*
        $name:ident => $table:ident {
            $( $field:ident : $ty:ty => $attr:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        #[allow(missing_docs)]
        pub struct $name {
            $( pub $field: Option<$ty>, )*
        }

        impl $crate::row::TableRow for $name {
            const TABLE: $crate::table::Table = $crate::table::Table::$table;

            fn to_row(&self) -> $crate::row::Row {
                let mut row = $crate::row::Row::new();
                $( row.set($attr, self.$field.clone()); )*
                row
            }
        }

        $crate::impl_overlay!($name { $($field),* });
        $crate::impl_replace!($name);
    };
}

/// Civilization tables, start biases and city names.
pub mod civilization;
/// Types, tags and traits shared by every content kind.
pub mod common;
/// Constructibles, buildings, improvements and unique quarters.
pub mod constructible;
/// Modifier definitions for `GameEffects` documents.
pub mod modifier;
/// Progression trees, nodes, unlock links and traditions.
pub mod progression;
/// Localized text and icon definitions.
pub mod text;
/// Units and their ancillary tables.
pub mod unit;
/// Unlocks, leader/civilization unlocks and requirement sets.
pub mod unlock;

pub use civilization::*;
pub use common::*;
pub use constructible::*;
pub use modifier::*;
pub use progression::*;
pub use text::*;
pub use unit::*;
pub use unlock::*;
