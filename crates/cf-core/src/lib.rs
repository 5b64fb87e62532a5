//! Core types for civforge: the document model that builders populate, the
//! typed table rows, load scopes, and deterministic XML output.
//!
//! Nothing in this crate knows about entity kinds or binding; see `cf-build`
//! for that.

/// Engine identifier constants (kinds, ages, domains).
pub mod constants;
/// In-memory multi-table documents.
pub mod document;
/// Error types for the write phase.
pub mod error;
/// Output files tagged with load scopes and manifest actions.
pub mod file;
/// Identifier and path transforms.
pub mod ident;
/// Rows, scalar values, and configuration overlay.
pub mod row;
/// Typed records, one per target table.
pub mod rows;
/// Load-scope bundles and action groups.
pub mod scope;
/// The table enumeration and its schema order.
pub mod table;
/// XML serializer.
pub mod xml;

pub use document::{Document, Root};
pub use error::{CfError, CfResult};
pub use file::{Action, FileContent, OutputFile};
pub use row::{Overlay, Replace, Row, TableRow, Value};
pub use scope::{ActionGroup, ActionGroupBundle, Criteria, Scope};
pub use table::Table;
