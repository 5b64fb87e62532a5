//! Entity builders and the mod orchestrator.
//!
//! Builders are configured with `fill`, linked with `bind`, and compiled by a
//! [`Mod`] into output files plus a `.modinfo` manifest.
//!
//! ```no_run
//! use cf_build::builders::{CivilizationBuilder, CivilizationConfig};
//! use cf_build::{Mod, ModInfo, Shared};
//!
//! let civ = Shared::new(CivilizationBuilder::new());
//! civ.borrow_mut().fill(CivilizationConfig {
//!     civilization_type: Some("CIVILIZATION_BABYLON".into()),
//!     ..Default::default()
//! });
//! let mut m = Mod::new(ModInfo::default());
//! m.add(civ.erased());
//! m.build("dist".as_ref(), true).unwrap();
//! ```

/// The builder trait, shared handles, and document helpers.
pub mod builder;
/// Builders, one per entity kind.
pub mod builders;
/// The mod orchestrator and manifest.
pub mod modinfo;

pub use builder::{AnyBuilder, Builder, Documents, EntityKind, EntityLocalization, Icon, Shared};
pub use modinfo::{BuildReport, Dependency, Mod, ModInfo};
