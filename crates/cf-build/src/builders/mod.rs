//! One builder per entity kind.

/// Civilizations and their derived traits.
pub mod civilization;
/// Civilization → civilization unlocks across ages.
pub mod civilization_unlock;
/// Buildings and improvements.
pub mod constructible;
/// Imported asset files.
pub mod import_file;
/// Leader → civilization unlocks.
pub mod leader_unlock;
/// Game-effect modifiers.
pub mod modifier;
/// Progression trees.
pub mod progression_tree;
/// Progression tree nodes.
pub mod progression_tree_node;
/// Traditions.
pub mod tradition;
/// Unique quarters.
pub mod unique_quarter;
/// Units.
pub mod unit;
/// Generic unlocks with rewards and requirement sets.
pub mod unlock;

pub use civilization::{CivilizationBuilder, CivilizationConfig, CivilizationLocalization};
pub use civilization_unlock::{CivilizationUnlockBuilder, CivilizationUnlockConfig};
pub use constructible::{ConstructibleBuilder, ConstructibleConfig};
pub use import_file::{ImportFileBuilder, ImportFileConfig};
pub use leader_unlock::{LeaderUnlockBuilder, LeaderUnlockConfig, LeaderUnlockLocalization};
pub use modifier::{ModifierBuilder, ModifierConfig, ModifierLocalization};
pub use progression_tree::{ProgressionTreeBuilder, ProgressionTreeConfig};
pub use progression_tree_node::{ProgressionTreeNodeBuilder, ProgressionTreeNodeConfig};
pub use tradition::{TraditionBuilder, TraditionConfig};
pub use unique_quarter::{UniqueQuarterBuilder, UniqueQuarterConfig};
pub use unit::{UnitBuilder, UnitConfig};
pub use unlock::{UnlockBuilder, UnlockConfig, UnlockRequirement};
