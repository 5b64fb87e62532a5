//! Load scopes: the conditions under which the engine loads a document.
//!
//! Every builder owns an [`ActionGroupBundle`]. Two builders only share
//! action groups (and therefore criteria ids) when the author hands them the
//! same `Rc<ActionGroupBundle>`.

use std::fmt;

use uuid::Uuid;

/// Where an action group applies: the front-end shell or a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Main menu and game setup screens.
    Shell,
    /// An active game session.
    Game,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell => write!(f, "shell"),
            Self::Game => write!(f, "game"),
        }
    }
}

/// The test a criteria performs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Always satisfied.
    AlwaysMet,
    /// The given age is the one being played.
    AgeInUse(String),
    /// The given age is being played or has been played.
    AgeEverInUse(String),
}

/// A named loading condition referenced by action groups in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Criteria {
    /// Identifier referenced by `<ActionGroup criteria="..">`.
    pub id: String,
    /// The condition tested.
    pub condition: Condition,
}

impl Criteria {
    fn generate(condition: Condition) -> Self {
        let label = match &condition {
            Condition::AlwaysMet => "always".to_string(),
            Condition::AgeInUse(age) => format!("{}-current", age_label(age)),
            Condition::AgeEverInUse(age) => format!("{}-persist", age_label(age)),
        };
        Self {
            id: format!("{label}-{}", short_id()),
            condition,
        }
    }
}

/// One loading condition a document can be bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionGroup {
    /// Identifier of the `<ActionGroup>` element.
    pub id: String,
    /// Shell or game scope.
    pub scope: Scope,
    /// Criteria deciding whether the group loads.
    pub criteria: Criteria,
}

impl ActionGroup {
    fn generate(scope: Scope, name: &str, condition: Condition) -> Self {
        Self {
            id: format!("{scope}-{name}-{}", short_id()),
            scope,
            criteria: Criteria::generate(condition),
        }
    }
}

/// The four loading conditions available to an entity's documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionGroupBundle {
    /// The age this bundle is tied to, if any.
    pub age: Option<String>,
    /// Loaded in the front-end shell.
    pub shell: ActionGroup,
    /// Loaded in every game regardless of age.
    pub always: ActionGroup,
    /// Loaded while the bundle's age is the current one.
    pub current: ActionGroup,
    /// Loaded in the bundle's age and every later age.
    pub persist: ActionGroup,
}

impl Default for ActionGroupBundle {
    fn default() -> Self {
        Self::always_loaded()
    }
}

impl ActionGroupBundle {
    /// A bundle whose game scopes all load unconditionally.
    pub fn always_loaded() -> Self {
        Self {
            age: None,
            shell: ActionGroup::generate(Scope::Shell, "shell", Condition::AlwaysMet),
            always: ActionGroup::generate(Scope::Game, "always", Condition::AlwaysMet),
            current: ActionGroup::generate(Scope::Game, "current", Condition::AlwaysMet),
            persist: ActionGroup::generate(Scope::Game, "persist", Condition::AlwaysMet),
        }
    }

    /// A bundle tied to an age, e.g. `AGE_ANTIQUITY`.
    pub fn for_age(age: impl Into<String>) -> Self {
        let age = age.into();
        Self {
            shell: ActionGroup::generate(Scope::Shell, "shell", Condition::AlwaysMet),
            always: ActionGroup::generate(Scope::Game, "always", Condition::AlwaysMet),
            current: ActionGroup::generate(
                Scope::Game,
                "current",
                Condition::AgeInUse(age.clone()),
            ),
            persist: ActionGroup::generate(
                Scope::Game,
                "persist",
                Condition::AgeEverInUse(age.clone()),
            ),
            age: Some(age),
        }
    }

    /// True when the bundle is tied to a specific age.
    pub fn is_age_scoped(&self) -> bool {
        self.age.is_some()
    }
}

fn age_label(age: &str) -> String {
    age.strip_prefix("AGE_").unwrap_or(age).to_lowercase()
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_is_always_loaded() {
        let bundle = ActionGroupBundle::default();
        assert!(!bundle.is_age_scoped());
        assert_eq!(bundle.current.criteria.condition, Condition::AlwaysMet);
        assert_eq!(bundle.shell.scope, Scope::Shell);
        assert_eq!(bundle.persist.scope, Scope::Game);
    }

    #[test]
    fn age_bundle_conditions() {
        let bundle = ActionGroupBundle::for_age("AGE_ANTIQUITY");
        assert_eq!(
            bundle.current.criteria.condition,
            Condition::AgeInUse("AGE_ANTIQUITY".into())
        );
        assert_eq!(
            bundle.persist.criteria.condition,
            Condition::AgeEverInUse("AGE_ANTIQUITY".into())
        );
        assert!(bundle.current.criteria.id.starts_with("antiquity-current-"));
    }

    #[test]
    fn separate_bundles_never_share_ids() {
        let a = ActionGroupBundle::for_age("AGE_EXPLORATION");
        let b = ActionGroupBundle::for_age("AGE_EXPLORATION");
        assert_ne!(a.current.criteria.id, b.current.criteria.id);
        assert_ne!(a.current.id, b.current.id);
        assert_ne!(a.always.criteria.id, b.always.criteria.id);
    }

    #[test]
    fn group_ids_carry_scope() {
        let bundle = ActionGroupBundle::default();
        assert!(bundle.shell.id.starts_with("shell-shell-"));
        assert!(bundle.current.id.starts_with("game-current-"));
    }
}
