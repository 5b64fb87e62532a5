use std::rc::Rc;

use serde::Deserialize;
use uuid::Uuid;

use cf_core::ident::{locale, path_segment};
use cf_core::rows::ModifierRow;
use cf_core::{Action, ActionGroupBundle, OutputFile, Overlay, impl_fill};

use crate::builder::{Builder, Documents, EntityKind, non_empty, push_text, shell_and_always};

/// Description text for one language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModifierLocalization {
    /// Language code, `en_US` when unset.
    pub language: Option<String>,
    /// Description shown in tooltips.
    pub description: Option<String>,
}

/// Modifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    /// The modifier definition. A missing id is generated once per builder.
    pub modifier: ModifierRow,
    /// Register the modifier without linking it to a parent's trait.
    pub detached: Option<bool>,
    /// Description text.
    pub localizations: Vec<ModifierLocalization>,
}

impl_fill!(ModifierConfig {
    modifier,
    detached,
    localizations
});

/// Builds a single modifier definition.
#[derive(Debug)]
pub struct ModifierBuilder {
    config: ModifierConfig,
    generated_id: String,
    scopes: Rc<ActionGroupBundle>,
    documents: Documents,
}

impl Default for ModifierBuilder {
    fn default() -> Self {
        Self {
            config: ModifierConfig::default(),
            generated_id: format!("MOD_{}", Uuid::new_v4().simple().to_string().to_uppercase()),
            scopes: Rc::default(),
            documents: Documents::default(),
        }
    }
}

impl ModifierBuilder {
    /// A builder with an always-loaded scope bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a shared scope bundle.
    pub fn with_scopes(mut self, scopes: Rc<ActionGroupBundle>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Overlay configuration.
    pub fn fill(&mut self, config: ModifierConfig) -> &mut Self {
        self.config.overlay(config);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ModifierConfig {
        &self.config
    }

    /// The configured id, or the one generated for this builder.
    pub fn id(&self) -> String {
        self.config
            .modifier
            .id
            .clone()
            .unwrap_or_else(|| self.generated_id.clone())
    }
}

impl Builder for ModifierBuilder {
    fn kind(&self) -> EntityKind {
        EntityKind::Modifier
    }

    fn primary_type(&self) -> Option<String> {
        Some(self.id())
    }

    fn scopes(&self) -> &Rc<ActionGroupBundle> {
        &self.scopes
    }

    fn documents(&self) -> &Documents {
        &self.documents
    }

    fn migrate(&mut self) {
        self.documents.clear();
        let id = self.id();

        let mut row = self.config.modifier.clone();
        row.id = Some(id.clone());
        let has_description = self
            .config
            .localizations
            .iter()
            .any(|l| l.description.is_some());
        if row.description.is_none() && has_description {
            row.description = Some(locale(&id, "description"));
        }
        self.documents.game_effects.push(&row);

        for text in &self.config.localizations {
            push_text(
                &mut self.documents.localizations,
                &id,
                "description",
                text.language.as_deref(),
                text.description.as_deref(),
            );
        }
    }

    fn files(&self) -> Vec<OutputFile> {
        let dir = format!("modifiers/{}", path_segment(&self.id()));
        let docs = &self.documents;
        non_empty([
            OutputFile::xml(
                &dir,
                "game-effects.xml",
                docs.game_effects.clone(),
                vec![self.scopes.current.clone()],
                vec![Action::UpdateDatabase],
            ),
            OutputFile::xml(
                &dir,
                "localization.xml",
                docs.localizations.clone(),
                shell_and_always(&self.scopes),
                vec![Action::UpdateText],
            ),
        ])
    }

    fn is_detached(&self) -> bool {
        self.config.detached.unwrap_or(false)
    }
}
