//! Context selection, interactive or from names given on the command line

use dialoguer::{theme::ColorfulTheme, MultiSelect};
use log::debug;

use crate::config::prompt;
use crate::error::{CleanupError, Result};
use crate::kubeconfig::NamedContext;

/// Outcome of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Context names to remove (possibly empty)
    Chosen(Vec<String>),
    /// The user cancelled; nothing must be changed
    Aborted,
}

/// Chooses which contexts to remove
pub trait ContextSelector {
    fn select(&self, contexts: &[NamedContext]) -> Result<Selection>;
}

/// Terminal multi-select prompt
pub struct InteractiveSelector;

impl ContextSelector for InteractiveSelector {
    fn select(&self, contexts: &[NamedContext]) -> Result<Selection> {
        let labels = item_labels(contexts);

        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt::HEADER)
            .items(&labels)
            .interact_opt()?;

        Ok(selection_from_pick(contexts, picked))
    }
}

/// Map the prompt result to a selection. Confirming with nothing ticked counts as
/// an abort, so the stale sweep never runs without an explicit choice.
fn selection_from_pick(contexts: &[NamedContext], picked: Option<Vec<usize>>) -> Selection {
    match picked {
        Some(indices) if !indices.is_empty() => {
            let names: Vec<String> = indices
                .into_iter()
                .filter_map(|i| contexts.get(i))
                .map(|c| c.name.clone())
                .collect();
            debug!("User selected contexts: {:?}", names);
            Selection::Chosen(names)
        }
        Some(_) => {
            debug!("No context ticked, treating as abort");
            Selection::Aborted
        }
        None => {
            debug!("User aborted context selection");
            Selection::Aborted
        }
    }
}

/// Selects contexts by name without prompting
pub struct NamedSelector {
    names: Vec<String>,
}

impl NamedSelector {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl ContextSelector for NamedSelector {
    fn select(&self, contexts: &[NamedContext]) -> Result<Selection> {
        let mut chosen: Vec<String> = Vec::with_capacity(self.names.len());
        let mut missing: Vec<&str> = Vec::new();

        for name in &self.names {
            if !contexts.iter().any(|c| &c.name == name) {
                missing.push(name);
            } else if !chosen.contains(name) {
                chosen.push(name.clone());
            }
        }

        if !missing.is_empty() {
            let quoted: Vec<String> = missing.iter().map(|n| format!("'{}'", n)).collect();
            return Err(CleanupError::Selection(format!(
                "Context {} not found. Available contexts: {}",
                quoted.join(", "),
                contexts
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        debug!("Contexts selected by name: {:?}", chosen);
        Ok(Selection::Chosen(chosen))
    }
}

/// Prompt lines: context name padded to a common width, followed by its full definition
fn item_labels(contexts: &[NamedContext]) -> Vec<String> {
    let width = contexts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    contexts
        .iter()
        .map(|c| format!("{:<width$}  {}", c.name, c.preview(), width = width))
        .collect()
}
