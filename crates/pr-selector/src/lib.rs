//! Model selector: constraint filtering and weighted ranking over a static catalog.

pub mod catalog;
pub mod reasoning;
pub mod scoring;
pub mod selector;

pub use catalog::{default_catalog, Catalog, CatalogHandle};
pub use scoring::{resolve_weights, score_model};
pub use selector::*;

use pr_core::{FileMeta, Result, SelectionPreferences, SelectionResult};

/// Classify `prompt` and select a model for it in one call.
pub fn recommend(
    prompt: &str,
    files: &[FileMeta],
    prefs: &SelectionPreferences,
    catalog: &Catalog,
) -> Result<SelectionResult> {
    let features = pr_analyzer::classify(prompt, files);
    select(&features, prefs, catalog)
}

#[cfg(test)]
mod tests;
