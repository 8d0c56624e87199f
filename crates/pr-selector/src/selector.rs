//! Constraint filtering, ranking and result assembly.

use pr_core::{
    FeatureVector, ModelOption, PrError, Result, ScoredCandidate, ScoringConfig,
    SelectionPreferences, SelectionResult, DEFAULT_CONFIG,
};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::reasoning;
use crate::scoring::{estimate_cost, resolve_weights, score_model};

/// Hard constraints. A model failing any of them is out, with no partial credit.
pub fn passes_constraints(
    model: &ModelOption,
    features: &FeatureVector,
    prefs: &SelectionPreferences,
    config: &ScoringConfig,
) -> bool {
    if model.context_window < features.min_context_window {
        return false;
    }
    if !features.required_capabilities.is_subset(&model.capabilities) {
        return false;
    }
    if !prefs.preferred_providers.is_empty()
        && !prefs.preferred_providers.iter().any(|p| *p == model.provider)
    {
        return false;
    }
    if !prefs.blacklisted_models.is_empty() {
        let key = model.key();
        if prefs.blacklisted_models.iter().any(|b| *b == key) {
            return false;
        }
    }
    if let Some(max) = prefs.max_cost_per_message {
        if estimate_cost(model, features.estimated_tokens, config) > max {
            return false;
        }
    }
    true
}

/// Catalog entries that satisfy every hard constraint, in catalog order.
pub fn eligible<'a>(
    features: &FeatureVector,
    prefs: &SelectionPreferences,
    catalog: &'a Catalog,
    config: &ScoringConfig,
) -> Vec<&'a ModelOption> {
    catalog
        .models()
        .iter()
        .filter(|m| passes_constraints(m, features, prefs, config))
        .collect()
}

/// Score and rank every eligible model, best first. The sort is stable, so
/// equal totals keep catalog order.
pub fn rank(
    features: &FeatureVector,
    prefs: &SelectionPreferences,
    catalog: &Catalog,
    config: &ScoringConfig,
) -> Result<Vec<ScoredCandidate>> {
    config.validate()?;
    prefs.validate()?;
    let weights = resolve_weights(prefs);

    let mut ranked: Vec<ScoredCandidate> = eligible(features, prefs, catalog, config)
        .into_iter()
        .map(|m| ScoredCandidate {
            model: m.clone(),
            scores: score_model(m, features, &weights, config),
            estimated_cost: estimate_cost(m, features.estimated_tokens, config),
        })
        .collect();

    if ranked.is_empty() {
        let required: Vec<&str> = features.required_capabilities.iter().map(|c| c.as_str()).collect();
        warn!(
            catalog = catalog.version(),
            min_context = features.min_context_window,
            required = ?required,
            "no model satisfies constraints"
        );
        return Err(PrError::NoEligibleModel {
            considered: catalog.len(),
            minimum_context: features.min_context_window,
            required: required.join(", "),
        });
    }

    ranked.sort_by(|a, b| b.scores.total.total_cmp(&a.scores.total));
    Ok(ranked)
}

/// Select with the default scoring config.
pub fn select(
    features: &FeatureVector,
    prefs: &SelectionPreferences,
    catalog: &Catalog,
) -> Result<SelectionResult> {
    select_with(features, prefs, catalog, &DEFAULT_CONFIG.scoring)
}

/// Pick the best model for a classified request.
pub fn select_with(
    features: &FeatureVector,
    prefs: &SelectionPreferences,
    catalog: &Catalog,
    config: &ScoringConfig,
) -> Result<SelectionResult> {
    let ranked = rank(features, prefs, catalog, config)?;
    let top = &ranked[0];

    let estimated_cost = estimate_cost(&top.model, features.estimated_tokens, config);
    let premium = ranked
        .iter()
        .map(|c| c.estimated_cost)
        .fold(estimated_cost, f64::max);
    let reasons = reasoning::reasons(&top.model, features, &top.scores, prefs.mode, config);

    debug!(
        model = %top.model.key(),
        total = top.scores.total,
        candidates = ranked.len(),
        "selected model"
    );

    Ok(SelectionResult {
        recommended: top.model.clone(),
        alternatives: ranked
            .iter()
            .skip(1)
            .take(config.alternatives)
            .map(|c| c.model.clone())
            .collect(),
        estimated_cost,
        savings: (premium - estimated_cost).max(0.0),
        reasoning: reasoning::join(&reasons),
        reasons,
        scores: top.scores,
    })
}

/// Saving of `selected` against the most expensive catalog entry for a
/// request of `estimated_tokens`.
pub fn savings_vs_premium(
    selected: &ModelOption,
    estimated_tokens: u32,
    catalog: &Catalog,
    config: &ScoringConfig,
) -> f64 {
    let selected_cost = estimate_cost(selected, estimated_tokens, config);
    let premium = catalog
        .models()
        .iter()
        .map(|m| estimate_cost(m, estimated_tokens, config))
        .fold(selected_cost, f64::max);
    (premium - selected_cost).max(0.0)
}
