//! Four-axis candidate scoring.

use pr_core::{
    ContentCategory, FeatureVector, ModelOption, ScoreBreakdown, ScoringConfig,
    SelectionPreferences, Weights,
};

/// A named mode overrides whatever weights the caller supplied.
pub fn resolve_weights(prefs: &SelectionPreferences) -> Weights {
    prefs.mode.map(Weights::for_mode).unwrap_or(prefs.weights)
}

pub fn estimate_cost(model: &ModelOption, estimated_tokens: u32, config: &ScoringConfig) -> f64 {
    model.estimated_cost(estimated_tokens, config.input_token_share)
}

/// Catalog quality with the category/strength affinity bonus, capped at 1.
pub fn quality_score(model: &ModelOption, category: ContentCategory, config: &ScoringConfig) -> f64 {
    let bonus = match category {
        ContentCategory::Code if model.has_strength("code") => config.code_strength_bonus,
        ContentCategory::Creative if model.has_strength("creative_writing") => {
            config.creative_strength_bonus
        }
        ContentCategory::Research if model.has_strength("research") => config.research_strength_bonus,
        _ => 1.0,
    };
    (model.quality_score * bonus).min(1.0)
}

pub fn cost_score(estimated_cost: f64, config: &ScoringConfig) -> f64 {
    (1.0 - estimated_cost / config.cost_ceiling).max(0.0)
}

pub fn speed_score(model: &ModelOption, config: &ScoringConfig) -> f64 {
    (1.0 - model.avg_latency_ms / config.latency_ceiling_ms).max(0.0)
}

pub fn capability_score(model: &ModelOption, features: &FeatureVector, config: &ScoringConfig) -> f64 {
    let required = &features.required_capabilities;
    let matched = required.iter().filter(|c| model.capabilities.contains(c)).count();
    let mut score = matched as f64 / required.len().max(1) as f64;

    if u64::from(model.context_window) >= 2 * u64::from(features.min_context_window) {
        score += config.context_headroom_bonus;
    }
    if model.has_strength("large_context") && features.estimated_tokens > config.large_context_tokens {
        score += config.large_context_bonus;
    }
    score.min(1.0)
}

/// Score one candidate. The total is the plain weighted sum; weights are not
/// normalized.
pub fn score_model(
    model: &ModelOption,
    features: &FeatureVector,
    weights: &Weights,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let quality = quality_score(model, features.content_category, config);
    let cost = cost_score(estimate_cost(model, features.estimated_tokens, config), config);
    let speed = speed_score(model, config);
    let capability = capability_score(model, features, config);
    let total = quality * weights.quality
        + cost * weights.cost
        + speed * weights.speed
        + capability * weights.capability;

    ScoreBreakdown { quality, cost, speed, capability, total }
}
