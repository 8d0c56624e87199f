//! Human-readable justification for a recommendation.

use pr_core::{
    ComplexityTier, ContentCategory, FeatureVector, ModelOption, OptimizationMode, ScoreBreakdown,
    ScoringConfig,
};

/// Ordered justification clauses. The first clause always names the model.
pub fn reasons(
    model: &ModelOption,
    features: &FeatureVector,
    scores: &ScoreBreakdown,
    mode: Option<OptimizationMode>,
    config: &ScoringConfig,
) -> Vec<String> {
    let mut out = vec![match mode {
        Some(OptimizationMode::Quality) => format!("Selected {} for highest quality output", model.model),
        Some(OptimizationMode::Budget) => format!("Selected {} for cost efficiency", model.model),
        Some(OptimizationMode::Speed) => format!("Selected {} for fastest response time", model.model),
        Some(OptimizationMode::Balanced) => format!("Selected {} for balanced performance", model.model),
        None => format!("Selected {} using custom weights", model.model),
    }];

    match features.content_category {
        ContentCategory::Code if model.has_strength("code") => {
            out.push("Excellent at code generation and debugging".into())
        }
        ContentCategory::Research if model.has_strength("research") => {
            out.push("Optimized for research with citations".into())
        }
        ContentCategory::Creative if model.has_strength("creative_writing") => {
            out.push("Strong at creative writing".into())
        }
        _ => {}
    }
    if features.complexity_tier == ComplexityTier::Expert {
        out.push("Capable of handling expert-level complexity".into());
    }
    if features.estimated_tokens > config.large_context_tokens {
        out.push(format!("Large context window ({} tokens)", group_thousands(model.context_window)));
    }
    if scores.cost > 0.8 {
        out.push("Very cost-effective for this query".into());
    }
    if scores.speed > 0.8 {
        out.push("Fast response time".into());
    }
    out
}

pub fn join(reasons: &[String]) -> String {
    reasons.join(". ")
}

/// `200000` -> `"200,000"`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
