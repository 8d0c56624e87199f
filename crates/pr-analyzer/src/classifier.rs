//! Prompt classifier: lexical signals -> feature vector.

use pr_core::{
    AnalyzerConfig, Capability, ComplexityTier, ContentCategory, Domain, Feature, FeatureVector,
    FileMeta, DEFAULT_CONFIG,
};
use std::collections::BTreeSet;
use tracing::debug;

use crate::extract::extract;
use crate::tables::{
    CoefficientTable, ACCURACY, BUDGET, BUDGET_CUES, CATEGORY_INDICATORS, CREATIVITY,
    DOMAIN_INDICATORS, FEATURE_CUES, MATH_EXPRESSION, QUALITY_THRESHOLD, SPEED, SPEED_CUES,
};

/// Classify with the default analyzer config.
pub fn classify(prompt: &str, files: &[FileMeta]) -> FeatureVector {
    classify_with(prompt, files, &DEFAULT_CONFIG.analyzer)
}

/// Classify a prompt. Total: sparse or odd input degrades to the
/// `General`/`Simple` defaults.
pub fn classify_with(prompt: &str, files: &[FileMeta], config: &AnalyzerConfig) -> FeatureVector {
    let signals = extract(prompt, files, config.language_match_threshold);
    let text = signals.lowercase.as_str();

    let content_category = content_category(text, signals.has_code());
    let domain = domain(text);
    let complexity_tier =
        complexity_tier(signals.word_count, signals.has_code(), signals.tech_stack.len());
    let required_features = required_features(text, files);
    let required_capabilities = required_capabilities(&required_features, content_category);
    let estimated_tokens = estimate_tokens(signals.char_count, config.chars_per_token);
    let min_context_window = min_context_window(estimated_tokens, files.len(), config);

    let accuracy_needed = ACCURACY.lookup(content_category, domain);
    let creativity_needed = CREATIVITY.lookup(content_category, domain);
    let speed_priority = cued(text, SPEED_CUES, &SPEED, content_category, domain);
    let budget_sensitivity = cued(text, BUDGET_CUES, &BUDGET, content_category, domain);
    let quality_threshold = QUALITY_THRESHOLD.lookup(content_category, domain);
    let has_code = signals.has_code();

    let fv = FeatureVector {
        complexity_tier,
        content_category,
        domain,
        has_code,
        has_images: signals.has_images,
        has_files: signals.has_files,
        code_languages: signals.code_languages,
        tech_stack: signals.tech_stack,
        required_features,
        required_capabilities,
        min_context_window,
        estimated_tokens,
        word_count: signals.word_count,
        char_count: signals.char_count,
        language: signals.language,
        accuracy_needed,
        creativity_needed,
        speed_priority,
        budget_sensitivity,
        quality_threshold,
    };

    debug!(
        category = fv.content_category.as_str(),
        tier = ?fv.complexity_tier,
        tokens = fv.estimated_tokens,
        min_context = fv.min_context_window,
        "classified prompt"
    );
    fv
}

fn hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}

/// Highest weighted keyword score wins; code syntax overrides everything.
pub fn content_category(text: &str, has_code: bool) -> ContentCategory {
    if has_code {
        return ContentCategory::Code;
    }
    let mut best = (ContentCategory::General, 0u32);
    for (category, weight, keywords) in CATEGORY_INDICATORS {
        let score = hits(text, keywords) as u32 * weight;
        if score > best.1 {
            best = (*category, score);
        }
    }
    best.0
}

/// First domain in table order with any indicator hit.
pub fn domain(text: &str) -> Option<Domain> {
    DOMAIN_INDICATORS
        .iter()
        .find(|(_, keywords)| hits(text, keywords) > 0)
        .map(|(d, _)| *d)
}

pub fn complexity_tier(word_count: usize, has_code: bool, tech_count: usize) -> ComplexityTier {
    let mut score = match word_count {
        n if n > 500 => 3,
        n if n > 200 => 2,
        n if n > 100 => 1,
        _ => 0,
    };
    if has_code {
        score += 2;
    }
    score += tech_count;

    match score {
        s if s >= 6 => ComplexityTier::Expert,
        s if s >= 4 => ComplexityTier::Complex,
        s if s >= 2 => ComplexityTier::Moderate,
        _ => ComplexityTier::Simple,
    }
}

pub fn required_features(text: &str, files: &[FileMeta]) -> BTreeSet<Feature> {
    let mut features: BTreeSet<Feature> = FEATURE_CUES
        .iter()
        .filter(|(_, cues)| hits(text, cues) > 0)
        .map(|(f, _)| *f)
        .collect();
    if files.iter().any(FileMeta::is_image) {
        features.insert(Feature::Vision);
    }
    if MATH_EXPRESSION.is_match(text) {
        features.insert(Feature::Math);
    }
    features
}

pub fn required_capabilities(
    features: &BTreeSet<Feature>,
    category: ContentCategory,
) -> BTreeSet<Capability> {
    let mut caps: BTreeSet<Capability> = features
        .iter()
        .map(|f| match f {
            Feature::Vision => Capability::Vision,
            Feature::WebSearch => Capability::WebBrowsing,
            Feature::CodeExecution => Capability::CodeExecution,
            Feature::Reasoning => Capability::Reasoning,
            Feature::Math => Capability::Math,
        })
        .collect();
    match category {
        ContentCategory::Code => {
            caps.insert(Capability::CodeGeneration);
        }
        ContentCategory::Creative => {
            caps.insert(Capability::CreativeWriting);
        }
        ContentCategory::Analysis => {
            caps.insert(Capability::DataAnalysis);
        }
        _ => {}
    }
    caps
}

pub fn estimate_tokens(char_count: usize, chars_per_token: f64) -> u32 {
    (char_count as f64 / chars_per_token).ceil() as u32
}

/// Smallest ladder rung holding the padded token estimate plus the per-file
/// allowance, capped at the top rung.
pub fn min_context_window(estimated_tokens: u32, file_count: usize, config: &AnalyzerConfig) -> u32 {
    let files = (file_count as u32).saturating_mul(config.per_file_context_allowance);
    let needed = config
        .base_context_window
        .saturating_add(files)
        .max(estimated_tokens.saturating_mul(config.context_safety_multiplier));

    let cap = config.context_ladder.last().copied().unwrap_or(needed);
    config
        .context_ladder
        .iter()
        .copied()
        .find(|rung| *rung >= needed)
        .unwrap_or(cap)
}

fn cued(
    text: &str,
    cues: &[(f64, &[&str])],
    table: &CoefficientTable,
    category: ContentCategory,
    domain: Option<Domain>,
) -> f64 {
    cues.iter()
        .find(|(_, words)| hits(text, words) > 0)
        .map(|(v, _)| *v)
        .unwrap_or_else(|| table.lookup(category, domain))
}
