use crate::*;
use crate::reasoning::{group_thousands, reasons};
use crate::scoring::{capability_score, cost_score, quality_score, speed_score};
use pr_analyzer::classify;
use pr_core::*;
use std::collections::BTreeSet;

const FIB: &str = "def fibonacci(n): return n if n<2 else fibonacci(n-1)+fibonacci(n-2)";

fn scoring() -> ScoringConfig {
    ScoringConfig::default()
}

fn model(key: &str) -> ModelOption {
    let (provider, name) = key.split_once('/').unwrap();
    default_catalog().get(provider, name).cloned().unwrap()
}

fn features(
    category: ContentCategory,
    caps: &[Capability],
    min_context_window: u32,
    estimated_tokens: u32,
) -> FeatureVector {
    let mut fv = classify("", &[]);
    fv.content_category = category;
    fv.required_capabilities = caps.iter().copied().collect();
    fv.min_context_window = min_context_window;
    fv.estimated_tokens = estimated_tokens;
    fv
}

fn option(provider: &str, name: &str) -> ModelOption {
    ModelOption {
        provider: provider.into(),
        model: name.into(),
        context_window: 32000,
        input_cost: 0.001,
        output_cost: 0.002,
        avg_latency_ms: 1000.0,
        quality_score: 0.8,
        capabilities: BTreeSet::from([Capability::Reasoning, Capability::CodeGeneration]),
        strengths: vec![],
    }
}

// ========== Catalog ==========

#[test]
fn test_default_catalog_valid() {
    let c = default_catalog();
    assert_eq!(c.len(), 14);
    assert!(Catalog::new(c.version(), c.models().to_vec()).is_ok());
}

#[test]
fn test_catalog_lookup() {
    let c = default_catalog();
    assert_eq!(c.get("openai", "gpt-4o").map(|m| m.context_window), Some(128_000));
    assert!(c.get("openai", "gpt-5").is_none());
    assert_eq!(c.get_by_key("google/gemini-1.5-flash").map(|m| m.avg_latency_ms), Some(600.0));
    assert!(c.get_by_key("no-slash").is_none());
}

#[test]
fn test_catalog_rejects_duplicates() {
    let r = Catalog::new("t", vec![option("a", "m"), option("a", "m")]);
    assert!(matches!(r, Err(PrError::DuplicateModel(k)) if k == "a/m"));
}

#[test]
fn test_catalog_rejects_negative_cost() {
    let mut m = option("a", "m");
    m.input_cost = -0.1;
    assert!(matches!(Catalog::new("t", vec![m]), Err(PrError::InvalidCatalog { .. })));
}

#[test]
fn test_catalog_rejects_negative_latency() {
    let mut m = option("a", "m");
    m.avg_latency_ms = -1.0;
    assert!(Catalog::new("t", vec![m]).is_err());
}

#[test]
fn test_catalog_rejects_bad_quality_and_window() {
    let mut m = option("a", "m");
    m.quality_score = 1.5;
    assert!(Catalog::new("t", vec![m]).is_err());
    let mut m = option("a", "m");
    m.context_window = 0;
    assert!(Catalog::new("t", vec![m]).is_err());
}

#[test]
fn test_catalog_from_json() {
    let raw = r#"{
        "version": "v2",
        "models": [{
            "provider": "acme", "model": "small", "context_window": 8192,
            "input_cost": 0.0001, "output_cost": 0.0002, "avg_latency_ms": 300,
            "quality_score": 0.6, "capabilities": ["reasoning", "code_generation"],
            "strengths": ["fast"]
        }]
    }"#;
    let c = Catalog::from_json(raw).unwrap();
    assert_eq!(c.version(), "v2");
    assert!(c.get("acme", "small").unwrap().capabilities.contains(&Capability::CodeGeneration));
}

#[test]
fn test_catalog_json_unknown_capability() {
    let raw = r#"{"version": "v", "models": [{
        "provider": "acme", "model": "x", "context_window": 1, "input_cost": 0,
        "output_cost": 0, "avg_latency_ms": 0, "quality_score": 0.5,
        "capabilities": ["telepathy"]
    }]}"#;
    assert!(matches!(Catalog::from_json(raw), Err(PrError::Serialization(_))));
}

#[test]
fn test_catalog_handle_swap() {
    let handle = CatalogHandle::default();
    let before = handle.snapshot();
    let next = Catalog::new("v-next", vec![option("acme", "only")]).unwrap();
    let prev = handle.swap(next);
    assert_eq!(prev.version(), before.version());
    assert_eq!(before.len(), 14);
    assert_eq!(handle.snapshot().version(), "v-next");
    assert_eq!(handle.snapshot().len(), 1);
}

// ========== Scoring ==========

#[test]
fn test_resolve_weights_mode_overrides() {
    let prefs = SelectionPreferences {
        mode: Some(OptimizationMode::Budget),
        weights: Weights::new(1.0, 0.0, 0.0, 0.0),
        ..Default::default()
    };
    assert_eq!(resolve_weights(&prefs), Weights::new(0.2, 0.6, 0.1, 0.1));
    let custom = SelectionPreferences::with_weights(Weights::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(resolve_weights(&custom), Weights::new(1.0, 0.0, 0.0, 0.0));
}

#[test]
fn test_quality_strength_bonus() {
    let c = scoring();
    assert_eq!(quality_score(&model("openai/gpt-4o"), ContentCategory::Code, &c), 1.0);
    assert_eq!(quality_score(&model("openai/gpt-4o"), ContentCategory::General, &c), 0.95);
    let research = quality_score(&model("perplexity/sonar-pro"), ContentCategory::Research, &c);
    assert!((research - 0.9775).abs() < 1e-9);
    // strength present but category does not match
    assert_eq!(quality_score(&model("perplexity/sonar-pro"), ContentCategory::Code, &c), 0.85);
}

#[test]
fn test_cost_and_speed_scores() {
    let c = scoring();
    assert!((cost_score(0.05, &c) - 0.5).abs() < 1e-9);
    assert_eq!(cost_score(0.2, &c), 0.0);
    assert!((speed_score(&model("openai/gpt-4o"), &c) - 0.6).abs() < 1e-9);
    let mut slow = option("a", "slow");
    slow.avg_latency_ms = 6000.0;
    assert_eq!(speed_score(&slow, &c), 0.0);
}

#[test]
fn test_capability_score() {
    let c = scoring();
    let none = features(ContentCategory::General, &[], 4096, 10);
    assert!((capability_score(&model("openai/gpt-3.5-turbo"), &none, &c) - 0.1).abs() < 1e-9);

    let code = features(ContentCategory::Code, &[Capability::CodeGeneration], 128_000, 10);
    assert_eq!(capability_score(&model("openai/gpt-4o"), &code, &c), 1.0);

    let partial = features(ContentCategory::General, &[Capability::Vision, Capability::CodeGeneration], 4096, 10);
    assert!((capability_score(&model("openai/gpt-3.5-turbo"), &partial, &c) - 0.6).abs() < 1e-9);

    let large = features(ContentCategory::General, &[], 128_000, 20_000);
    assert!((capability_score(&model("anthropic/claude-3.5-sonnet"), &large, &c) - 0.1).abs() < 1e-9);
}

#[test]
fn test_total_is_weighted_sum() {
    let c = scoring();
    let fv = features(ContentCategory::General, &[], 4096, 1000);
    let m = model("google/gemini-1.5-flash");
    let w = Weights::new(0.5, 0.5, 0.5, 0.5);
    let s = score_model(&m, &fv, &w, &c);
    let expected = 0.5 * (s.quality + s.cost + s.speed + s.capability);
    assert!((s.total - expected).abs() < 1e-12);
}

// ========== Filtering ==========

#[test]
fn test_filter_context_window() {
    let fv = features(ContentCategory::General, &[], 32000, 10);
    let prefs = SelectionPreferences::default();
    let c = default_catalog();
    let names: Vec<_> = eligible(&fv, &prefs, &c, &scoring()).iter().map(|m| m.model.clone()).collect();
    assert!(!names.contains(&"gpt-3.5-turbo".to_string()));
    assert!(names.contains(&"sonar".to_string()));
}

#[test]
fn test_filter_capabilities() {
    let fv = features(ContentCategory::General, &[Capability::Research], 4096, 10);
    let c = default_catalog();
    let found = eligible(&fv, &SelectionPreferences::default(), &c, &scoring());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].model, "sonar-pro");
}

#[test]
fn test_filter_blacklist_and_providers() {
    let fv = features(ContentCategory::General, &[], 4096, 10);
    let c = default_catalog();
    let prefs = SelectionPreferences {
        preferred_providers: vec!["openai".into()],
        blacklisted_models: vec!["openai/gpt-4o".into()],
        ..Default::default()
    };
    let found = eligible(&fv, &prefs, &c, &scoring());
    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|m| m.provider == "openai" && m.model != "gpt-4o"));
}

#[test]
fn test_filter_max_cost() {
    let fv = features(ContentCategory::General, &[], 4096, 10_000);
    let c = default_catalog();
    let prefs = SelectionPreferences { max_cost_per_message: Some(0.01), ..Default::default() };
    for m in eligible(&fv, &prefs, &c, &scoring()) {
        assert!(m.estimated_cost(10_000, 0.4) <= 0.01);
    }
    assert!(c.get("anthropic", "claude-3-opus").is_some_and(|m| !passes_constraints(m, &fv, &prefs, &scoring())));
}

// ========== Selection ==========

#[test]
fn test_select_code_quality_mode() {
    let fv = classify(FIB, &[]);
    let r = select(&fv, &SelectionPreferences::with_mode(OptimizationMode::Quality), &default_catalog()).unwrap();
    assert_eq!(r.recommended.model, "gpt-4o");
    assert_eq!(r.alternatives.len(), 3);
    assert_eq!(r.alternatives[0].model, "claude-3.5-sonnet");
    assert_eq!(
        r.reasoning,
        "Selected gpt-4o for highest quality output. Excellent at code generation and debugging. Very cost-effective for this query"
    );
}

#[test]
fn test_select_speed_mode() {
    let fv = classify(FIB, &[]);
    let r = select(&fv, &SelectionPreferences::with_mode(OptimizationMode::Speed), &default_catalog()).unwrap();
    assert_eq!(r.recommended.model, "gemini-1.5-flash-8b");
    assert_eq!(r.reasons.last().map(String::as_str), Some("Fast response time"));
    assert!((r.scores.total - 0.89).abs() < 1e-3);
}

#[test]
fn test_select_custom_weights() {
    let fv = classify(FIB, &[]);
    let prefs = SelectionPreferences::with_weights(Weights::new(0.0, 0.0, 1.0, 0.0));
    let r = select(&fv, &prefs, &default_catalog()).unwrap();
    assert_eq!(r.recommended.model, "gemini-1.5-flash-8b");
    assert!(r.reasoning.starts_with("Selected gemini-1.5-flash-8b using custom weights"));
}

#[test]
fn test_select_rejects_invalid_preferences() {
    let fv = classify(FIB, &[]);
    let prefs = SelectionPreferences::with_weights(Weights::new(2.0, 0.0, 0.0, 0.0));
    assert!(matches!(select(&fv, &prefs, &default_catalog()), Err(PrError::InvalidPreferences(_))));
}

#[test]
fn test_select_rejects_invalid_scoring_config() {
    let fv = classify(FIB, &[]);
    let prefs = SelectionPreferences::default();
    let zero_cost = ScoringConfig { cost_ceiling: 0.0, ..Default::default() };
    let r = select_with(&fv, &prefs, &default_catalog(), &zero_cost);
    assert!(matches!(r, Err(PrError::InvalidConfig(_))));
    let zero_latency = ScoringConfig { latency_ceiling_ms: 0.0, ..Default::default() };
    assert!(rank(&fv, &prefs, &default_catalog(), &zero_latency).is_err());
}

#[test]
fn test_no_eligible_model() {
    let fv = classify("describe this image", &[]);
    let prefs = SelectionPreferences { preferred_providers: vec!["perplexity".into()], ..Default::default() };
    let err = select(&fv, &prefs, &default_catalog()).unwrap_err();
    assert!(matches!(err, PrError::NoEligibleModel { considered: 14, .. }));
    assert!(err.to_string().contains("vision"));
}

#[test]
fn test_ties_keep_catalog_order() {
    let c = Catalog::new("t", vec![option("a", "first"), option("b", "second"), option("c", "third")]).unwrap();
    let fv = features(ContentCategory::General, &[], 4096, 100);
    let ranked = rank(&fv, &SelectionPreferences::default(), &c, &scoring()).unwrap();
    let names: Vec<_> = ranked.iter().map(|r| r.model.model.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_rank_descending() {
    let fv = classify("Tell me about the history of tea", &[]);
    let ranked = rank(&fv, &SelectionPreferences::default(), &default_catalog(), &scoring()).unwrap();
    assert!(ranked.windows(2).all(|w| w[0].scores.total >= w[1].scores.total));
}

#[test]
fn test_estimated_cost_and_savings() {
    let fv = classify(&"Tell me about green tea and its health benefits. ".repeat(600), &[]);
    let c = default_catalog();
    let r = select(&fv, &SelectionPreferences::with_mode(OptimizationMode::Budget), &c).unwrap();
    assert_eq!(r.estimated_cost, r.recommended.estimated_cost(fv.estimated_tokens, 0.4));
    let opus = c.get("anthropic", "claude-3-opus").unwrap();
    let expected = opus.estimated_cost(fv.estimated_tokens, 0.4) - r.estimated_cost;
    assert!((r.savings - expected).abs() < 1e-12);
    assert_eq!(savings_vs_premium(opus, fv.estimated_tokens, &c, &scoring()), 0.0);
}

#[test]
fn test_recommend_matches_select() {
    let prefs = SelectionPreferences::default();
    let c = default_catalog();
    let a = recommend(FIB, &[], &prefs, &c).unwrap();
    let b = select(&classify(FIB, &[]), &prefs, &c).unwrap();
    assert_eq!(a, b);
}

// ========== Reasoning ==========

#[test]
fn test_reasoning_clauses() {
    let c = scoring();
    let mut fv = features(ContentCategory::Research, &[], 4096, 20_000);
    fv.complexity_tier = ComplexityTier::Expert;
    let m = model("perplexity/sonar-pro");
    let scores = ScoreBreakdown { quality: 0.9, cost: 0.9, speed: 0.9, capability: 1.0, total: 0.9 };
    let r = reasons(&m, &fv, &scores, Some(OptimizationMode::Balanced), &c);
    assert_eq!(
        r,
        vec![
            "Selected sonar-pro for balanced performance",
            "Optimized for research with citations",
            "Capable of handling expert-level complexity",
            "Large context window (32,000 tokens)",
            "Very cost-effective for this query",
            "Fast response time",
        ]
    );
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(16_385), "16,385");
    assert_eq!(group_thousands(200_000), "200,000");
    assert_eq!(group_thousands(2_000_000), "2,000,000");
}

#[test]
fn test_large_context_clause_grouped() {
    let c = scoring();
    let fv = features(ContentCategory::General, &[], 32000, 20_000);
    let scores = ScoreBreakdown::default();
    let r = reasons(&model("anthropic/claude-3-opus"), &fv, &scores, Some(OptimizationMode::Quality), &c);
    assert!(r.contains(&"Large context window (200,000 tokens)".to_string()));
}

#[test]
fn test_reasoning_minimal() {
    let c = scoring();
    let fv = features(ContentCategory::General, &[], 4096, 10);
    let scores = ScoreBreakdown { cost: 0.5, speed: 0.5, ..Default::default() };
    let r = reasons(&model("openai/gpt-4o"), &fv, &scores, Some(OptimizationMode::Budget), &c);
    assert_eq!(r, vec!["Selected gpt-4o for cost efficiency"]);
}
