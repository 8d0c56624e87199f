//! Tunable constants for classification and scoring.
//!
//! The defaults are empirical: the token ratio, cost ceiling and latency
//! ceiling have no calibration source beyond observed traffic, so they live
//! here rather than in the algorithms.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{PrError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub chars_per_token: f64,
    pub context_safety_multiplier: u32,
    pub per_file_context_allowance: u32,
    pub base_context_window: u32,
    /// Ascending standard window sizes; the last rung is the cap.
    pub context_ladder: Vec<u32>,
    /// A language family needs strictly more hits than this to be chosen.
    pub language_match_threshold: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            chars_per_token: 3.5,
            context_safety_multiplier: 3,
            per_file_context_allowance: 1000,
            base_context_window: 4096,
            context_ladder: vec![4096, 8192, 16000, 32000, 128000, 200000],
            language_match_threshold: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Cost of a "normal" message; at or above it the cost score is 0.
    pub cost_ceiling: f64,
    /// Latency at or above which the speed score is 0.
    pub latency_ceiling_ms: f64,
    /// Share of estimated tokens billed at the input price.
    pub input_token_share: f64,
    pub large_context_tokens: u32,
    pub alternatives: usize,
    pub code_strength_bonus: f64,
    pub creative_strength_bonus: f64,
    pub research_strength_bonus: f64,
    pub context_headroom_bonus: f64,
    pub large_context_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cost_ceiling: 0.10,
            latency_ceiling_ms: 5000.0,
            input_token_share: 0.4,
            large_context_tokens: 10_000,
            alternatives: 3,
            code_strength_bonus: 1.10,
            creative_strength_bonus: 1.10,
            research_strength_bonus: 1.15,
            context_headroom_bonus: 0.10,
            large_context_bonus: 0.10,
        }
    }
}

impl ScoringConfig {
    /// Zero or non-finite ceilings would turn every score into NaN or infinity.
    pub fn validate(&self) -> Result<()> {
        if !(self.cost_ceiling.is_finite() && self.cost_ceiling > 0.0) {
            return Err(PrError::InvalidConfig("cost_ceiling must be positive".into()));
        }
        if !(self.latency_ceiling_ms.is_finite() && self.latency_ceiling_ms > 0.0) {
            return Err(PrError::InvalidConfig("latency_ceiling_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.input_token_share) {
            return Err(PrError::InvalidConfig("input_token_share must be within [0, 1]".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub analyzer: AnalyzerConfig,
    pub scoring: ScoringConfig,
}

impl RouterConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.analyzer;
        if !(a.chars_per_token.is_finite() && a.chars_per_token > 0.0) {
            return Err(PrError::InvalidConfig("chars_per_token must be positive".into()));
        }
        if a.context_ladder.is_empty() {
            return Err(PrError::InvalidConfig("context_ladder must not be empty".into()));
        }
        if a.context_ladder.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PrError::InvalidConfig("context_ladder must be strictly ascending".into()));
        }
        self.scoring.validate()
    }
}

/// The default config instance.
pub static DEFAULT_CONFIG: LazyLock<RouterConfig> = LazyLock::new(RouterConfig::default);
