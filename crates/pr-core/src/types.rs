use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{PrError, Result};

/// Complexity tier, ordered from cheapest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Simple = 0,
    Moderate = 1,
    Complex = 2,
    Expert = 3,
}

/// Mutually exclusive prompt intent. Declaration order breaks scoring ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Code,
    Creative,
    Analysis,
    Research,
    Translation,
    Summarization,
    Conversation,
    General,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 8] = [
        Self::Code,
        Self::Creative,
        Self::Analysis,
        Self::Research,
        Self::Translation,
        Self::Summarization,
        Self::Conversation,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Creative => "creative",
            Self::Analysis => "analysis",
            Self::Research => "research",
            Self::Translation => "translation",
            Self::Summarization => "summarization",
            Self::Conversation => "conversation",
            Self::General => "general",
        }
    }
}

/// Free-standing domain label, derived independently of the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Coding,
    Writing,
    Analysis,
    Research,
    Creative,
    Translation,
    Summarization,
    Conversation,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coding => "coding",
            Self::Writing => "writing",
            Self::Analysis => "analysis",
            Self::Research => "research",
            Self::Creative => "creative",
            Self::Translation => "translation",
            Self::Summarization => "summarization",
            Self::Conversation => "conversation",
        }
    }
}

/// Request-level feature inferred from the prompt text or attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Vision,
    WebSearch,
    CodeExecution,
    Reasoning,
    Math,
}

/// Capability tag shared by the classifier and the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Vision,
    CodeGeneration,
    CodeExecution,
    Reasoning,
    Math,
    WebBrowsing,
    DataAnalysis,
    CreativeWriting,
    Research,
    RealTimeData,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::CodeGeneration => "code_generation",
            Self::CodeExecution => "code_execution",
            Self::Reasoning => "reasoning",
            Self::Math => "math",
            Self::WebBrowsing => "web_browsing",
            Self::DataAnalysis => "data_analysis",
            Self::CreativeWriting => "creative_writing",
            Self::Research => "research",
            Self::RealTimeData => "real_time_data",
        }
    }
}

/// Code or markup syntax family detected in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeLanguage {
    JavaScript,
    Python,
    Java,
    Cpp,
    Rust,
    Sql,
    Html,
    Css,
    Json,
    Markdown,
}

/// Metadata of a file attached to a prompt. Contents are never inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self { name: name.into(), mime_type: Some(mime_type.into()), size_bytes: None }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.as_deref().is_some_and(|m| m.starts_with("image/"))
    }
}

/// Structured output of the prompt classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub complexity_tier: ComplexityTier,
    pub content_category: ContentCategory,
    pub domain: Option<Domain>,
    pub has_code: bool,
    pub has_images: bool,
    pub has_files: bool,
    pub code_languages: BTreeSet<CodeLanguage>,
    pub tech_stack: Vec<String>,
    pub required_features: BTreeSet<Feature>,
    pub required_capabilities: BTreeSet<Capability>,
    pub min_context_window: u32,
    pub estimated_tokens: u32,
    pub word_count: usize,
    pub char_count: usize,
    pub language: String,
    pub accuracy_needed: f64,
    pub creativity_needed: f64,
    pub speed_priority: f64,
    pub budget_sensitivity: f64,
    pub quality_threshold: f64,
}

/// Catalog entry. Read-only once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOption {
    pub provider: String,
    pub model: String,
    pub context_window: u32,
    /// Currency per 1,000 input tokens.
    pub input_cost: f64,
    /// Currency per 1,000 output tokens.
    pub output_cost: f64,
    pub avg_latency_ms: f64,
    pub quality_score: f64,
    pub capabilities: BTreeSet<Capability>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

impl ModelOption {
    /// `provider/model`, the key used by blacklists and lookups.
    pub fn key(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }

    pub fn has_strength(&self, strength: &str) -> bool {
        self.strengths.iter().any(|s| s == strength)
    }

    /// Estimated cost of a request of `tokens` total tokens, with `input_share`
    /// of them billed as input and the rest as output.
    pub fn estimated_cost(&self, tokens: u32, input_share: f64) -> f64 {
        let tokens = tokens as f64;
        let input_tokens = tokens * input_share;
        let output_tokens = tokens * (1.0 - input_share);
        (input_tokens / 1000.0) * self.input_cost + (output_tokens / 1000.0) * self.output_cost
    }

    /// Cost of a completed call from its real token counts.
    pub fn actual_cost(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        (prompt_tokens as f64 / 1000.0) * self.input_cost
            + (completion_tokens as f64 / 1000.0) * self.output_cost
    }
}

/// Named weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    Quality,
    Budget,
    Speed,
    Balanced,
}

/// Scoring weights in (quality, cost, speed, capability) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub quality: f64,
    pub cost: f64,
    pub speed: f64,
    pub capability: f64,
}

impl Weights {
    pub const fn new(quality: f64, cost: f64, speed: f64, capability: f64) -> Self {
        Self { quality, cost, speed, capability }
    }

    pub fn for_mode(mode: OptimizationMode) -> Self {
        match mode {
            OptimizationMode::Quality => Self::new(0.7, 0.1, 0.1, 0.1),
            OptimizationMode::Budget => Self::new(0.2, 0.6, 0.1, 0.1),
            OptimizationMode::Speed => Self::new(0.2, 0.2, 0.5, 0.1),
            OptimizationMode::Balanced => Self::new(0.4, 0.3, 0.2, 0.1),
        }
    }

    fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("quality_weight", self.quality),
            ("cost_weight", self.cost),
            ("speed_weight", self.speed),
            ("capability_weight", self.capability),
        ]
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::for_mode(OptimizationMode::Balanced)
    }
}

/// Caller-supplied selection preferences. Missing fields take the
/// [`Default`] values, so an empty document means balanced mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPreferences {
    /// When set, overrides `weights` with the mode's fixed profile; `null`
    /// selects the supplied weights.
    pub mode: Option<OptimizationMode>,
    pub weights: Weights,
    pub max_cost_per_message: Option<f64>,
    /// Provider allow-list; empty means any provider.
    pub preferred_providers: Vec<String>,
    /// Deny-list of `provider/model` keys.
    pub blacklisted_models: Vec<String>,
}

impl Default for SelectionPreferences {
    fn default() -> Self {
        Self {
            mode: Some(OptimizationMode::Balanced),
            weights: Weights::default(),
            max_cost_per_message: None,
            preferred_providers: Vec::new(),
            blacklisted_models: Vec::new(),
        }
    }
}

impl SelectionPreferences {
    pub fn with_mode(mode: OptimizationMode) -> Self {
        Self { mode: Some(mode), ..Self::default() }
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self { mode: None, weights, ..Self::default() }
    }

    /// Reject out-of-range values before any scoring happens.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.weights.as_array() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PrError::InvalidPreferences(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if let Some(max) = self.max_cost_per_message {
            if !max.is_finite() || max < 0.0 {
                return Err(PrError::InvalidPreferences(format!(
                    "max_cost_per_message must be a non-negative amount, got {max}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-axis scores of one candidate plus the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub quality: f64,
    pub cost: f64,
    pub speed: f64,
    pub capability: f64,
    pub total: f64,
}

/// A catalog entry that survived filtering, with its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub model: ModelOption,
    pub scores: ScoreBreakdown,
    pub estimated_cost: f64,
}

/// Ranked recommendation for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub recommended: ModelOption,
    pub alternatives: Vec<ModelOption>,
    pub estimated_cost: f64,
    /// Saving against the most expensive eligible model for the same request.
    pub savings: f64,
    pub reasons: Vec<String>,
    pub reasoning: String,
    pub scores: ScoreBreakdown,
}
