//! Static model catalog and its shared, atomically swappable handle.

use parking_lot::RwLock;
use pr_core::{Capability, ModelOption, PrError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Validated, read-only list of model options in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    version: String,
    models: Vec<ModelOption>,
}

#[derive(Deserialize)]
struct RawCatalog {
    version: String,
    models: Vec<ModelOption>,
}

impl Catalog {
    /// Build a catalog, rejecting malformed entries up front so request-time
    /// code never sees them.
    pub fn new(version: impl Into<String>, models: Vec<ModelOption>) -> Result<Self> {
        let mut seen = HashSet::new();
        for m in &models {
            validate_model(m)?;
            if !seen.insert(m.key()) {
                return Err(PrError::DuplicateModel(m.key()));
            }
        }
        Ok(Self { version: version.into(), models })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(raw)?;
        Self::new(raw.version, raw.models)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn models(&self) -> &[ModelOption] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Exact `(provider, model)` lookup.
    pub fn get(&self, provider: &str, model: &str) -> Option<&ModelOption> {
        self.models.iter().find(|m| m.provider == provider && m.model == model)
    }

    /// Lookup by `provider/model` key.
    pub fn get_by_key(&self, key: &str) -> Option<&ModelOption> {
        let (provider, model) = key.split_once('/')?;
        self.get(provider, model)
    }
}

fn validate_model(m: &ModelOption) -> Result<()> {
    let invalid = |reason: &str| PrError::InvalidCatalog { key: m.key(), reason: reason.into() };

    if m.provider.trim().is_empty() || m.model.trim().is_empty() {
        return Err(invalid("provider and model must be non-empty"));
    }
    if m.provider.contains('/') {
        return Err(invalid("provider must not contain '/'"));
    }
    if m.context_window == 0 {
        return Err(invalid("context_window must be positive"));
    }
    if !(m.input_cost.is_finite() && m.input_cost >= 0.0)
        || !(m.output_cost.is_finite() && m.output_cost >= 0.0)
    {
        return Err(invalid("costs must be non-negative"));
    }
    if !(m.avg_latency_ms.is_finite() && m.avg_latency_ms >= 0.0) {
        return Err(invalid("avg_latency_ms must be non-negative"));
    }
    if !(0.0..=1.0).contains(&m.quality_score) {
        return Err(invalid("quality_score must be within [0, 1]"));
    }
    Ok(())
}

/// Shared handle to the current catalog snapshot.
///
/// Readers take an `Arc` snapshot and keep using it for the whole request;
/// `swap` replaces the entire table at once, so no reader ever observes a
/// partially updated catalog.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self { inner: Arc::new(RwLock::new(Arc::new(catalog))) }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.inner.read().clone()
    }

    /// Replace the whole catalog, returning the previous snapshot.
    pub fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let prev = std::mem::replace(&mut *self.inner.write(), next.clone());
        info!(from = prev.version(), to = next.version(), models = next.len(), "catalog swapped");
        prev
    }
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

struct Entry {
    provider: &'static str,
    model: &'static str,
    context_window: u32,
    input_cost: f64,
    output_cost: f64,
    avg_latency_ms: f64,
    quality_score: f64,
    capabilities: &'static [Capability],
    strengths: &'static [&'static str],
}

impl From<&Entry> for ModelOption {
    fn from(e: &Entry) -> Self {
        ModelOption {
            provider: e.provider.to_string(),
            model: e.model.to_string(),
            context_window: e.context_window,
            input_cost: e.input_cost,
            output_cost: e.output_cost,
            avg_latency_ms: e.avg_latency_ms,
            quality_score: e.quality_score,
            capabilities: e.capabilities.iter().copied().collect::<BTreeSet<_>>(),
            strengths: e.strengths.iter().map(|s| s.to_string()).collect(),
        }
    }
}

use Capability::*;

const DEFAULT_ENTRIES: &[Entry] = &[
    // OpenAI
    Entry {
        provider: "openai",
        model: "gpt-4o",
        context_window: 128_000,
        input_cost: 0.0025,
        output_cost: 0.01,
        avg_latency_ms: 2000.0,
        quality_score: 0.95,
        capabilities: &[Vision, CodeGeneration, CodeExecution, Reasoning, Math, WebBrowsing, DataAnalysis],
        strengths: &["complex_reasoning", "code", "multimodal"],
    },
    Entry {
        provider: "openai",
        model: "gpt-4o-mini",
        context_window: 128_000,
        input_cost: 0.00015,
        output_cost: 0.0006,
        avg_latency_ms: 1200.0,
        quality_score: 0.75,
        capabilities: &[Vision, CodeGeneration, CodeExecution, Reasoning, Math],
        strengths: &["cost_effective", "fast", "general_purpose"],
    },
    Entry {
        provider: "openai",
        model: "gpt-4-turbo",
        context_window: 128_000,
        input_cost: 0.01,
        output_cost: 0.03,
        avg_latency_ms: 2500.0,
        quality_score: 0.93,
        capabilities: &[Vision, CodeGeneration, CodeExecution, Reasoning, Math, DataAnalysis],
        strengths: &["complex_reasoning", "detailed_analysis"],
    },
    Entry {
        provider: "openai",
        model: "gpt-3.5-turbo",
        context_window: 16_385,
        input_cost: 0.0005,
        output_cost: 0.0015,
        avg_latency_ms: 800.0,
        quality_score: 0.7,
        capabilities: &[CodeGeneration, Reasoning],
        strengths: &["fast", "cost_effective"],
    },
    // Anthropic
    Entry {
        provider: "anthropic",
        model: "claude-3.5-sonnet",
        context_window: 200_000,
        input_cost: 0.003,
        output_cost: 0.015,
        avg_latency_ms: 2200.0,
        quality_score: 0.96,
        capabilities: &[Vision, CodeGeneration, Reasoning, Math, DataAnalysis, CreativeWriting],
        strengths: &["code", "analysis", "large_context", "safety"],
    },
    Entry {
        provider: "anthropic",
        model: "claude-3.5-haiku",
        context_window: 200_000,
        input_cost: 0.0008,
        output_cost: 0.004,
        avg_latency_ms: 1000.0,
        quality_score: 0.78,
        capabilities: &[CodeGeneration, Reasoning],
        strengths: &["fast", "large_context", "cost_effective"],
    },
    Entry {
        provider: "anthropic",
        model: "claude-3-opus",
        context_window: 200_000,
        input_cost: 0.015,
        output_cost: 0.075,
        avg_latency_ms: 3000.0,
        quality_score: 0.94,
        capabilities: &[Vision, CodeGeneration, Reasoning, Math, DataAnalysis, CreativeWriting],
        strengths: &["complex_reasoning", "research", "large_context", "creative_writing"],
    },
    // Google
    Entry {
        provider: "google",
        model: "gemini-1.5-pro",
        context_window: 2_000_000,
        input_cost: 0.00125,
        output_cost: 0.005,
        avg_latency_ms: 1800.0,
        quality_score: 0.88,
        capabilities: &[Vision, CodeGeneration, CodeExecution, Reasoning, Math, DataAnalysis],
        strengths: &["massive_context", "multimodal", "cost_effective", "large_context"],
    },
    Entry {
        provider: "google",
        model: "gemini-1.5-flash",
        context_window: 1_000_000,
        input_cost: 0.000075,
        output_cost: 0.0003,
        avg_latency_ms: 600.0,
        quality_score: 0.72,
        capabilities: &[Vision, CodeGeneration, CodeExecution, Reasoning],
        strengths: &["very_fast", "very_cheap", "large_context"],
    },
    Entry {
        provider: "google",
        model: "gemini-1.5-flash-8b",
        context_window: 1_000_000,
        input_cost: 0.0000375,
        output_cost: 0.00015,
        avg_latency_ms: 400.0,
        quality_score: 0.65,
        capabilities: &[CodeGeneration, Reasoning],
        strengths: &["ultra_fast", "ultra_cheap", "large_context"],
    },
    // Perplexity
    Entry {
        provider: "perplexity",
        model: "sonar-pro",
        context_window: 32_000,
        input_cost: 0.001,
        output_cost: 0.001,
        avg_latency_ms: 3000.0,
        quality_score: 0.85,
        capabilities: &[WebBrowsing, Reasoning, Research, RealTimeData],
        strengths: &["real_time_data", "citations", "research"],
    },
    Entry {
        provider: "perplexity",
        model: "sonar",
        context_window: 32_000,
        input_cost: 0.0005,
        output_cost: 0.0005,
        avg_latency_ms: 2000.0,
        quality_score: 0.75,
        capabilities: &[WebBrowsing, Reasoning, RealTimeData],
        strengths: &["real_time_data", "cost_effective"],
    },
    // xAI
    Entry {
        provider: "xai",
        model: "grok-2",
        context_window: 32_000,
        input_cost: 0.002,
        output_cost: 0.01,
        avg_latency_ms: 2000.0,
        quality_score: 0.89,
        capabilities: &[CodeGeneration, Reasoning, Math, RealTimeData],
        strengths: &["uncensored", "real_time", "humor"],
    },
    Entry {
        provider: "xai",
        model: "grok-2-mini",
        context_window: 32_000,
        input_cost: 0.0002,
        output_cost: 0.001,
        avg_latency_ms: 1000.0,
        quality_score: 0.73,
        capabilities: &[CodeGeneration, Reasoning],
        strengths: &["fast", "cost_effective", "uncensored"],
    },
];

pub const DEFAULT_CATALOG_VERSION: &str = "2024.11";

/// The built-in catalog.
pub fn default_catalog() -> Catalog {
    Catalog {
        version: DEFAULT_CATALOG_VERSION.to_string(),
        models: DEFAULT_ENTRIES.iter().map(ModelOption::from).collect(),
    }
}
