//! Shared data model for prompt classification and model selection.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AnalyzerConfig, RouterConfig, ScoringConfig, DEFAULT_CONFIG};
pub use error::{PrError, Result};
pub use types::*;
