//! Prompt analyzer: lexical feature extraction and table-driven classification.

pub mod classifier;
pub mod extract;
pub mod tables;

pub use classifier::{classify, classify_with};
pub use extract::{extract, LexicalSignals};
