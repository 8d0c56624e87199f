//! Lexical signals over raw prompt text.

use pr_core::{CodeLanguage, FileMeta};
use std::collections::BTreeSet;

use crate::tables::{CODE_PATTERNS, FUNCTION_WORDS, SCRIPT_RANGES, TECH_KEYWORDS};

/// Everything the classifier needs from the text, computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalSignals {
    pub lowercase: String,
    pub code_languages: BTreeSet<CodeLanguage>,
    pub tech_stack: Vec<String>,
    pub word_count: usize,
    pub char_count: usize,
    pub language: String,
    pub has_images: bool,
    pub has_files: bool,
}

impl LexicalSignals {
    pub fn has_code(&self) -> bool {
        !self.code_languages.is_empty()
    }
}

/// Extract lexical signals from `prompt` and attachment metadata.
pub fn extract(prompt: &str, files: &[FileMeta], language_threshold: usize) -> LexicalSignals {
    let lowercase = prompt.to_lowercase();
    LexicalSignals {
        code_languages: detect_code(prompt),
        tech_stack: detect_tech_stack(&lowercase),
        word_count: prompt.split_whitespace().count(),
        char_count: prompt.chars().count(),
        language: detect_language(prompt, language_threshold),
        has_images: files.iter().any(FileMeta::is_image),
        has_files: !files.is_empty(),
        lowercase,
    }
}

pub fn detect_code(prompt: &str) -> BTreeSet<CodeLanguage> {
    CODE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(prompt))
        .map(|(lang, _)| *lang)
        .collect()
}

/// Technologies mentioned in `lowercase`, in table order.
pub fn detect_tech_stack(lowercase: &str) -> Vec<String> {
    TECH_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lowercase.contains(kw)))
        .map(|(tech, _)| tech.to_string())
        .collect()
}

/// Coarse language-family guess. The family with the most hits wins when it
/// has more than `threshold` of them; otherwise `"en"`.
pub fn detect_language(text: &str, threshold: usize) -> String {
    let mut best: Option<(&str, usize)> = None;
    let mut consider = |lang: &'static str, hits: usize| {
        if hits > threshold && best.map_or(true, |(_, n)| hits > n) {
            best = Some((lang, hits));
        }
    };

    for (lang, ranges) in SCRIPT_RANGES {
        let hits = text
            .chars()
            .filter(|c| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(c)))
            .count();
        consider(*lang, hits);
    }

    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    for (lang, function_words) in FUNCTION_WORDS {
        let hits = words.iter().filter(|w| function_words.contains(&w.as_str())).count();
        consider(*lang, hits);
    }

    best.map(|(lang, _)| lang).unwrap_or("en").to_string()
}
