//! Keyword, pattern and coefficient tables.
//!
//! Everything the classifier matches against lives here as plain data, so the
//! tables can be tuned and tested without touching control flow.

use pr_core::{CodeLanguage, ContentCategory, Domain, Feature};
use regex::Regex;
use std::sync::LazyLock;

fn compile(patterns: &[(CodeLanguage, &str)]) -> Vec<(CodeLanguage, Regex)> {
    patterns
        .iter()
        .map(|(lang, p)| (*lang, Regex::new(p).unwrap()))
        .collect()
}

/// Syntax-shaped patterns per language; prose that merely mentions a keyword
/// should not match.
pub static CODE_PATTERNS: LazyLock<Vec<(CodeLanguage, Regex)>> = LazyLock::new(|| {
    compile(&[
        (
            CodeLanguage::JavaScript,
            r#"\b(const|let|var)\s+[A-Za-z_$][\w$]*\s*=|\bfunction\s*[\w$]*\s*\(|\([\w$,\s]*\)\s*=>|\b[\w$]+\s*=>\s*[{(]|\bexport\s+(default|const|function|class)\b|\bimport\s+.+\s+from\s+['"]"#,
        ),
        (
            CodeLanguage::Python,
            r"\bdef\s+\w+\s*\(|(?m)^\s*(from\s+[\w.]+\s+)?import\s+[\w.]+\s*$|(\w\(|=|,)\s*lambda\b[\w, *]*:|\bif\s+__name__\s*==",
        ),
        (
            CodeLanguage::Java,
            r"\b(public|private|protected)\s+(static\s+)?(final\s+)?[\w<>\[\],]+\s+\w+\s*\([^)]*\)\s*(\{|throws\b)|\bclass\s+\w+\s+(extends|implements)\b|\bstatic\s+void\b",
        ),
        (CodeLanguage::Cpp, r#"#include\s*[<"]|\bstd::|\btemplate\s*<|\bnullptr\b"#),
        (
            CodeLanguage::Rust,
            r"\bfn\s+\w+\s*[<(]|\blet\s+mut\s+\w+|\bimpl(<[^>]*>)?\s+\w+.*\{|\bpub\s+(fn|struct|enum)\b",
        ),
        (
            CodeLanguage::Sql,
            r"\bSELECT\s+[\s\S]+?\s+FROM\s+\w+|\bINSERT\s+INTO\b|\bDELETE\s+FROM\b|\bCREATE\s+TABLE\b|\bUPDATE\s+\w+\s+SET\b|(?i)\bselect\s+\*\s+from\b",
        ),
        (
            CodeLanguage::Html,
            r"(?i)<!doctype\s+html|<([a-z][\w-]*)(\s[^<>]*)?>[\s\S]*</[a-z][\w-]*\s*>|<[a-z][\w-]*(\s[^<>]*)?/>",
        ),
        (CodeLanguage::Css, r"\{\s*[a-z-]+\s*:\s*[^;{}]+;[^{}]*\}"),
        (CodeLanguage::Json, r#"^\s*(\{\s*"[^"]*"\s*:[\s\S]*\}|\[\s*[\{\[\d"][\s\S]*\])\s*$"#),
        (CodeLanguage::Markdown, r"(?m)^```|^#{1,6}\s+\S|^\[[^\]]+\]\([^)]+\)"),
    ])
});

/// Technology name -> lowercase substrings that signal it.
pub const TECH_KEYWORDS: &[(&str, &[&str])] = &[
    ("react", &["react", "jsx", "usestate", "useeffect"]),
    ("vue", &["vue", "v-model", "v-if", "v-for"]),
    ("angular", &["angular", "ngmodel", "ngif", "ngfor"]),
    ("nextjs", &["next.js", "nextjs", "getserversideprops", "getstaticprops"]),
    ("nodejs", &["node.js", "nodejs", "express", "npm", "package.json"]),
    ("django", &["django", "models.py", "views.py", "urls.py"]),
    ("flask", &["flask", "app.route", "render_template"]),
    ("docker", &["docker", "dockerfile", "docker-compose"]),
    ("kubernetes", &["kubernetes", "k8s", "kubectl", "helm chart"]),
    ("aws", &["aws", "ec2", "s3 bucket", "dynamodb", "cloudformation"]),
    ("azure", &["azure", "blob storage", "cosmos db"]),
    ("gcp", &["google cloud", "gcp", "bigquery", "firestore", "cloud run"]),
];

/// Domain indicators, in priority order: the first domain with any hit wins.
pub const DOMAIN_INDICATORS: &[(Domain, &[&str])] = &[
    (Domain::Coding, &["code", "function", "algorithm", "debug", "implement", "fix", "error", "bug"]),
    (Domain::Writing, &["write", "article", "blog", "essay", "story", "content", "copy"]),
    (Domain::Analysis, &["analyze", "evaluate", "compare", "assess", "review", "examine"]),
    (Domain::Research, &["research", "study", "investigate", "explore", "sources", "citations"]),
    (Domain::Creative, &["creative", "imagine", "story", "poem", "design", "brainstorm"]),
    (Domain::Translation, &["translate", "translation", "language", "convert to", "in spanish", "in french"]),
    (Domain::Summarization, &["summarize", "summary", "tldr", "brief", "overview", "key points"]),
    (Domain::Conversation, &["chat", "discuss", "talk", "conversation", "dialogue"]),
];

/// Category indicators with the weight of each hit. Code is decided by
/// syntax patterns alone and General is the fallback, so neither appears here.
pub const CATEGORY_INDICATORS: &[(ContentCategory, u32, &[&str])] = &[
    (ContentCategory::Creative, 3, &["creative", "imagine", "story", "poem", "design", "brainstorm"]),
    (ContentCategory::Analysis, 3, &["analyze", "evaluate", "compare", "assess", "review", "examine"]),
    (ContentCategory::Research, 3, &["research", "study", "investigate", "explore", "sources", "citations"]),
    (ContentCategory::Translation, 3, &["translate", "translation", "language", "convert to", "in spanish", "in french"]),
    (ContentCategory::Summarization, 3, &["summarize", "summary", "tldr", "brief", "overview", "key points"]),
    (ContentCategory::Conversation, 2, &["chat", "discuss", "talk", "conversation", "dialogue"]),
];

/// Lowercase cues for each feature. Math also has [`MATH_EXPRESSION`].
pub const FEATURE_CUES: &[(Feature, &[&str])] = &[
    (Feature::Vision, &["image", "picture"]),
    (Feature::WebSearch, &["search", "browse", "web"]),
    (Feature::CodeExecution, &["run", "execute", "test"]),
    (Feature::Reasoning, &["explain", "why", "how"]),
    (Feature::Math, &["calculate", "math"]),
];

pub static MATH_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*[+\-*/]\s*\d+").unwrap());

/// Prompt cues that pin a coefficient regardless of category.
pub const SPEED_CUES: &[(f64, &[&str])] = &[
    (0.8, &["quick", "fast", "briefly"]),
    (0.3, &["detailed", "comprehensive", "thorough"]),
];

pub const BUDGET_CUES: &[(f64, &[&str])] = &[
    (0.9, &["cheap", "budget", "economical"]),
    (0.2, &["best", "highest quality", "most accurate"]),
];

/// Coefficient lookup: category entries take precedence over domain entries,
/// which take precedence over the default.
#[derive(Debug)]
pub struct CoefficientTable {
    pub by_category: &'static [(ContentCategory, f64)],
    pub by_domain: &'static [(Domain, f64)],
    pub default: f64,
}

impl CoefficientTable {
    pub fn lookup(&self, category: ContentCategory, domain: Option<Domain>) -> f64 {
        if let Some((_, v)) = self.by_category.iter().find(|(c, _)| *c == category) {
            return *v;
        }
        domain
            .and_then(|d| self.by_domain.iter().find(|(x, _)| *x == d))
            .map(|(_, v)| *v)
            .unwrap_or(self.default)
    }
}

pub const ACCURACY: CoefficientTable = CoefficientTable {
    by_category: &[
        (ContentCategory::Code, 0.9),
        (ContentCategory::Analysis, 0.85),
        (ContentCategory::Research, 0.8),
        (ContentCategory::Translation, 0.75),
        (ContentCategory::Summarization, 0.7),
        (ContentCategory::Conversation, 0.6),
        (ContentCategory::Creative, 0.5),
    ],
    by_domain: &[(Domain::Coding, 0.85)],
    default: 0.7,
};

pub const CREATIVITY: CoefficientTable = CoefficientTable {
    by_category: &[
        (ContentCategory::Creative, 0.9),
        (ContentCategory::Conversation, 0.6),
        (ContentCategory::Code, 0.3),
        (ContentCategory::Analysis, 0.3),
        (ContentCategory::Research, 0.2),
        (ContentCategory::Translation, 0.2),
    ],
    by_domain: &[(Domain::Creative, 0.85), (Domain::Writing, 0.7)],
    default: 0.5,
};

pub const SPEED: CoefficientTable = CoefficientTable {
    by_category: &[
        (ContentCategory::Conversation, 0.7),
        (ContentCategory::Translation, 0.6),
        (ContentCategory::Analysis, 0.4),
        (ContentCategory::Research, 0.3),
    ],
    by_domain: &[(Domain::Conversation, 0.7)],
    default: 0.5,
};

pub const BUDGET: CoefficientTable = CoefficientTable {
    by_category: &[
        (ContentCategory::Conversation, 0.7),
        (ContentCategory::Summarization, 0.6),
        (ContentCategory::Code, 0.4),
        (ContentCategory::Research, 0.4),
    ],
    by_domain: &[],
    default: 0.5,
};

pub const QUALITY_THRESHOLD: CoefficientTable = CoefficientTable {
    by_category: &[
        (ContentCategory::Code, 0.8),
        (ContentCategory::Analysis, 0.75),
        (ContentCategory::Research, 0.75),
        (ContentCategory::Translation, 0.7),
        (ContentCategory::Summarization, 0.65),
        (ContentCategory::Conversation, 0.5),
        (ContentCategory::Creative, 0.5),
    ],
    by_domain: &[(Domain::Coding, 0.8)],
    default: 0.6,
};

/// Function words per language family, matched as whole lowercase words.
/// Words that are also common English words are left out.
pub const FUNCTION_WORDS: &[(&str, &[&str])] = &[
    ("es", &["el", "los", "las", "una", "está", "son", "como", "pero", "para", "que", "del"]),
    ("fr", &["le", "les", "une", "est", "sont", "comme", "mais", "pour", "avec", "des"]),
    ("de", &["der", "das", "ein", "eine", "ist", "sind", "wie", "aber", "für", "mit", "und"]),
    ("it", &["il", "gli", "una", "è", "sono", "come", "ma", "per", "con", "che"]),
    ("pt", &["os", "um", "uma", "é", "são", "como", "mas", "para", "com", "não"]),
];

/// Script ranges per language family. Japanese is counted by kana only, so
/// kanji-heavy Japanese can read as Chinese.
pub const SCRIPT_RANGES: &[(&str, &[(char, char)])] = &[
    ("ja", &[('\u{3040}', '\u{309f}'), ('\u{30a0}', '\u{30ff}')]),
    ("ko", &[('\u{ac00}', '\u{d7af}')]),
    ("zh", &[('\u{4e00}', '\u{9fa5}')]),
    ("ar", &[('\u{0600}', '\u{06ff}')]),
    ("ru", &[('\u{0400}', '\u{04ff}')]),
];
