//! Keyword extraction from pending writes.
//!
//! Pulls module names, namespaced identifiers, definition names and
//! API-style identifiers out of the path and text of an operation.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::operation::Operation;

/// Lowercase, deduplicated, ordered keywords.
pub type KeywordSet = BTreeSet<String>;

const MAX_NAMESPACED_MATCHES: usize = 20;
const MAX_DEFINITION_MATCHES: usize = 10;
const MAX_API_NAME_MATCHES: usize = 10;

/// Keywords must be longer than this.
const MIN_KEYWORD_LEN: usize = 2;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "with", "from", "import", "export", "default", "self", "this",
        "async", "await", "def", "class", "function", "return", "const", "let", "var", "new",
        "true", "false", "none", "null", "pass", "use", "pub", "mod", "crate", "super", "struct",
        "impl", "type", "interface", "enum", "trait", "include", "require", "print", "println",
        "string", "int", "str", "else", "elif", "while", "not", "try", "except", "catch",
        "finally", "public", "private", "static", "void", "package", "module", "yield",
    ]
    .into_iter()
    .collect()
});

// Import-like statements; group 1 is the module or symbol.
static IMPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bfrom\s+([\w.]+)\s+import\b").unwrap(),
        Regex::new(r"(?i)\bimport\s+([\w.]+)").unwrap(),
        Regex::new(r#"(?i)\brequire\s*\(\s*['"]([^'"]+)['"]"#).unwrap(),
        Regex::new(r#"(?i)\bfrom\s+['"]([^'"]+)['"]"#).unwrap(),
        Regex::new(r"(?i)\buse\s+([\w:]+)").unwrap(),
        Regex::new(r"(?i)\busing\s+([\w.]+)").unwrap(),
        Regex::new(r#"(?i)#\s*include\s*[<"]([^>"]+)[>"]"#).unwrap(),
    ]
});

static NAMESPACED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_][\w-]*(?:(?:[./]|::?)[A-Za-z_][\w-]*)+").unwrap()
});

static DEFINITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:class|def|function|func|fn|type|struct|interface|enum|trait)\s+([A-Za-z_]\w*)")
        .unwrap()
});

// Group 1 is the name in front of the suffix: `OpenAIClient` gives `OpenAI`.
static API_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Za-z_]\w*)(?:client|api|service|agent|model)").unwrap()
});

/// Split on package separators, keeping parts longer than two chars.
///
/// Hyphenated names such as `polaris-icons` stay whole.
fn components(token: &str) -> impl Iterator<Item = String> + '_ {
    token
        .split(['.', '/', ':', '@'])
        .filter(|part| part.len() > MIN_KEYWORD_LEN)
        .map(str::to_lowercase)
}

fn path_keywords(path: &str, out: &mut Vec<String>) {
    let Some(stem) = Path::new(path).file_stem() else {
        return;
    };
    let stem = stem.to_string_lossy().to_lowercase();
    out.extend(
        stem.split(['-', '.', '_'])
            .filter(|part| part.len() > MIN_KEYWORD_LEN)
            .map(str::to_string),
    );
}

fn import_keywords(text: &str, out: &mut Vec<String>) {
    for pattern in IMPORT_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let module = &caps[1];
            out.push(module.to_lowercase());
            out.extend(components(module));
        }
    }
}

fn content_keywords(content: &str, out: &mut Vec<String>) {
    for m in NAMESPACED_PATTERN
        .find_iter(content)
        .take(MAX_NAMESPACED_MATCHES)
    {
        out.extend(components(m.as_str()));
    }

    for caps in DEFINITION_PATTERN
        .captures_iter(content)
        .take(MAX_DEFINITION_MATCHES)
    {
        out.push(caps[1].to_lowercase());
    }

    for caps in API_NAME_PATTERN
        .captures_iter(content)
        .take(MAX_API_NAME_MATCHES)
    {
        out.push(caps[1].trim_end_matches('_').to_lowercase());
    }
}

/// Extract the keyword set for an operation.
///
/// Returns an empty set when the operation has neither a path nor any text,
/// which callers treat as nothing to do.
pub fn extract_keywords(operation: &Operation) -> KeywordSet {
    let content = operation.effective_content();
    let old_string = operation.effective_old_string();

    let mut candidates = Vec::new();
    path_keywords(operation.path(), &mut candidates);
    import_keywords(&content, &mut candidates);
    import_keywords(&old_string, &mut candidates);
    content_keywords(&content, &mut candidates);

    candidates
        .into_iter()
        .map(|k| k.to_lowercase())
        .filter(|k| k.len() > MIN_KEYWORD_LEN && !STOP_WORDS.contains(k.as_str()))
        .collect()
}
