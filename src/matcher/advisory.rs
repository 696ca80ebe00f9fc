//! Advisory text shown to the agent when an edit is intercepted.

use std::path::Path;

use super::keywords::KeywordSet;
use super::scorer::ScoredDoc;
use crate::config::AdvisoryConfig;

const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Truncate to `max_chars` characters, appending a marker if anything was cut.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &text[..idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Path relative to `work_root`, or as-is when outside it.
fn display_path(path: &Path, work_root: &Path) -> String {
    path.strip_prefix(work_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Format the advisory for the selected documents.
///
/// Returns an empty string when there is nothing to show.
pub fn format_advisory(
    docs: &[ScoredDoc],
    keywords: &KeywordSet,
    work_root: &Path,
    settings: &AdvisoryConfig,
) -> String {
    if docs.is_empty() {
        return String::new();
    }

    let shown: Vec<&str> = keywords
        .iter()
        .take(settings.header_keywords)
        .map(String::as_str)
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "Relevant documentation found for: {}\n",
        shown.join(", ")
    ));
    output.push_str("Review it before writing this change.\n");

    for doc in docs {
        output.push_str(&format!(
            "\n--- {} ---\n",
            display_path(&doc.path, work_root)
        ));
        output.push_str(&preview(&doc.content, settings.preview_chars));
        output.push('\n');
    }

    output.push_str(
        "\nThis reminder is shown only once for this change. Retry the operation to continue.",
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(path: &str, content: &str) -> ScoredDoc {
        ScoredDoc {
            path: PathBuf::from(path),
            score: 1.0,
            content: content.to_string(),
        }
    }

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_docs_give_empty_advisory() {
        let text = format_advisory(
            &[],
            &keywords(&["openai"]),
            Path::new("/work"),
            &AdvisoryConfig::default(),
        );
        assert!(text.is_empty());
    }

    #[test]
    fn test_header_lists_sorted_keywords_capped() {
        let words = [
            "zeta", "alpha", "kappa", "beta", "delta", "gamma", "omega", "sigma", "theta", "lambda",
        ];
        let text = format_advisory(
            &[doc("/work/research/a.md", "body")],
            &keywords(&words),
            Path::new("/work"),
            &AdvisoryConfig::default(),
        );
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Relevant documentation found for: alpha, beta, delta, gamma, kappa, lambda, omega, sigma"
        );
        assert!(!header.contains("zeta"));
    }

    #[test]
    fn test_paths_relative_to_work_root() {
        let text = format_advisory(
            &[doc("/work/research/openai-setup.md", "x"), doc("/elsewhere/b.md", "y")],
            &keywords(&["openai"]),
            Path::new("/work"),
            &AdvisoryConfig::default(),
        );
        assert!(text.contains("--- research/openai-setup.md ---"));
        assert!(text.contains("--- /elsewhere/b.md ---"));
        assert!(text.ends_with("Retry the operation to continue."));
    }

    #[test]
    fn test_preview_truncation() {
        let long = "a".repeat(2000);
        let text = format_advisory(
            &[doc("/work/long.md", &long)],
            &keywords(&["abc"]),
            Path::new("/work"),
            &AdvisoryConfig::default(),
        );
        assert!(text.contains(&format!("{}{}", "a".repeat(1500), TRUNCATION_MARKER)));
        assert!(!text.contains(&"a".repeat(1501)));

        assert_eq!(preview("short", 1500), "short");
        assert_eq!(preview(&"b".repeat(1500), 1500), "b".repeat(1500));
    }
}
