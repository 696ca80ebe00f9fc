//! Documentation scoring and selection.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::keywords::KeywordSet;
use crate::config::ScoringConfig;
use crate::error::Error;

/// A documentation file that cleared the relevance threshold.
#[derive(Debug, Clone)]
pub struct ScoredDoc {
    pub path: PathBuf,
    pub score: f64,
    /// Original text, kept for the advisory preview.
    pub content: String,
}

/// Check a path against the allowed extensions (case-insensitive, no dot).
fn has_doc_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Score one document against the keyword set.
///
/// `rel_path` and `content` must already be lowercased.
pub fn score_document(
    rel_path: &str,
    content: &str,
    keywords: &KeywordSet,
    scoring: &ScoringConfig,
) -> f64 {
    let mut score = 0.0;
    for keyword in keywords {
        if rel_path.contains(keyword.as_str()) {
            score += scoring.path_bonus;
        }
        let occurrences = content.matches(keyword.as_str()).count();
        score += occurrences.min(scoring.occurrence_cap) as f64 * scoring.occurrence_weight;
    }
    score
}

/// Walk `root` and return the documents most relevant to `keywords`, best
/// first, at most `scoring.max_files` of them.
///
/// A missing root or an empty keyword set yields no documents. Oversized and
/// unreadable files are skipped; only a root that cannot be listed is an error.
pub fn find_relevant_docs(
    root: &Path,
    keywords: &KeywordSet,
    extensions: &[String],
    scoring: &ScoringConfig,
) -> Result<Vec<ScoredDoc>, Error> {
    if keywords.is_empty() || !root.is_dir() {
        return Ok(vec![]);
    }

    let mut scored = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable documentation entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_doc_extension(entry.path(), extensions) {
            continue;
        }

        let path = entry.path();
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping document without metadata");
                continue;
            }
        };
        if size > scoring.max_file_size {
            debug!(path = %path.display(), size, "Skipping oversized document");
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                continue;
            }
        };

        let rel_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_lowercase();
        let score = score_document(&rel_path, &content.to_lowercase(), keywords, scoring);

        if score > scoring.threshold {
            debug!(path = %path.display(), score, "Document qualifies");
            scored.push(ScoredDoc {
                path: path.to_path_buf(),
                score,
                content,
            });
        }
    }

    // Stable sort keeps walk order for equal scores.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(scoring.max_files);

    Ok(scored)
}
