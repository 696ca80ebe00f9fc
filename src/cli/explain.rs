//! Dry run of the matcher for one file.

use std::path::Path;

use super::Settings;
use crate::error::Error;
use crate::matcher::{Matcher, Operation};

/// Print keywords and ranked documents for `path` without touching the cache.
pub fn run(settings: &Settings, path: &Path) -> Result<(), Error> {
    let (config, work_root) = settings.load()?;
    let content = if path.is_file() {
        Some(std::fs::read_to_string(path)?)
    } else {
        None
    };

    let operation = Operation {
        file_path: Some(path.to_string_lossy().to_string()),
        content,
        ..Operation::default()
    };

    let matcher = Matcher::with_marker_store(config, work_root.clone())?;
    let explanation = matcher.explain(&operation)?;

    println!("Fingerprint: {}", explanation.fingerprint);
    println!("Docs root:   {}", matcher.docs_root().display());
    println!();

    if explanation.keywords.is_empty() {
        println!("No keywords extracted.");
        return Ok(());
    }

    let keywords: Vec<&str> = explanation.keywords.iter().map(String::as_str).collect();
    println!("Keywords ({}): {}", keywords.len(), keywords.join(", "));
    println!();

    if explanation.docs.is_empty() {
        println!("No documentation above the relevance threshold.");
        return Ok(());
    }

    println!("Matching docs:");
    for doc in &explanation.docs {
        let shown = doc.path.strip_prefix(&work_root).unwrap_or(&doc.path);
        println!("  {:>6.1}  {}", doc.score, shown.display());
    }

    Ok(())
}
