//! Doc relevance matcher.
//!
//! Decides whether a pending write should be held once so the agent can read
//! the local documentation that matches what it is about to write.

pub mod advisory;
pub mod keywords;
pub mod operation;
pub mod scorer;

pub use advisory::format_advisory;
pub use keywords::{extract_keywords, KeywordSet};
pub use operation::{fingerprint, EditChunk, Fingerprint, HookRequest, Operation};
pub use scorer::{find_relevant_docs, ScoredDoc};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::storage::{MarkerStore, SeenStore};

/// Result of evaluating one hook request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Let the operation run unmodified.
    Proceed,
    /// Hold the operation and show this advisory first.
    Intercept(String),
}

impl Outcome {
    pub fn is_intercept(&self) -> bool {
        matches!(self, Outcome::Intercept(_))
    }
}

/// Keywords and candidate documents for an operation, without side effects.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub fingerprint: Fingerprint,
    pub keywords: KeywordSet,
    pub docs: Vec<ScoredDoc>,
}

pub struct Matcher {
    config: Config,
    work_root: PathBuf,
    docs_root: PathBuf,
    store: Box<dyn SeenStore>,
}

impl Matcher {
    pub fn new(config: Config, work_root: PathBuf, store: Box<dyn SeenStore>) -> Self {
        let docs_root = config.docs.resolved_root(&work_root);
        Self {
            config,
            work_root,
            docs_root,
            store,
        }
    }

    /// Matcher backed by the on-disk marker cache from `config`.
    pub fn with_marker_store(config: Config, work_root: PathBuf) -> Result<Self, Error> {
        let store = MarkerStore::new(config.cache.dir(), config.cache.ttl()?);
        Ok(Self::new(config, work_root, Box::new(store)))
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Whether `tool_name` is on the allow-list.
    pub fn handles(&self, tool_name: &str) -> bool {
        self.config.hook.tools.iter().any(|t| t == tool_name)
    }

    /// Keywords and ranked documents for `operation`. Reads no cache state.
    pub fn explain(&self, operation: &Operation) -> Result<Explanation, Error> {
        let keywords = extract_keywords(operation);
        let docs = find_relevant_docs(
            &self.docs_root,
            &keywords,
            &self.config.docs.extensions,
            &self.config.scoring,
        )?;
        Ok(Explanation {
            fingerprint: fingerprint(operation),
            keywords,
            docs,
        })
    }

    /// Decide whether to intercept `request`.
    ///
    /// The fingerprint is marked as shown before the advisory is returned, so
    /// a failure while emitting still counts as shown.
    pub fn evaluate(&self, request: &HookRequest) -> Result<Outcome, Error> {
        if !self.handles(&request.tool_name) {
            debug!(tool = %request.tool_name, "Tool not watched");
            return Ok(Outcome::Proceed);
        }

        let operation = &request.tool_input;
        let fp = fingerprint(operation);
        if self.store.has_been_shown(&fp)? {
            debug!(fingerprint = %fp, "Advisory already shown");
            return Ok(Outcome::Proceed);
        }

        let keywords = extract_keywords(operation);
        if keywords.is_empty() {
            debug!("No keywords extracted");
            return Ok(Outcome::Proceed);
        }

        let docs = find_relevant_docs(
            &self.docs_root,
            &keywords,
            &self.config.docs.extensions,
            &self.config.scoring,
        )?;
        if docs.is_empty() {
            debug!(keywords = keywords.len(), "No relevant documentation");
            return Ok(Outcome::Proceed);
        }

        self.store.mark_shown(&fp)?;
        info!(
            fingerprint = %fp,
            file = operation.path(),
            docs = docs.len(),
            "Intercepting with documentation advisory"
        );

        let text = format_advisory(&docs, &keywords, &self.work_root, &self.config.advisory);
        Ok(Outcome::Intercept(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ManualClock, MemoryStore};
    use chrono::Duration;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        work: TempDir,
        cache: TempDir,
        clock: Arc<ManualClock>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                work: TempDir::new().unwrap(),
                cache: TempDir::new().unwrap(),
                clock: Arc::new(ManualClock::default()),
            }
        }

        fn write_doc(&self, name: &str, content: &str) {
            let research = self.work.path().join("research");
            std::fs::create_dir_all(&research).unwrap();
            std::fs::write(research.join(name), content).unwrap();
        }

        fn cache_dir(&self) -> PathBuf {
            self.cache.path().join("markers")
        }

        fn matcher(&self) -> Matcher {
            let config = Config::default();
            let store = MarkerStore::new(self.cache_dir(), config.cache.ttl().unwrap())
                .with_clock(self.clock.clone());
            Matcher::new(config, self.work.path().to_path_buf(), Box::new(store))
        }

        fn marker_count(&self) -> usize {
            std::fs::read_dir(self.cache_dir())
                .map(|entries| entries.count())
                .unwrap_or(0)
        }
    }

    fn openai_request(tool: &str) -> HookRequest {
        HookRequest {
            tool_name: tool.to_string(),
            tool_input: Operation {
                file_path: Some("openai_client.py".to_string()),
                content: Some("from openai import OpenAI\nclass ChatAgent:\n  pass".to_string()),
                ..Operation::default()
            },
        }
    }

    fn openai_doc() -> &'static str {
        "# OpenAI setup\n\nInstall openai, then configure the openai key.\nSee ChatAgent for usage."
    }

    #[test]
    fn test_first_write_is_intercepted() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());
        let request = openai_request("Write");

        let outcome = fx.matcher().evaluate(&request).unwrap();
        let Outcome::Intercept(text) = outcome else {
            panic!("expected intercept");
        };
        assert!(text.contains("research/openai-setup.md"));
        assert!(text.contains("openai"));

        let marker = fx.cache_dir().join(fingerprint(&request.tool_input).as_str());
        assert!(marker.exists());
    }

    #[test]
    fn test_repeat_within_ttl_proceeds() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());
        let matcher = fx.matcher();
        let request = openai_request("Write");

        assert!(matcher.evaluate(&request).unwrap().is_intercept());
        fx.clock.advance(Duration::minutes(10));
        assert_eq!(matcher.evaluate(&request).unwrap(), Outcome::Proceed);
    }

    #[test]
    fn test_repeat_after_ttl_intercepts_again() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());
        let matcher = fx.matcher();
        let request = openai_request("Edit");

        assert!(matcher.evaluate(&request).unwrap().is_intercept());
        fx.clock.advance(Duration::minutes(31));
        assert!(matcher.evaluate(&request).unwrap().is_intercept());
    }

    #[test]
    fn test_unwatched_tool_touches_nothing() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());

        let outcome = fx.matcher().evaluate(&openai_request("Read")).unwrap();
        assert_eq!(outcome, Outcome::Proceed);
        assert!(!fx.cache_dir().exists());
    }

    #[test]
    fn test_missing_docs_root_proceeds_without_marker() {
        let fx = Fixture::new();

        let outcome = fx.matcher().evaluate(&openai_request("Write")).unwrap();
        assert_eq!(outcome, Outcome::Proceed);
        assert_eq!(fx.marker_count(), 0);
    }

    #[test]
    fn test_no_keywords_proceeds_without_marker() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());
        let request = HookRequest {
            tool_name: "Write".to_string(),
            tool_input: Operation {
                file_path: Some("a.c".to_string()),
                content: Some("x = 1;".to_string()),
                ..Operation::default()
            },
        };

        assert_eq!(fx.matcher().evaluate(&request).unwrap(), Outcome::Proceed);
        assert_eq!(fx.marker_count(), 0);
    }

    #[test]
    fn test_irrelevant_docs_proceed() {
        let fx = Fixture::new();
        fx.write_doc("kubernetes.md", "pods and deployments");

        let outcome = fx.matcher().evaluate(&openai_request("Write")).unwrap();
        assert_eq!(outcome, Outcome::Proceed);
        assert_eq!(fx.marker_count(), 0);
    }

    #[test]
    fn test_memory_store_backend() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());
        let store = MemoryStore::new(Duration::minutes(30)).with_clock(fx.clock.clone());
        let matcher = Matcher::new(
            Config::default(),
            fx.work.path().to_path_buf(),
            Box::new(store),
        );
        let request = openai_request("MultiEdit");

        assert!(matcher.evaluate(&request).unwrap().is_intercept());
        assert_eq!(matcher.evaluate(&request).unwrap(), Outcome::Proceed);
    }

    #[test]
    fn test_explain_has_no_side_effects() {
        let fx = Fixture::new();
        fx.write_doc("openai-setup.md", openai_doc());
        let matcher = fx.matcher();
        let request = openai_request("Write");

        let explanation = matcher.explain(&request.tool_input).unwrap();
        assert!(explanation.keywords.contains("chatagent"));
        assert_eq!(explanation.docs.len(), 1);
        assert_eq!(fx.marker_count(), 0);
        assert!(matcher.evaluate(&request).unwrap().is_intercept());
    }
}
