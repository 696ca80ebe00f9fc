//! Hook request payloads and operation fingerprints.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Characters of content/old string that take part in the fingerprint.
const FINGERPRINT_PREFIX_CHARS: usize = 500;

/// Separator between fingerprint fields.
const FINGERPRINT_DELIMITER: &[u8] = b"\x1f";

/// Request read from the host tool on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookRequest {
    #[serde(alias = "operationKind")]
    pub tool_name: String,

    #[serde(default, alias = "operationInput")]
    pub tool_input: Operation,
}

/// A single replacement inside a MultiEdit payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditChunk {
    #[serde(default, alias = "oldString")]
    pub old_string: Option<String>,

    #[serde(default, alias = "newString")]
    pub new_string: Option<String>,
}

/// Pending write or edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, alias = "filePath")]
    pub file_path: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, alias = "oldString")]
    pub old_string: Option<String>,

    /// Replacement text of an Edit.
    #[serde(default, alias = "newString")]
    pub new_string: Option<String>,

    /// Replacements of a MultiEdit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<EditChunk>,

    /// Instructions of a delegated Task.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl HookRequest {
    /// Parse a request from raw stdin text.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(input)?)
    }
}

impl Operation {
    pub fn path(&self) -> &str {
        self.file_path.as_deref().unwrap_or("")
    }

    /// Text being written: `content`, else `new_string`, else MultiEdit
    /// replacements, else a Task prompt.
    pub fn effective_content(&self) -> String {
        if let Some(content) = &self.content {
            return content.clone();
        }
        if let Some(new_string) = &self.new_string {
            return new_string.clone();
        }
        if !self.edits.is_empty() {
            return self
                .edits
                .iter()
                .filter_map(|e| e.new_string.as_deref())
                .collect::<Vec<_>>()
                .join("\n");
        }
        self.prompt.clone().unwrap_or_default()
    }

    /// Text being replaced: `old_string`, else MultiEdit originals.
    pub fn effective_old_string(&self) -> String {
        if let Some(old) = &self.old_string {
            return old.clone();
        }
        self.edits
            .iter()
            .filter_map(|e| e.old_string.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// SHA-256 identity of an operation, rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Fingerprint an operation from its path and the bounded prefixes of its
/// content and old string.
pub fn fingerprint(operation: &Operation) -> Fingerprint {
    let content = operation.effective_content();
    let old_string = operation.effective_old_string();

    let mut hasher = Sha256::new();
    hasher.update(operation.path().as_bytes());
    hasher.update(FINGERPRINT_DELIMITER);
    hasher.update(prefix(&content, FINGERPRINT_PREFIX_CHARS).as_bytes());
    hasher.update(FINGERPRINT_DELIMITER);
    hasher.update(prefix(&old_string, FINGERPRINT_PREFIX_CHARS).as_bytes());

    Fingerprint(hex::encode(hasher.finalize()))
}
