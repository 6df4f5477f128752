//! Keyword-matched question/answer store.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reply when no entry's keywords appear in the message.
pub const NO_MATCH_REPLY: &str = "I couldn't understand your question. Please try rephrasing it.";

/// Reply when an entry matched but has no active answer.
pub const NO_ANSWER_REPLY: &str = "I don't have an answer for that question yet.";

/// Errors loading a knowledge file.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid knowledge file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An answer to a predefined question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A predefined question with the keywords that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Entry {
    fn matches(&self, message_lower: &str) -> bool {
        self.keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .any(|k| message_lower.contains(&k.to_lowercase()))
    }
}

/// Ordered list of entries. The first matching entry wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub entries: Vec<Entry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Load entries from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse either `{"entries": [...]}` or a bare array of entries.
    pub fn from_json(raw: &str) -> Result<Self, KnowledgeError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Document {
            Bare(Vec<Entry>),
            Wrapped(KnowledgeBase),
        }

        Ok(match serde_json::from_str(raw)? {
            Document::Bare(entries) => Self::new(entries),
            Document::Wrapped(kb) => kb,
        })
    }

    /// Small built-in set used when no file is given.
    pub fn sample() -> Self {
        let entry = |question: &str, keywords: &[&str], answer: &str| Entry {
            question: question.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answers: vec![Answer {
                text: answer.to_string(),
                active: true,
            }],
        };

        Self::new(vec![
            entry("Greeting", &["hello", "hi ", "hey"], "Hi there!"),
            entry(
                "Opening hours",
                &["hours", "open", "close"],
                "We are open Monday to Friday, 9am to 5pm.",
            ),
            entry(
                "Contact",
                &["contact", "email", "phone"],
                "You can reach the office at office@example.com.",
            ),
        ])
    }

    /// Pick the reply for a user message.
    pub fn respond(&self, message: &str) -> &str {
        let lower = message.to_lowercase();
        match self.entries.iter().find(|e| e.matches(&lower)) {
            Some(entry) => entry
                .answers
                .iter()
                .find(|a| a.active)
                .map(|a| a.text.as_str())
                .unwrap_or(NO_ANSWER_REPLY),
            None => NO_MATCH_REPLY,
        }
    }
}
