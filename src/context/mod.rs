//! Relationship context inference
//!
//! Runs the heuristic rule tables over the text of a context window and
//! collects free-text notes around the shared identifier.

mod notes;
pub mod rules;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::chat::Message;

/// Default maximum number of note entries
pub const DEFAULT_NOTES_LIMIT: usize = 5;

static LINK_BEARING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"linkedin\.com|https?://").unwrap());

/// How soon a contact should be followed up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Hot,
    #[default]
    Warm,
    Cold,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Hot => "hot",
            Urgency::Warm => "warm",
            Urgency::Cold => "cold",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Inferred context for one contact. Empty strings mean no rule matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContext {
    pub relationship: String,
    pub reason: String,
    /// Comma-separated when several sectors match
    pub sector: String,
    pub deal_size: String,
    pub urgency: Urgency,
    pub notes: String,
}

/// Context analyzer with a configurable notes limit
#[derive(Debug, Clone)]
pub struct ContextAnalyzer {
    notes_limit: usize,
}

impl Default for ContextAnalyzer {
    fn default() -> Self {
        Self {
            notes_limit: DEFAULT_NOTES_LIMIT,
        }
    }
}

impl ContextAnalyzer {
    pub fn new(notes_limit: usize) -> Self {
        Self { notes_limit }
    }

    /// Analyze a window, locating the link message heuristically
    pub fn analyze(&self, window: &[Message]) -> ParsedContext {
        self.analyze_anchored(window, None)
    }

    /// Analyze a window. `anchor` is the index of the message carrying the
    /// identifier; when `None` it is the first message containing a link,
    /// else the midpoint.
    pub fn analyze_anchored(&self, window: &[Message], anchor: Option<usize>) -> ParsedContext {
        let text = window
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let link_index = anchor.unwrap_or_else(|| locate_link_message(window));

        ParsedContext {
            relationship: rules::first_label(&text, &rules::RELATIONSHIP_RULES)
                .unwrap_or_default()
                .to_string(),
            reason: rules::first_label(&text, &rules::REASON_RULES)
                .unwrap_or_default()
                .to_string(),
            sector: rules::all_labels(&text, &rules::SECTOR_RULES).join(", "),
            deal_size: rules::deal_size(&text).unwrap_or_default(),
            urgency: rules::urgency(&text),
            notes: notes::extract_notes(window, link_index, self.notes_limit),
        }
    }
}

/// First message containing a link, else the window midpoint
fn locate_link_message(window: &[Message]) -> usize {
    window
        .iter()
        .position(|m| LINK_BEARING.is_match(&m.content))
        .unwrap_or(window.len() / 2)
}

/// Analyze a window with the default notes limit
pub fn analyze(window: &[Message]) -> ParsedContext {
    ContextAnalyzer::default().analyze(window)
}

/// Analyze a window with a known link-message index
pub fn analyze_anchored(window: &[Message], anchor: Option<usize>) -> ParsedContext {
    ContextAnalyzer::default().analyze_anchored(window, anchor)
}

/// Render a window as `[timestamp] sender: content` lines
pub fn format_raw_context(window: &[Message]) -> String {
    window
        .iter()
        .map(|m| {
            format!(
                "[{}] {}: {}",
                m.timestamp.format("%Y-%m-%d %H:%M:%S"),
                m.sender,
                m.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
