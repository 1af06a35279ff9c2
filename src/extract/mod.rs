//! Contact identifier extraction
//!
//! Scans message text for profile links, email addresses, phone numbers and
//! other relevant URLs, normalizes them and deduplicates across a chat.

mod patterns;

pub use patterns::{
    canonical_profile_link, has_valid_phone_length, is_relevant_url, normalize_phone,
    normalize_url, parse_profile_link, ProfileType, MAX_PHONE_DIGITS, MIN_PHONE_DIGITS,
};

pub(crate) use patterns::strip_urls;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

use crate::chat::{window_around, Message};
use crate::context::{analyze_anchored, ParsedContext};

use patterns::{candidate_urls, EMAIL, PHONE, PROFILE_LINK};

/// Default number of messages taken on each side of a match
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Kind of contact identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "linkedin")]
    LinkedinProfile,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "other")]
    OtherUrl,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::LinkedinProfile => "linkedin",
            SourceKind::Email => "email",
            SourceKind::Phone => "phone",
            SourceKind::OtherUrl => "other",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One identifier found in one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionMatch {
    pub kind: SourceKind,
    /// Text exactly as matched
    pub raw_value: String,
    pub normalized_value: String,
    /// Profile links carry `username` and `profile_type`
    pub metadata: BTreeMap<String, String>,
}

impl ExtractionMatch {
    fn new(kind: SourceKind, raw_value: &str, normalized_value: String) -> Self {
        Self {
            kind,
            raw_value: raw_value.to_string(),
            normalized_value,
            metadata: BTreeMap::new(),
        }
    }

    /// Key used for chat-wide deduplication
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.normalized_value)
    }
}

/// A unique identifier found in a chat, with the message it first appeared
/// in and the surrounding messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedContact {
    pub kind: SourceKind,
    /// Normalized value
    pub value: String,
    pub source_message: Message,
    pub context_window: Vec<Message>,
}

impl ExtractedContact {
    /// Sender of the message the identifier first appeared in
    pub fn shared_by(&self) -> &str {
        &self.source_message.sender
    }

    /// Position of the source message inside its own context window
    pub fn anchor_index(&self) -> Option<usize> {
        self.context_window
            .iter()
            .position(|m| m == &self.source_message)
    }

    /// Infer relationship context, anchored on the source message
    pub fn analyze(&self) -> ParsedContext {
        analyze_anchored(&self.context_window, self.anchor_index())
    }
}

/// Case- and trailing-slash-insensitive dedup within one category
fn dedup_raw<'a>(matches: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|m| {
            let lowered = m.to_lowercase();
            let key = lowered.strip_suffix('/').unwrap_or(&lowered).to_string();
            seen.insert(key)
        })
        .collect()
}

fn profile_matches(content: &str) -> Vec<ExtractionMatch> {
    dedup_raw(PROFILE_LINK.find_iter(content).map(|m| m.as_str()))
        .into_iter()
        .map(|raw| {
            let (username, profile_type) =
                parse_profile_link(raw).unwrap_or((String::new(), ProfileType::Profile));
            let mut found = ExtractionMatch::new(
                SourceKind::LinkedinProfile,
                raw,
                canonical_profile_link(&username, profile_type),
            );
            found.metadata.insert("username".to_string(), username);
            found
                .metadata
                .insert("profile_type".to_string(), profile_type.as_str().to_string());
            found
        })
        .collect()
}

fn email_matches(content: &str) -> Vec<ExtractionMatch> {
    dedup_raw(EMAIL.find_iter(content).map(|m| m.as_str()))
        .into_iter()
        .map(|raw| ExtractionMatch::new(SourceKind::Email, raw, raw.to_lowercase()))
        .collect()
}

fn phone_matches(content: &str) -> Vec<ExtractionMatch> {
    dedup_raw(PHONE.find_iter(content).map(|m| m.as_str()))
        .into_iter()
        .filter_map(|raw| {
            let normalized = normalize_phone(raw);
            if !has_valid_phone_length(&normalized) {
                trace!(raw, "phone match rejected by digit count");
                return None;
            }
            Some(ExtractionMatch::new(SourceKind::Phone, raw, normalized))
        })
        .collect()
}

fn other_url_matches(content: &str) -> Vec<ExtractionMatch> {
    dedup_raw(candidate_urls(content))
        .into_iter()
        .filter(|raw| is_relevant_url(raw))
        .map(|raw| ExtractionMatch::new(SourceKind::OtherUrl, raw, normalize_url(raw)))
        .collect()
}

/// All identifiers in one message body.
///
/// Categories are scanned independently and reported in the order profile
/// links, emails, phones, other URLs. The same text may appear in more than
/// one category.
pub fn extract_from_message(content: &str) -> Vec<ExtractionMatch> {
    let mut results = profile_matches(content);
    results.extend(email_matches(content));
    results.extend(phone_matches(content));
    results.extend(other_url_matches(content));
    results
}

/// Unique identifiers across a chat, each with its context window.
///
/// The earliest occurrence of a `(kind, normalized value)` pair wins; later
/// repeats are skipped.
pub fn extract_from_chat(messages: &[Message], window_size: usize) -> Vec<ExtractedContact> {
    let mut contacts = Vec::new();
    let mut seen = HashSet::new();

    for (idx, message) in messages.iter().enumerate() {
        for found in extract_from_message(&message.content) {
            let key = found.dedup_key();
            if !seen.insert(key) {
                trace!(kind = %found.kind, value = %found.normalized_value, "duplicate skipped");
                continue;
            }

            contacts.push(ExtractedContact {
                kind: found.kind,
                value: found.normalized_value,
                source_message: message.clone(),
                context_window: window_around(messages, idx, window_size).to_vec(),
            });
        }
    }

    debug!(
        messages = messages.len(),
        contacts = contacts.len(),
        "extracted contacts from chat"
    );

    contacts
}

/// Display name from a profile link: `jane-doe` becomes `Jane Doe`.
///
/// Empty when `url` is not a profile link.
pub fn name_from_profile_url(url: &str) -> String {
    let Some((username, _)) = parse_profile_link(url) else {
        return String::new();
    };

    username
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
