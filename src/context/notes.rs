//! Free-text notes around a shared identifier

use regex::Regex;
use std::sync::LazyLock;

use crate::chat::Message;
use crate::extract::strip_urls;

static OMITTED_MEDIA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^<.*omitted>$").unwrap());

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

static ACKNOWLEDGEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ok|okay|thanks|thank you|got it|nice|cool|great|👍|🙏|✅)$").unwrap()
});

/// Pre-link messages considered for notes
const LOOKBEHIND: usize = 2;

/// Collect notes from a context window, given the index of the message that
/// carries the identifier.
///
/// Order: up to two substantive messages just before the link message (in
/// chronological order), then the link message's own text with URLs removed,
/// then substantive follow-ups. At most `limit` entries, newline-joined.
pub(crate) fn extract_notes(window: &[Message], link_index: usize, limit: usize) -> String {
    let mut notes: Vec<String> = Vec::new();

    let before = &window[..link_index.min(window.len())];
    for msg in &before[before.len().saturating_sub(LOOKBEHIND)..] {
        let content = msg.content.trim();
        if content.chars().count() > 15 && !content.contains("http") {
            notes.push(content.to_string());
        }
    }

    if let Some(link_msg) = window.get(link_index) {
        let inline = strip_urls(&link_msg.content);
        let inline = inline.trim();
        if inline.chars().count() > 10 {
            notes.push(inline.to_string());
        }
    }

    for msg in window.iter().skip(link_index.saturating_add(1)) {
        let content = msg.content.trim();
        if is_follow_up_note(content) {
            notes.push(content.to_string());
        }
    }

    notes.truncate(limit);
    notes.join("\n")
}

fn is_follow_up_note(content: &str) -> bool {
    content.chars().count() >= 5
        && !OMITTED_MEDIA.is_match(content)
        && !BARE_URL.is_match(content)
        && !ACKNOWLEDGEMENT.is_match(content)
}
