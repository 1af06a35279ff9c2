//! Chat export ingestion
//!
//! Turns raw export text into an ordered message sequence and provides
//! bounded context windows over that sequence.
//!
//! Supported line formats (tried in this order, first match wins):
//! - `[1/6/25, 10:30:45 AM] Sender: Body`
//! - `1/6/25, 10:30 AM - Sender: Body`
//! - `[1/6/2025, 22:30:45] Sender: Body`

mod timestamp;
mod whatsapp;

pub use timestamp::parse_timestamp;
pub use whatsapp::{is_media_placeholder, is_system_message, parse_chat, ParserState};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// One logical chat message
///
/// Continuation lines of a multi-line message are folded into `content` and
/// `raw`, separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Wall-clock time as written in the export (exports carry no zone)
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub content: String,
    /// Header line as it appeared in the file, plus continuation lines
    pub raw: String,
}

/// Slice of `messages` centered on `center`, at most `half_width` messages
/// on either side, clipped at the sequence boundaries.
///
/// Never panics: an out-of-range `center` yields the clipped tail (possibly
/// empty).
pub fn window_around(messages: &[Message], center: usize, half_width: usize) -> &[Message] {
    let end = center
        .saturating_add(half_width)
        .saturating_add(1)
        .min(messages.len());
    let start = center.saturating_sub(half_width).min(end);
    &messages[start..end]
}

/// Read an export file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_export(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
