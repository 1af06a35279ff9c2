//! WhatsApp text export parser
//!
//! Export layout varies by device and locale, and a single file may mix
//! layouts. Each line is matched against the header formats independently;
//! anything else is a continuation of the message being built.

use chrono::Local;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::{parse_timestamp, Message};

/// A header-line layout. Capture groups: date, time, sender, body.
struct LineFormat {
    name: &'static str,
    pattern: Regex,
}

static LINE_FORMATS: LazyLock<Vec<LineFormat>> = LazyLock::new(|| {
    vec![
        LineFormat {
            name: "bracketed",
            pattern: Regex::new(
                r"(?s)^\[([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),?\s*([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?(?:\s*[AP]M)?)\]\s*([^:]+):\s*(.+)$",
            )
            .unwrap(),
        },
        LineFormat {
            name: "dashed",
            pattern: Regex::new(
                r"(?s)^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),?\s*([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?(?:\s*[AP]M)?)\s*-\s*([^:]+):\s*(.+)$",
            )
            .unwrap(),
        },
        LineFormat {
            name: "bracketed-24h",
            pattern: Regex::new(
                r"(?s)^\[([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),?\s*([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)\]\s*([^:]+):\s*(.+)$",
            )
            .unwrap(),
        },
    ]
});

const MEDIA_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "<image omitted>",
    "<video omitted>",
    "<audio omitted>",
    "<document omitted>",
    "<sticker omitted>",
    "<GIF omitted>",
    "<Contact card omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
];

// Substring matches, so e.g. "left" also drops ordinary messages containing it.
const SYSTEM_MESSAGES: &[&str] = &[
    "Messages and calls are end-to-end encrypted",
    "created group",
    "added you",
    "left",
    "removed",
    "changed the subject",
    "changed this group's icon",
    "changed the group description",
    "Your security code with",
];

fn contains_any_ignore_case(content: &str, needles: &[&str]) -> bool {
    let haystack = content.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Body is a media-omission notice (case-insensitive substring match)
pub fn is_media_placeholder(content: &str) -> bool {
    contains_any_ignore_case(content, MEDIA_PLACEHOLDERS)
}

/// Body is an administrative chat event (case-insensitive substring match)
pub fn is_system_message(content: &str) -> bool {
    contains_any_ignore_case(content, SYSTEM_MESSAGES)
}

/// Fields of a matched header line
struct Header<'a> {
    format: &'static str,
    date: &'a str,
    time: &'a str,
    sender: &'a str,
    body: &'a str,
}

fn match_header(line: &str) -> Option<Header<'_>> {
    LINE_FORMATS.iter().find_map(|format| {
        let caps = format.pattern.captures(line)?;
        Some(Header {
            format: format.name,
            date: caps.get(1)?.as_str(),
            time: caps.get(2)?.as_str(),
            sender: caps.get(3)?.as_str(),
            body: caps.get(4)?.as_str(),
        })
    })
}

/// Line-by-line parser state: the message currently being built.
///
/// Transitions:
/// - header line: flush the open message, then open a new one unless the
///   body is a placeholder or system notice (in which case nothing is open)
/// - other non-blank line: append to the open message, if any
/// - blank line: ignored
#[derive(Debug, Default)]
pub struct ParserState {
    current: Option<Message>,
    discarded: usize,
    fallback_timestamps: usize,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line. Returns the next state and the message flushed by this
    /// line, if any.
    pub fn step(mut self, line: &str) -> (Self, Option<Message>) {
        let Some(header) = match_header(line) else {
            if let Some(current) = self.current.as_mut() {
                if !line.trim().is_empty() {
                    current.content.push('\n');
                    current.content.push_str(line);
                    current.raw.push('\n');
                    current.raw.push_str(line);
                }
            }
            return (self, None);
        };

        let flushed = self.current.take();

        if is_media_placeholder(header.body) || is_system_message(header.body) {
            self.discarded += 1;
            return (self, flushed);
        }

        let timestamp = parse_timestamp(header.date, header.time).unwrap_or_else(|| {
            self.fallback_timestamps += 1;
            Local::now().naive_local()
        });

        trace!(format = header.format, sender = header.sender.trim(), "header line");

        self.current = Some(Message {
            timestamp,
            sender: header.sender.trim().to_string(),
            content: header.body.trim().to_string(),
            raw: line.to_string(),
        });

        (self, flushed)
    }

    /// End of input: the still-open message, if any
    pub fn finish(self) -> Option<Message> {
        self.current
    }

    /// Header lines dropped as placeholders or system notices so far
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

/// Parse a full chat export into messages, in file order.
///
/// Never fails: lines that match no header format are continuations, or
/// are dropped when no message is open.
pub fn parse_chat(raw_text: &str) -> Vec<Message> {
    let lines = raw_text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    let (state, mut messages) =
        lines.fold((ParserState::new(), Vec::new()), |(state, mut out), line| {
            let (next, flushed) = state.step(line);
            out.extend(flushed);
            (next, out)
        });

    debug!(
        messages = messages.len() + usize::from(state.current.is_some()),
        discarded = state.discarded,
        fallback_timestamps = state.fallback_timestamps,
        "parsed chat export"
    );

    messages.extend(state.finish());
    messages
}
