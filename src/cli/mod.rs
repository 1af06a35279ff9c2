//! Subcommand implementations for the `chatlead` binary

pub mod extract;
pub mod import;
pub mod parse;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::chat::{parse_chat, read_export, Message};

/// Read and parse an export file
pub(crate) fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let text = read_export(path)
        .with_context(|| format!("Failed to read chat export {}", path.display()))?;
    Ok(parse_chat(&text))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// First line of `text`, cut to `max` characters
pub(crate) fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or(text);
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}
