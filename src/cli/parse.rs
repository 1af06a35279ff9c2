//! Parse command implementation

use anyhow::Result;
use std::path::Path;

use super::{load_messages, print_json, truncate};
use crate::config::OutputFormat;

pub fn run(path: &Path, format: OutputFormat) -> Result<()> {
    let messages = load_messages(path)?;

    if format == OutputFormat::Json {
        return print_json(&messages);
    }

    if messages.is_empty() {
        println!("No messages found. Is this a WhatsApp text export?");
        return Ok(());
    }

    println!("{:<20} {:<20} {}", "Timestamp", "Sender", "Content");
    println!("{}", "-".repeat(100));

    for message in &messages {
        println!(
            "{:<20} {:<20} {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&message.sender, 20),
            truncate(&message.content, 60),
        );
    }

    println!("\n{} messages", messages.len());
    Ok(())
}
