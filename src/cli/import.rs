//! Import command implementation

use anyhow::Result;
use std::path::Path;

use super::{load_messages, print_json, truncate};
use crate::config::{Config, OutputFormat};
use crate::extract::extract_from_chat;
use crate::import::prepare_import;

pub fn run(path: &Path, config: &Config, window_size: usize, format: OutputFormat) -> Result<()> {
    let messages = load_messages(path)?;
    let contacts = extract_from_chat(&messages, window_size);
    let summary = prepare_import(
        messages.len(),
        &contacts,
        &config.known_profiles(),
        &config.analyzer(),
    );

    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    println!(
        "Messages: {} | Contacts found: {} | Already known: {}",
        summary.total_messages, summary.contacts_found, summary.duplicates
    );

    if summary.is_empty() {
        println!("Nothing new to import.");
        return Ok(());
    }

    println!(
        "\n{:<10} {:<8} {:<40} {:<15} {:<8} {}",
        "ID", "Kind", "Value", "Shared by", "Urgency", "Name"
    );
    println!("{}", "-".repeat(100));

    for draft in &summary.drafts {
        println!(
            "{:<10} {:<8} {:<40} {:<15} {:<8} {}",
            &draft.id.to_string()[..8],
            draft.source_kind,
            truncate(&draft.raw_value, 40),
            truncate(&draft.shared_by, 15),
            draft.parsed_context.urgency,
            draft.name,
        );
    }

    println!("\n✅ {} new contacts ready for import", summary.drafts.len());
    Ok(())
}
