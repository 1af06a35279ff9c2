//! Extract command implementation

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;

use super::{load_messages, print_json, truncate};
use crate::config::{Config, OutputFormat};
use crate::context::ParsedContext;
use crate::extract::{extract_from_chat, SourceKind};

/// One extracted contact with its analyzed context
#[derive(Serialize)]
struct ContactReport<'a> {
    kind: SourceKind,
    value: &'a str,
    shared_by: &'a str,
    shared_at: NaiveDateTime,
    context: ParsedContext,
}

pub fn run(path: &Path, config: &Config, window_size: usize, format: OutputFormat) -> Result<()> {
    let messages = load_messages(path)?;
    let contacts = extract_from_chat(&messages, window_size);
    let analyzer = config.analyzer();

    let reports: Vec<ContactReport> = contacts
        .iter()
        .map(|contact| ContactReport {
            kind: contact.kind,
            value: &contact.value,
            shared_by: contact.shared_by(),
            shared_at: contact.source_message.timestamp,
            context: analyzer.analyze_anchored(&contact.context_window, contact.anchor_index()),
        })
        .collect();

    if format == OutputFormat::Json {
        return print_json(&reports);
    }

    println!("Scanned {} messages", messages.len());

    if reports.is_empty() {
        println!("No contacts found in this chat.");
        return Ok(());
    }

    for report in &reports {
        println!(
            "\n{} {} (shared by {}, {})",
            report.kind,
            report.value,
            report.shared_by,
            report.shared_at.format("%Y-%m-%d %H:%M")
        );
        let ctx = &report.context;
        println!("   urgency: {}", ctx.urgency);
        for (label, value) in [
            ("relationship", &ctx.relationship),
            ("reason", &ctx.reason),
            ("sector", &ctx.sector),
            ("deal size", &ctx.deal_size),
        ] {
            if !value.is_empty() {
                println!("   {}: {}", label, value);
            }
        }
        for note in ctx.notes.lines() {
            println!("   > {}", truncate(note, 90));
        }
    }

    println!("\n✅ {} contacts found", reports.len());
    Ok(())
}
