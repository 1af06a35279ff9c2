//! Import preparation
//!
//! Shapes extracted contacts into the records handed to external storage.
//! Duplicate checking against stored contacts only covers profile links the
//! caller already knows about; persistence itself happens elsewhere.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::context::{format_raw_context, ContextAnalyzer, ParsedContext};
use crate::extract::{name_from_profile_url, ExtractedContact, SourceKind};

/// Follow-up stage of a stored contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    Contacted,
    InProgress,
    Converted,
    Passed,
}

/// A contact ready to be persisted
#[derive(Debug, Clone, Serialize)]
pub struct ContactDraft {
    pub id: Uuid,
    pub source_kind: SourceKind,
    pub raw_value: String,
    pub linkedin_url: String,
    pub name: String,
    /// Filled in by hand after import
    pub company: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub shared_by: String,
    pub shared_date: NaiveDateTime,
    pub raw_context: String,
    pub parsed_context: ParsedContext,
    pub status: ContactStatus,
    pub assigned_to: String,
    pub follow_up_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactDraft {
    /// New-status draft stamped with `created_at`
    pub fn from_extracted(
        contact: &ExtractedContact,
        analyzer: &ContextAnalyzer,
        created_at: DateTime<Utc>,
    ) -> Self {
        let field = |kind: SourceKind| {
            if contact.kind == kind {
                contact.value.clone()
            } else {
                String::new()
            }
        };

        let name = if contact.kind == SourceKind::LinkedinProfile {
            name_from_profile_url(&contact.value)
        } else {
            String::new()
        };

        Self {
            id: Uuid::new_v4(),
            source_kind: contact.kind,
            raw_value: contact.value.clone(),
            linkedin_url: field(SourceKind::LinkedinProfile),
            name,
            company: String::new(),
            title: String::new(),
            phone: field(SourceKind::Phone),
            email: field(SourceKind::Email),
            website: field(SourceKind::OtherUrl),
            shared_by: contact.shared_by().to_string(),
            shared_date: contact.source_message.timestamp,
            raw_context: format_raw_context(&contact.context_window),
            parsed_context: analyzer
                .analyze_anchored(&contact.context_window, contact.anchor_index()),
            status: ContactStatus::New,
            assigned_to: String::new(),
            follow_up_date: None,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Outcome of preparing one chat for import
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub total_messages: usize,
    pub contacts_found: usize,
    /// Profile contacts already present in storage
    pub duplicates: usize,
    pub drafts: Vec<ContactDraft>,
}

impl ImportSummary {
    /// Nothing new to import. Not an error.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

/// Build drafts for every contact, skipping profile links in `known_profiles`
pub fn prepare_import(
    total_messages: usize,
    contacts: &[ExtractedContact],
    known_profiles: &HashSet<String>,
    analyzer: &ContextAnalyzer,
) -> ImportSummary {
    let now = Utc::now();
    let mut duplicates = 0;
    let mut drafts = Vec::new();

    for contact in contacts {
        if contact.kind == SourceKind::LinkedinProfile && known_profiles.contains(&contact.value) {
            duplicates += 1;
            continue;
        }
        drafts.push(ContactDraft::from_extracted(contact, analyzer, now));
    }

    info!(
        total_messages,
        contacts_found = contacts.len(),
        duplicates,
        new_contacts = drafts.len(),
        "prepared import"
    );

    ImportSummary {
        total_messages,
        contacts_found: contacts.len(),
        duplicates,
        drafts,
    }
}
