//! Contact and relationship-context extraction from exported chat logs
//!
//! ```text
//! export text → chat::parse_chat → extract::extract_from_chat → context::analyze
//! ```

pub mod chat;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod import;

pub use chat::{parse_chat, window_around, Message};
pub use config::Config;
pub use context::{analyze, ContextAnalyzer, ParsedContext, Urgency};
pub use error::ChatleadError;
pub use extract::{
    extract_from_chat, extract_from_message, ExtractedContact, ExtractionMatch, SourceKind,
};
pub use import::{prepare_import, ContactDraft, ContactStatus, ImportSummary};
