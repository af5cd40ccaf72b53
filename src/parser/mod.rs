//! Subscription content parsing.
//!
//! `import` classifies raw text and drives the per-format parsers:
//! `explodes` for single proxy links, `document` for Clash-style proxy
//! list documents.

pub mod document;
pub mod explodes;
pub mod import;

pub use document::{explode_document, DocumentError};
pub use explodes::explode;
pub use import::{import_text, ImportSummary};
