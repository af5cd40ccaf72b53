//! Recursive subscription content classifier.
//!
//! Raw subscription text has no declared format: it may be a single link, a
//! newline-separated batch, a base64 wrapper around either, or a proxy list
//! document. Classification peels one layer per step and redispatches on the
//! remainder. The check order is load-bearing: the base64 probe runs before
//! anything else, and the document marker wins over line splitting.

use log::debug;

use crate::models::{GroupId, ProfileId};
use crate::parser::document::{explode_document, DocumentError, PROXY_LIST_MARKER};
use crate::parser::explodes::explode;
use crate::store::ProfileStore;
use crate::utils::base64::decode_base64_if_valid;

/// Outcome of one import call.
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Identities of the records inserted by this call, in insertion order.
    pub inserted: Vec<ProfileId>,
}

impl ImportSummary {
    /// Number of successfully added records.
    pub fn added(&self) -> usize {
        self.inserted.len()
    }
}

/// Classify raw subscription content and insert every recognized profile
/// into `store` under `group`.
///
/// Individual links that fail to decode are dropped silently; a structurally
/// broken proxy list document fails the whole call. Records inserted before
/// such a failure stay in the store.
pub fn import_text(
    store: &mut ProfileStore,
    content: &str,
    group: Option<GroupId>,
) -> Result<ImportSummary, DocumentError> {
    let mut summary = ImportSummary::default();
    import_into(store, content, group, &mut summary)?;
    debug!("imported {} profile(s)", summary.added());
    Ok(summary)
}

fn import_into(
    store: &mut ProfileStore,
    content: &str,
    group: Option<GroupId>,
    summary: &mut ImportSummary,
) -> Result<(), DocumentError> {
    // Base64 wrapper: peel one layer and redispatch on the decoded text
    if let Some(decoded) = decode_base64_if_valid(content) {
        return import_into(store, &decoded, group, summary);
    }

    // Proxy list document; mutually exclusive with line splitting
    if content.contains(PROXY_LIST_MARKER) {
        for profile in explode_document(content)? {
            let record = store.insert(profile, group);
            summary.inserted.push(record.id);
        }
        return Ok(());
    }

    // Multi-line batch: every line is classified independently
    if content.contains('\n') {
        for line in content.split('\n') {
            import_into(store, line, group, summary)?;
        }
        return Ok(());
    }

    // Single unit: decode the link, drop it silently on failure
    if let Some(profile) = explode(content) {
        let record = store.insert(profile, group);
        summary.inserted.push(record.id);
    }

    Ok(())
}
