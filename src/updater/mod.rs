//! Subscription update workflow.
//!
//! Runs one update as a single unit of work: obtain the raw content, snapshot
//! the target group, import, reconcile, apply deletions, report. Callers that
//! need to ask the user whether a URL is a subscription or a plain link must
//! settle that before building the `UpdateSource`; the workflow itself never
//! prompts.

use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use crate::models::{GroupId, Profile};
use crate::parser::document::DocumentError;
use crate::parser::import::import_text;
use crate::reconcile::reconcile;
use crate::store::ProfileStore;
use crate::utils::http::{web_get, FetchError};

/// Where the raw subscription content comes from.
#[derive(Debug, Clone)]
pub enum UpdateSource {
    /// Content is already in hand.
    Inline(String),
    /// Content must be fetched from a subscription URL first.
    Remote(String),
}

/// Retrieval collaborator: turns a subscription URL into raw text.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// `Fetcher` backed by a blocking HTTP client.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    /// Optional proxy for the request itself, e.g. `http://127.0.0.1:8080`.
    pub proxy: Option<String>,
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        web_get(url, self.proxy.as_deref())
    }
}

/// Failure of one update invocation.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("cannot download subscription data: {0}")]
    Fetch(#[from] FetchError),
}

/// What one update changed, for the reporting collaborator.
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Records whose content is new to the group.
    pub added: Vec<Arc<Profile>>,
    /// Records whose content vanished and which were deleted.
    pub removed: Vec<Arc<Profile>>,
    /// Net change of the store: records inserted minus records deleted.
    pub delta: i64,
}

impl UpdateReport {
    /// Human-readable change summary, one profile per line.
    pub fn describe(&self) -> String {
        let mut lines = vec![format!(
            "added {} profile(s), removed {} profile(s)",
            self.added.len(),
            self.removed.len()
        )];
        for record in &self.added {
            lines.push(format!("+ {}", record.display_type_and_name()));
        }
        for record in &self.removed {
            lines.push(format!("- {}", record.display_type_and_name()));
        }
        lines.join("\n")
    }
}

/// Drives subscription updates against a profile store.
pub struct SubscriptionUpdater<F: Fetcher> {
    fetcher: F,
}

impl Default for SubscriptionUpdater<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionUpdater<HttpFetcher> {
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::default(),
        }
    }
}

impl<F: Fetcher> SubscriptionUpdater<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Run one subscription update.
    ///
    /// With a target group, the group's membership is snapshotted around the
    /// import and reconciled: fresh duplicates of surviving records and
    /// records whose content vanished are deleted from the store. Without a
    /// group this is a one-off addition and nothing is ever deleted.
    pub fn update(
        &self,
        store: &mut ProfileStore,
        source: UpdateSource,
        group: Option<GroupId>,
    ) -> Result<UpdateReport, UpdateError> {
        let content = match source {
            UpdateSource::Inline(text) => text,
            UpdateSource::Remote(url) => {
                info!("fetching subscription from {}", url);
                let body = self.fetcher.fetch(&url)?;
                debug!("fetched {} byte(s)", body.len());
                body
            }
        };
        let content = content.trim();

        let before = store.group_members(group);
        let summary = import_text(store, content, group)?;
        let mut delta = summary.added() as i64;

        // One-off addition: no group to reconcile against
        if group.is_none() {
            let added = summary
                .inserted
                .iter()
                .filter_map(|&id| store.get(id))
                .collect();
            return Ok(UpdateReport {
                added,
                removed: Vec::new(),
                delta,
            });
        }

        let after = store.group_members(group);
        let outcome = reconcile(&before, &after);
        debug!(
            "reconcile: before={} after={} fresh={} kept={} only_before={} only_after={}",
            before.len(),
            after.len(),
            outcome.fresh.len(),
            outcome.kept.len(),
            outcome.only_before.len(),
            outcome.only_after.len(),
        );

        for stale in &outcome.to_delete {
            store.delete(stale.id);
            delta -= 1;
        }

        Ok(UpdateReport {
            added: outcome.only_after,
            removed: outcome.only_before,
            delta,
        })
    }
}
