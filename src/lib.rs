pub mod models;
pub mod parser;
pub mod reconcile;
pub mod store;
pub mod updater;
pub mod utils;

// Re-export the main profile types for easier access
pub use models::{GroupId, Profile, ProfileId, ProxyKind, ProxyParams};

// Re-export the entry points of the import/reconcile workflow
pub use parser::import::{import_text, ImportSummary};
pub use reconcile::{reconcile, Reconciliation};
pub use store::ProfileStore;
pub use updater::{SubscriptionUpdater, UpdateReport, UpdateSource};
