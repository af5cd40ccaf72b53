//! In-memory profile store and group membership.
//!
//! The store owns every parsed profile and the ordered member list of each
//! group. Records are shared out as `Arc<Profile>` and never mutated after
//! insertion; an update replaces records instead of editing them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{GroupId, Profile, ProfileId};

/// Owns profile records and group membership lists.
///
/// Profiles inserted without a group land in a default ungrouped bucket,
/// which replaces the negative-id sentinel used by group-less one-off
/// additions.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: HashMap<ProfileId, Arc<Profile>>,
    groups: HashMap<Option<GroupId>, Vec<ProfileId>>,
    next_id: ProfileId,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly parsed profile, assigning its identity.
    ///
    /// The returned record is the stored one; the id of the draft passed in
    /// is overwritten unconditionally.
    pub fn insert(&mut self, mut profile: Profile, group: Option<GroupId>) -> Arc<Profile> {
        self.next_id += 1;
        profile.id = self.next_id;

        let record = Arc::new(profile);
        self.profiles.insert(record.id, Arc::clone(&record));
        self.groups.entry(group).or_default().push(record.id);
        record
    }

    /// Remove a profile by identity, unlinking it from its group.
    pub fn delete(&mut self, id: ProfileId) -> Option<Arc<Profile>> {
        let removed = self.profiles.remove(&id)?;
        for members in self.groups.values_mut() {
            members.retain(|&member| member != id);
        }
        Some(removed)
    }

    pub fn get(&self, id: ProfileId) -> Option<Arc<Profile>> {
        self.profiles.get(&id).cloned()
    }

    /// Current members of a group, in insertion order.
    pub fn group_members(&self, group: Option<GroupId>) -> Vec<Arc<Profile>> {
        match self.groups.get(&group) {
            Some(members) => members
                .iter()
                .filter_map(|id| self.profiles.get(id).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(remark: &str) -> Profile {
        Profile::ss_construct(remark, "example.com", 8388, "aes-256-gcm", "pw", None)
    }

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let mut store = ProfileStore::new();
        let a = store.insert(sample("a"), Some(1));
        let b = store.insert(sample("a"), Some(1));

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_group_members_preserve_insertion_order() {
        let mut store = ProfileStore::new();
        store.insert(sample("first"), Some(7));
        store.insert(sample("second"), Some(7));
        store.insert(sample("elsewhere"), Some(8));

        let members = store.group_members(Some(7));
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].remark, "first");
        assert_eq!(members[1].remark, "second");
    }

    #[test]
    fn test_ungrouped_bucket_is_separate() {
        let mut store = ProfileStore::new();
        store.insert(sample("loose"), None);
        store.insert(sample("grouped"), Some(3));

        assert_eq!(store.group_members(None).len(), 1);
        assert_eq!(store.group_members(Some(3)).len(), 1);
        assert!(store.group_members(Some(4)).is_empty());
    }

    #[test]
    fn test_delete_unlinks_from_group() {
        let mut store = ProfileStore::new();
        let kept = store.insert(sample("kept"), Some(1));
        let gone = store.insert(sample("gone"), Some(1));

        assert!(store.delete(gone.id).is_some());
        assert!(store.delete(gone.id).is_none());

        let members = store.group_members(Some(1));
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, kept.id);
    }
}
