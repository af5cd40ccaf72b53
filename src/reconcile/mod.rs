//! Group reconciliation.
//!
//! Compares the snapshots of a group's membership taken before and after an
//! import, and decides which records to keep and which to delete. Two
//! different notions of sameness are in play and must not be conflated:
//! identity (the same stored record) and value (the same semantic content,
//! possibly a different record).

use std::sync::Arc;

use crate::models::Profile;

/// Identity comparison: same underlying record.
pub fn identity_eq(a: &Profile, b: &Profile) -> bool {
    a.id == b.id
}

/// Value comparison: same semantic content, identity ignored.
pub fn value_eq(a: &Profile, b: &Profile) -> bool {
    a.same_content(b)
}

/// Records of `src` with no counterpart in `dst` under `eq`.
pub fn difference(
    src: &[Arc<Profile>],
    dst: &[Arc<Profile>],
    eq: impl Fn(&Profile, &Profile) -> bool,
) -> Vec<Arc<Profile>> {
    src.iter()
        .filter(|candidate| !dst.iter().any(|other| eq(candidate, other)))
        .cloned()
        .collect()
}

/// Derived sets of one reconciliation.
///
/// `to_delete` is the union of `duplicates` and `only_before`; it never
/// contains a record from `only_after`.
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// After-side records whose identity was not present before.
    pub fresh: Vec<Arc<Profile>>,
    /// Records present in both snapshots by identity.
    pub common_by_identity: Vec<Arc<Profile>>,
    /// Before-side records whose content was re-produced by the update;
    /// these keep their identity.
    pub kept: Vec<Arc<Profile>>,
    /// Fresh records whose content duplicates a kept record.
    pub duplicates: Vec<Arc<Profile>>,
    /// Before-side records whose content vanished from the subscription.
    pub only_before: Vec<Arc<Profile>>,
    /// Fresh records with genuinely new content.
    pub only_after: Vec<Arc<Profile>>,
    /// Everything the store should delete to settle the update.
    pub to_delete: Vec<Arc<Profile>>,
}

/// Reconcile a group's `before` and `after` membership snapshots.
///
/// Fresh records (identity absent from `before`) are paired against the
/// before set by value, walking both sides in original sequence order with
/// first match winning; each pair keeps the before-side identity and marks
/// the fresh duplicate for deletion. Unpaired remainders become
/// `only_before` (content gone, delete) and `only_after` (content new,
/// keep and report).
pub fn reconcile(before: &[Arc<Profile>], after: &[Arc<Profile>]) -> Reconciliation {
    let fresh = difference(after, before, identity_eq);
    let common_by_identity: Vec<Arc<Profile>> = before
        .iter()
        .filter(|record| after.iter().any(|other| identity_eq(record, other)))
        .cloned()
        .collect();

    let mut consumed = vec![false; fresh.len()];
    let mut kept = Vec::new();
    let mut duplicates = Vec::new();
    let mut only_before = Vec::new();

    for record in before {
        let pair = fresh
            .iter()
            .enumerate()
            .find(|(i, candidate)| !consumed[*i] && value_eq(record, candidate));
        match pair {
            Some((i, candidate)) => {
                consumed[i] = true;
                kept.push(Arc::clone(record));
                duplicates.push(Arc::clone(candidate));
            }
            None => only_before.push(Arc::clone(record)),
        }
    }

    let only_after: Vec<Arc<Profile>> = fresh
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed[*i])
        .map(|(_, record)| Arc::clone(record))
        .collect();

    let mut to_delete = duplicates.clone();
    to_delete.extend(only_before.iter().cloned());

    Reconciliation {
        fresh,
        common_by_identity,
        kept,
        duplicates,
        only_before,
        only_after,
        to_delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, port: u16) -> Arc<Profile> {
        let mut profile = Profile::ss_construct(name, "example.com", port, "aes-256-gcm", "pw", None);
        profile.id = id;
        Arc::new(profile)
    }

    fn ids(records: &[Arc<Profile>]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_difference_by_identity_vs_value() {
        let a1 = record(1, "x", 1);
        let a2 = record(2, "x", 1); // same value, different identity
        let src = vec![Arc::clone(&a1)];
        let dst = vec![Arc::clone(&a2)];

        assert_eq!(ids(&difference(&src, &dst, identity_eq)), vec![1]);
        assert!(difference(&src, &dst, value_eq).is_empty());
    }

    #[test]
    fn test_reconcile_update_scenario() {
        // before = {A, B}, freshly parsed = {A', C} with A' value-equal to A
        let a = record(1, "x", 1);
        let b = record(2, "y", 2);
        let a_prime = record(3, "x", 1);
        let c = record(4, "z", 3);

        let before = vec![Arc::clone(&a), Arc::clone(&b)];
        let after = vec![Arc::clone(&a_prime), Arc::clone(&c)];

        let outcome = reconcile(&before, &after);

        assert_eq!(ids(&outcome.only_before), vec![2]);
        assert_eq!(ids(&outcome.only_after), vec![4]);
        assert_eq!(ids(&outcome.kept), vec![1]);
        assert_eq!(ids(&outcome.duplicates), vec![3]);
        assert_eq!(ids(&outcome.to_delete), vec![3, 2]);
    }

    #[test]
    fn test_reconcile_full_after_snapshot() {
        // The after snapshot normally still contains the before records
        let a = record(1, "x", 1);
        let b = record(2, "y", 2);
        let a_prime = record(3, "x", 1);
        let c = record(4, "z", 3);

        let before = vec![Arc::clone(&a), Arc::clone(&b)];
        let after = vec![
            Arc::clone(&a),
            Arc::clone(&b),
            Arc::clone(&a_prime),
            Arc::clone(&c),
        ];

        let outcome = reconcile(&before, &after);

        assert_eq!(ids(&outcome.fresh), vec![3, 4]);
        assert_eq!(ids(&outcome.common_by_identity), vec![1, 2]);
        assert_eq!(ids(&outcome.only_before), vec![2]);
        assert_eq!(ids(&outcome.only_after), vec![4]);
        assert_eq!(ids(&outcome.to_delete), vec![3, 2]);
    }

    #[test]
    fn test_reconcile_stable_content_deletes_only_fresh_duplicates() {
        // Re-parsing unchanged content re-creates every record by value
        let before: Vec<_> = (1..=3)
            .map(|i| record(i, &format!("node{}", i), i as u16))
            .collect();
        let reparsed: Vec<_> = (1..=3)
            .map(|i| record(i + 10, &format!("node{}", i), i as u16))
            .collect();

        let mut after = before.clone();
        after.extend(reparsed.iter().cloned());

        let outcome = reconcile(&before, &after);

        assert!(outcome.only_before.is_empty());
        assert!(outcome.only_after.is_empty());
        assert_eq!(ids(&outcome.kept), vec![1, 2, 3]);
        assert_eq!(ids(&outcome.to_delete), vec![11, 12, 13]);
        // Net group size is unchanged once to_delete is applied
        assert_eq!(after.len() - outcome.to_delete.len(), before.len());
    }

    #[test]
    fn test_reconcile_first_match_wins_on_duplicates() {
        // Two before records share one value; only one fresh counterpart
        let a1 = record(1, "x", 1);
        let a2 = record(2, "x", 1);
        let a_prime = record(3, "x", 1);

        let before = vec![Arc::clone(&a1), Arc::clone(&a2)];
        let after = vec![Arc::clone(&a_prime)];

        let outcome = reconcile(&before, &after);

        // a1 pairs first, a2 falls through to only_before
        assert_eq!(ids(&outcome.kept), vec![1]);
        assert_eq!(ids(&outcome.duplicates), vec![3]);
        assert_eq!(ids(&outcome.only_before), vec![2]);
        assert_eq!(ids(&outcome.to_delete), vec![3, 2]);
    }

    #[test]
    fn test_reconcile_consumes_each_fresh_record_once() {
        // One before record, two value-equal fresh records
        let a = record(1, "x", 1);
        let p1 = record(2, "x", 1);
        let p2 = record(3, "x", 1);

        let outcome = reconcile(
            &[Arc::clone(&a)],
            &[Arc::clone(&p1), Arc::clone(&p2)],
        );

        assert_eq!(ids(&outcome.duplicates), vec![2]);
        assert_eq!(ids(&outcome.only_after), vec![3]);
        assert_eq!(ids(&outcome.to_delete), vec![2]);
    }

    #[test]
    fn test_reconcile_empty_before_keeps_everything() {
        let c = record(1, "z", 3);
        let outcome = reconcile(&[], &[Arc::clone(&c)]);

        assert!(outcome.to_delete.is_empty());
        assert_eq!(ids(&outcome.only_after), vec![1]);
    }

    #[test]
    fn test_to_delete_never_overlaps_only_after() {
        let before: Vec<_> = (1..=4).map(|i| record(i, &format!("n{}", i % 3), 1)).collect();
        let after: Vec<_> = (5..=9).map(|i| record(i, &format!("n{}", i % 4), 1)).collect();

        let outcome = reconcile(&before, &after);

        for deleted in &outcome.to_delete {
            assert!(
                !outcome.only_after.iter().any(|kept| kept.id == deleted.id),
                "record {} both deleted and reported as added",
                deleted.id
            );
        }
    }
}
