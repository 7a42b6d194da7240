#![allow(dead_code)]

use std::sync::Arc;

use tracing::warn;

use crate::disputes::models::DisputeItem;
use crate::disputes::snapshot::SnapshotStore;
use crate::groups::models::{AccountGroups, Bureau};
use crate::groups::store::AccountGroupStore;

/// The user's current working set of flagged dispute items.
///
/// Holds a cached copy of the client's account-group partition so each item's
/// `group_name` can be resolved at insert time. Every mutation rewrites the
/// full durable snapshot; last write wins, no debouncing.
pub struct DisputeItemRegistry {
    items: Vec<DisputeItem>,
    account_groups: Option<AccountGroups>,
    snapshot: Arc<dyn SnapshotStore>,
}

impl DisputeItemRegistry {
    pub fn new(snapshot: Arc<dyn SnapshotStore>) -> Self {
        Self {
            items: Vec::new(),
            account_groups: None,
            snapshot,
        }
    }

    /// Restores the working set from the durable snapshot.
    pub fn restore(snapshot: Arc<dyn SnapshotStore>) -> Self {
        let items = snapshot.load();
        Self {
            items,
            account_groups: None,
            snapshot,
        }
    }

    pub fn items(&self) -> &[DisputeItem] {
        &self.items
    }

    /// Refreshes the cached partition from the store. A failed fetch is
    /// logged and leaves the cached view stale but available.
    pub async fn load_account_groups(&mut self, store: &AccountGroupStore, email: &str) {
        match store.get(email).await {
            Ok(groups) => self.account_groups = groups,
            Err(e) => warn!("failed to refresh account groups for {email}: {e}"),
        }
    }

    pub fn set_account_groups(&mut self, groups: AccountGroups) {
        self.account_groups = Some(groups);
    }

    /// Upserts by `id`. When the item names both an account number and a
    /// bureau, `group_name` is recomputed from the cached partition.
    pub fn add_or_update(&mut self, mut item: DisputeItem) {
        self.resolve_group_name(&mut item);
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
        self.persist();
    }

    /// Append-only batch insert: items whose `id` is already present are
    /// skipped, not updated. The single-item path upserts instead; the
    /// asymmetry matches the shipped behavior and is pinned by tests.
    pub fn add_multiple(&mut self, items: Vec<DisputeItem>) {
        for mut item in items {
            if self.items.iter().any(|existing| existing.id == item.id) {
                continue;
            }
            self.resolve_group_name(&mut item);
            self.items.push(item);
        }
        self.persist();
    }

    /// No-op when the id is absent.
    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Empties the working set and the durable snapshot.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.snapshot.clear() {
            warn!("failed to clear dispute snapshot: {e}");
        }
    }

    /// Explicit snapshot of the current working set.
    pub fn save(&self) {
        self.persist();
    }

    /// Replaces the working set from the durable snapshot. Missing or corrupt
    /// data loads as empty.
    pub fn load(&mut self) {
        self.items = self.snapshot.load();
    }

    /// Scans groups in display order; the first `(accountNumber, bureau)`
    /// match wins. Duplicate accounts across groups therefore resolve to the
    /// earliest group in `group_order`.
    pub fn group_name_for_account(&self, account_number: &str, bureau: Bureau) -> Option<&str> {
        let partition = self.account_groups.as_ref()?;
        for name in &partition.group_order {
            let Some(accounts) = partition.groups.get(name) else {
                continue;
            };
            if accounts
                .iter()
                .any(|a| a.account_number == account_number && a.bureau == bureau)
            {
                return Some(name.as_str());
            }
        }
        None
    }

    fn resolve_group_name(&self, item: &mut DisputeItem) {
        if let Some(bureau) = item.bureau {
            if !item.account.is_empty() {
                item.group_name = self
                    .group_name_for_account(&item.account, bureau)
                    .map(String::from);
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.snapshot.save(&self.items) {
            warn!("failed to persist dispute items: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disputes::snapshot::MemorySnapshotStore;
    use crate::groups::models::Account;
    use crate::groups::repository::{GroupsRepository, InMemoryGroupsRepository};
    use anyhow::anyhow;
    use async_trait::async_trait;

    fn acct(number: &str, name: &str, bureau: Bureau) -> Account {
        Account {
            id: format!("{number}-{}", bureau.as_str()),
            account_name: name.to_string(),
            account_number: number.to_string(),
            bureau,
            account_type: None,
            account_status: None,
            balance: None,
            date_opened: None,
            created_at: None,
        }
    }

    fn item(id: &str, account: &str, bureau: Option<Bureau>) -> DisputeItem {
        DisputeItem {
            id: id.to_string(),
            creditor: "Midland Credit".to_string(),
            account: account.to_string(),
            date_opened: "2021-03-01".to_string(),
            balance: "$540".to_string(),
            item_type: "Collection".to_string(),
            disputed: true,
            has_experian: bureau == Some(Bureau::Experian),
            has_equifax: bureau == Some(Bureau::Equifax),
            has_transunion: bureau == Some(Bureau::TransUnion),
            group_name: None,
            bureau,
        }
    }

    /// Partition with "Collections" holding account 1234 at Experian.
    fn partition() -> AccountGroups {
        let mut groups = AccountGroups::new("client@example.com");
        groups.groups.insert(
            "Collections".to_string(),
            vec![acct("1234", "Midland Credit", Bureau::Experian)],
        );
        groups.group_order.push("Collections".to_string());
        groups
    }

    fn registry() -> DisputeItemRegistry {
        let mut registry = DisputeItemRegistry::new(Arc::new(MemorySnapshotStore::new()));
        registry.set_account_groups(partition());
        registry
    }

    #[test]
    fn test_add_or_update_resolves_group_name() {
        let mut registry = registry();
        registry.add_or_update(item("a1-Experian", "1234", Some(Bureau::Experian)));

        let stored = &registry.items()[0];
        assert_eq!(stored.group_name.as_deref(), Some("Collections"));
    }

    #[test]
    fn test_add_or_update_upserts_by_id() {
        let mut registry = registry();
        registry.add_or_update(item("a1-Experian", "1234", Some(Bureau::Experian)));

        let mut updated = item("a1-Experian", "1234", Some(Bureau::Experian));
        updated.balance = "$0".to_string();
        registry.add_or_update(updated);

        assert_eq!(registry.items().len(), 1);
        assert_eq!(registry.items()[0].balance, "$0");
    }

    #[test]
    fn test_no_match_clears_derived_group_name() {
        let mut registry = registry();
        let mut flagged = item("a9-Equifax", "9999", Some(Bureau::Equifax));
        flagged.group_name = Some("Stale".to_string());
        registry.add_or_update(flagged);

        assert_eq!(registry.items()[0].group_name, None);
    }

    #[test]
    fn test_missing_bureau_leaves_group_name_untouched() {
        let mut registry = registry();
        let mut flagged = item("a1", "1234", None);
        flagged.group_name = Some("Hand-picked".to_string());
        registry.add_or_update(flagged);

        assert_eq!(registry.items()[0].group_name.as_deref(), Some("Hand-picked"));
    }

    #[test]
    fn test_add_multiple_does_not_update_existing() {
        let mut registry = registry();
        registry.add_or_update(item("a1-Experian", "1234", Some(Bureau::Experian)));
        let original_balance = registry.items()[0].balance.clone();

        let mut overlapping = item("a1-Experian", "1234", Some(Bureau::Experian));
        overlapping.balance = "$9999".to_string();
        registry.add_multiple(vec![
            overlapping,
            item("a2-Equifax", "5678", Some(Bureau::Equifax)),
        ]);

        assert_eq!(registry.items().len(), 2);
        assert_eq!(registry.items()[0].balance, original_balance);
    }

    #[test]
    fn test_first_match_follows_group_order() {
        let mut registry = DisputeItemRegistry::new(Arc::new(MemorySnapshotStore::new()));
        // The same (number, bureau) pair appears in two groups; the earlier
        // entry in group_order wins.
        let mut groups = AccountGroups::new("client@example.com");
        groups.groups.insert(
            "First".to_string(),
            vec![acct("1234", "Midland Credit", Bureau::Experian)],
        );
        groups.groups.insert(
            "Second".to_string(),
            vec![acct("1234", "Midland Credit", Bureau::Experian)],
        );
        groups.group_order.push("First".to_string());
        groups.group_order.push("Second".to_string());
        registry.set_account_groups(groups);

        assert_eq!(
            registry.group_name_for_account("1234", Bureau::Experian),
            Some("First")
        );
    }

    #[test]
    fn test_bureau_must_match_too() {
        let registry = registry();
        assert_eq!(registry.group_name_for_account("1234", Bureau::Equifax), None);
    }

    #[test]
    fn test_remove_is_noop_for_unknown_id() {
        let mut registry = registry();
        registry.add_or_update(item("a1-Experian", "1234", Some(Bureau::Experian)));
        registry.remove("ghost");
        assert_eq!(registry.items().len(), 1);
    }

    #[test]
    fn test_clear_empties_registry_and_snapshot() {
        let snapshot = Arc::new(MemorySnapshotStore::new());
        let mut registry = DisputeItemRegistry::new(snapshot.clone());
        registry.add_or_update(item("a1-Experian", "1234", Some(Bureau::Experian)));
        assert!(!snapshot.is_empty());

        registry.clear();
        assert!(registry.items().is_empty());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_restore_round_trips_through_snapshot() {
        let snapshot = Arc::new(MemorySnapshotStore::new());
        let mut registry = DisputeItemRegistry::new(snapshot.clone());
        registry.add_or_update(item("a1-Experian", "1234", Some(Bureau::Experian)));
        registry.add_or_update(item("a2-Equifax", "5678", Some(Bureau::Equifax)));
        let saved = registry.items().to_vec();

        let restored = DisputeItemRegistry::restore(snapshot);
        assert_eq!(restored.items(), saved.as_slice());
    }

    struct FailingRepository;

    #[async_trait]
    impl GroupsRepository for FailingRepository {
        async fn fetch(&self, _email: &str) -> anyhow::Result<Option<AccountGroups>> {
            Err(anyhow!("backend unreachable"))
        }

        async fn upsert(&self, _aggregate: &AccountGroups) -> anyhow::Result<()> {
            Err(anyhow!("backend unreachable"))
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_stale_partition() {
        let mut registry = registry();
        let failing = AccountGroupStore::new(Arc::new(FailingRepository));

        registry
            .load_account_groups(&failing, "client@example.com")
            .await;

        // The stale view still resolves group names
        assert_eq!(
            registry.group_name_for_account("1234", Bureau::Experian),
            Some("Collections")
        );
    }

    #[tokio::test]
    async fn test_successful_fetch_replaces_partition() {
        let repo = Arc::new(InMemoryGroupsRepository::new());
        let store = AccountGroupStore::new(repo);
        store.create("client@example.com").await.unwrap();

        let mut registry = registry();
        registry.load_account_groups(&store, "client@example.com").await;

        // Fresh partition has no "Collections" group
        assert_eq!(registry.group_name_for_account("1234", Bureau::Experian), None);
    }
}
