use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::StoreError;
use crate::groups::models::{Account, AccountGroups, SortOrder, UNGROUPED};
use crate::groups::repository::GroupsRepository;

/// Owns the canonical group partition per client.
///
/// Every mutation re-reads the aggregate, applies the change in memory, and
/// replaces the stored copy. Last write wins; there is no versioning or
/// conflict detection.
#[derive(Clone)]
pub struct AccountGroupStore {
    repo: Arc<dyn GroupsRepository>,
}

impl AccountGroupStore {
    pub fn new(repo: Arc<dyn GroupsRepository>) -> Self {
        Self { repo }
    }

    /// Idempotently initializes a client's aggregate with an empty default
    /// bucket. Returns the existing aggregate unchanged if one is present.
    pub async fn create(&self, email: &str) -> Result<AccountGroups, StoreError> {
        if let Some(existing) = self.repo.fetch(email).await? {
            return Ok(existing);
        }
        let aggregate = AccountGroups::new(email);
        self.repo.upsert(&aggregate).await?;
        info!("initialized account groups for {email}");
        Ok(aggregate)
    }

    /// Absence is not an error: callers treat `None` as "no groups yet".
    pub async fn get(&self, email: &str) -> Result<Option<AccountGroups>, StoreError> {
        Ok(self.repo.fetch(email).await?)
    }

    /// Full replace. Rejects a `group_order` that is not a permutation of the
    /// group names instead of trusting the caller.
    pub async fn update(
        &self,
        email: &str,
        groups: BTreeMap<String, Vec<Account>>,
        group_order: Vec<String>,
    ) -> Result<AccountGroups, StoreError> {
        let aggregate = AccountGroups {
            email: email.to_string(),
            groups,
            group_order,
        };
        if !aggregate.is_consistent() {
            return Err(StoreError::Validation(
                "groupOrder must be a permutation of the group names".to_string(),
            ));
        }
        self.repo.upsert(&aggregate).await?;
        Ok(aggregate)
    }

    /// Appends an empty group to the partition and to the display order.
    pub async fn create_group(
        &self,
        email: &str,
        group_name: &str,
    ) -> Result<AccountGroups, StoreError> {
        self.create_group_with(email, group_name, Vec::new()).await
    }

    /// Like `create_group`, but seeds membership from a caller-supplied list.
    /// Seeded accounts are pulled out of any group that already holds them, so
    /// membership stays exclusive.
    pub async fn create_custom_group(
        &self,
        email: &str,
        group_name: &str,
        accounts: Vec<Account>,
    ) -> Result<AccountGroups, StoreError> {
        self.create_group_with(email, group_name, accounts).await
    }

    async fn create_group_with(
        &self,
        email: &str,
        group_name: &str,
        accounts: Vec<Account>,
    ) -> Result<AccountGroups, StoreError> {
        let mut aggregate = self.load(email).await?;
        if aggregate.groups.contains_key(group_name) {
            return Err(StoreError::DuplicateGroup(group_name.to_string()));
        }
        for members in aggregate.groups.values_mut() {
            members.retain(|existing| !accounts.iter().any(|a| a.id == existing.id));
        }
        aggregate.groups.insert(group_name.to_string(), accounts);
        aggregate.group_order.push(group_name.to_string());
        self.repo.upsert(&aggregate).await?;
        info!("created group '{group_name}' for {email}");
        Ok(aggregate)
    }

    /// Renames a group, preserving membership and position in the order.
    pub async fn rename_group(
        &self,
        email: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<AccountGroups, StoreError> {
        let mut aggregate = self.load(email).await?;
        if !aggregate.groups.contains_key(old_name) {
            return Err(StoreError::NotFound(format!("group '{old_name}'")));
        }
        if aggregate.groups.contains_key(new_name) {
            return Err(StoreError::DuplicateGroup(new_name.to_string()));
        }
        let members = aggregate.groups.remove(old_name).unwrap_or_default();
        aggregate.groups.insert(new_name.to_string(), members);
        for slot in aggregate.group_order.iter_mut() {
            if slot == old_name {
                *slot = new_name.to_string();
            }
        }
        self.repo.upsert(&aggregate).await?;
        Ok(aggregate)
    }

    /// Deletes a group. Members are reassigned to `target_group` when given
    /// (which must exist), otherwise appended to the default bucket, created
    /// on demand.
    pub async fn delete_group(
        &self,
        email: &str,
        group_name: &str,
        target_group: Option<&str>,
    ) -> Result<AccountGroups, StoreError> {
        let mut aggregate = self.load(email).await?;
        if let Some(target) = target_group {
            if !aggregate.groups.contains_key(target) {
                return Err(StoreError::NotFound(format!("target group '{target}'")));
            }
        }
        let members = aggregate
            .groups
            .remove(group_name)
            .ok_or_else(|| StoreError::NotFound(format!("group '{group_name}'")))?;
        aggregate.group_order.retain(|name| name != group_name);

        if !members.is_empty() {
            let target = target_group.unwrap_or(UNGROUPED).to_string();
            if !aggregate.groups.contains_key(&target) {
                aggregate.groups.insert(target.clone(), Vec::new());
                aggregate.group_order.push(target.clone());
            }
            if let Some(bucket) = aggregate.groups.get_mut(&target) {
                bucket.extend(members);
            }
        }
        self.repo.upsert(&aggregate).await?;
        info!("deleted group '{group_name}' for {email}");
        Ok(aggregate)
    }

    /// Moves one account between groups, inserting at `new_index` clamped to
    /// the target's length.
    pub async fn move_account(
        &self,
        email: &str,
        account_id: &str,
        source_group: &str,
        target_group: &str,
        new_index: usize,
    ) -> Result<AccountGroups, StoreError> {
        let mut aggregate = self.load(email).await?;
        if !aggregate.groups.contains_key(target_group) {
            return Err(StoreError::NotFound(format!("group '{target_group}'")));
        }
        let source = aggregate
            .groups
            .get_mut(source_group)
            .ok_or_else(|| StoreError::NotFound(format!("group '{source_group}'")))?;
        let position = source
            .iter()
            .position(|account| account.id == account_id)
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "account '{account_id}' in group '{source_group}'"
                ))
            })?;
        let account = source.remove(position);
        if let Some(target) = aggregate.groups.get_mut(target_group) {
            let index = new_index.min(target.len());
            target.insert(index, account);
        }
        self.repo.upsert(&aggregate).await?;
        Ok(aggregate)
    }

    /// Re-sorts the display order by the most recent member timestamp.
    /// Groups whose accounts carry no timestamp keep their current relative
    /// position (stable sort) and rank after timestamped groups. Accounts
    /// inside each group are re-sorted the same way.
    pub async fn reorder_all_groups(
        &self,
        email: &str,
        sort_order: SortOrder,
    ) -> Result<AccountGroups, StoreError> {
        let mut aggregate = self.load(email).await?;

        let mut order = aggregate.group_order.clone();
        order.sort_by(|a, b| {
            compare_timestamps(
                newest_member(&aggregate, a),
                newest_member(&aggregate, b),
                sort_order,
            )
        });
        aggregate.group_order = order;

        for members in aggregate.groups.values_mut() {
            members.sort_by(|a, b| compare_timestamps(a.created_at, b.created_at, sort_order));
        }

        self.repo.upsert(&aggregate).await?;
        Ok(aggregate)
    }

    async fn load(&self, email: &str) -> Result<AccountGroups, StoreError> {
        self.repo
            .fetch(email)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("no account groups for '{email}'")))
    }
}

fn newest_member(aggregate: &AccountGroups, group_name: &str) -> Option<DateTime<Utc>> {
    aggregate
        .groups
        .get(group_name)
        .and_then(|members| members.iter().filter_map(|a| a.created_at).max())
}

/// Missing timestamps always rank last, whichever direction is requested, so
/// untimestamped entries never jump ahead of dated ones.
fn compare_timestamps(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    sort_order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match sort_order {
            SortOrder::Newest => b.cmp(&a),
            SortOrder::Oldest => a.cmp(&b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
