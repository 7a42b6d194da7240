#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the default bucket accounts land in before the user sorts them.
pub const UNGROUPED: &str = "Ungrouped";

/// One of the three credit reporting agencies compared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bureau {
    Experian,
    Equifax,
    TransUnion,
}

impl Bureau {
    /// Fixed processing order: Experian seeds, Equifax and TransUnion follow.
    pub const ALL: [Bureau; 3] = [Bureau::Experian, Bureau::Equifax, Bureau::TransUnion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bureau::Experian => "Experian",
            Bureau::Equifax => "Equifax",
            Bureau::TransUnion => "TransUnion",
        }
    }
}

/// One bureau's report of a single credit account.
///
/// Identity is approximate: display rows join on `account_name`, while the
/// registry matches on `(account_number, bureau)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Caller-supplied stable handle, `"<accountNumber>-<bureau>"` by convention.
    pub id: String,
    pub account_name: String,
    pub account_number: String,
    pub bureau: Bureau,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_opened: Option<String>,
    /// Imported accounts do not always carry a timestamp; reordering falls
    /// back to the current group order when it is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sort direction for `reorder_all_groups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Newest,
    Oldest,
}

/// A client's full partition of accounts into named groups.
///
/// Invariants: group names are unique (map keys), `group_order` is a
/// permutation of those keys, and an account belongs to at most one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGroups {
    pub email: String,
    pub groups: BTreeMap<String, Vec<Account>>,
    pub group_order: Vec<String>,
}

impl AccountGroups {
    /// A fresh aggregate with a single empty default bucket.
    pub fn new(email: impl Into<String>) -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(UNGROUPED.to_string(), Vec::new());
        Self {
            email: email.into(),
            groups,
            group_order: vec![UNGROUPED.to_string()],
        }
    }

    /// True when `group_order` is a permutation of the group names: same
    /// length, no duplicates, every entry a known group.
    pub fn is_consistent(&self) -> bool {
        if self.group_order.len() != self.groups.len() {
            return false;
        }
        let mut seen = HashSet::new();
        self.group_order
            .iter()
            .all(|name| self.groups.contains_key(name) && seen.insert(name))
    }

    pub fn total_accounts(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_aggregate_is_consistent() {
        let ag = AccountGroups::new("a@b.com");
        assert!(ag.is_consistent());
        assert_eq!(ag.group_order, vec![UNGROUPED.to_string()]);
        assert_eq!(ag.total_accounts(), 0);
    }

    #[test]
    fn test_duplicate_order_entry_is_inconsistent() {
        let mut ag = AccountGroups::new("a@b.com");
        ag.groups.insert("Collections".to_string(), Vec::new());
        ag.group_order = vec![UNGROUPED.to_string(), UNGROUPED.to_string()];
        assert!(!ag.is_consistent());
    }

    #[test]
    fn test_unknown_order_entry_is_inconsistent() {
        let mut ag = AccountGroups::new("a@b.com");
        ag.group_order = vec!["Ghost".to_string()];
        assert!(!ag.is_consistent());
    }

    #[test]
    fn test_missing_order_entry_is_inconsistent() {
        let mut ag = AccountGroups::new("a@b.com");
        ag.groups.insert("Collections".to_string(), Vec::new());
        assert!(!ag.is_consistent());
    }
}
