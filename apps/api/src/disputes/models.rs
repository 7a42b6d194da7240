#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::groups::models::Bureau;

/// A user-flagged intent to dispute one account at one bureau.
///
/// `group_name` is derived from the account-group partition, never
/// authoritative; the registry recomputes it on every add or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeItem {
    /// Caller-supplied key, `"<accountId>-<bureau>"` by convention.
    pub id: String,
    pub creditor: String,
    /// Account number at the flagged bureau.
    pub account: String,
    pub date_opened: String,
    pub balance: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub disputed: bool,
    pub has_experian: bool,
    pub has_equifax: bool,
    #[serde(rename = "hasTransUnion")]
    pub has_transunion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bureau: Option<Bureau>,
}
