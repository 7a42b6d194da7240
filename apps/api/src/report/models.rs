#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::groups::models::Bureau;

/// Placeholder for values a bureau did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// One value per bureau, keyed by the bureau display names on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BureauTriple<T> {
    #[serde(rename = "Experian", default, skip_serializing_if = "Option::is_none")]
    pub experian: Option<T>,
    #[serde(rename = "Equifax", default, skip_serializing_if = "Option::is_none")]
    pub equifax: Option<T>,
    #[serde(rename = "TransUnion", default, skip_serializing_if = "Option::is_none")]
    pub transunion: Option<T>,
}

impl<T> Default for BureauTriple<T> {
    fn default() -> Self {
        Self {
            experian: None,
            equifax: None,
            transunion: None,
        }
    }
}

impl<T> BureauTriple<T> {
    pub fn get(&self, bureau: Bureau) -> Option<&T> {
        match bureau {
            Bureau::Experian => self.experian.as_ref(),
            Bureau::Equifax => self.equifax.as_ref(),
            Bureau::TransUnion => self.transunion.as_ref(),
        }
    }
}

// Raw bureau payload sections. Every field is optional in practice, so the
// schema says so; defaulting happens once at the transform boundary.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPersonalInfo {
    pub name: Option<String>,
    pub also_known_as: Option<String>,
    pub date_of_birth: Option<String>,
    pub current_address: Option<String>,
    pub previous_address: Option<String>,
    pub employer: Option<String>,
    pub credit_report_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCreditSummary {
    pub total_accounts: Option<String>,
    pub open_accounts: Option<String>,
    pub closed_accounts: Option<String>,
    pub delinquent_accounts: Option<String>,
    pub derogatory_accounts: Option<String>,
    pub total_balances: Option<String>,
    pub monthly_payments: Option<String>,
    pub inquiries_two_years: Option<String>,
    pub public_records: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInquiry {
    pub creditor_name: Option<String>,
    pub type_of_business: Option<String>,
    pub date_of_inquiry: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPublicRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub status: Option<String>,
    pub date_filed: Option<String>,
    pub amount: Option<String>,
    pub court: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAccount {
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub account_status: Option<String>,
    pub payment_status: Option<String>,
    pub balance: Option<String>,
    pub credit_limit: Option<String>,
    pub date_opened: Option<String>,
    pub last_reported: Option<String>,
}

/// The full raw payload as imported: five sections, each keyed by bureau.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCreditReport {
    pub personal_info: BureauTriple<RawPersonalInfo>,
    pub credit_summary: BureauTriple<RawCreditSummary>,
    pub inquiries: BureauTriple<Vec<RawInquiry>>,
    pub account_info: BureauTriple<Vec<RawAccount>>,
    pub public_records: BureauTriple<Vec<RawPublicRecord>>,
}

// Normalized row types. One logical field (or account) per row, one value
// slot per bureau, defaults already applied.

/// One comparable field with a value slot per bureau.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldRow {
    pub field: String,
    pub experian: String,
    pub equifax: String,
    #[serde(rename = "transUnion")]
    pub transunion: String,
}

impl FieldRow {
    pub fn slot(&self, bureau: Bureau) -> &str {
        match bureau {
            Bureau::Experian => &self.experian,
            Bureau::Equifax => &self.equifax,
            Bureau::TransUnion => &self.transunion,
        }
    }
}

/// One inquiry; per-bureau slots carry the reported type of business.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRow {
    pub creditor_name: String,
    pub date_of_inquiry: String,
    pub experian: String,
    pub equifax: String,
    #[serde(rename = "transUnion")]
    pub transunion: String,
}

impl InquiryRow {
    pub fn new(creditor_name: String, date_of_inquiry: String) -> Self {
        Self {
            creditor_name,
            date_of_inquiry,
            experian: NOT_AVAILABLE.to_string(),
            equifax: NOT_AVAILABLE.to_string(),
            transunion: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn slot_mut(&mut self, bureau: Bureau) -> &mut String {
        match bureau {
            Bureau::Experian => &mut self.experian,
            Bureau::Equifax => &mut self.equifax,
            Bureau::TransUnion => &mut self.transunion,
        }
    }
}

/// One public record; per-bureau slots carry the reported status.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicRecordRow {
    pub record_type: String,
    pub date_filed: String,
    pub experian: String,
    pub equifax: String,
    #[serde(rename = "transUnion")]
    pub transunion: String,
}

impl PublicRecordRow {
    pub fn new(record_type: String, date_filed: String) -> Self {
        Self {
            record_type,
            date_filed,
            experian: NOT_AVAILABLE.to_string(),
            equifax: NOT_AVAILABLE.to_string(),
            transunion: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn slot_mut(&mut self, bureau: Bureau) -> &mut String {
        match bureau {
            Bureau::Experian => &mut self.experian,
            Bureau::Equifax => &mut self.equifax,
            Bureau::TransUnion => &mut self.transunion,
        }
    }
}

/// Per-bureau detail for one reconciled account row, defaults applied.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountCell {
    pub account_number: String,
    pub account_type: String,
    pub account_status: String,
    pub payment_status: String,
    pub balance: String,
    pub credit_limit: String,
    pub date_opened: String,
    pub last_reported: String,
}

/// One display row per logical account, joined across bureaus by exact
/// `accountName` equality. A bureau that did not report the account leaves
/// its slot empty.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountRow {
    pub account_name: String,
    pub experian: Option<AccountCell>,
    pub equifax: Option<AccountCell>,
    #[serde(rename = "transUnion")]
    pub transunion: Option<AccountCell>,
}

impl AccountRow {
    pub fn new(account_name: String) -> Self {
        Self {
            account_name,
            experian: None,
            equifax: None,
            transunion: None,
        }
    }

    pub fn cell(&self, bureau: Bureau) -> Option<&AccountCell> {
        match bureau {
            Bureau::Experian => self.experian.as_ref(),
            Bureau::Equifax => self.equifax.as_ref(),
            Bureau::TransUnion => self.transunion.as_ref(),
        }
    }

    pub fn cell_mut(&mut self, bureau: Bureau) -> &mut Option<AccountCell> {
        match bureau {
            Bureau::Experian => &mut self.experian,
            Bureau::Equifax => &mut self.equifax,
            Bureau::TransUnion => &mut self.transunion,
        }
    }
}

/// The normalized report: all five row lists, always present.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformedReport {
    pub personal_info: Vec<FieldRow>,
    pub credit_summary: Vec<FieldRow>,
    pub inquiries: Vec<InquiryRow>,
    pub account_info: Vec<AccountRow>,
    pub public_records: Vec<PublicRecordRow>,
}
