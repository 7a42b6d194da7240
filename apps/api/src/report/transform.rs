use crate::groups::models::{Account, Bureau};
use crate::report::models::{
    AccountCell, AccountRow, BureauTriple, FieldRow, InquiryRow, PublicRecordRow, RawAccount,
    RawCreditReport, RawCreditSummary, RawInquiry, RawPersonalInfo, RawPublicRecord,
    TransformedReport, NOT_AVAILABLE,
};

/// Entry point: composes all five section transforms with full default
/// fallback. Absent or undecodable input degrades to an all-empty report;
/// nothing in here can fail.
pub fn transform_credit_report_data(raw: Option<RawCreditReport>) -> TransformedReport {
    let Some(raw) = raw else {
        return TransformedReport::default();
    };
    TransformedReport {
        personal_info: transform_personal_info(&raw.personal_info),
        credit_summary: transform_credit_summary(&raw.credit_summary),
        inquiries: transform_inquiries(&raw.inquiries),
        account_info: transform_account_info(&raw.account_info),
        public_records: transform_public_records(&raw.public_records),
    }
}

pub fn transform_personal_info(triple: &BureauTriple<RawPersonalInfo>) -> Vec<FieldRow> {
    let fields: [(&str, fn(&RawPersonalInfo) -> Option<&String>); 7] = [
        ("Name", |p| p.name.as_ref()),
        ("Also Known As", |p| p.also_known_as.as_ref()),
        ("Date of Birth", |p| p.date_of_birth.as_ref()),
        ("Current Address", |p| p.current_address.as_ref()),
        ("Previous Address", |p| p.previous_address.as_ref()),
        ("Employer", |p| p.employer.as_ref()),
        ("Credit Report Date", |p| p.credit_report_date.as_ref()),
    ];
    field_rows(triple, &fields)
}

pub fn transform_credit_summary(triple: &BureauTriple<RawCreditSummary>) -> Vec<FieldRow> {
    let fields: [(&str, fn(&RawCreditSummary) -> Option<&String>); 9] = [
        ("Total Accounts", |s| s.total_accounts.as_ref()),
        ("Open Accounts", |s| s.open_accounts.as_ref()),
        ("Closed Accounts", |s| s.closed_accounts.as_ref()),
        ("Delinquent", |s| s.delinquent_accounts.as_ref()),
        ("Derogatory", |s| s.derogatory_accounts.as_ref()),
        ("Balances", |s| s.total_balances.as_ref()),
        ("Payments", |s| s.monthly_payments.as_ref()),
        ("Inquiries (2 Years)", |s| s.inquiries_two_years.as_ref()),
        ("Public Records", |s| s.public_records.as_ref()),
    ];
    field_rows(triple, &fields)
}

/// Inquiries are matched across bureaus on (creditorName, dateOfInquiry);
/// each bureau's slot carries the type of business it reported.
pub fn transform_inquiries(triple: &BureauTriple<Vec<RawInquiry>>) -> Vec<InquiryRow> {
    let mut rows: Vec<InquiryRow> = Vec::new();
    for bureau in Bureau::ALL {
        let Some(list) = triple.get(bureau) else {
            continue;
        };
        for inquiry in list {
            let creditor = or_na(inquiry.creditor_name.as_ref());
            let date = or_na(inquiry.date_of_inquiry.as_ref());
            let value = or_na(inquiry.type_of_business.as_ref());
            let position = rows
                .iter()
                .position(|r| r.creditor_name == creditor && r.date_of_inquiry == date);
            match position {
                Some(i) => *rows[i].slot_mut(bureau) = value,
                None => {
                    let mut row = InquiryRow::new(creditor, date);
                    *row.slot_mut(bureau) = value;
                    rows.push(row);
                }
            }
        }
    }
    rows
}

/// Public records match across bureaus on (type, dateFiled); slots carry the
/// per-bureau status.
pub fn transform_public_records(triple: &BureauTriple<Vec<RawPublicRecord>>) -> Vec<PublicRecordRow> {
    let mut rows: Vec<PublicRecordRow> = Vec::new();
    for bureau in Bureau::ALL {
        let Some(list) = triple.get(bureau) else {
            continue;
        };
        for record in list {
            let record_type = or_na(record.record_type.as_ref());
            let date = or_na(record.date_filed.as_ref());
            let value = or_na(record.status.as_ref());
            let position = rows
                .iter()
                .position(|r| r.record_type == record_type && r.date_filed == date);
            match position {
                Some(i) => *rows[i].slot_mut(bureau) = value,
                None => {
                    let mut row = PublicRecordRow::new(record_type, date);
                    *row.slot_mut(bureau) = value;
                    rows.push(row);
                }
            }
        }
    }
    rows
}

/// Reconciles accounts across bureaus by exact `accountName` equality only.
/// Experian seeds rows, Equifax and TransUnion fill matching slots or start
/// new rows. This is a heuristic: accounts sharing a display name merge even
/// when they are different accounts, and the same account split across
/// differently formatted names stays split. Downstream letter generation
/// depends on this exact grouping.
pub fn transform_account_info(triple: &BureauTriple<Vec<RawAccount>>) -> Vec<AccountRow> {
    let mut rows: Vec<AccountRow> = Vec::new();
    for bureau in Bureau::ALL {
        let Some(list) = triple.get(bureau) else {
            continue;
        };
        for raw in list {
            let name = or_na(raw.account_name.as_ref());
            let cell = account_cell(raw);
            // A row only matches if its slot for this bureau is still open,
            // so two same-name accounts at one bureau each keep a row.
            let position = rows
                .iter()
                .position(|r| r.account_name == name && r.cell(bureau).is_none());
            match position {
                Some(i) => *rows[i].cell_mut(bureau) = Some(cell),
                None => {
                    let mut row = AccountRow::new(name);
                    *row.cell_mut(bureau) = Some(cell);
                    rows.push(row);
                }
            }
        }
    }
    rows
}

/// Flattens reconciled rows back into per-bureau accounts so an imported
/// report can seed the grouping store. Ids follow the
/// `"<accountNumber>-<bureau>"` convention.
pub fn accounts_from_rows(rows: &[AccountRow]) -> Vec<Account> {
    let mut accounts = Vec::new();
    for row in rows {
        for bureau in Bureau::ALL {
            let Some(cell) = row.cell(bureau) else {
                continue;
            };
            accounts.push(Account {
                id: format!("{}-{}", cell.account_number, bureau.as_str()),
                account_name: row.account_name.clone(),
                account_number: cell.account_number.clone(),
                bureau,
                account_type: known(&cell.account_type),
                account_status: known(&cell.account_status),
                balance: known(&cell.balance),
                date_opened: known(&cell.date_opened),
                created_at: None,
            });
        }
    }
    accounts
}

fn account_cell(raw: &RawAccount) -> AccountCell {
    AccountCell {
        account_number: or_na(raw.account_number.as_ref()),
        account_type: or_na(raw.account_type.as_ref()),
        account_status: or_na(raw.account_status.as_ref()),
        payment_status: or_na(raw.payment_status.as_ref()),
        balance: or_na(raw.balance.as_ref()),
        credit_limit: or_na(raw.credit_limit.as_ref()),
        date_opened: or_na(raw.date_opened.as_ref()),
        last_reported: or_na(raw.last_reported.as_ref()),
    }
}

fn field_rows<T>(
    triple: &BureauTriple<T>,
    fields: &[(&str, fn(&T) -> Option<&String>)],
) -> Vec<FieldRow> {
    fields
        .iter()
        .map(|(label, get)| FieldRow {
            field: label.to_string(),
            experian: slot(triple.experian.as_ref(), *get),
            equifax: slot(triple.equifax.as_ref(), *get),
            transunion: slot(triple.transunion.as_ref(), *get),
        })
        .collect()
}

fn slot<T>(section: Option<&T>, get: fn(&T) -> Option<&String>) -> String {
    section
        .and_then(get)
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn or_na(value: Option<&String>) -> String {
    value
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn known(value: &str) -> Option<String> {
    (value != NOT_AVAILABLE).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_account(name: &str, number: &str) -> RawAccount {
        RawAccount {
            account_name: Some(name.to_string()),
            account_number: Some(number.to_string()),
            balance: Some("$500".to_string()),
            ..RawAccount::default()
        }
    }

    #[test]
    fn test_none_input_is_all_empty() {
        let report = transform_credit_report_data(None);
        assert!(report.personal_info.is_empty());
        assert!(report.credit_summary.is_empty());
        assert!(report.inquiries.is_empty());
        assert!(report.account_info.is_empty());
        assert!(report.public_records.is_empty());
    }

    #[test]
    fn test_undecodable_payload_degrades_to_empty() {
        // accountInfo should be an object keyed by bureau, not a number
        let parsed =
            serde_json::from_value::<RawCreditReport>(json!({"accountInfo": 5})).ok();
        let report = transform_credit_report_data(parsed);
        assert_eq!(report, TransformedReport::default());
    }

    #[test]
    fn test_empty_payload_yields_defaulted_field_rows() {
        let parsed = serde_json::from_value::<RawCreditReport>(json!({})).unwrap();
        let report = transform_credit_report_data(Some(parsed));

        // Field rows are always emitted, every slot defaulted
        assert_eq!(report.personal_info.len(), 7);
        assert!(report
            .personal_info
            .iter()
            .all(|row| row.experian == NOT_AVAILABLE
                && row.equifax == NOT_AVAILABLE
                && row.transunion == NOT_AVAILABLE));
        assert!(report.account_info.is_empty());
    }

    #[test]
    fn test_personal_info_fills_reported_slots_only() {
        let triple = BureauTriple {
            experian: Some(RawPersonalInfo {
                name: Some("JOHN Q CONSUMER".to_string()),
                ..RawPersonalInfo::default()
            }),
            equifax: None,
            transunion: Some(RawPersonalInfo {
                name: Some("JOHN CONSUMER".to_string()),
                ..RawPersonalInfo::default()
            }),
        };
        let rows = transform_personal_info(&triple);

        let name_row = rows.iter().find(|r| r.field == "Name").unwrap();
        assert_eq!(name_row.experian, "JOHN Q CONSUMER");
        assert_eq!(name_row.equifax, NOT_AVAILABLE);
        assert_eq!(name_row.transunion, "JOHN CONSUMER");
    }

    #[test]
    fn test_accounts_merge_on_exact_name_match() {
        let triple = BureauTriple {
            experian: Some(vec![raw_account("CHASE CARD", "4412**")]),
            equifax: Some(vec![raw_account("CHASE CARD", "990055**")]),
            transunion: Some(vec![raw_account("CHASE CARD", "7123**")]),
        };
        let rows = transform_account_info(&triple);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.experian.as_ref().unwrap().account_number, "4412**");
        assert_eq!(row.equifax.as_ref().unwrap().account_number, "990055**");
        assert_eq!(row.transunion.as_ref().unwrap().account_number, "7123**");
    }

    #[test]
    fn test_accounts_split_on_formatting_difference() {
        // Same logical account, different display names: stays split
        let triple = BureauTriple {
            experian: Some(vec![raw_account("Chase Card", "4412**")]),
            equifax: Some(vec![raw_account("CHASE CARD", "990055**")]),
            transunion: None,
        };
        let rows = transform_account_info(&triple);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_same_bureau_name_collision_keeps_both_rows() {
        let triple = BureauTriple {
            experian: Some(vec![
                raw_account("US BANK", "1111**"),
                raw_account("US BANK", "2222**"),
            ]),
            equifax: None,
            transunion: None,
        };
        let rows = transform_account_info(&triple);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].experian.as_ref().unwrap().account_number, "1111**");
        assert_eq!(rows[1].experian.as_ref().unwrap().account_number, "2222**");
    }

    #[test]
    fn test_missing_account_fields_default_to_na() {
        let triple = BureauTriple {
            experian: Some(vec![RawAccount {
                account_name: Some("US BANK".to_string()),
                ..RawAccount::default()
            }]),
            equifax: None,
            transunion: None,
        };
        let rows = transform_account_info(&triple);
        let cell = rows[0].experian.as_ref().unwrap();
        assert_eq!(cell.account_number, NOT_AVAILABLE);
        assert_eq!(cell.balance, NOT_AVAILABLE);
    }

    #[test]
    fn test_inquiries_matched_by_creditor_and_date() {
        let inquiry = |creditor: &str, date: &str, business: &str| RawInquiry {
            creditor_name: Some(creditor.to_string()),
            date_of_inquiry: Some(date.to_string()),
            type_of_business: Some(business.to_string()),
        };
        let triple = BureauTriple {
            experian: Some(vec![inquiry("SYNCB", "2023-08-01", "Bank")]),
            equifax: Some(vec![
                inquiry("SYNCB", "2023-08-01", "Finance"),
                inquiry("SYNCB", "2023-11-15", "Finance"),
            ]),
            transunion: None,
        };
        let rows = transform_inquiries(&triple);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].experian, "Bank");
        assert_eq!(rows[0].equifax, "Finance");
        assert_eq!(rows[1].experian, NOT_AVAILABLE);
    }

    #[test]
    fn test_public_records_slot_by_bureau() {
        let record = |status: &str| RawPublicRecord {
            record_type: Some("Bankruptcy".to_string()),
            status: Some(status.to_string()),
            date_filed: Some("2020-05-01".to_string()),
            ..RawPublicRecord::default()
        };
        let triple = BureauTriple {
            experian: Some(vec![record("Discharged")]),
            equifax: None,
            transunion: Some(vec![record("Dismissed")]),
        };
        let rows = transform_public_records(&triple);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].experian, "Discharged");
        assert_eq!(rows[0].equifax, NOT_AVAILABLE);
        assert_eq!(rows[0].transunion, "Dismissed");
    }

    #[test]
    fn test_accounts_from_rows_yields_per_bureau_accounts() {
        let triple = BureauTriple {
            experian: Some(vec![raw_account("CHASE CARD", "4412")]),
            equifax: Some(vec![raw_account("CHASE CARD", "9900")]),
            transunion: None,
        };
        let rows = transform_account_info(&triple);
        let accounts = accounts_from_rows(&rows);

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, "4412-Experian");
        assert_eq!(accounts[0].bureau, Bureau::Experian);
        assert_eq!(accounts[1].id, "9900-Equifax");
        assert_eq!(accounts[1].account_name, "CHASE CARD");
        assert_eq!(accounts[0].balance.as_deref(), Some("$500"));
        // "N/A" cells flatten back to absent fields
        assert_eq!(accounts[0].account_status, None);
    }
}
