//! Columns written as a side effect of completing a unit.
//!
//! Adding a side effect for another step is an edit to [`DERIVED_FIELDS`].

use chrono::NaiveDate;

use yumemaga_models::{UnitId, WorkflowKind};

/// Date format written into date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value written into a scope-level column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// The completion date.
    Today,
    /// A fixed label.
    Text(&'static str),
}

impl FieldValue {
    /// Renders the value for a completion happening on `today`.
    pub fn render(&self, today: NaiveDate) -> String {
        match self {
            FieldValue::Today => today.format(DATE_FORMAT).to_string(),
            FieldValue::Text(text) => (*text).to_string(),
        }
    }
}

/// One column write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUpdate {
    pub column: &'static str,
    pub value: FieldValue,
}

const fn on_today(column: &'static str) -> FieldUpdate {
    FieldUpdate {
        column,
        value: FieldValue::Today,
    }
}

const fn text(column: &'static str, value: &'static str) -> FieldUpdate {
    FieldUpdate {
        column,
        value: FieldValue::Text(value),
    }
}

/// Derived writes keyed by workflow kind and unit id.
pub const DERIVED_FIELDS: &[(WorkflowKind, &str, &[FieldUpdate])] = &[
    // 契約締結
    (WorkflowKind::Contract, "4", &[on_today("contract_date")]),
    // 請求書送付
    (WorkflowKind::Contract, "9", &[on_today("invoice_sent_date")]),
    // 入金確認
    (
        WorkflowKind::Contract,
        "10",
        &[
            on_today("payment_received_date"),
            text("payment_status", "入金済"),
        ],
    ),
];

/// The writes declared for completing `unit` in a workflow of `kind`.
pub fn derived_updates(kind: WorkflowKind, unit: &UnitId) -> &'static [FieldUpdate] {
    DERIVED_FIELDS
        .iter()
        .find(|(k, id, _)| *k == kind && *id == unit.as_str())
        .map(|(_, _, updates)| *updates)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_payment_step_writes_date_and_status() {
        let updates = derived_updates(WorkflowKind::Contract, &UnitId::from("10"));
        let rendered: Vec<(&str, String)> = updates
            .iter()
            .map(|u| (u.column, u.value.render(date(2025, 10, 15))))
            .collect();

        assert_eq!(
            rendered,
            vec![
                ("payment_received_date", "2025-10-15".to_string()),
                ("payment_status", "入金済".to_string()),
            ]
        );
    }

    #[test]
    fn test_plain_step_has_no_updates() {
        assert!(derived_updates(WorkflowKind::Contract, &UnitId::from("2")).is_empty());
    }

    #[test]
    fn test_kind_is_part_of_the_key() {
        assert!(derived_updates(WorkflowKind::Production, &UnitId::from("10")).is_empty());
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        for (i, (kind, id, _)) in DERIVED_FIELDS.iter().enumerate() {
            let dupes = DERIVED_FIELDS[i + 1..]
                .iter()
                .filter(|(k, other, _)| k == kind && other == id)
                .count();
            assert_eq!(dupes, 0, "duplicate entry for {:?} {}", kind, id);
        }
    }
}
