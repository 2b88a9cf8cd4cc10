//! Delay calculation.
//!
//! The calculator never decides whether a unit is `delayed`; that status is
//! set upstream. It only measures how late a unit is against its planned
//! date. Delay checks look backward, so month/day dates resolve with
//! [`YearPolicy::Current`].

use chrono::NaiveDate;
use serde::Serialize;

use yumemaga_models::{UnitId, UnitOfWork, UnitStatus};

use crate::date::{PlannedDate, YearPolicy};

/// Whole days from `planned` to `today`. Negative when `planned` is ahead.
pub fn days_between(planned: NaiveDate, today: NaiveDate) -> i64 {
    (today - planned).num_days()
}

fn planned_for_delay(unit: &UnitOfWork, today: NaiveDate) -> Option<NaiveDate> {
    PlannedDate::parse(unit.planned_date.as_deref()?).resolve(today, YearPolicy::Current)
}

/// How late one unit is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayReport {
    pub unit_id: UnitId,
    pub name: String,
    pub planned: NaiveDate,
    /// Days past the planned date, at least 1 when `flagged`.
    pub delay_days: i64,
    /// The unit's recorded status is `delayed`.
    pub flagged: bool,
}

/// Derived delay for a unit, or `None` when it is not evaluated.
///
/// Completed units and units without a usable planned date are not
/// evaluated. The value is `max(0, today - planned)`, raised to 1 for units
/// whose status is already `delayed`.
pub fn delay_days(unit: &UnitOfWork, today: NaiveDate) -> Option<i64> {
    if unit.is_completed() {
        return None;
    }

    let planned = planned_for_delay(unit, today)?;
    let days = days_between(planned, today).max(0);

    if unit.status == UnitStatus::Delayed {
        Some(days.max(1))
    } else {
        Some(days)
    }
}

/// Reports a unit that is past due or flagged delayed.
pub fn evaluate(unit: &UnitOfWork, today: NaiveDate) -> Option<DelayReport> {
    let days = delay_days(unit, today)?;
    let flagged = unit.status == UnitStatus::Delayed;

    if days == 0 && !flagged {
        return None;
    }

    let planned = planned_for_delay(unit, today)?;

    Some(DelayReport {
        unit_id: unit.id.clone(),
        name: unit.name.clone(),
        planned,
        delay_days: days,
        flagged,
    })
}

/// All late units, most overdue first, ties by unit id.
pub fn delays(units: &[UnitOfWork], today: NaiveDate) -> Vec<DelayReport> {
    let mut reports: Vec<DelayReport> = units.iter().filter_map(|u| evaluate(u, today)).collect();
    reports.sort_by(|a, b| {
        b.delay_days
            .cmp(&a.delay_days)
            .then_with(|| a.unit_id.cmp(&b.unit_id))
    });
    reports
}
