//! Upcoming milestones.
//!
//! Milestones are future-facing, so month/day planned dates resolve with
//! [`YearPolicy::Forward`]: `1/10` read in December means January next year.

use chrono::NaiveDate;
use serde::Serialize;

use yumemaga_models::{UnitId, UnitOfWork};

use crate::date::{resolve_planned, YearPolicy};
use crate::delay::days_between;

/// A unit's planned date seen from today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub unit_id: UnitId,
    pub name: String,
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Open units due today or later, soonest first.
///
/// With `window_days`, only milestones at most that many days out are kept.
/// Completed units and units without a usable date are skipped.
pub fn upcoming(units: &[UnitOfWork], today: NaiveDate, window_days: Option<i64>) -> Vec<Milestone> {
    let mut milestones: Vec<Milestone> = units
        .iter()
        .filter(|u| !u.is_completed())
        .filter_map(|u| {
            let date = resolve_planned(u.planned_date.as_deref(), today, YearPolicy::Forward)?;
            let days_until = -days_between(date, today);
            Some(Milestone {
                unit_id: u.id.clone(),
                name: u.name.clone(),
                date,
                days_until,
            })
        })
        .filter(|m| m.days_until >= 0)
        .filter(|m| window_days.map_or(true, |w| m.days_until <= w))
        .collect();

    milestones.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.unit_id.cmp(&b.unit_id)));
    milestones
}

/// The soonest open milestone.
pub fn next_milestone(units: &[UnitOfWork], today: NaiveDate) -> Option<Milestone> {
    upcoming(units, today, None).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yumemaga_models::UnitStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_milestone_soonest_open() {
        let today = date(2025, 10, 15);
        let units = vec![
            UnitOfWork::new("A-1", "Plan").with_planned_date("2025-10-20"),
            UnitOfWork::new("A-2", "Shoot").with_planned_date("10/17"),
            UnitOfWork::new("A-3", "Print")
                .with_status(UnitStatus::Completed)
                .with_planned_date("10/16"),
            UnitOfWork::new("A-4", "Draft").with_planned_date("-"),
        ];

        let next = next_milestone(&units, today).unwrap();
        assert_eq!(next.unit_id.as_str(), "A-2");
        assert_eq!(next.days_until, 2);
    }

    #[test]
    fn test_year_end_rollover() {
        let today = date(2025, 12, 20);
        let units = vec![UnitOfWork::new("A-1", "New year issue").with_planned_date("1/10")];

        let next = next_milestone(&units, today).unwrap();
        assert_eq!(next.date, date(2026, 1, 10));
        assert_eq!(next.days_until, 21);
    }

    #[test]
    fn test_past_dates_excluded() {
        let today = date(2025, 10, 15);
        let units = vec![UnitOfWork::new("A-1", "Late").with_planned_date("2025-10-01")];
        assert!(next_milestone(&units, today).is_none());
    }

    #[test]
    fn test_due_today_included() {
        let today = date(2025, 10, 15);
        let units = vec![UnitOfWork::new("A-1", "Today").with_planned_date("10/15")];
        assert_eq!(next_milestone(&units, today).unwrap().days_until, 0);
    }

    #[test]
    fn test_window() {
        let today = date(2025, 10, 15);
        let units = vec![
            UnitOfWork::new("A-1", "Soon").with_planned_date("2025-10-18"),
            UnitOfWork::new("A-2", "Later").with_planned_date("2025-11-30"),
        ];

        assert_eq!(upcoming(&units, today, Some(7)).len(), 1);
        assert_eq!(upcoming(&units, today, None).len(), 2);
    }
}
