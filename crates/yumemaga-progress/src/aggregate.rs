//! Progress aggregation over a collection of units.
//!
//! Pure functions: the same units always produce the same summary, and
//! nothing here reads the clock.

use std::collections::BTreeMap;

use serde::Serialize;

use yumemaga_models::{UnitOfWork, UnitStatus};

/// Units per status bucket. Every unit lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub delayed: usize,
}

impl StatusCounts {
    /// Counts one unit with the given status.
    pub fn record(&mut self, status: UnitStatus) {
        match status {
            UnitStatus::Completed => self.completed += 1,
            UnitStatus::InProgress => self.in_progress += 1,
            UnitStatus::NotStarted => self.not_started += 1,
            UnitStatus::Delayed => self.delayed += 1,
        }
    }

    /// Count for one bucket.
    pub fn get(&self, status: UnitStatus) -> usize {
        match status {
            UnitStatus::Completed => self.completed,
            UnitStatus::InProgress => self.in_progress,
            UnitStatus::NotStarted => self.not_started,
            UnitStatus::Delayed => self.delayed,
        }
    }

    /// Sum of all buckets.
    pub fn total(&self) -> usize {
        self.completed + self.in_progress + self.not_started + self.delayed
    }
}

/// Progress of a collection of units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total: usize,
    pub counts: StatusCounts,
    /// Completed share in whole percent.
    pub progress_rate: u8,
}

impl ProgressSummary {
    /// Builds a summary from bucket counts.
    pub fn from_counts(counts: StatusCounts) -> Self {
        let total = counts.total();
        Self {
            total,
            counts,
            progress_rate: progress_rate(counts.completed, total),
        }
    }

    /// Returns true when there is at least one unit and all are completed.
    pub fn is_done(&self) -> bool {
        self.total > 0 && self.counts.completed == self.total
    }
}

/// `round(completed / total * 100)`.
///
/// Exactly 100 when every unit is completed, 0 when there are no units.
pub fn progress_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    if completed >= total {
        return 100;
    }
    let rate = (completed as f64 / total as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}

/// Counts statuses.
pub fn count_statuses<I>(statuses: I) -> StatusCounts
where
    I: IntoIterator<Item = UnitStatus>,
{
    let mut counts = StatusCounts::default();
    for status in statuses {
        counts.record(status);
    }
    counts
}

/// Summarizes a collection of units.
pub fn summarize<'a, I>(units: I) -> ProgressSummary
where
    I: IntoIterator<Item = &'a UnitOfWork>,
{
    ProgressSummary::from_counts(count_statuses(units.into_iter().map(|u| u.status)))
}

/// Summarizes units grouped by [`UnitOfWork::category`].
pub fn summarize_by_category(units: &[UnitOfWork]) -> BTreeMap<String, ProgressSummary> {
    let mut groups: BTreeMap<String, StatusCounts> = BTreeMap::new();
    for unit in units {
        groups
            .entry(unit.category().to_string())
            .or_default()
            .record(unit.status);
    }
    groups
        .into_iter()
        .map(|(category, counts)| (category, ProgressSummary::from_counts(counts)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(statuses: &[UnitStatus]) -> Vec<UnitOfWork> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| UnitOfWork::new(format!("A-{}", i + 1), "unit").with_status(*s))
            .collect()
    }

    #[test]
    fn test_all_completed_is_exactly_100() {
        for n in 1..=200 {
            assert_eq!(progress_rate(n, n), 100, "n = {}", n);
        }
        assert_eq!(progress_rate(7, 7), 100);
    }

    #[test]
    fn test_zero_total_is_zero() {
        assert_eq!(progress_rate(0, 0), 0);
        let summary = summarize(&Vec::<UnitOfWork>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.progress_rate, 0);
        assert!(!summary.is_done());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(progress_rate(1, 3), 33);
        assert_eq!(progress_rate(2, 3), 67);
        assert_eq!(progress_rate(1, 8), 13);
        assert_eq!(progress_rate(0, 5), 0);
    }

    #[test]
    fn test_ten_of_ten() {
        let summary = summarize(&units(&[UnitStatus::Completed; 10]));

        assert_eq!(summary.progress_rate, 100);
        assert_eq!(
            summary.counts,
            StatusCounts {
                completed: 10,
                in_progress: 0,
                not_started: 0,
                delayed: 0
            }
        );
        assert!(summary.is_done());
    }

    #[test]
    fn test_buckets_are_exhaustive() {
        let all = [
            UnitStatus::Completed,
            UnitStatus::InProgress,
            UnitStatus::NotStarted,
            UnitStatus::Delayed,
        ];
        let mixed: Vec<UnitStatus> = (0..37).map(|i| all[(i * 7 + i / 3) % 4]).collect();
        let summary = summarize(&units(&mixed));

        assert_eq!(summary.total, 37);
        assert_eq!(summary.counts.total(), summary.total);
        for status in all {
            let expected = mixed.iter().filter(|s| **s == status).count();
            assert_eq!(summary.counts.get(status), expected);
        }
    }

    #[test]
    fn test_summarize_is_pure() {
        let set = units(&[UnitStatus::Completed, UnitStatus::Delayed, UnitStatus::InProgress]);
        assert_eq!(summarize(&set), summarize(&set.clone()));
    }

    #[test]
    fn test_summarize_by_category() {
        let set = vec![
            UnitOfWork::new("A-1", "a").with_status(UnitStatus::Completed),
            UnitOfWork::new("A-2", "b").with_status(UnitStatus::InProgress),
            UnitOfWork::new("B-1", "c").with_status(UnitStatus::Completed),
        ];
        let by_category = summarize_by_category(&set);

        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category["A"].progress_rate, 50);
        assert_eq!(by_category["B"].progress_rate, 100);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = summarize(&units(&[UnitStatus::InProgress]));
        let value = serde_json::to_value(summary).unwrap();

        assert_eq!(value["progressRate"], 0);
        assert_eq!(value["counts"]["inProgress"], 1);
    }
}
