//! Unit filtering for queries.

use chrono::NaiveDate;

use yumemaga_models::{UnitOfWork, UnitStatus};

use crate::delay;

/// Filter criteria for selecting units.
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    /// Filter by status.
    pub status: Option<UnitStatus>,
    /// Filter by category.
    pub category: Option<String>,
    /// Keep only units late as of this date.
    pub overdue_on: Option<NaiveDate>,
}

impl UnitFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Keeps only units that are late on `today`.
    pub fn overdue_on(mut self, today: NaiveDate) -> Self {
        self.overdue_on = Some(today);
        self
    }

    /// Returns true if the unit matches this filter.
    pub fn matches(&self, unit: &UnitOfWork) -> bool {
        if let Some(status) = self.status {
            if unit.status != status {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if unit.category() != category.as_str() {
                return false;
            }
        }

        if let Some(today) = self.overdue_on {
            if delay::evaluate(unit, today).is_none() {
                return false;
            }
        }

        true
    }

    /// Returns the matching units in their original order.
    pub fn apply<'a>(&self, units: &'a [UnitOfWork]) -> Vec<&'a UnitOfWork> {
        units.iter().filter(|u| self.matches(u)).collect()
    }
}
