//! Progress logic for yumemaga units of work.
//!
//! Everything in this crate is a pure function of its inputs; callers pass
//! `today` explicitly (see [`date::today`]).
//!
//! - **date**: multi-format planned-date parsing with explicit year policies
//! - **delay**: how many days a unit is past its planned date
//! - **aggregate**: status buckets and the progress percentage
//! - **milestone**: the next planned dates ahead
//! - **filter**: selecting units by status, category, or lateness
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use yumemaga_models::{UnitOfWork, UnitStatus};
//! use yumemaga_progress::{delay_days, summarize};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
//! let units = vec![
//!     UnitOfWork::new("A-1", "Plan").with_status(UnitStatus::Completed),
//!     UnitOfWork::new("A-2", "Shoot")
//!         .with_status(UnitStatus::Delayed)
//!         .with_planned_date("2025-10-01"),
//! ];
//!
//! assert_eq!(summarize(&units).progress_rate, 50);
//! assert_eq!(delay_days(&units[1], today), Some(14));
//! ```

pub mod aggregate;
pub mod date;
pub mod delay;
pub mod filter;
pub mod milestone;

pub use aggregate::{
    count_statuses, progress_rate, summarize, summarize_by_category, ProgressSummary, StatusCounts,
};
pub use date::{is_placeholder, resolve_planned, today, PlannedDate, YearPolicy};
pub use delay::{days_between, delay_days, delays, evaluate, DelayReport};
pub use filter::UnitFilter;
pub use milestone::{next_milestone, upcoming, Milestone};
