//! Planned-date normalization.
//!
//! Planned dates arrive as free text typed into a spreadsheet. Parsing and
//! year resolution are separate steps: [`PlannedDate::parse`] classifies the
//! text, and [`PlannedDate::resolve`] turns it into a calendar date under an
//! explicit [`YearPolicy`]. Everything works on [`NaiveDate`], so time-of-day
//! never leaks into day arithmetic.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Values the sheet uses for "no date".
const PLACEHOLDERS: &[&str] = &["", "-", "－", "―"];

/// Date-only fallbacks tried after ISO and month/day.
const LOOSE_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];

/// Date-time fallbacks; only the date part is kept.
const LOOSE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

fn iso_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid regex"))
}

fn month_day_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})(?:/|月)(\d{1,2})日?$").expect("valid regex"))
}

/// How to pick the year for a date written without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearPolicy {
    /// Milestones look ahead: a month earlier than the current month means
    /// next year.
    Forward,
    /// Delay checks look back: always the current year.
    Current,
}

/// A classified planned-date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedDate {
    /// `YYYY-MM-DD`.
    Iso(NaiveDate),
    /// `M/D` or `M月D日`, year implied.
    MonthDay { month: u32, day: u32 },
    /// Any other recognized full date.
    Loose(NaiveDate),
    /// Empty or a dash.
    Placeholder,
    /// Text that is not a date.
    Unparseable(String),
}

impl PlannedDate {
    /// Classifies raw planned-date text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();

        if is_placeholder(s) {
            return PlannedDate::Placeholder;
        }

        if let Some(caps) = iso_pattern().captures(s) {
            let parsed = (|| {
                let year = caps[1].parse().ok()?;
                let month = caps[2].parse().ok()?;
                let day = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            })();
            return match parsed {
                Some(date) => PlannedDate::Iso(date),
                None => PlannedDate::Unparseable(s.to_string()),
            };
        }

        if let Some(caps) = month_day_pattern().captures(s) {
            let month: u32 = caps[1].parse().unwrap_or(0);
            let day: u32 = caps[2].parse().unwrap_or(0);
            if (1..=12).contains(&month) && (1..=31).contains(&day) {
                return PlannedDate::MonthDay { month, day };
            }
            return PlannedDate::Unparseable(s.to_string());
        }

        match parse_loose(s) {
            Some(date) => PlannedDate::Loose(date),
            None => PlannedDate::Unparseable(s.to_string()),
        }
    }

    /// Resolves to a calendar date relative to `today`.
    ///
    /// Returns `None` for placeholders, unparseable text, and month/day
    /// pairs that do not exist in the chosen year (`2/29` off leap years).
    pub fn resolve(&self, today: NaiveDate, policy: YearPolicy) -> Option<NaiveDate> {
        match *self {
            PlannedDate::Iso(date) | PlannedDate::Loose(date) => Some(date),
            PlannedDate::MonthDay { month, day } => {
                let year = match policy {
                    YearPolicy::Forward if month < today.month() => today.year() + 1,
                    YearPolicy::Forward | YearPolicy::Current => today.year(),
                };
                NaiveDate::from_ymd_opt(year, month, day)
            }
            PlannedDate::Placeholder | PlannedDate::Unparseable(_) => None,
        }
    }

    /// Returns true when the text carried a usable date.
    pub fn is_known(&self) -> bool {
        !matches!(self, PlannedDate::Placeholder | PlannedDate::Unparseable(_))
    }
}

/// Returns true for the sheet's "no date" values.
pub fn is_placeholder(raw: &str) -> bool {
    PLACEHOLDERS.contains(&raw.trim())
}

/// Parses and resolves an optional raw planned date in one step.
pub fn resolve_planned(raw: Option<&str>, today: NaiveDate, policy: YearPolicy) -> Option<NaiveDate> {
    PlannedDate::parse(raw?).resolve(today, policy)
}

/// Today's date in local time, truncated to midnight.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_loose(s: &str) -> Option<NaiveDate> {
    for format in LOOSE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    LOOSE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|dt| dt.date())
}
