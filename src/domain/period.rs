use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Literal format accepted for custom report dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Date must be in YYYY-MM-DD format: {0}")]
    InvalidDate(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    #[error("Date is out of the supported range")]
    OutOfRange,
}

/// Report periods that need no further input from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    AllTime,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Today => "today",
            Preset::ThisWeek => "this-week",
            Preset::ThisMonth => "this-month",
            Preset::ThisYear => "this-year",
            Preset::AllTime => "all-time",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "today" => Some(Preset::Today),
            "this-week" | "week" => Some(Preset::ThisWeek),
            "this-month" | "month" => Some(Preset::ThisMonth),
            "this-year" | "year" => Some(Preset::ThisYear),
            "all-time" | "all" => Some(Preset::AllTime),
            _ => None,
        }
    }

    /// Resolve the preset against `today`. `None` means no bounds at all.
    pub fn resolve(&self, today: NaiveDate) -> Result<Option<DateRange>, PeriodError> {
        let range = match self {
            Preset::Today => DateRange::new(today, next_day(today)?),
            Preset::ThisWeek => {
                // Week starts on Monday
                let offset = today.weekday().num_days_from_monday();
                let monday = today
                    .checked_sub_days(Days::new(u64::from(offset)))
                    .ok_or(PeriodError::OutOfRange)?;
                let end = monday
                    .checked_add_days(Days::new(7))
                    .ok_or(PeriodError::OutOfRange)?;
                DateRange::new(monday, end)
            }
            Preset::ThisMonth => {
                let first = today.with_day(1).ok_or(PeriodError::OutOfRange)?;
                let end = first
                    .checked_add_months(Months::new(1))
                    .ok_or(PeriodError::OutOfRange)?;
                DateRange::new(first, end)
            }
            Preset::ThisYear => {
                // The upper bound is Dec 31 itself, not Jan 1 of the next year.
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .ok_or(PeriodError::OutOfRange)?;
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31)
                    .ok_or(PeriodError::OutOfRange)?;
                DateRange::new(first, last)
            }
            Preset::AllTime => return Ok(None),
        };
        Ok(Some(range))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open range of calendar days: `start` is included, `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Build a range from user-entered dates where both days are included.
    pub fn inclusive(start: NaiveDate, last_day: NaiveDate) -> Result<Self, PeriodError> {
        Ok(Self::new(start, next_day(last_day)?))
    }

    pub fn start_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end_bound(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start_bound() && at < self.end_bound()
    }

    /// The last day covered by the range, as shown in report titles.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Parse a strict `YYYY-MM-DD` literal. Padding is mandatory: `2025-7-1` is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate, PeriodError> {
    let input = input.trim();
    let well_formed = input.len() == 10
        && input.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(PeriodError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| PeriodError::InvalidDate(input.to_string()))
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, PeriodError> {
    date.succ_opt().ok_or(PeriodError::OutOfRange)
}
