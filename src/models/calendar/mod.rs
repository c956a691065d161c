// Calendar module
// Ordered set of valid scheduling days with index-based offset arithmetic

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::period::Period;
use crate::utils::date::is_weekend;

/// One valid day on the scheduling calendar.
///
/// Ordering is plain date order; grid positions and distances come from the
/// owning [`Calendar`], never from date arithmetic. Days that are absent from
/// the calendar (weekends, holidays) simply have no index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn is_weekend(&self) -> bool {
        is_weekend(self.0)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y/%m/%d"))
    }
}

/// Error returned when day text matches neither `YYYY/MM/DD` nor `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized day text: {0}")]
pub struct ParseDayError(pub String);

impl FromStr for CalendarDay {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        NaiveDate::parse_from_str(text, "%Y/%m/%d")
            .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
            .map(Self)
            .map_err(|_| ParseDayError(s.to_string()))
    }
}

/// The finite, ordered set of days work can be scheduled on.
///
/// The calendar is the sole authority on day ordering: rows, offsets and
/// every "N days later" computation go through its index space, so gaps
/// (skipped weekends, holidays) never distort distances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    days: Vec<CalendarDay>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calendar from an arbitrary day list; days are sorted and
    /// de-duplicated.
    pub fn from_days(mut days: Vec<CalendarDay>) -> Self {
        days.sort();
        days.dedup();
        Self { days }
    }

    /// Build a weekday-only calendar covering `from..=to`.
    ///
    /// # Examples
    /// ```
    /// use taskgrid::models::calendar::{Calendar, CalendarDay};
    ///
    /// let from = CalendarDay::new(2026, 3, 2).unwrap(); // Monday
    /// let to = CalendarDay::new(2026, 3, 13).unwrap(); // Friday
    /// let calendar = Calendar::weekdays(from, to);
    /// assert_eq!(calendar.len(), 10);
    /// ```
    pub fn weekdays(from: CalendarDay, to: CalendarDay) -> Self {
        let mut days = Vec::new();
        let mut current = from.date();
        while current <= to.date() {
            if !is_weekend(current) {
                days.push(CalendarDay::from_date(current));
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn first(&self) -> Option<CalendarDay> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<CalendarDay> {
        self.days.last().copied()
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.index_of(day).is_some()
    }

    /// Position of `day` in the calendar, `None` when the day is not valid.
    pub fn index_of(&self, day: CalendarDay) -> Option<usize> {
        self.days.binary_search(&day).ok()
    }

    /// Day at `index`, `None` past the end.
    pub fn day_at(&self, index: usize) -> Option<CalendarDay> {
        self.days.get(index).copied()
    }

    /// Signed day distance from `from` to `to` in index space.
    ///
    /// Both days must be on the calendar; the result is negative when `to`
    /// precedes `from`.
    pub fn offset(&self, from: CalendarDay, to: CalendarDay) -> Option<i32> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;
        Some(to_index as i32 - from_index as i32)
    }

    /// Step `day` by `offset` calendar positions; `None` when either `day`
    /// is not on the calendar or the step leaves it.
    pub fn apply_offset(&self, day: CalendarDay, offset: i32) -> Option<CalendarDay> {
        let index = self.index_of(day)? as i32 + offset;
        if index < 0 {
            return None;
        }
        self.day_at(index as usize)
    }

    /// Calendar days lying inclusively within `period`, in order.
    ///
    /// Robust against period endpoints that are themselves off the calendar;
    /// only the days actually present are returned.
    pub fn days_in(&self, period: &Period) -> &[CalendarDay] {
        let start = self.days.partition_point(|d| *d < period.from);
        let end = self.days.partition_point(|d| *d <= period.to);
        &self.days[start..end]
    }

    /// Number of calendar days `period` spans; 0 when nothing overlaps.
    pub fn period_day_count(&self, period: &Period) -> usize {
        self.days_in(period).len()
    }

    /// Admit the endpoints of a period that a new work item introduces.
    /// Returns true when the calendar actually grew.
    pub fn extend_for_period(&mut self, period: &Period) -> bool {
        let mut grew = false;
        for day in [period.from, period.to] {
            if let Err(position) = self.days.binary_search(&day) {
                self.days.insert(position, day);
                grew = true;
            }
        }
        grew
    }
}
