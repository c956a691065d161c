// Period module
// Inclusive day range with calendar-based shifting

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::calendar::{Calendar, CalendarDay};

/// An inclusive `[from, to]` range of calendar days.
///
/// Note that [`Period::contains`] is exclusive at both ends; rendering and
/// picking code must enumerate days through [`Calendar::days_in`] instead,
/// which treats both endpoints as part of the period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub from: CalendarDay,
    pub to: CalendarDay,
}

impl Period {
    /// Create a period; `from` must not come after `to`.
    pub fn new(from: CalendarDay, to: CalendarDay) -> Result<Self, String> {
        if to < from {
            return Err(format!("period end {to} precedes start {from}"));
        }
        Ok(Self { from, to })
    }

    /// Single-day period.
    pub fn on_day(day: CalendarDay) -> Self {
        Self { from: day, to: day }
    }

    /// Strictly-between test, excluding both endpoints.
    pub fn contains(&self, day: CalendarDay) -> bool {
        self.from < day && day < self.to
    }

    /// Whether two periods overlap, judged with [`Period::contains`].
    pub fn intersects(&self, other: &Period) -> bool {
        self.contains(other.from)
            || self.contains(other.to)
            || other.contains(self.from)
            || other.contains(self.to)
            || self == other
    }

    /// Shift both endpoints by `offset` calendar positions.
    ///
    /// All-or-nothing: if either shifted endpoint would leave the calendar,
    /// the period is returned unchanged.
    pub fn apply_offset(&self, offset: i32, calendar: &Calendar) -> Period {
        let shifted_from = calendar.apply_offset(self.from, offset);
        let shifted_to = calendar.apply_offset(self.to, offset);
        match (shifted_from, shifted_to) {
            (Some(from), Some(to)) => Period { from, to },
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> CalendarDay {
        CalendarDay::new(2026, 3, d).unwrap()
    }

    fn march_calendar() -> Calendar {
        Calendar::weekdays(day(2), day(31))
    }

    #[test]
    fn test_new_rejects_reversed_range() {
        assert!(Period::new(day(10), day(9)).is_err());
        assert!(Period::new(day(9), day(9)).is_ok());
    }

    #[test]
    fn test_contains_excludes_both_endpoints() {
        let period = Period::new(day(9), day(13)).unwrap();
        assert!(!period.contains(day(9)));
        assert!(period.contains(day(10)));
        assert!(period.contains(day(12)));
        assert!(!period.contains(day(13)));
    }

    #[test]
    fn test_single_day_period_contains_nothing() {
        let period = Period::on_day(day(9));
        assert!(!period.contains(day(9)));
    }

    #[test]
    fn test_apply_offset_shifts_both_endpoints() {
        let calendar = march_calendar();
        let period = Period::new(day(9), day(11)).unwrap();
        let shifted = period.apply_offset(2, &calendar);
        assert_eq!(shifted, Period::new(day(11), day(13)).unwrap());
    }

    #[test]
    fn test_apply_offset_crossing_a_weekend_follows_the_calendar() {
        let calendar = march_calendar();
        let period = Period::new(day(12), day(13)).unwrap();
        // Thursday/Friday shifted one step lands on Friday/Monday.
        let shifted = period.apply_offset(1, &calendar);
        assert_eq!(shifted, Period::new(day(13), day(16)).unwrap());
    }

    #[test]
    fn test_apply_offset_is_all_or_nothing_at_the_boundary() {
        let calendar = march_calendar();
        let period = Period::new(day(30), day(31)).unwrap();
        // `to` would run past the calendar end, so nothing moves.
        assert_eq!(period.apply_offset(1, &calendar), period);
        let early = Period::new(day(2), day(3)).unwrap();
        assert_eq!(early.apply_offset(-1, &calendar), early);
    }

    #[test]
    fn test_intersects_overlapping_and_identical_periods() {
        let a = Period::new(day(9), day(13)).unwrap();
        let b = Period::new(day(12), day(18)).unwrap();
        let c = Period::new(day(16), day(18)).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&a.clone()));
    }
}
