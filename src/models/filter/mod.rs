// Filter module
// Which members, days and items are currently visible

use serde::{Deserialize, Serialize};

use crate::models::calendar::CalendarDay;
use crate::models::member::{Member, Members};
use crate::models::period::Period;

/// The active view filter. The default filter shows everything.
///
/// Day visibility is an inclusive range test; the exclusive
/// [`Period::contains`] semantics deliberately do not apply here, otherwise
/// the boundary days of the filter range would vanish.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub hidden_members: Members,
    pub period: Option<Period>,
    pub item_pattern: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_default(&self) -> bool {
        self.hidden_members.is_empty() && self.period.is_none() && self.item_pattern.is_none()
    }

    pub fn is_member_visible(&self, member: &Member) -> bool {
        !self.hidden_members.contains(member)
    }

    pub fn is_day_visible(&self, day: CalendarDay) -> bool {
        match &self.period {
            Some(period) => period.from <= day && day <= period.to,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> CalendarDay {
        CalendarDay::new(2026, 3, d).unwrap()
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let filter = Filter::new();
        assert!(filter.is_default());
        assert!(filter.is_day_visible(day(2)));
        assert!(filter.is_member_visible(&Member::new("Acme", "Sato", "Ken")));
    }

    #[test]
    fn test_day_range_is_inclusive_at_both_ends() {
        let filter = Filter {
            period: Some(Period::new(day(9), day(11)).unwrap()),
            ..Filter::default()
        };
        assert!(!filter.is_day_visible(day(6)));
        assert!(filter.is_day_visible(day(9)));
        assert!(filter.is_day_visible(day(10)));
        assert!(filter.is_day_visible(day(11)));
        assert!(!filter.is_day_visible(day(12)));
    }

    #[test]
    fn test_hidden_members_are_invisible() {
        let hidden = Member::new("Acme", "Baba", "Jun");
        let filter = Filter {
            hidden_members: [hidden.clone()].into_iter().collect(),
            ..Filter::default()
        };
        assert!(!filter.is_member_visible(&hidden));
        assert!(filter.is_member_visible(&Member::new("Acme", "Sato", "Ken")));
    }
}
