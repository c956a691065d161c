// Work Item Draft
//
// Raw dialog text held while the user edits, resolved into a validated
// work item only on accept.

use thiserror::Error;

use crate::models::calendar::{Calendar, CalendarDay};
use crate::models::member::{Member, Members};
use crate::models::period::Period;
use crate::models::work_item::{Project, Tags, TaskState, WorkItem};

/// Why a draft could not be turned into a work item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("work item name must not be empty")]
    EmptyName,
    #[error("unrecognized start day: {0:?}")]
    BadStartDay(String),
    #[error("start day {0} is not on the calendar")]
    DayOffCalendar(CalendarDay),
    #[error("unrecognized day count: {0:?}")]
    BadDayCount(String),
    #[error("day count must be at least 1")]
    ZeroDayPeriod,
    #[error("a {0}-day period runs past the end of the calendar")]
    CountPastCalendarEnd(usize),
    #[error("unrecognized member: {0:?}")]
    BadMember(String),
    #[error("member {0} is not registered")]
    UnknownMember(Member),
}

/// Free-text edit buffer for one work item.
///
/// The period is edited as a start day plus a calendar day count, so a
/// three-day item stays three days long even when its text is re-resolved
/// against a calendar with different holidays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkItemDraft {
    pub project: String,
    pub name: String,
    pub tags: String,
    pub member_text: String,
    pub from_text: String,
    pub day_count_text: String,
    pub state: TaskState,
    pub description: String,
}

impl WorkItemDraft {
    /// Draft pre-filled from an existing item, for the edit dialog.
    pub fn from_item(item: &WorkItem, calendar: &Calendar) -> Self {
        Self {
            project: item.project.to_string(),
            name: item.name.clone(),
            tags: item.tags.to_string(),
            member_text: item.assigned_member.to_string(),
            from_text: item.period.from.to_string(),
            day_count_text: calendar.period_day_count(&item.period).to_string(),
            state: item.state,
            description: item.description.clone(),
        }
    }

    /// Draft for a fresh one-day item on the double-clicked cell.
    pub fn for_cell(day: CalendarDay, member: &Member) -> Self {
        Self {
            member_text: member.to_string(),
            from_text: day.to_string(),
            day_count_text: "1".to_string(),
            state: TaskState::Active,
            ..Self::default()
        }
    }

    /// Validate the buffered text against the calendar and member roster.
    pub fn resolve(&self, calendar: &Calendar, members: &Members) -> Result<WorkItem, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        let from: CalendarDay = self
            .from_text
            .parse()
            .map_err(|_| DraftError::BadStartDay(self.from_text.clone()))?;
        if !calendar.contains(from) {
            return Err(DraftError::DayOffCalendar(from));
        }

        let day_count: usize = self
            .day_count_text
            .trim()
            .parse()
            .map_err(|_| DraftError::BadDayCount(self.day_count_text.clone()))?;
        if day_count == 0 {
            return Err(DraftError::ZeroDayPeriod);
        }
        let to = calendar
            .apply_offset(from, day_count as i32 - 1)
            .ok_or(DraftError::CountPastCalendarEnd(day_count))?;

        let member: Member = self
            .member_text
            .parse()
            .map_err(|_| DraftError::BadMember(self.member_text.clone()))?;
        if !members.contains(&member) {
            return Err(DraftError::UnknownMember(member));
        }

        let mut item = WorkItem::new(
            Project::new(self.project.trim()),
            name,
            Tags::from_text(&self.tags),
            Period { from, to },
            member,
            self.state,
        );
        item.description = self.description.clone();
        Ok(item)
    }
}
