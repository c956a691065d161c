// App data module
// The calendar, member list and work item collection as one aggregate

use serde::{Deserialize, Serialize};

use crate::models::calendar::Calendar;
use crate::models::member::Members;
use crate::models::work_item::WorkItem;
use crate::models::work_items::WorkItems;

/// Everything the grid schedules against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub calendar: Calendar,
    pub members: Members,
    pub work_items: WorkItems,
}

impl AppData {
    pub fn new(calendar: Calendar, members: Members) -> Self {
        Self {
            calendar,
            members,
            work_items: WorkItems::new(),
        }
    }

    /// Make sure `item`'s member and period endpoints are known to the
    /// aggregate, growing the calendar and member list as needed. Returns
    /// true when either grew, which means grid axes must be rebuilt.
    pub fn ensure_registered(&mut self, item: &WorkItem) -> bool {
        let calendar_grew = self.calendar.extend_for_period(&item.period);
        let members_grew = self.members.add(item.assigned_member.clone());
        calendar_grew || members_grew
    }
}
