// Test fixtures - reusable test data
// Provides a small March 2026 world shared across the test files

#![allow(dead_code)]

use egui::{pos2, Pos2};

use taskgrid::grid::WorkItemGrid;
use taskgrid::models::app_data::AppData;
use taskgrid::models::calendar::{Calendar, CalendarDay};
use taskgrid::models::member::{Member, Members};
use taskgrid::models::period::Period;
use taskgrid::models::work_item::{Project, Tags, TaskState, WorkItem};
use taskgrid::models::work_items::WorkItems;

/// A day in March 2026. The month starts on a Sunday, so the weekday
/// calendar below holds 2-6, 9-13, 16-20, 23-27 and 30-31.
pub fn day(d: u32) -> CalendarDay {
    CalendarDay::new(2026, 3, d).unwrap()
}

/// Weekday calendar covering March 2026, 22 days long.
pub fn march_calendar() -> Calendar {
    Calendar::weekdays(day(2), day(31))
}

/// Sample members for testing
pub mod members {
    use super::*;

    pub fn aoki() -> Member {
        Member::new("Acme", "Aoki", "Mina")
    }

    pub fn baba() -> Member {
        Member::new("Acme", "Baba", "Jun")
    }

    pub fn chiba() -> Member {
        Member::new("Acme", "Chiba", "Rui")
    }

    pub fn doi() -> Member {
        Member::new("Koyo", "Doi", "Kai")
    }

    /// Roster in column order: Aoki, Baba, Chiba, Doi.
    pub fn team() -> Members {
        [aoki(), baba(), chiba(), doi()].into_iter().collect()
    }
}

/// A plain active item spanning `from..=to` for `member`.
pub fn item(name: &str, member: &Member, from: CalendarDay, to: CalendarDay) -> WorkItem {
    WorkItem::new(
        Project::new("Atlas"),
        name,
        Tags::new(),
        Period::new(from, to).unwrap(),
        member.clone(),
        TaskState::Active,
    )
}

/// Grid over the March world seeded with `items`.
pub fn grid_with(items: Vec<WorkItem>) -> WorkItemGrid {
    let mut app = AppData::new(march_calendar(), members::team());
    app.work_items = WorkItems::from(items);
    WorkItemGrid::new(app)
}

/// Centre of the cell at visible day row `day_index` and member column
/// `member_index`, in widget-local pixels. Uses the default detail
/// sizes: 96px date band, 120px columns, 66px header band, 22px rows.
pub fn cell_pos(day_index: usize, member_index: usize) -> Pos2 {
    pos2(
        96.0 + member_index as f32 * 120.0 + 60.0,
        66.0 + day_index as f32 * 22.0 + 11.0,
    )
}
