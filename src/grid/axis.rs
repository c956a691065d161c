// Axis index
// Integer-keyed day/row and member/col tables over fixed headers and the filter

use crate::models::calendar::{Calendar, CalendarDay};
use crate::models::filter::Filter;
use crate::models::member::{Member, Members};

/// Header rows reserved for the company and name labels.
pub const FIXED_ROWS: usize = 3;
/// Header columns reserved for the year, month and day labels.
pub const FIXED_COLS: usize = 3;

/// Grid row position, counting the fixed header rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(pub usize);

/// Grid column position, counting the fixed header columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColIndex(pub usize);

/// Bidirectional mapping between grid positions and domain identities.
///
/// Day ids are calendar indices and member ids are member-list positions, so
/// the tables are plain vectors. The index is derived data: any change to
/// the calendar, member list or filter rebuilds it wholesale; it is never
/// patched in place.
#[derive(Debug, Clone, Default)]
pub struct AxisIndex {
    day_to_row: Vec<Option<RowIndex>>,
    row_to_day: Vec<usize>,
    member_to_col: Vec<Option<ColIndex>>,
    col_to_member: Vec<usize>,
}

impl AxisIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every table from scratch for the given world and filter.
    pub fn rebuild(&mut self, calendar: &Calendar, members: &Members, filter: &Filter) {
        self.day_to_row = vec![None; calendar.len()];
        self.row_to_day = Vec::new();
        for (day_id, day) in calendar.days().iter().enumerate() {
            if filter.is_day_visible(*day) {
                self.day_to_row[day_id] = Some(RowIndex(FIXED_ROWS + self.row_to_day.len()));
                self.row_to_day.push(day_id);
            }
        }

        self.member_to_col = vec![None; members.len()];
        self.col_to_member = Vec::new();
        for (member_id, member) in members.iter().enumerate() {
            if filter.is_member_visible(member) {
                self.member_to_col[member_id] = Some(ColIndex(FIXED_COLS + self.col_to_member.len()));
                self.col_to_member.push(member_id);
            }
        }

        log::debug!(
            "axis: rebuilt with {} visible day(s), {} visible member(s)",
            self.row_to_day.len(),
            self.col_to_member.len()
        );
    }

    pub fn visible_day_count(&self) -> usize {
        self.row_to_day.len()
    }

    pub fn visible_member_count(&self) -> usize {
        self.col_to_member.len()
    }

    /// Member ids keyed by visible column order.
    pub fn visible_member_ids(&self) -> &[usize] {
        &self.col_to_member
    }

    pub fn row_count(&self) -> usize {
        FIXED_ROWS + self.row_to_day.len()
    }

    pub fn col_count(&self) -> usize {
        FIXED_COLS + self.col_to_member.len()
    }

    /// Grid row of a day, `None` when the day is off the calendar or
    /// filtered out.
    pub fn row_of_day(&self, calendar: &Calendar, day: CalendarDay) -> Option<RowIndex> {
        let day_id = calendar.index_of(day)?;
        self.day_to_row.get(day_id).copied().flatten()
    }

    /// Day shown on a grid row, `None` for header rows and rows past the
    /// visible range.
    pub fn day_of_row(&self, calendar: &Calendar, row: RowIndex) -> Option<CalendarDay> {
        let visible_index = row.0.checked_sub(FIXED_ROWS)?;
        let day_id = *self.row_to_day.get(visible_index)?;
        calendar.day_at(day_id)
    }

    /// Grid column of a member, `None` when hidden by the filter.
    pub fn col_of_member(&self, members: &Members, member: &Member) -> Option<ColIndex> {
        let member_id = members.index_of(member)?;
        self.member_to_col.get(member_id).copied().flatten()
    }

    /// Member shown in a grid column, `None` for header columns and columns
    /// past the visible range.
    pub fn member_of_col<'a>(&self, members: &'a Members, col: ColIndex) -> Option<&'a Member> {
        let visible_index = col.0.checked_sub(FIXED_COLS)?;
        let member_id = *self.col_to_member.get(visible_index)?;
        members.get(member_id)
    }

    /// The given members plus whoever sits in the immediately adjacent
    /// columns. Item decorations bleed into neighbor columns, so those must
    /// repaint together.
    pub fn with_neighbors(&self, members: &Members, of: &Members) -> Members {
        let mut result = Members::new();
        for member in of.iter() {
            result.add(member.clone());
            if let Some(col) = self.col_of_member(members, member) {
                for adjacent in [col.0.wrapping_sub(1), col.0 + 1] {
                    if let Some(neighbor) = self.member_of_col(members, ColIndex(adjacent)) {
                        result.add(neighbor.clone());
                    }
                }
            }
        }
        result
    }
}
