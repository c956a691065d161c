// Invalid Area
//
// Per-member validity flags plus the retained draw batch painted the last
// time each column was valid. Batches hold world coordinates, so scrolling
// replays them unchanged and never invalidates anything.

use crate::grid::axis::AxisIndex;
use crate::grid::surface::DrawCmd;
use crate::models::member::Members;

#[derive(Debug, Default)]
pub struct InvalidArea {
    valid: Vec<bool>,
    batches: Vec<Vec<DrawCmd>>,
}

impl InvalidArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to the member arena and mark every column invalid.
    pub fn reset(&mut self, member_count: usize) {
        self.valid = vec![false; member_count];
        self.batches = vec![Vec::new(); member_count];
    }

    pub fn invalidate_all(&mut self) {
        for flag in &mut self.valid {
            *flag = false;
        }
    }

    /// Invalidate the columns of `touched` plus their immediate on-screen
    /// neighbors, so item bars reaching over a column edge are repainted on
    /// both sides.
    pub fn invalidate(&mut self, touched: &Members, members: &Members, axis: &AxisIndex) {
        let expanded = axis.with_neighbors(members, touched);
        for member in expanded.iter() {
            if let Some(id) = members.index_of(member) {
                if let Some(flag) = self.valid.get_mut(id) {
                    *flag = false;
                }
            }
        }
        log::debug!(
            "invalidated {} member column(s) for {} touched",
            expanded.len(),
            touched.len()
        );
    }

    pub fn is_valid(&self, member_id: usize) -> bool {
        self.valid.get(member_id).copied().unwrap_or(false)
    }

    /// Store a freshly painted batch and mark its column valid.
    pub fn validate(&mut self, member_id: usize, batch: Vec<DrawCmd>) {
        if let Some(flag) = self.valid.get_mut(member_id) {
            *flag = true;
            self.batches[member_id] = batch;
        }
    }

    /// The retained batch for a valid column; `None` while invalid.
    pub fn batch(&self, member_id: usize) -> Option<&[DrawCmd]> {
        if !self.is_valid(member_id) {
            return None;
        }
        self.batches.get(member_id).map(|b| b.as_slice())
    }
}
