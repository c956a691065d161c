// Work Item Edit Service
//
// Every change to the work item collection flows through here, so one user
// action (a drag commit, a delete, a divide) becomes exactly one undo
// transaction no matter how many items it touches.

use crate::grid::view_data::ViewData;
use crate::models::calendar::Calendar;
use crate::models::member::Members;
use crate::models::period::Period;
use crate::models::work_item::{TaskState, WorkItem};
use crate::models::work_items::WorkItems;
use crate::services::undo::UndoService;

pub mod draft;

/// Edit operations over the view's collection, borrowed per call.
///
/// Each operation returns the members whose columns must repaint, or `None`
/// when it refused to do anything.
pub struct WorkItemEditService<'a> {
    view: &'a mut ViewData,
    undo: &'a mut UndoService,
}

impl<'a> WorkItemEditService<'a> {
    pub fn new(view: &'a mut ViewData, undo: &'a mut UndoService) -> Self {
        Self { view, undo }
    }

    /// Add one item; a structural duplicate is refused.
    pub fn add(&mut self, item: WorkItem) -> Option<Members> {
        if self.view.work_items().contains(&item) {
            log::warn!("refusing to add duplicate work item: {item}");
            return None;
        }
        self.view.work_items_mut().add(item.clone());
        self.undo.record_add(&item);
        let affected = self.undo.push();
        log::info!("added work item: {item}");
        affected
    }

    /// Add several items as one transaction, skipping duplicates.
    pub fn add_all(&mut self, items: &WorkItems) -> Option<Members> {
        let mut fresh = WorkItems::new();
        for item in items.iter() {
            if !self.view.work_items().contains(item) && !fresh.contains(item) {
                fresh.add(item.clone());
            }
        }
        for item in fresh.iter() {
            self.view.work_items_mut().add(item.clone());
        }
        self.undo.record_add_all(&fresh);
        self.undo.push()
    }

    /// Delete the current selection as one transaction.
    pub fn delete_selected(&mut self) -> Option<Members> {
        let selected = self.view.selected().clone();
        if selected.is_empty() {
            return None;
        }
        for item in selected.iter() {
            if self.view.work_items_mut().remove(item) {
                self.undo.record_delete(item);
            }
        }
        self.view.clear_selection();
        let affected = self.undo.push();
        if affected.is_some() {
            log::info!("deleted {} selected work item(s)", selected.len());
        }
        affected
    }

    /// Swap `before` for `after`. Replacing an item with its structural
    /// equal is a no-op that records nothing.
    pub fn replace(&mut self, before: &WorkItem, after: WorkItem) -> Option<Members> {
        if *before == after {
            return None;
        }
        if !self.view.work_items_mut().remove(before) {
            log::warn!("replace target no longer present: {before}");
            return None;
        }
        self.view.work_items_mut().add(after.clone());
        self.undo.record_delete(before);
        self.undo.record_add(&after);
        self.undo.push()
    }

    /// Split the selected item into a head of `divided_days` and a tail of
    /// `remain_days`. The two halves must exactly cover the original span.
    pub fn divide_selected(&mut self, divided_days: usize, remain_days: usize) -> Option<Members> {
        let target = self.view.selected_one()?.clone();
        let total = self.view.calendar().period_day_count(&target.period);
        if divided_days == 0 || remain_days == 0 || divided_days + remain_days != total {
            log::warn!(
                "refusing divide of a {total}-day item into {divided_days} + {remain_days}"
            );
            return None;
        }

        let calendar = self.view.calendar();
        let Some(head_to) = calendar.apply_offset(target.period.to, -(remain_days as i32)) else {
            return None;
        };
        let Some(tail_from) = calendar.apply_offset(target.period.from, divided_days as i32) else {
            return None;
        };
        let mut head = target.clone();
        head.period = Period {
            from: target.period.from,
            to: head_to,
        };
        let mut tail = target.clone();
        tail.period = Period {
            from: tail_from,
            to: target.period.to,
        };

        if !self.view.work_items_mut().remove(&target) {
            log::warn!("divide target no longer present: {target}");
            return None;
        }
        self.view.work_items_mut().add(head.clone());
        self.view.work_items_mut().add(tail.clone());
        self.undo.record_delete(&target);
        self.undo.record_add(&head);
        self.undo.record_add(&tail);
        self.view.clear_selection();
        let affected = self.undo.push();
        log::info!("divided work item into {} and {}", head.period, tail.period);
        affected
    }

    /// Mark every selected item done as one transaction. Items already done
    /// are left alone.
    pub fn done_selected(&mut self) -> Option<Members> {
        let selected = self.view.selected().clone();
        if selected.is_empty() {
            return None;
        }
        for item in selected.iter() {
            if item.state == TaskState::Done {
                continue;
            }
            let mut after = item.clone();
            after.state = TaskState::Done;
            if self
                .view
                .work_items_mut()
                .update_first(item, |i| i.state = TaskState::Done)
            {
                self.undo.record_delete(item);
                self.undo.record_add(&after);
            }
        }
        self.view.clear_selection();
        self.undo.push()
    }

    /// Pack every same-member item starting on or after each `start`
    /// contiguously behind it, in period order, as one transaction.
    ///
    /// Refused wholesale when two starts share a member or when the packed
    /// run would leave the calendar.
    pub fn align_afterward(&mut self, starts: &WorkItems) -> Option<Members> {
        if starts.is_empty() {
            return None;
        }
        let mut seen = Members::new();
        for start in starts.iter() {
            if !seen.add(start.assigned_member.clone()) {
                log::warn!("align afterward needs at most one start item per member");
                return None;
            }
        }

        let replacements =
            plan_alignment(self.view.calendar(), self.view.work_items(), starts)?;
        if replacements.is_empty() {
            return None;
        }
        for (before, after) in &replacements {
            if !self.view.work_items_mut().remove(before) {
                continue;
            }
            self.view.work_items_mut().add(after.clone());
            self.undo.record_delete(before);
            self.undo.record_add(after);
        }
        let affected = self.undo.push();
        log::info!("aligned {} work item(s) afterward", replacements.len());
        affected
    }

    /// Select each start plus every same-member item starting on or after
    /// it. Pure selection change; nothing is recorded.
    pub fn select_afterward(&mut self, starts: &WorkItems) -> Members {
        let mut selection = WorkItems::new();
        for start in starts.iter() {
            for item in self.view.work_items().iter() {
                if item.assigned_member == start.assigned_member
                    && item.period.from >= start.period.from
                    && !selection.contains(item)
                {
                    selection.add(item.clone());
                }
            }
        }
        self.view.set_selected(selection)
    }
}

/// Work out the (before, after) pairs an align pass would apply. `None`
/// when any repositioned item would run past the calendar, so the caller
/// can refuse without half-applying.
fn plan_alignment(
    calendar: &Calendar,
    items: &WorkItems,
    starts: &WorkItems,
) -> Option<Vec<(WorkItem, WorkItem)>> {
    let mut replacements = Vec::new();
    for start in starts.iter() {
        let mut followers: Vec<WorkItem> = items
            .of_member(&start.assigned_member)
            .filter(|i| i.period.from >= start.period.from && *i != start)
            .cloned()
            .collect();
        followers.sort_by(|a, b| a.period.from.cmp(&b.period.from));

        let mut cursor = start.period.to;
        for follower in followers {
            let day_count = calendar.period_day_count(&follower.period);
            if day_count == 0 {
                log::warn!("skipping alignment of off-calendar item: {follower}");
                continue;
            }
            let new_from = calendar.apply_offset(cursor, 1)?;
            let new_to = calendar.apply_offset(new_from, day_count as i32 - 1)?;
            cursor = new_to;
            let new_period = Period {
                from: new_from,
                to: new_to,
            };
            if follower.period != new_period {
                let mut after = follower.clone();
                after.period = new_period;
                replacements.push((follower, after));
            }
        }
    }
    Some(replacements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::app_data::AppData;
    use crate::models::calendar::{Calendar, CalendarDay};
    use crate::models::member::Member;
    use crate::models::work_item::{Project, Tags};

    fn day(d: u32) -> CalendarDay {
        CalendarDay::new(2026, 3, d).unwrap()
    }

    fn item(name: &str, member: &Member, from: u32, to: u32) -> WorkItem {
        WorkItem::new(
            Project::new("Atlas"),
            name,
            Tags::new(),
            Period::new(day(from), day(to)).unwrap(),
            member.clone(),
            TaskState::Active,
        )
    }

    fn sample_world() -> (ViewData, UndoService, Member) {
        let sato = Member::new("Acme", "Sato", "Ken");
        let app = AppData::new(
            Calendar::weekdays(day(2), day(31)),
            [sato.clone()].into_iter().collect(),
        );
        (ViewData::new(app), UndoService::new(), sato)
    }

    #[test]
    fn test_add_refuses_duplicates() {
        let (mut view, mut undo, sato) = sample_world();
        let a = item("a", &sato, 2, 4);
        assert!(WorkItemEditService::new(&mut view, &mut undo).add(a.clone()).is_some());
        assert!(WorkItemEditService::new(&mut view, &mut undo).add(a.clone()).is_none());
        assert_eq!(view.work_items().len(), 1);
        assert_eq!(undo.transaction_count(), 1);
    }

    #[test]
    fn test_replace_with_equal_item_records_nothing() {
        let (mut view, mut undo, sato) = sample_world();
        let a = item("a", &sato, 2, 4);
        WorkItemEditService::new(&mut view, &mut undo).add(a.clone());
        let result = WorkItemEditService::new(&mut view, &mut undo).replace(&a, a.clone());
        assert!(result.is_none());
        assert_eq!(undo.transaction_count(), 1);
    }

    #[test]
    fn test_delete_selected_is_one_transaction_and_undoable() {
        let (mut view, mut undo, sato) = sample_world();
        let a = item("a", &sato, 2, 3);
        let b = item("b", &sato, 4, 5);
        {
            let mut edit = WorkItemEditService::new(&mut view, &mut undo);
            edit.add(a.clone());
            edit.add(b.clone());
        }
        view.set_selected(vec![a.clone(), b.clone()].into());
        WorkItemEditService::new(&mut view, &mut undo).delete_selected().unwrap();
        assert!(view.work_items().is_empty());
        assert!(view.selected().is_empty());
        assert_eq!(undo.transaction_count(), 3);

        undo.undo(view.work_items_mut()).unwrap();
        assert!(view.work_items().contains(&a));
        assert!(view.work_items().contains(&b));
    }

    #[test]
    fn test_divide_splits_exactly_and_clears_selection() {
        let (mut view, mut undo, sato) = sample_world();
        let target = item("big", &sato, 2, 6); // five calendar days
        WorkItemEditService::new(&mut view, &mut undo).add(target.clone());
        view.set_selected(WorkItems::single(target.clone()));

        WorkItemEditService::new(&mut view, &mut undo)
            .divide_selected(2, 3)
            .unwrap();
        assert!(!view.work_items().contains(&target));
        assert_eq!(view.work_items().len(), 2);
        let head = item("big", &sato, 2, 3);
        let tail = item("big", &sato, 4, 6);
        assert!(view.work_items().contains(&head));
        assert!(view.work_items().contains(&tail));
        assert!(view.selected().is_empty());

        // One undo restores the original item.
        undo.undo(view.work_items_mut()).unwrap();
        assert!(view.work_items().contains(&target));
        assert_eq!(view.work_items().len(), 1);
    }

    #[test]
    fn test_divide_refuses_mismatched_day_counts() {
        let (mut view, mut undo, sato) = sample_world();
        let target = item("big", &sato, 2, 6);
        WorkItemEditService::new(&mut view, &mut undo).add(target.clone());
        view.set_selected(WorkItems::single(target.clone()));
        let result = WorkItemEditService::new(&mut view, &mut undo).divide_selected(2, 2);
        assert!(result.is_none());
        assert!(view.work_items().contains(&target));
    }

    #[test]
    fn test_done_marks_selection_in_one_transaction() {
        let (mut view, mut undo, sato) = sample_world();
        let a = item("a", &sato, 2, 3);
        let b = item("b", &sato, 4, 5);
        {
            let mut edit = WorkItemEditService::new(&mut view, &mut undo);
            edit.add(a.clone());
            edit.add(b.clone());
        }
        view.set_selected(vec![a.clone(), b.clone()].into());
        WorkItemEditService::new(&mut view, &mut undo).done_selected().unwrap();

        assert!(view.work_items().iter().all(|i| i.state == TaskState::Done));
        assert_eq!(undo.transaction_count(), 3);
        undo.undo(view.work_items_mut()).unwrap();
        assert!(view.work_items().contains(&a));
        assert!(view.work_items().contains(&b));
    }

    #[test]
    fn test_align_afterward_packs_followers_contiguously() {
        let (mut view, mut undo, sato) = sample_world();
        let anchor = item("anchor", &sato, 2, 3);
        let later = item("later", &sato, 10, 11);
        let last = item("last", &sato, 17, 17);
        {
            let mut edit = WorkItemEditService::new(&mut view, &mut undo);
            edit.add(anchor.clone());
            edit.add(later.clone());
            edit.add(last.clone());
        }

        WorkItemEditService::new(&mut view, &mut undo)
            .align_afterward(&WorkItems::single(anchor.clone()))
            .unwrap();

        // anchor ends Tue 3rd; later (2 days) packs onto Wed 4..Thu 5,
        // last (1 day) onto Fri 6.
        assert!(view.work_items().contains(&item("later", &sato, 4, 5)));
        assert!(view.work_items().contains(&item("last", &sato, 6, 6)));
        assert!(view.work_items().contains(&anchor));
        assert_eq!(undo.transaction_count(), 4);

        undo.undo(view.work_items_mut()).unwrap();
        assert!(view.work_items().contains(&later));
        assert!(view.work_items().contains(&last));
    }

    #[test]
    fn test_align_afterward_refuses_two_starts_on_one_member() {
        let (mut view, mut undo, sato) = sample_world();
        let a = item("a", &sato, 2, 3);
        let b = item("b", &sato, 4, 5);
        {
            let mut edit = WorkItemEditService::new(&mut view, &mut undo);
            edit.add(a.clone());
            edit.add(b.clone());
        }
        let result = WorkItemEditService::new(&mut view, &mut undo)
            .align_afterward(&vec![a, b].into());
        assert!(result.is_none());
        assert_eq!(undo.transaction_count(), 2);
    }

    #[test]
    fn test_select_afterward_takes_every_following_item_of_the_member() {
        let (mut view, mut undo, sato) = sample_world();
        let earlier = item("earlier", &sato, 2, 3);
        let start = item("start", &sato, 9, 10);
        let after = item("after", &sato, 16, 17);
        {
            let mut edit = WorkItemEditService::new(&mut view, &mut undo);
            edit.add(earlier.clone());
            edit.add(start.clone());
            edit.add(after.clone());
        }
        WorkItemEditService::new(&mut view, &mut undo)
            .select_afterward(&WorkItems::single(start.clone()));
        assert_eq!(view.selected().len(), 2);
        assert!(view.selected().contains(&start));
        assert!(view.selected().contains(&after));
        assert!(!view.selected().contains(&earlier));
    }
}
