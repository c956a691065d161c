// View data
// Authoritative app data plus filter, selection and zoom state for one grid

use regex::Regex;

use crate::grid::geometry::Detail;
use crate::models::app_data::AppData;
use crate::models::calendar::Calendar;
use crate::models::filter::Filter;
use crate::models::member::{Member, Members};
use crate::models::work_item::WorkItem;
use crate::models::work_items::WorkItems;

/// Everything the grid renders and edits, bundled behind one façade.
///
/// The engine owns this and reacts to changes through its own mutators;
/// nothing here calls back out.
#[derive(Debug, Clone)]
pub struct ViewData {
    app: AppData,
    filter: Filter,
    item_pattern: Option<Regex>,
    selected: WorkItems,
    detail: Detail,
}

impl ViewData {
    pub fn new(app: AppData) -> Self {
        Self {
            app,
            filter: Filter::default(),
            item_pattern: None,
            selected: WorkItems::new(),
            detail: Detail::default(),
        }
    }

    pub fn app(&self) -> &AppData {
        &self.app
    }

    /// Swap in a new data set. The selection cannot survive it.
    pub fn set_app(&mut self, app: AppData) {
        self.app = app;
        self.selected = WorkItems::new();
    }

    pub fn calendar(&self) -> &Calendar {
        &self.app.calendar
    }

    pub fn members(&self) -> &Members {
        &self.app.members
    }

    pub fn work_items(&self) -> &WorkItems {
        &self.app.work_items
    }

    pub fn work_items_mut(&mut self) -> &mut WorkItems {
        &mut self.app.work_items
    }

    /// Grow calendar/members for a freshly created item. Returns true when
    /// the axes must be rebuilt.
    pub fn ensure_registered(&mut self, item: &WorkItem) -> bool {
        self.app.ensure_registered(item)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Install a new filter, compiling its item pattern. An unusable pattern
    /// is logged and filters nothing.
    pub fn set_filter(&mut self, filter: Filter) {
        self.item_pattern = match &filter.item_pattern {
            Some(pattern) => match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    log::warn!("ignoring unusable item filter pattern {pattern:?}: {err}");
                    None
                }
            },
            None => None,
        };
        self.filter = filter;
    }

    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> &mut Detail {
        &mut self.detail
    }

    pub fn selected(&self) -> &WorkItems {
        &self.selected
    }

    /// The selected item when exactly one is selected; drags operate on this.
    pub fn selected_one(&self) -> Option<&WorkItem> {
        if self.selected.len() == 1 {
            self.selected.first()
        } else {
            None
        }
    }

    /// Replace the selection, returning the members of both the previous and
    /// the new selection so their columns can be repainted.
    pub fn set_selected(&mut self, selection: WorkItems) -> Members {
        let mut touched = self.selected.members();
        for member in selection.members().iter() {
            touched.add(member.clone());
        }
        self.selected = selection;
        touched
    }

    pub fn clear_selection(&mut self) -> Members {
        self.set_selected(WorkItems::new())
    }

    /// Drop selected entries that no longer exist in the collection,
    /// returning the members of the dropped entries.
    pub fn prune_selection(&mut self) -> Members {
        let keep = self.app.work_items.clone();
        self.selected.retain_present_in(&keep)
    }

    /// Rewrite the live selected item in place, both in the authoritative
    /// collection and in the selection set. Returns false when `old` is no
    /// longer present.
    pub fn rewrite_selected(&mut self, old: &WorkItem, new: WorkItem) -> bool {
        let replacement = new;
        if !self
            .app
            .work_items
            .update_first(old, |item| *item = replacement.clone())
        {
            return false;
        }
        self.selected.update_first(old, |item| *item = replacement);
        true
    }

    fn matches_pattern(&self, item: &WorkItem) -> bool {
        match &self.item_pattern {
            Some(regex) => regex.is_match(&item.to_string()),
            None => true,
        }
    }

    /// Whether the item survives the member and name-pattern filters. Day
    /// filtering happens in the axis index, not here, so an item reaching
    /// past the visible range still shows its visible days.
    pub fn is_item_visible(&self, item: &WorkItem) -> bool {
        self.filter.is_member_visible(&item.assigned_member) && self.matches_pattern(item)
    }

    /// The member's items that survive the name-pattern filter, in insertion
    /// order.
    pub fn filtered_items_of_member<'a>(
        &'a self,
        member: &'a Member,
    ) -> impl Iterator<Item = &'a WorkItem> {
        self.app
            .work_items
            .of_member(member)
            .filter(|item| self.matches_pattern(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::CalendarDay;
    use crate::models::period::Period;
    use crate::models::work_item::{Project, Tags, TaskState};

    fn sample_view() -> (ViewData, Member, Member) {
        let sato = Member::new("Acme", "Sato", "Ken");
        let baba = Member::new("Acme", "Baba", "Jun");
        let from = CalendarDay::new(2026, 3, 2).unwrap();
        let to = CalendarDay::new(2026, 3, 13).unwrap();
        let mut app = AppData::new(
            Calendar::weekdays(from, to),
            [sato.clone(), baba.clone()].into_iter().collect(),
        );
        app.work_items.add(item("design review", &sato, 2));
        app.work_items.add(item("api sketch", &sato, 4));
        app.work_items.add(item("triage", &baba, 3));
        (ViewData::new(app), sato, baba)
    }

    fn item(name: &str, member: &Member, day: u32) -> WorkItem {
        WorkItem::new(
            Project::new("Atlas"),
            name,
            Tags::new(),
            Period::on_day(CalendarDay::new(2026, 3, day).unwrap()),
            member.clone(),
            TaskState::Active,
        )
    }

    #[test]
    fn test_item_pattern_narrows_member_items() {
        let (mut view, sato, _) = sample_view();
        view.set_filter(Filter {
            item_pattern: Some("design".to_string()),
            ..Filter::default()
        });
        let names: Vec<String> = view
            .filtered_items_of_member(&sato)
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(names, ["design review"]);
    }

    #[test]
    fn test_unusable_pattern_filters_nothing() {
        let (mut view, sato, _) = sample_view();
        view.set_filter(Filter {
            item_pattern: Some("(unclosed".to_string()),
            ..Filter::default()
        });
        assert_eq!(view.filtered_items_of_member(&sato).count(), 2);
    }

    #[test]
    fn test_set_selected_reports_old_and_new_members() {
        let (mut view, sato, baba) = sample_view();
        view.set_selected(WorkItems::single(item("design review", &sato, 2)));
        let touched = view.set_selected(WorkItems::single(item("triage", &baba, 3)));
        assert!(touched.contains(&sato));
        assert!(touched.contains(&baba));
    }

    #[test]
    fn test_prune_selection_drops_stale_entries() {
        let (mut view, sato, _) = sample_view();
        let stale = item("never added", &sato, 5);
        view.set_selected(WorkItems::single(stale));
        let dropped = view.prune_selection();
        assert!(view.selected().is_empty());
        assert!(dropped.contains(&sato));
    }

    #[test]
    fn test_rewrite_selected_updates_collection_and_selection() {
        let (mut view, sato, _) = sample_view();
        let old = item("design review", &sato, 2);
        view.set_selected(WorkItems::single(old.clone()));
        let mut new = old.clone();
        new.name = "design review 2".to_string();
        assert!(view.rewrite_selected(&old, new.clone()));
        assert!(view.work_items().contains(&new));
        assert!(!view.work_items().contains(&old));
        assert_eq!(view.selected_one(), Some(&new));
    }
}
