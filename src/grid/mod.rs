// Work Item Grid Engine
//
// Owns the view data, axis index, metrics, invalidation cache and the
// in-flight gesture. The shell feeds it input events and a drawing
// surface; it answers with repaint and dialog requests and never calls
// back out.

pub mod axis;
pub mod draw;
pub mod geometry;
pub mod invalid_area;
pub mod surface;
pub mod view_data;

pub use axis::{AxisIndex, ColIndex, RowIndex, FIXED_COLS, FIXED_ROWS};
pub use draw::{item_world_rect, PaintContext, PaintStats};
pub use geometry::{Detail, GridMetrics};
pub use invalid_area::InvalidArea;
pub use surface::{BatchSurface, DrawCmd, Surface};
pub use view_data::ViewData;

use egui::{vec2, Pos2, Rect, Vec2};

use crate::models::app_data::AppData;
use crate::models::calendar::CalendarDay;
use crate::models::filter::Filter;
use crate::models::member::{Member, Members};
use crate::models::work_item::WorkItem;
use crate::models::work_items::WorkItems;
use crate::services::drag::{grip_at, DragState, WorkItemDragService};
use crate::services::edit::WorkItemEditService;
use crate::services::measure::{measure_columns, MeasureInput, MeasuredSizes};
use crate::services::undo::UndoService;

/// Modifier keys travelling with pointer and wheel events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventModifiers {
    pub shift: bool,
    pub control: bool,
}

/// Keys the grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKey {
    Escape,
    Delete,
    /// Held during a move to turn it into a copy.
    CopyToggle,
}

/// One input event in widget-local pixels, origin at the grid's top left.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    PointerDown { pos: Pos2, modifiers: EventModifiers },
    DoubleClick { pos: Pos2 },
    PointerMove { pos: Pos2, modifiers: EventModifiers },
    PointerUp { pos: Pos2 },
    Wheel { delta: Vec2, modifiers: EventModifiers },
    KeyDown { key: GridKey },
    KeyUp { key: GridKey },
}

/// Dialog the shell should open on the user's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum EditRequest {
    /// Edit an existing item.
    Edit(WorkItem),
    /// Create an item on a double-clicked empty cell.
    Create { day: CalendarDay, member: Member },
}

/// What the shell should do after handing the engine an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineResponse {
    pub repaint: bool,
    pub hover_text: Option<String>,
    pub edit_request: Option<EditRequest>,
    pub ratio_changed: bool,
}

impl EngineResponse {
    pub fn merged(mut self, other: EngineResponse) -> EngineResponse {
        self.repaint |= other.repaint;
        self.ratio_changed |= other.ratio_changed;
        if other.hover_text.is_some() {
            self.hover_text = other.hover_text;
        }
        if other.edit_request.is_some() {
            self.edit_request = other.edit_request;
        }
        self
    }
}

/// The grid engine.
pub struct WorkItemGrid {
    view: ViewData,
    axis: AxisIndex,
    metrics: GridMetrics,
    invalid: InvalidArea,
    drag: WorkItemDragService,
    undo: UndoService,
    measured: Option<MeasuredSizes>,
    scroll: Vec2,
    viewport: Vec2,
}

impl WorkItemGrid {
    pub fn new(app: AppData) -> Self {
        let mut grid = Self {
            view: ViewData::new(app),
            axis: AxisIndex::new(),
            metrics: GridMetrics::new(),
            invalid: InvalidArea::new(),
            drag: WorkItemDragService::new(),
            undo: UndoService::new(),
            measured: None,
            scroll: Vec2::ZERO,
            viewport: vec2(800.0, 600.0),
        };
        grid.rebuild_axes();
        grid
    }

    pub fn view(&self) -> &ViewData {
        &self.view
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn is_copying(&self) -> bool {
        self.drag.is_copying()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Members whose columns await a rebuild on the next paint, mainly
    /// for diagnostics.
    pub fn dirty_members(&self) -> Members {
        let mut dirty = Members::new();
        for (id, member) in self.view.members().iter().enumerate() {
            if !self.invalid.is_valid(id) {
                dirty.add(member.clone());
            }
        }
        dirty
    }

    /// Wholesale rebuild of the axis index, metrics and cache after a
    /// model or filter change.
    fn rebuild_axes(&mut self) {
        self.axis
            .rebuild(self.view.calendar(), self.view.members(), self.view.filter());
        self.metrics
            .rebuild(self.view.detail(), &self.axis, self.measured.as_ref());
        self.invalid.reset(self.view.members().len());
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.metrics.max_scroll(self.viewport);
        self.scroll = vec2(
            self.scroll.x.clamp(0.0, max.x),
            self.scroll.y.clamp(0.0, max.y),
        );
    }

    fn invalidate(&mut self, touched: &Members) {
        self.invalid
            .invalidate(touched, self.view.members(), &self.axis);
    }

    fn after_edit(&mut self, affected: Option<Members>) -> bool {
        match affected {
            Some(members) => {
                self.invalidate(&members);
                true
            }
            None => false,
        }
    }

    /// Swap in a different data set. History belongs to the old data and
    /// is dropped with it.
    pub fn set_app_data(&mut self, app: AppData) {
        self.undo.clear();
        self.measured = None;
        self.view.set_app(app);
        self.rebuild_axes();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.view.set_filter(filter);
        self.rebuild_axes();
    }

    pub fn set_selected(&mut self, selection: WorkItems) {
        self.view.set_selected(selection);
    }

    /// Tell the engine how large the widget is this frame.
    pub fn set_viewport(&mut self, size: Vec2) {
        if size != self.viewport {
            self.viewport = size;
            self.clamp_scroll();
        }
    }

    /// Scroll by a pixel delta, clamped to the grid. Batches are in world
    /// space, so nothing is invalidated.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        let max = self.metrics.max_scroll(self.viewport);
        let next = vec2(
            (self.scroll.x + delta.x).clamp(0.0, max.x),
            (self.scroll.y + delta.y).clamp(0.0, max.y),
        );
        if next == self.scroll {
            return false;
        }
        self.scroll = next;
        true
    }

    /// Zoom by wheel steps. Pixel sizes change; which day sits on which
    /// row does not, so the axis index stays as it is.
    pub fn bump_ratio(&mut self, steps: f32) -> bool {
        if !self.view.detail_mut().bump_ratio(steps) {
            return false;
        }
        self.after_ratio_change();
        true
    }

    /// Set the zoom ratio directly, clamped like the wheel steps are.
    pub fn set_ratio(&mut self, ratio: f32) -> bool {
        if !self.view.detail_mut().set_ratio(ratio) {
            return false;
        }
        self.after_ratio_change();
        true
    }

    fn after_ratio_change(&mut self) {
        self.metrics
            .rebuild(self.view.detail(), &self.axis, self.measured.as_ref());
        self.invalid.invalidate_all();
        self.clamp_scroll();
    }

    pub fn undo(&mut self) -> bool {
        let affected = self.undo.undo(self.view.work_items_mut());
        self.after_history(affected)
    }

    pub fn redo(&mut self) -> bool {
        let affected = self.undo.redo(self.view.work_items_mut());
        self.after_history(affected)
    }

    fn after_history(&mut self, affected: Option<Members>) -> bool {
        let Some(mut touched) = affected else {
            return false;
        };
        for member in self.view.prune_selection().iter() {
            touched.add(member.clone());
        }
        self.invalidate(&touched);
        true
    }

    /// Add an item, growing the calendar and member roster to hold it.
    pub fn add_work_item(&mut self, item: WorkItem) -> bool {
        if self.view.ensure_registered(&item) {
            self.rebuild_axes();
        }
        let affected = WorkItemEditService::new(&mut self.view, &mut self.undo).add(item);
        self.after_edit(affected)
    }

    /// Add a batch of items as one undoable action.
    pub fn add_work_items(&mut self, items: WorkItems) -> bool {
        let mut grew = false;
        for item in items.iter() {
            grew |= self.view.ensure_registered(item);
        }
        if grew {
            self.rebuild_axes();
        }
        let affected = WorkItemEditService::new(&mut self.view, &mut self.undo).add_all(&items);
        self.after_edit(affected)
    }

    /// Commit a dialog edit, selecting the item's new shape.
    pub fn replace_work_item(&mut self, before: &WorkItem, after: WorkItem) -> bool {
        if self.view.ensure_registered(&after) {
            self.rebuild_axes();
        }
        let affected =
            WorkItemEditService::new(&mut self.view, &mut self.undo).replace(before, after.clone());
        if !self.after_edit(affected) {
            return false;
        }
        self.view.set_selected(WorkItems::single(after));
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        let affected = WorkItemEditService::new(&mut self.view, &mut self.undo).delete_selected();
        self.after_edit(affected)
    }

    pub fn divide_selected(&mut self, divided_days: usize, remain_days: usize) -> bool {
        let affected = WorkItemEditService::new(&mut self.view, &mut self.undo)
            .divide_selected(divided_days, remain_days);
        self.after_edit(affected)
    }

    pub fn done_selected(&mut self) -> bool {
        let affected = WorkItemEditService::new(&mut self.view, &mut self.undo).done_selected();
        self.after_edit(affected)
    }

    pub fn align_afterward(&mut self, starts: &WorkItems) -> bool {
        let affected =
            WorkItemEditService::new(&mut self.view, &mut self.undo).align_afterward(starts);
        self.after_edit(affected)
    }

    pub fn select_afterward(&mut self, starts: &WorkItems) -> bool {
        let touched =
            WorkItemEditService::new(&mut self.view, &mut self.undo).select_afterward(starts);
        !touched.is_empty()
    }

    /// Measure real label sizes on worker threads and widen the grid to
    /// fit them.
    pub fn auto_fit(&mut self, measure: &(dyn Fn(&str) -> Vec2 + Sync)) {
        let input = MeasureInput {
            members: self.view.members(),
            items: self.view.work_items(),
            min_col_width: self.view.detail().col_width,
            min_row_height: self.view.detail().row_height,
            padding: 12.0,
        };
        let sizes = measure_columns(&input, measure);
        self.measured = Some(sizes);
        self.metrics
            .rebuild(self.view.detail(), &self.axis, self.measured.as_ref());
        self.invalid.invalidate_all();
        self.clamp_scroll();
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: GridEvent) -> EngineResponse {
        match event {
            GridEvent::PointerDown { pos, modifiers } => self.on_pointer_down(pos, modifiers),
            GridEvent::DoubleClick { pos } => self.on_double_click(pos),
            GridEvent::PointerMove { pos, modifiers } => self.on_pointer_move(pos, modifiers),
            GridEvent::PointerUp { pos } => self.on_pointer_up(pos),
            GridEvent::Wheel { delta, modifiers } => self.on_wheel(delta, modifiers),
            GridEvent::KeyDown { key } => self.on_key_down(key),
            GridEvent::KeyUp { key } => self.on_key_up(key),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, modifiers: EventModifiers) -> EngineResponse {
        let mut out = EngineResponse::default();

        if modifiers.control {
            // Toggle membership in the selection; no gesture starts.
            if let Some(item) = self.pick(pos).cloned() {
                let mut selection = self.view.selected().clone();
                if !selection.remove(&item) {
                    selection.add(item);
                }
                self.view.set_selected(selection);
                out.repaint = true;
            }
            return out;
        }

        if let Some(item) = self.view.selected_one().cloned() {
            if let Some(bounds) = self.item_screen_rect(&item) {
                let grip_height = self.view.detail().scaled_grip_height();
                if let Some(direction) = grip_at(bounds, grip_height, pos) {
                    self.drag.start_resize(&item, direction);
                    out.repaint = true;
                    return out;
                }
            }
        }

        match self.pick(pos).cloned() {
            Some(item) => {
                self.view.set_selected(WorkItems::single(item.clone()));
                if let Some(day) = self.day_at(pos) {
                    self.drag.start_move(&item, pos, day);
                }
                out.repaint = true;
            }
            None => {
                let cleared = self.view.clear_selection();
                out.repaint = !cleared.is_empty();
            }
        }
        out
    }

    fn on_double_click(&mut self, pos: Pos2) -> EngineResponse {
        let mut out = EngineResponse::default();
        if self.drag.is_active() {
            // The second press of the double click started a move; drop it
            // before handing control to a dialog.
            self.drag.end(&mut self.view, &mut self.undo, true);
        }
        if let Some(item) = self.pick(pos).cloned() {
            out.edit_request = Some(EditRequest::Edit(item));
        } else if let (Some(day), Some(member)) = (self.day_at(pos), self.member_at(pos)) {
            out.edit_request = Some(EditRequest::Create {
                day,
                member: member.clone(),
            });
        }
        out.repaint = true;
        out
    }

    fn on_pointer_move(&mut self, pos: Pos2, modifiers: EventModifiers) -> EngineResponse {
        let mut out = EngineResponse::default();
        if self.drag.is_active() {
            let before_member = self
                .view
                .selected_one()
                .map(|item| item.assigned_member.clone());
            let target = match (self.day_at(pos), self.member_at(pos)) {
                (Some(day), Some(member)) => Some((day, member.clone())),
                _ => None,
            };
            if self.drag.update(&mut self.view, target, pos, modifiers.shift) {
                let mut touched = Members::new();
                if let Some(member) = before_member {
                    touched.add(member);
                }
                if let Some(live) = self.view.selected_one() {
                    touched.add(live.assigned_member.clone());
                }
                self.invalidate(&touched);
                out.repaint = true;
            }
        } else {
            out.hover_text = self.pick(pos).map(|item| item.to_string());
        }
        out
    }

    fn on_pointer_up(&mut self, _pos: Pos2) -> EngineResponse {
        let mut out = EngineResponse::default();
        if let Some(touched) = self.drag.end(&mut self.view, &mut self.undo, false) {
            self.invalidate(&touched);
            out.repaint = true;
        }
        out
    }

    fn on_wheel(&mut self, delta: Vec2, modifiers: EventModifiers) -> EngineResponse {
        let mut out = EngineResponse::default();
        if modifiers.control {
            let steps = if delta.y > 0.0 {
                1.0
            } else if delta.y < 0.0 {
                -1.0
            } else {
                0.0
            };
            if steps != 0.0 && self.bump_ratio(steps) {
                out.ratio_changed = true;
                out.repaint = true;
            }
        } else {
            out.repaint = self.scroll_by(-delta);
        }
        out
    }

    fn on_key_down(&mut self, key: GridKey) -> EngineResponse {
        let mut out = EngineResponse::default();
        match key {
            GridKey::Escape => {
                if let Some(touched) = self.drag.end(&mut self.view, &mut self.undo, true) {
                    self.invalidate(&touched);
                } else {
                    self.view.clear_selection();
                }
                out.repaint = true;
            }
            GridKey::Delete => {
                out.repaint = self.delete_selected();
            }
            GridKey::CopyToggle => {
                out.repaint = self.toggle_copying(true);
            }
        }
        out
    }

    fn on_key_up(&mut self, key: GridKey) -> EngineResponse {
        let mut out = EngineResponse::default();
        if key == GridKey::CopyToggle {
            out.repaint = self.toggle_copying(false);
        }
        out
    }

    fn toggle_copying(&mut self, on: bool) -> bool {
        if !self.drag.set_copying(on, self.view.work_items_mut()) {
            return false;
        }
        // The planted clone lives in the starting member's column.
        if let DragState::Moving { before, .. } = self.drag.state() {
            let touched: Members = [before.assigned_member.clone()].into_iter().collect();
            self.invalid
                .invalidate(&touched, self.view.members(), &self.axis);
        }
        true
    }

    /// First item, in insertion order, whose bar covers the cell under
    /// `pos`. Filtered items never pick.
    pub fn pick(&self, pos: Pos2) -> Option<&WorkItem> {
        let day = self.day_at(pos)?;
        let member = self.member_at(pos)?;
        self.view
            .filtered_items_of_member(member)
            .find(|item| self.view.calendar().days_in(&item.period).contains(&day))
    }

    /// Calendar day of the content row under screen `y`; `None` over
    /// headers or off the grid.
    pub fn day_at(&self, pos: Pos2) -> Option<CalendarDay> {
        let row = self.metrics.row_at_y(pos.y, self.scroll.y)?;
        self.axis.day_of_row(self.view.calendar(), row)
    }

    /// Member of the column under screen `x`; `None` over the date band
    /// or off the grid.
    pub fn member_at(&self, pos: Pos2) -> Option<&Member> {
        let col = self.metrics.col_at_x(pos.x, self.scroll.x)?;
        self.axis.member_of_col(self.view.members(), col)
    }

    /// Screen-space bounds of an item's bar.
    pub fn item_screen_rect(&self, item: &WorkItem) -> Option<Rect> {
        item_world_rect(&self.view, &self.axis, &self.metrics, item)
            .map(|world| GridMetrics::to_screen(world, self.scroll))
    }

    /// Paint one frame through `surface`.
    pub fn paint(&mut self, surface: &mut dyn Surface) -> PaintStats {
        let ctx = PaintContext {
            view: &self.view,
            axis: &self.axis,
            metrics: &self.metrics,
            scroll: self.scroll,
            viewport: self.viewport,
        };
        draw::paint(&ctx, &mut self.invalid, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::Calendar;
    use crate::models::period::Period;
    use crate::models::work_item::{Project, Tags, TaskState};
    use egui::pos2;

    fn day(d: u32) -> CalendarDay {
        CalendarDay::new(2026, 3, d).unwrap()
    }

    fn member(last: &str) -> Member {
        Member::new("Acme", last, "")
    }

    fn sample_item(name: &str, who: &str, from: u32, to: u32) -> WorkItem {
        WorkItem::new(
            Project::new("Atlas"),
            name,
            Tags::new(),
            Period::new(day(from), day(to)).unwrap(),
            member(who),
            TaskState::Active,
        )
    }

    fn sample_grid(items: Vec<WorkItem>) -> WorkItemGrid {
        let mut app = AppData::new(
            Calendar::weekdays(day(2), day(31)),
            ["Aoki", "Baba", "Chiba"].into_iter().map(member).collect(),
        );
        for item in items {
            app.work_items.add(item);
        }
        WorkItemGrid::new(app)
    }

    // Screen position over the middle of a day row in a member column,
    // assuming default detail sizes and no scroll.
    fn cell_pos(day_index: usize, member_index: usize) -> Pos2 {
        let x = 96.0 + member_index as f32 * 120.0 + 60.0;
        let y = 66.0 + day_index as f32 * 22.0 + 11.0;
        pos2(x, y)
    }

    #[test]
    fn test_new_grid_builds_its_axes() {
        let grid = sample_grid(vec![]);
        assert_eq!(grid.metrics().col_count(), FIXED_COLS + 3);
        assert!(grid.metrics().row_count() > FIXED_ROWS);
    }

    #[test]
    fn test_click_selects_the_item_under_the_pointer() {
        // Day 3 is the second calendar row, Baba the second member column.
        let item = sample_item("picked", "Baba", 3, 5);
        let mut grid = sample_grid(vec![item.clone()]);

        let out = grid.handle_event(GridEvent::PointerDown {
            pos: cell_pos(1, 1),
            modifiers: EventModifiers::default(),
        });
        assert!(out.repaint);
        assert_eq!(grid.view().selected_one(), Some(&item));
        assert!(grid.is_dragging());

        grid.handle_event(GridEvent::PointerUp { pos: cell_pos(1, 1) });
        assert!(!grid.is_dragging());
    }

    #[test]
    fn test_click_on_empty_cell_clears_the_selection() {
        let item = sample_item("lonely", "Aoki", 2, 2);
        let mut grid = sample_grid(vec![item.clone()]);
        grid.set_selected(WorkItems::single(item));

        let out = grid.handle_event(GridEvent::PointerDown {
            pos: cell_pos(5, 2),
            modifiers: EventModifiers::default(),
        });
        assert!(out.repaint);
        assert!(grid.view().selected().is_empty());
    }

    #[test]
    fn test_control_click_toggles_selection_membership() {
        let a = sample_item("a", "Aoki", 2, 3);
        let b = sample_item("b", "Baba", 2, 3);
        let mut grid = sample_grid(vec![a.clone(), b.clone()]);
        let control = EventModifiers {
            control: true,
            ..EventModifiers::default()
        };

        grid.handle_event(GridEvent::PointerDown { pos: cell_pos(0, 0), modifiers: control });
        grid.handle_event(GridEvent::PointerDown { pos: cell_pos(0, 1), modifiers: control });
        assert_eq!(grid.view().selected().len(), 2);
        assert!(!grid.is_dragging());

        grid.handle_event(GridEvent::PointerDown { pos: cell_pos(0, 0), modifiers: control });
        assert_eq!(grid.view().selected().len(), 1);
        assert_eq!(grid.view().selected_one(), Some(&b));
    }

    #[test]
    fn test_double_click_requests_the_right_dialog() {
        let item = sample_item("editable", "Aoki", 2, 3);
        let mut grid = sample_grid(vec![item.clone()]);

        let on_item = grid.handle_event(GridEvent::DoubleClick { pos: cell_pos(0, 0) });
        assert_eq!(on_item.edit_request, Some(EditRequest::Edit(item)));

        let on_empty = grid.handle_event(GridEvent::DoubleClick { pos: cell_pos(4, 2) });
        assert_eq!(
            on_empty.edit_request,
            Some(EditRequest::Create {
                day: day(6),
                member: member("Chiba"),
            })
        );

        let on_header = grid.handle_event(GridEvent::DoubleClick { pos: pos2(200.0, 10.0) });
        assert_eq!(on_header.edit_request, None);
    }

    #[test]
    fn test_zoom_rescales_without_touching_the_axis() {
        let mut grid = sample_grid(vec![]);
        let days_before = grid.axis.visible_day_count();
        let height_before = grid.metrics().grid_height();

        let out = grid.handle_event(GridEvent::Wheel {
            delta: vec2(0.0, 1.0),
            modifiers: EventModifiers {
                control: true,
                ..EventModifiers::default()
            },
        });
        assert!(out.ratio_changed);
        assert_eq!(grid.axis.visible_day_count(), days_before);
        assert!(grid.metrics().grid_height() > height_before);
    }

    #[test]
    fn test_wheel_scrolls_and_clamps() {
        let mut grid = sample_grid(vec![]);
        grid.set_viewport(vec2(300.0, 200.0));

        let out = grid.handle_event(GridEvent::Wheel {
            delta: vec2(0.0, -50.0),
            modifiers: EventModifiers::default(),
        });
        assert!(out.repaint);
        assert!(grid.scroll().y > 0.0);

        // Scrolling far past the end pins to the maximum.
        grid.handle_event(GridEvent::Wheel {
            delta: vec2(0.0, -10_000.0),
            modifiers: EventModifiers::default(),
        });
        let max = grid.metrics().max_scroll(vec2(300.0, 200.0));
        assert!((grid.scroll().y - max.y).abs() < 0.01);
    }

    #[test]
    fn test_escape_cancels_an_active_drag() {
        let item = sample_item("movable", "Aoki", 2, 3);
        let mut grid = sample_grid(vec![item.clone()]);

        grid.handle_event(GridEvent::PointerDown {
            pos: cell_pos(0, 0),
            modifiers: EventModifiers::default(),
        });
        grid.handle_event(GridEvent::PointerMove {
            pos: cell_pos(3, 1),
            modifiers: EventModifiers::default(),
        });
        assert_ne!(grid.view().selected_one(), Some(&item));

        grid.handle_event(GridEvent::KeyDown { key: GridKey::Escape });
        assert!(!grid.is_dragging());
        assert!(grid.view().work_items().contains(&item));
        assert!(!grid.can_undo());
    }

    #[test]
    fn test_delete_key_removes_the_selection() {
        let item = sample_item("doomed", "Aoki", 2, 3);
        let mut grid = sample_grid(vec![item.clone()]);
        grid.set_selected(WorkItems::single(item));

        let out = grid.handle_event(GridEvent::KeyDown { key: GridKey::Delete });
        assert!(out.repaint);
        assert!(grid.view().work_items().is_empty());
        assert!(grid.can_undo());
    }

    #[test]
    fn test_add_work_item_grows_calendar_and_roster() {
        let mut grid = sample_grid(vec![]);
        let outsider = WorkItem::new(
            Project::new("Atlas"),
            "new hire ramp-up",
            Tags::new(),
            Period::new(day(2), CalendarDay::new(2026, 4, 3).unwrap()).unwrap(),
            member("Endo"),
            TaskState::New,
        );

        assert!(grid.add_work_item(outsider.clone()));
        assert!(grid.view().members().contains(&member("Endo")));
        assert!(grid.view().calendar().contains(CalendarDay::new(2026, 4, 3).unwrap()));
        assert_eq!(grid.metrics().col_count(), FIXED_COLS + 4);
        assert!(grid.pick(cell_pos(0, 3)).is_some());
    }

    #[test]
    fn test_hidden_member_cannot_be_picked() {
        let item = sample_item("hidden", "Baba", 2, 3);
        let mut grid = sample_grid(vec![item]);
        assert!(grid.pick(cell_pos(0, 1)).is_some());

        let mut filter = grid.view().filter().clone();
        filter.hidden_members.add(member("Baba"));
        grid.set_filter(filter);

        // Chiba slides into the freed column; the item no longer picks.
        let picked = grid.pick(cell_pos(0, 1));
        assert!(picked.is_none());
    }
}
