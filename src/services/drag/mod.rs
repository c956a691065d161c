// Work Item Drag Service
//
// Tracks one in-flight move or resize gesture as a tagged state machine.
// The selected item is rewritten live while the pointer moves; `end` rolls
// it back to the starting snapshot and commits the final shape through the
// edit service, so a whole gesture lands as exactly one undo transaction.

use egui::{pos2, Pos2, Rect};

use crate::grid::view_data::ViewData;
use crate::models::calendar::CalendarDay;
use crate::models::member::{Member, Members};
use crate::models::period::Period;
use crate::models::work_item::WorkItem;
use crate::models::work_items::WorkItems;
use crate::services::edit::WorkItemEditService;
use crate::services::undo::UndoService;

/// Which end of the period a resize gesture follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Start,
    End,
}

/// Gesture currently in flight, if any.
///
/// `before` is a snapshot of the item as the gesture began; every motion
/// update is computed relative to it, never to the previous frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Moving {
        before: WorkItem,
        grip_day: CalendarDay,
        grip_pos: Pos2,
        copying: bool,
    },
    Resizing {
        before: WorkItem,
        direction: ResizeDirection,
    },
}

#[derive(Debug, Default)]
pub struct WorkItemDragService {
    state: DragState,
}

impl WorkItemDragService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, DragState::Moving { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, DragState::Resizing { .. })
    }

    pub fn is_copying(&self) -> bool {
        matches!(self.state, DragState::Moving { copying: true, .. })
    }

    /// Begin moving `item`, gripped at `grip_pos` over `grip_day`.
    pub fn start_move(&mut self, item: &WorkItem, grip_pos: Pos2, grip_day: CalendarDay) {
        if self.is_active() {
            log::warn!("starting a move while another gesture is active");
        }
        self.state = DragState::Moving {
            before: item.clone(),
            grip_day,
            grip_pos,
            copying: false,
        };
    }

    /// Begin dragging one end of `item`'s period.
    pub fn start_resize(&mut self, item: &WorkItem, direction: ResizeDirection) {
        if self.is_active() {
            log::warn!("starting a resize while another gesture is active");
        }
        self.state = DragState::Resizing {
            before: item.clone(),
            direction,
        };
    }

    /// Toggle copy mode mid-move. Turning it on plants a clone of the
    /// starting snapshot in the collection so the original keeps its spot
    /// while the live item travels; turning it off removes that clone.
    ///
    /// Returns whether the mode actually changed. Ignored outside a move.
    pub fn set_copying(&mut self, on: bool, items: &mut WorkItems) -> bool {
        match &mut self.state {
            DragState::Moving { before, copying, .. } => {
                if *copying == on {
                    return false;
                }
                if on {
                    items.add(before.clone());
                } else {
                    items.remove(before);
                }
                *copying = on;
                true
            }
            _ => false,
        }
    }

    /// Follow the pointer. `target` is the unfixed cell under it, already
    /// resolved to a day and member; when the pointer is over headers or
    /// off the grid there is nothing to follow and the item keeps its last
    /// shape. With `axis_lock` the dominant pointer axis wins: mostly
    /// vertical motion moves only days, mostly horizontal only the member.
    ///
    /// Returns whether the selected item was rewritten.
    pub fn update(
        &mut self,
        view: &mut ViewData,
        target: Option<(CalendarDay, Member)>,
        pos: Pos2,
        axis_lock: bool,
    ) -> bool {
        let Some(live) = view.selected_one().cloned() else {
            return false;
        };
        let updated = match &self.state {
            DragState::Idle => return false,
            DragState::Moving {
                before,
                grip_day,
                grip_pos,
                ..
            } => {
                let Some((day, member)) = target else {
                    return false;
                };
                let mut updated = live.clone();
                let delta = pos - *grip_pos;
                let vertical_only = axis_lock && delta.x.abs() < delta.y.abs();
                let horizontal_only = axis_lock && !vertical_only;
                if horizontal_only {
                    updated.period = before.period.clone();
                } else {
                    let Some(offset) = view.calendar().offset(*grip_day, day) else {
                        return false;
                    };
                    updated.period = before.period.apply_offset(offset, view.calendar());
                }
                updated.assigned_member = if vertical_only {
                    before.assigned_member.clone()
                } else {
                    member
                };
                updated
            }
            DragState::Resizing {
                direction: ResizeDirection::Start,
                ..
            } => {
                let Some((day, _)) = target else {
                    return false;
                };
                let calendar = view.calendar();
                // The new start sits one day below the pointer and may
                // never cross the fixed end.
                let Some(new_from) = calendar.apply_offset(day, 1) else {
                    return false;
                };
                match calendar.offset(new_from, live.period.to) {
                    Some(span) if span >= 0 => {}
                    _ => return false,
                }
                if new_from == live.period.from {
                    return false;
                }
                let mut updated = live.clone();
                updated.period = Period {
                    from: new_from,
                    to: live.period.to,
                };
                updated
            }
            DragState::Resizing {
                direction: ResizeDirection::End,
                ..
            } => {
                let Some((day, _)) = target else {
                    return false;
                };
                let calendar = view.calendar();
                let Some(new_to) = calendar.apply_offset(day, -1) else {
                    return false;
                };
                match calendar.offset(live.period.from, new_to) {
                    Some(span) if span >= 0 => {}
                    _ => return false,
                }
                if new_to == live.period.to {
                    return false;
                }
                let mut updated = live.clone();
                updated.period = Period {
                    from: live.period.from,
                    to: new_to,
                };
                updated
            }
        };
        if updated == live {
            return false;
        }
        view.rewrite_selected(&live, updated)
    }

    /// Finish the gesture. The machine is Idle again on every path out,
    /// including cancellation and early bailouts.
    ///
    /// Returns the members whose columns changed, or `None` if no gesture
    /// was in flight.
    pub fn end(
        &mut self,
        view: &mut ViewData,
        undo: &mut UndoService,
        cancel: bool,
    ) -> Option<Members> {
        // Take the gesture out first so every return leaves Idle behind.
        let state = std::mem::take(&mut self.state);
        let (before, copying) = match state {
            DragState::Idle => return None,
            DragState::Moving {
                before, copying, ..
            } => (before, copying),
            DragState::Resizing { before, .. } => (before, false),
        };

        let mut touched = Members::new();
        touched.add(before.assigned_member.clone());

        let Some(live) = view.selected_one().cloned() else {
            // Selection vanished mid-gesture; drop a planted clone and bail.
            if copying {
                view.work_items_mut().remove(&before);
            }
            log::warn!("drag ended without a single selected item");
            return Some(touched);
        };
        let edit = live.clone();
        touched.add(edit.assigned_member.clone());

        if edit == before {
            // Never moved. The planted clone is indistinguishable from the
            // live item, so removing either leaves the collection as it
            // started.
            if copying {
                view.work_items_mut().remove(&before);
            }
            return Some(touched);
        }

        // Roll the live item back to its starting snapshot. The clone goes
        // first while the live entry still differs from it structurally.
        if copying {
            view.work_items_mut().remove(&before);
        }
        view.rewrite_selected(&live, before.clone());

        if cancel {
            log::debug!("drag cancelled, restored {before}");
            return Some(touched);
        }

        let affected = if copying {
            WorkItemEditService::new(view, undo).add(edit.clone())
        } else {
            WorkItemEditService::new(view, undo).replace(&before, edit.clone())
        };
        if let Some(members) = affected {
            view.set_selected(WorkItems::single(edit));
            for member in members.iter() {
                touched.add(member.clone());
            }
        }
        Some(touched)
    }
}

/// Band hugging the top edge of an item's bounds that begins a start
/// resize.
pub fn top_grip_rect(bounds: Rect, grip_height: f32) -> Rect {
    Rect::from_min_max(
        pos2(bounds.left(), bounds.top() - grip_height),
        pos2(bounds.right(), bounds.top()),
    )
}

/// Band below the bottom edge that begins an end resize.
pub fn bottom_grip_rect(bounds: Rect, grip_height: f32) -> Rect {
    Rect::from_min_max(
        pos2(bounds.left(), bounds.bottom()),
        pos2(bounds.right(), bounds.bottom() + grip_height),
    )
}

/// Which resize grip of `bounds`, if either, sits under `pos`.
pub fn grip_at(bounds: Rect, grip_height: f32, pos: Pos2) -> Option<ResizeDirection> {
    if top_grip_rect(bounds, grip_height).contains(pos) {
        Some(ResizeDirection::Start)
    } else if bottom_grip_rect(bounds, grip_height).contains(pos) {
        Some(ResizeDirection::End)
    } else {
        None
    }
}
