//! egui shell for the work item grid.
//!
//! Allocates the widget rect, translates egui input into engine events in
//! widget-local coordinates, and paints the engine's draw calls through the
//! clipped painter. All scheduling behaviour lives in the engine; this file
//! is adapter only.

use egui::{pos2, Align2, Color32, CursorIcon, FontId, Id, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::grid::{
    EngineResponse, EventModifiers, GridEvent, GridKey, Surface, WorkItemGrid,
};
use crate::services::drag::grip_at;

pub struct GridWidget;

impl GridWidget {
    /// Show the grid in the remaining space of `ui`.
    pub fn show(grid: &mut WorkItemGrid, ui: &mut egui::Ui) -> EngineResponse {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        grid.set_viewport(rect.size());

        let origin = rect.min.to_vec2();
        let to_local = |pos: Pos2| pos - origin;
        let mut out = EngineResponse::default();

        let (modifiers, escape, delete, wheel) = ui.input(|i| {
            (
                EventModifiers {
                    shift: i.modifiers.shift,
                    control: i.modifiers.command,
                },
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Delete),
                i.raw_scroll_delta,
            )
        });

        if escape {
            out = out.merged(grid.handle_event(GridEvent::KeyDown {
                key: GridKey::Escape,
            }));
        }
        if delete && response.hovered() {
            out = out.merged(grid.handle_event(GridEvent::KeyDown {
                key: GridKey::Delete,
            }));
        }

        // The copy toggle follows the modifier key edge, tracked across
        // frames in egui memory.
        let copy_key_id = Id::new("work_item_grid_copy_key");
        let was_down = ui
            .ctx()
            .memory_mut(|mem| mem.data.get_temp::<bool>(copy_key_id))
            .unwrap_or(false);
        if modifiers.control != was_down {
            ui.ctx()
                .memory_mut(|mem| mem.data.insert_temp(copy_key_id, modifiers.control));
            let event = if modifiers.control {
                GridEvent::KeyDown {
                    key: GridKey::CopyToggle,
                }
            } else {
                GridEvent::KeyUp {
                    key: GridKey::CopyToggle,
                }
            };
            out = out.merged(grid.handle_event(event));
        }

        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                out = out.merged(grid.handle_event(GridEvent::DoubleClick {
                    pos: to_local(pos),
                }));
            }
        } else if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                out = out.merged(grid.handle_event(GridEvent::PointerDown {
                    pos: to_local(pos),
                    modifiers,
                }));
            }
        } else if response.drag_stopped() {
            let pos = response
                .interact_pointer_pos()
                .unwrap_or(rect.center());
            out = out.merged(grid.handle_event(GridEvent::PointerUp {
                pos: to_local(pos),
            }));
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                out = out.merged(grid.handle_event(GridEvent::PointerMove {
                    pos: to_local(pos),
                    modifiers,
                }));
            }
        } else if let Some(pos) = response.hover_pos() {
            out = out.merged(grid.handle_event(GridEvent::PointerMove {
                pos: to_local(pos),
                modifiers,
            }));
        }

        if response.hovered() && wheel != Vec2::ZERO {
            out = out.merged(grid.handle_event(GridEvent::Wheel {
                delta: wheel,
                modifiers,
            }));
        }

        Self::update_cursor(grid, ui, &response, origin);

        let mut surface = PainterSurface {
            painter: ui.painter().with_clip_rect(rect),
            origin,
            font_id: egui::TextStyle::Body.resolve(ui.style()),
        };
        grid.paint(&mut surface);

        if out.repaint {
            ui.ctx().request_repaint();
        }
        if let Some(text) = out.hover_text.clone() {
            response.on_hover_text(text);
        }
        out
    }

    fn update_cursor(grid: &WorkItemGrid, ui: &egui::Ui, response: &egui::Response, origin: Vec2) {
        if grid.is_copying() {
            ui.ctx().set_cursor_icon(CursorIcon::Copy);
        } else if grid.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if let Some(pos) = response.hover_pos() {
            let local = pos - origin;
            let grip_height = grid.view().detail().scaled_grip_height();
            let over_grip = grid
                .view()
                .selected_one()
                .and_then(|item| grid.item_screen_rect(item))
                .map(|bounds| grip_at(bounds, grip_height, local).is_some())
                .unwrap_or(false);
            if over_grip {
                ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
            }
        }
    }
}

/// `Surface` over an egui painter, shifting widget-local coordinates to
/// screen space.
struct PainterSurface {
    painter: Painter,
    origin: Vec2,
    font_id: FontId,
}

impl Surface for PainterSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect.translate(self.origin), 0.0, color);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color32) {
        self.painter
            .rect_stroke(rect.translate(self.origin), 0.0, Stroke::new(width, color));
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], Stroke::new(width, color));
    }

    fn draw_text(&mut self, rect: Rect, text: &str, color: Color32) {
        let screen = rect.translate(self.origin);
        // Clip to the cell so long labels never bleed into neighbors.
        let clipped = self.painter.with_clip_rect(screen);
        clipped.text(
            pos2(screen.left(), screen.center().y),
            Align2::LEFT_CENTER,
            text,
            self.font_id.clone(),
            color,
        );
    }

    fn measure_text(&mut self, text: &str) -> Vec2 {
        self.painter.ctx().fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), self.font_id.clone(), Color32::WHITE)
                .size()
        })
    }
}
