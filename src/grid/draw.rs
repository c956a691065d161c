// Grid Painting
//
// Content is painted into retained per-member batches and replayed while a
// column stays valid; the fixed date rows and member headers are cheap and
// repaint directly every frame, laid over the content so scrolled cells
// slide underneath them.

use chrono::Datelike;
use egui::{pos2, vec2, Rect};

use crate::grid::axis::{AxisIndex, ColIndex, RowIndex, FIXED_COLS, FIXED_ROWS};
use crate::grid::geometry::GridMetrics;
use crate::grid::invalid_area::InvalidArea;
use crate::grid::surface::{BatchSurface, DrawCmd, Surface};
use crate::grid::view_data::ViewData;
use crate::models::member::Member;
use crate::models::work_item::WorkItem;
use crate::services::drag::{bottom_grip_rect, top_grip_rect};
use crate::utils::date::{month_label, weekday_label};

pub mod palette {
    use crate::models::work_item::TaskState;
    use egui::Color32;

    pub const GRID_BG: Color32 = Color32::from_rgb(252, 252, 249);
    pub const HEADER_BG: Color32 = Color32::from_rgb(236, 236, 232);
    pub const GRID_LINE: Color32 = Color32::from_rgb(208, 208, 202);
    pub const WEEKEND_SHADE: Color32 = Color32::from_rgb(226, 231, 238);
    pub const ITEM_NEW_FILL: Color32 = Color32::from_rgb(250, 232, 170);
    pub const ITEM_ACTIVE_FILL: Color32 = Color32::from_rgb(164, 205, 250);
    pub const ITEM_BACKGROUND_FILL: Color32 = Color32::from_rgb(206, 206, 206);
    pub const ITEM_DONE_FILL: Color32 = Color32::from_rgb(216, 234, 216);
    pub const ITEM_BORDER: Color32 = Color32::from_rgb(96, 96, 96);
    pub const SELECTION: Color32 = Color32::from_rgb(224, 48, 48);
    pub const GRIP_FILL: Color32 = Color32::from_rgb(255, 140, 0);
    pub const TEXT: Color32 = Color32::from_rgb(32, 32, 32);
    pub const HEADER_TEXT: Color32 = Color32::from_rgb(48, 48, 48);
    pub const WEEKEND_TEXT: Color32 = Color32::from_rgb(176, 64, 64);

    pub fn state_fill(state: TaskState) -> Color32 {
        match state {
            TaskState::New => ITEM_NEW_FILL,
            TaskState::Active => ITEM_ACTIVE_FILL,
            TaskState::Background => ITEM_BACKGROUND_FILL,
            TaskState::Done => ITEM_DONE_FILL,
        }
    }
}

/// Everything one paint pass reads. Scroll and viewport are in pixels;
/// the grid itself lives in world coordinates.
pub struct PaintContext<'a> {
    pub view: &'a ViewData,
    pub axis: &'a AxisIndex,
    pub metrics: &'a GridMetrics,
    pub scroll: egui::Vec2,
    pub viewport: egui::Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Member columns whose batch was rebuilt this pass.
    pub rebuilt: usize,
    /// Member columns replayed from their retained batch.
    pub replayed: usize,
}

/// World rectangle of an item's bar: its member's column crossed with the
/// rows of its surviving days. `None` when the member's column or every
/// day is filtered out.
pub fn item_world_rect(
    view: &ViewData,
    axis: &AxisIndex,
    metrics: &GridMetrics,
    item: &WorkItem,
) -> Option<Rect> {
    let col = axis.col_of_member(view.members(), &item.assigned_member)?;
    let mut first_row = None;
    let mut surviving = 0;
    for day in view.calendar().days_in(&item.period) {
        if let Some(row) = axis.row_of_day(view.calendar(), *day) {
            if first_row.is_none() {
                first_row = Some(row);
            }
            surviving += 1;
        }
    }
    Some(metrics.span_rect(col, first_row?, surviving))
}

/// Paint one frame. Invalid member columns in view are rebuilt into fresh
/// batches first; everything else replays.
pub fn paint(
    ctx: &PaintContext,
    invalid: &mut InvalidArea,
    surface: &mut dyn Surface,
) -> PaintStats {
    let mut stats = PaintStats::default();
    surface.fill_rect(
        Rect::from_min_size(pos2(0.0, 0.0), ctx.viewport),
        palette::GRID_BG,
    );

    let content_offset = -ctx.scroll;
    let ids = ctx.axis.visible_member_ids();
    for col in ctx.metrics.visible_cols(ctx.scroll.x, ctx.viewport.x) {
        let Some(&member_id) = col.checked_sub(FIXED_COLS).and_then(|slot| ids.get(slot)) else {
            continue;
        };
        if invalid.is_valid(member_id) {
            stats.replayed += 1;
        } else {
            let Some(member) = ctx.view.members().get(member_id) else {
                continue;
            };
            invalid.validate(member_id, build_member_batch(ctx, member));
            stats.rebuilt += 1;
        }
        if let Some(batch) = invalid.batch(member_id) {
            for command in batch {
                command.replay(content_offset, surface);
            }
        }
    }

    paint_selection(ctx, surface);
    paint_date_rows(ctx, surface);
    paint_member_headers(ctx, surface);
    paint_corner(ctx, surface);

    log::trace!(
        "painted frame: {} rebuilt, {} replayed",
        stats.rebuilt,
        stats.replayed
    );
    stats
}

/// Record one member's content column: background, weekend shading, grid
/// lines, then the item bars on top.
fn build_member_batch(ctx: &PaintContext, member: &Member) -> Vec<DrawCmd> {
    let mut out = BatchSurface::new();
    let Some(col) = ctx.axis.col_of_member(ctx.view.members(), member) else {
        return Vec::new();
    };
    let content_rows = ctx.axis.row_count().saturating_sub(FIXED_ROWS);
    let column = ctx
        .metrics
        .span_rect(col, RowIndex(FIXED_ROWS), content_rows);
    out.fill_rect(column, palette::GRID_BG);

    for row in FIXED_ROWS..ctx.axis.row_count() {
        let row = RowIndex(row);
        if let Some(day) = ctx.axis.day_of_row(ctx.view.calendar(), row) {
            if day.is_weekend() {
                out.fill_rect(ctx.metrics.cell_rect(row, col), palette::WEEKEND_SHADE);
            }
        }
        let y = ctx.metrics.row_top(row);
        out.line(
            pos2(column.left(), y),
            pos2(column.right(), y),
            1.0,
            palette::GRID_LINE,
        );
    }
    out.line(
        column.right_top(),
        column.right_bottom(),
        1.0,
        palette::GRID_LINE,
    );

    for item in ctx.view.filtered_items_of_member(member) {
        let Some(rect) = item_world_rect(ctx.view, ctx.axis, ctx.metrics, item) else {
            continue;
        };
        let bar = rect.shrink(2.0);
        out.fill_rect(bar, palette::state_fill(item.state));
        out.stroke_rect(bar, 1.0, palette::ITEM_BORDER);
        out.draw_text(bar.shrink(2.0), &item.name, palette::TEXT);
    }
    out.into_commands()
}

/// Selection outlines, plus resize grips when exactly one item is
/// selected. Repainted directly each frame.
fn paint_selection(ctx: &PaintContext, surface: &mut dyn Surface) {
    let offset = -ctx.scroll;
    let grip_height = ctx.view.detail().scaled_grip_height();
    let single = ctx.view.selected().len() == 1;
    for item in ctx.view.selected().iter() {
        if !ctx.view.is_item_visible(item) {
            continue;
        }
        let Some(world) = item_world_rect(ctx.view, ctx.axis, ctx.metrics, item) else {
            continue;
        };
        let bounds = world.translate(offset);
        surface.stroke_rect(bounds.shrink(1.0), 2.0, palette::SELECTION);
        if single {
            surface.fill_rect(top_grip_rect(bounds, grip_height), palette::GRIP_FILL);
            surface.fill_rect(bottom_grip_rect(bounds, grip_height), palette::GRIP_FILL);
        }
    }
}

/// The three fixed date columns, pinned on the left and scrolled
/// vertically with the content.
fn paint_date_rows(ctx: &PaintContext, surface: &mut dyn Surface) {
    let metrics = ctx.metrics;
    surface.fill_rect(
        Rect::from_min_max(pos2(0.0, 0.0), pos2(metrics.fixed_width(), ctx.viewport.y)),
        palette::HEADER_BG,
    );

    let offset = vec2(0.0, -ctx.scroll.y);
    let mut shown_month = None;
    for row in metrics.visible_rows(ctx.scroll.y, ctx.viewport.y) {
        let row = RowIndex(row);
        let Some(day) = ctx.axis.day_of_row(ctx.view.calendar(), row) else {
            continue;
        };
        let date = day.date();
        let month_cell = metrics.cell_rect(row, ColIndex(0)).translate(offset);
        let day_cell = metrics.cell_rect(row, ColIndex(1)).translate(offset);
        let weekday_cell = metrics.cell_rect(row, ColIndex(2)).translate(offset);
        let text_color = if day.is_weekend() {
            palette::WEEKEND_TEXT
        } else {
            palette::HEADER_TEXT
        };

        let month = month_label(date);
        if shown_month.as_deref() != Some(month.as_str()) {
            surface.draw_text(month_cell.shrink(2.0), &month, palette::HEADER_TEXT);
            shown_month = Some(month);
        }
        surface.draw_text(day_cell.shrink(2.0), &date.day().to_string(), text_color);
        surface.draw_text(weekday_cell.shrink(2.0), weekday_label(date), text_color);
        surface.line(
            pos2(0.0, month_cell.bottom()),
            pos2(metrics.fixed_width(), month_cell.bottom()),
            1.0,
            palette::GRID_LINE,
        );
    }

    for col in 1..=FIXED_COLS {
        let x = metrics.col_left(ColIndex(col));
        surface.line(
            pos2(x, 0.0),
            pos2(x, ctx.viewport.y),
            1.0,
            palette::GRID_LINE,
        );
    }
}

/// The three fixed header rows, pinned on top and scrolled horizontally
/// with the member columns.
fn paint_member_headers(ctx: &PaintContext, surface: &mut dyn Surface) {
    let metrics = ctx.metrics;
    surface.fill_rect(
        Rect::from_min_max(pos2(0.0, 0.0), pos2(ctx.viewport.x, metrics.fixed_height())),
        palette::HEADER_BG,
    );

    let offset = vec2(-ctx.scroll.x, 0.0);
    let ids = ctx.axis.visible_member_ids();
    for col in ctx.metrics.visible_cols(ctx.scroll.x, ctx.viewport.x) {
        let Some(&member_id) = col.checked_sub(FIXED_COLS).and_then(|slot| ids.get(slot)) else {
            continue;
        };
        let Some(member) = ctx.view.members().get(member_id) else {
            continue;
        };
        let col = ColIndex(col);
        let company_cell = metrics.cell_rect(RowIndex(0), col).translate(offset);
        let last_cell = metrics.cell_rect(RowIndex(1), col).translate(offset);
        let first_cell = metrics.cell_rect(RowIndex(2), col).translate(offset);
        surface.draw_text(company_cell.shrink(2.0), &member.company, palette::HEADER_TEXT);
        surface.draw_text(last_cell.shrink(2.0), &member.last_name, palette::HEADER_TEXT);
        surface.draw_text(first_cell.shrink(2.0), &member.first_name, palette::HEADER_TEXT);
        surface.line(
            pos2(company_cell.right(), 0.0),
            pos2(company_cell.right(), metrics.fixed_height()),
            1.0,
            palette::GRID_LINE,
        );
    }

    for row in 1..=FIXED_ROWS {
        let y = metrics.row_top(RowIndex(row));
        surface.line(
            pos2(0.0, y),
            pos2(ctx.viewport.x, y),
            1.0,
            palette::GRID_LINE,
        );
    }
}

fn paint_corner(ctx: &PaintContext, surface: &mut dyn Surface) {
    let corner = Rect::from_min_max(
        pos2(0.0, 0.0),
        pos2(ctx.metrics.fixed_width(), ctx.metrics.fixed_height()),
    );
    surface.fill_rect(corner, palette::HEADER_BG);
    surface.stroke_rect(corner, 1.0, palette::GRID_LINE);
}
