// Grid geometry
// Zoom detail, prefix-sum offset tables and pixel/cell conversion

use egui::{pos2, vec2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::grid::axis::{AxisIndex, ColIndex, RowIndex, FIXED_COLS, FIXED_ROWS};
use crate::services::measure::MeasuredSizes;

/// Base cell sizes plus the zoom ratio.
///
/// Changing the ratio changes pixel sizes only; which day sits on which row
/// is untouched, so a zoom never rebuilds the axis index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    /// Total width of the three fixed date columns.
    pub date_width: f32,
    pub col_width: f32,
    pub row_height: f32,
    pub company_height: f32,
    pub name_height: f32,
    /// Height of the resize grip bands above and below a selected item.
    pub grip_height: f32,
    view_ratio: f32,
}

impl Default for Detail {
    fn default() -> Self {
        Self {
            date_width: 96.0,
            col_width: 120.0,
            row_height: 22.0,
            company_height: 22.0,
            name_height: 22.0,
            grip_height: 6.0,
            view_ratio: 1.0,
        }
    }
}

impl Detail {
    pub const MIN_RATIO: f32 = 0.2;
    pub const MAX_RATIO: f32 = 4.0;
    pub const RATIO_STEP: f32 = 0.1;

    pub fn view_ratio(&self) -> f32 {
        self.view_ratio
    }

    /// Set the zoom ratio, clamped to the supported range. Returns true when
    /// the ratio actually changed.
    pub fn set_ratio(&mut self, ratio: f32) -> bool {
        let clamped = ratio.clamp(Self::MIN_RATIO, Self::MAX_RATIO);
        if (clamped - self.view_ratio).abs() < f32::EPSILON {
            return false;
        }
        self.view_ratio = clamped;
        true
    }

    /// Zoom in or out by whole wheel steps.
    pub fn bump_ratio(&mut self, steps: f32) -> bool {
        self.set_ratio(self.view_ratio + steps * Self::RATIO_STEP)
    }

    pub fn scaled_grip_height(&self) -> f32 {
        self.grip_height * self.view_ratio
    }
}

/// World-space offset tables for every grid row and column.
///
/// Offsets are prefix sums; `row_offsets[i]` is the top of row `i` and the
/// final entry is the total grid height. The fixed header bands are pinned
/// on screen while the rest translates by the scroll offset.
#[derive(Debug, Clone, Default)]
pub struct GridMetrics {
    row_offsets: Vec<f32>,
    col_offsets: Vec<f32>,
}

impl GridMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute both offset tables from the detail settings, the visible
    /// axis layout and any measured content sizes.
    pub fn rebuild(&mut self, detail: &Detail, axis: &AxisIndex, content: Option<&MeasuredSizes>) {
        let ratio = detail.view_ratio();

        self.row_offsets.clear();
        self.row_offsets.push(0.0);
        let mut y = 0.0;
        for height in [detail.company_height, detail.name_height, detail.name_height] {
            y += height * ratio;
            self.row_offsets.push(y);
        }
        let day_height = content
            .map(|c| c.row_height.max(detail.row_height))
            .unwrap_or(detail.row_height);
        for _ in 0..axis.visible_day_count() {
            y += day_height * ratio;
            self.row_offsets.push(y);
        }

        self.col_offsets.clear();
        self.col_offsets.push(0.0);
        let mut x = 0.0;
        let date_widths = [
            detail.date_width / 2.0,
            detail.date_width / 4.0,
            detail.date_width / 4.0,
        ];
        for width in date_widths {
            x += width * ratio;
            self.col_offsets.push(x);
        }
        for member_id in axis.visible_member_ids() {
            let width = content
                .and_then(|c| c.col_widths.get(*member_id).copied())
                .map(|w| w.max(detail.col_width))
                .unwrap_or(detail.col_width);
            x += width * ratio;
            self.col_offsets.push(x);
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    pub fn col_count(&self) -> usize {
        self.col_offsets.len().saturating_sub(1)
    }

    pub fn grid_height(&self) -> f32 {
        self.row_offsets.last().copied().unwrap_or(0.0)
    }

    pub fn grid_width(&self) -> f32 {
        self.col_offsets.last().copied().unwrap_or(0.0)
    }

    pub fn fixed_height(&self) -> f32 {
        self.row_offsets.get(FIXED_ROWS).copied().unwrap_or(0.0)
    }

    pub fn fixed_width(&self) -> f32 {
        self.col_offsets.get(FIXED_COLS).copied().unwrap_or(0.0)
    }

    fn offset_at(offsets: &[f32], index: usize) -> f32 {
        offsets
            .get(index)
            .or(offsets.last())
            .copied()
            .unwrap_or(0.0)
    }

    fn index_at(offsets: &[f32], value: f32) -> Option<usize> {
        if value < 0.0 || offsets.len() < 2 {
            return None;
        }
        if value >= offsets.last().copied().unwrap_or(0.0) {
            return None;
        }
        Some(offsets.partition_point(|o| *o <= value).saturating_sub(1))
    }

    /// Grid row under screen `y`. Header rows are pinned; everything below
    /// the fixed band is translated by `scroll_y`. `None` past the grid.
    pub fn row_at_y(&self, y: f32, scroll_y: f32) -> Option<RowIndex> {
        if y < 0.0 {
            return None;
        }
        let world = if y < self.fixed_height() { y } else { y + scroll_y };
        Self::index_at(&self.row_offsets, world).map(RowIndex)
    }

    /// Grid column under screen `x`, with the fixed date band pinned.
    pub fn col_at_x(&self, x: f32, scroll_x: f32) -> Option<ColIndex> {
        if x < 0.0 {
            return None;
        }
        let world = if x < self.fixed_width() { x } else { x + scroll_x };
        Self::index_at(&self.col_offsets, world).map(ColIndex)
    }

    pub fn row_top(&self, row: RowIndex) -> f32 {
        Self::offset_at(&self.row_offsets, row.0)
    }

    pub fn col_left(&self, col: ColIndex) -> f32 {
        Self::offset_at(&self.col_offsets, col.0)
    }

    /// World rectangle of one cell.
    pub fn cell_rect(&self, row: RowIndex, col: ColIndex) -> Rect {
        self.span_rect(col, row, 1)
    }

    /// World rectangle covering `row_count` rows of one column.
    pub fn span_rect(&self, col: ColIndex, first_row: RowIndex, row_count: usize) -> Rect {
        let left = Self::offset_at(&self.col_offsets, col.0);
        let right = Self::offset_at(&self.col_offsets, col.0 + 1);
        let top = Self::offset_at(&self.row_offsets, first_row.0);
        let bottom = Self::offset_at(&self.row_offsets, first_row.0 + row_count);
        Rect::from_min_max(pos2(left, top), pos2(right, bottom))
    }

    /// Translate a world rectangle in the scrolling area to screen space.
    pub fn to_screen(world: Rect, scroll: Vec2) -> Rect {
        world.translate(-scroll)
    }

    fn visible_span(offsets: &[f32], fixed: usize, from: f32, until: f32) -> std::ops::Range<usize> {
        let count = offsets.len().saturating_sub(1);
        if count <= fixed || until <= from {
            return fixed..fixed;
        }
        let start = offsets[1..].partition_point(|o| *o <= from).max(fixed);
        let end = offsets[..count].partition_point(|o| *o < until).max(start);
        start..end
    }

    /// Columns whose world span intersects the scrolled viewport.
    pub fn visible_cols(&self, scroll_x: f32, viewport_width: f32) -> std::ops::Range<usize> {
        let from = self.fixed_width() + scroll_x;
        let until = viewport_width + scroll_x;
        Self::visible_span(&self.col_offsets, FIXED_COLS, from, until)
    }

    /// Rows whose world span intersects the scrolled viewport.
    pub fn visible_rows(&self, scroll_y: f32, viewport_height: f32) -> std::ops::Range<usize> {
        let from = self.fixed_height() + scroll_y;
        let until = viewport_height + scroll_y;
        Self::visible_span(&self.row_offsets, FIXED_ROWS, from, until)
    }

    /// Largest useful scroll offset for the given viewport.
    pub fn max_scroll(&self, viewport: Vec2) -> Vec2 {
        vec2(
            (self.grid_width() - viewport.x).max(0.0),
            (self.grid_height() - viewport.y).max(0.0),
        )
    }
}
