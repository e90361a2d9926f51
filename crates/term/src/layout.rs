//! Mapping between the 360x640 world and terminal cells.
//!
//! Terminal glyphs are about twice as tall as they are wide, so one row
//! covers twice the world height of one column.

use crate::types::{Rect, WORLD_HEIGHT, WORLD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub const MIN_COLS: u16 = 16;
pub const MIN_ROWS: u16 = 12;

/// Width of the HUD panel right of the playfield, when it fits.
pub const PANEL_WIDTH: u16 = 22;

/// Placement of the playfield's inner area (inside its border).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayfieldLayout {
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
    /// Whether the HUD panel is drawn beside the playfield.
    pub side_panel: bool,
}

impl PlayfieldLayout {
    /// Fit the playfield into a viewport. `None` when the terminal is too small.
    pub fn fit(viewport: Viewport) -> Option<Self> {
        let max_cols = viewport.width.saturating_sub(2);
        let max_rows = viewport.height.saturating_sub(2);

        // rows * 2 / cols == WORLD_HEIGHT / WORLD_WIDTH
        let rows_per_col = WORLD_HEIGHT / WORLD_WIDTH / 2.0;
        let mut cols = max_cols.min((max_rows as f32 / rows_per_col).floor() as u16);
        let mut rows = ((cols as f32) * rows_per_col).round() as u16;
        if rows > max_rows {
            rows = max_rows;
            cols = ((rows as f32) / rows_per_col).floor() as u16;
        }
        if cols < MIN_COLS || rows < MIN_ROWS {
            return None;
        }

        let frame_w = cols + 2;
        let side_panel = viewport.width >= frame_w + 2 + PANEL_WIDTH;
        let total_w = if side_panel {
            frame_w + 2 + PANEL_WIDTH
        } else {
            frame_w
        };
        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = viewport.height.saturating_sub(rows + 2) / 2;

        Some(Self {
            x: left + 1,
            y: top + 1,
            cols,
            rows,
            side_panel,
        })
    }

    fn unit_x(&self) -> f32 {
        WORLD_WIDTH / self.cols as f32
    }

    fn unit_y(&self) -> f32 {
        WORLD_HEIGHT / self.rows as f32
    }

    /// Column of a world x, relative to the playfield (may be outside).
    pub fn col_of(&self, x: f32) -> i32 {
        (x / self.unit_x()).floor() as i32
    }

    pub fn row_of(&self, y: f32) -> i32 {
        (y / self.unit_y()).floor() as i32
    }

    /// Absolute screen cell of a world point, if it lies on the playfield.
    pub fn world_to_screen(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (c, r) = (self.col_of(x), self.row_of(y));
        if c < 0 || r < 0 || c >= self.cols as i32 || r >= self.rows as i32 {
            return None;
        }
        Some((self.x + c as u16, self.y + r as u16))
    }

    /// World point at the center of a screen cell, clamped to the world.
    pub fn screen_to_world(&self, column: u16, row: u16) -> (f32, f32) {
        let c = (column as f32 - self.x as f32).clamp(0.0, self.cols as f32 - 1.0);
        let r = (row as f32 - self.y as f32).clamp(0.0, self.rows as f32 - 1.0);
        ((c + 0.5) * self.unit_x(), (r + 0.5) * self.unit_y())
    }

    pub fn contains_screen(&self, column: u16, row: u16) -> bool {
        column >= self.x && column < self.x + self.cols && row >= self.y && row < self.y + self.rows
    }

    /// Screen cells covered by a world rectangle, clipped to the playfield,
    /// as `(x, y, w, h)`. Every non-degenerate visible rect covers at least one cell.
    pub fn rect_cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.w <= 0.0
            || rect.h <= 0.0
            || rect.right() <= 0.0
            || rect.bottom() <= 0.0
            || rect.x >= WORLD_WIDTH
            || rect.y >= WORLD_HEIGHT
        {
            return None;
        }
        let c0 = self.col_of(rect.x).max(0);
        let r0 = self.row_of(rect.y).max(0);
        let c1 = ((rect.right() / self.unit_x()).ceil() as i32).min(self.cols as i32);
        let r1 = ((rect.bottom() / self.unit_y()).ceil() as i32).min(self.rows as i32);
        let c1 = c1.max(c0 + 1).min(self.cols as i32);
        let r1 = r1.max(r0 + 1).min(self.rows as i32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((
            self.x + c0 as u16,
            self.y + r0 as u16,
            (c1 - c0) as u16,
            (r1 - r0) as u16,
        ))
    }

    /// Right edge column (exclusive) of the inner area.
    pub fn right(&self) -> u16 {
        self.x + self.cols
    }

    pub fn center_col(&self) -> u16 {
        self.x + self.cols / 2
    }
}
