//! Screen <-> grid coordinate mapping and the height colour ramp.
//!
//! Screen space here is the simulation's own convention: origin at the
//! bottom-left, y growing upward. Window events arrive top-left and must be
//! passed through [`Viewport::flip_y`] first.

use glam::Vec2;

/// A grid cell addressed as `(row, col)`; `row` follows screen y, `col` screen x.
pub type Cell = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub resolution: usize,
}

impl Viewport {
    pub fn new(width: f32, height: f32, resolution: usize) -> Self {
        Viewport {
            width,
            height,
            resolution,
        }
    }

    /// Maps a continuous screen point to the cell it falls in.
    ///
    /// Points outside `[0, width) x [0, height)` (including NaN) give `None`,
    /// as do points whose cell lands outside `[0, resolution)`.
    pub fn screen_to_cell(&self, x: f32, y: f32) -> Option<Cell> {
        if !(x >= 0.0 && x < self.width && y >= 0.0 && y < self.height) {
            return None;
        }
        let span = (self.resolution - 1) as f32;
        let col = (x / self.width * span).floor();
        let row = (y / self.height * span).floor();
        let n = self.resolution as f32;
        if col < 0.0 || col >= n || row < 0.0 || row >= n {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Screen position of a cell, `cell / (N - 1) * extent` on each axis.
    pub fn cell_to_screen(&self, row: usize, col: usize) -> Vec2 {
        let span = (self.resolution - 1) as f32;
        Vec2::new(
            col as f32 / span * self.width,
            row as f32 / span * self.height,
        )
    }

    /// Converts a window y (top-left origin) to simulation y (bottom-left).
    #[inline]
    pub fn flip_y(&self, window_y: f32) -> f32 {
        self.height - window_y
    }
}

/// Water colour for a displacement: brighter the further from rest.
///
/// `intensity = min(|h| * 4, 1)`, then
/// `(0.2 + 0.8i, 0.5 + 0.5i, 0.7 + 0.3i)`.
pub fn height_color(height: f32) -> [f32; 3] {
    let intensity = (height.abs() * 4.0).min(1.0);
    [
        0.2 + 0.8 * intensity,
        0.5 + 0.5 * intensity,
        0.7 + 0.3 * intensity,
    ]
}
