//! Pixel coverage masks and exact overlap tests.
//!
//! A bounding-box test is too coarse near the mouth of a gap, so collisions
//! are resolved on per-cell coverage: two shapes collide only if at least one
//! cell is covered by both.

use ndarray::{Array2, s};
use once_cell::sync::Lazy;

/// Width of the agent sprite.
pub const BIRD_WIDTH: usize = 68;
/// Height of the agent sprite.
pub const BIRD_HEIGHT: usize = 48;
/// Width of a barrier sprite.
pub const PIPE_WIDTH: usize = 104;
/// Height of a barrier sprite.
pub const PIPE_HEIGHT: usize = 640;

/// Coverage of the agent sprite.
pub static BIRD_MASK: Lazy<Mask> = Lazy::new(|| Mask::ellipse(BIRD_WIDTH, BIRD_HEIGHT));

/// Coverage of a barrier sprite (top and bottom barriers share it).
pub static PIPE_MASK: Lazy<Mask> = Lazy::new(|| Mask::filled(PIPE_WIDTH, PIPE_HEIGHT));

/// Boolean coverage grid indexed as `[row, column]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// A fully covered `width` × `height` rectangle.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), true),
        }
    }

    /// The ellipse inscribed in a `width` × `height` box.
    ///
    /// A cell is covered when its centre lies inside or on the ellipse.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let rx = width as f64 / 2.0;
        let ry = height as f64 / 2.0;
        let cells = Array2::from_shape_fn((height, width), |(row, col)| {
            let dx = (col as f64 + 0.5 - rx) / rx;
            let dy = (row as f64 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        });
        Self { cells }
    }

    /// Builds a mask from text rows; `#` marks a covered cell.
    ///
    /// Rows shorter than the longest one are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut cells = Array2::from_elem((rows.len(), width), false);
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                cells[[r, c]] = ch == '#';
            }
        }
        Self { cells }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Whether the cell at column `x`, row `y` is covered. Out of range is empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.cells
            .get([y as usize, x as usize])
            .copied()
            .unwrap_or(false)
    }

    /// Number of covered cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&covered| covered).count()
    }

    /// First cell covered by both masks, with `other`'s origin placed at
    /// `offset` in this mask's coordinates.
    ///
    /// The point is returned as `(x, y)` in this mask's coordinates, scanning
    /// rows top to bottom.
    pub fn overlap_point(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = offset;

        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width() as i32).min(self.width() as i32);
        let y1 = (dy + other.height() as i32).min(self.height() as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let ours = self
            .cells
            .slice(s![y0 as usize..y1 as usize, x0 as usize..x1 as usize]);
        let theirs = other.cells.slice(s![
            (y0 - dy) as usize..(y1 - dy) as usize,
            (x0 - dx) as usize..(x1 - dx) as usize
        ]);

        ours.indexed_iter()
            .find(|&((r, c), &covered)| covered && theirs[[r, c]])
            .map(|((r, c), _)| (x0 + c as i32, y0 + r as i32))
    }

    /// Whether the masks share a covered cell at the given offset.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap_point(other, offset).is_some()
    }
}
