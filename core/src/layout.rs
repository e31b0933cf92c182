use serde::{Deserialize, Serialize};

use crate::*;

/// Screen rectangle occupied by one cell, in terminal columns/rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRegion {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }
}

/// Where the renderer drew the board: the top-left corner of cell `(0, 0)` and a uniform cell pitch.
///
/// The renderer publishes this back to the [`Game`] after every frame so pointer clicks can be resolved to cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub origin: (u16, u16),
    pub cell_width: u16,
    pub cell_height: u16,
    pub grid: Position,
}

impl GridLayout {
    pub fn region(&self, (row, col): Position) -> CellRegion {
        CellRegion {
            x: self
                .origin
                .0
                .saturating_add(self.cell_width.saturating_mul(col.into())),
            y: self
                .origin
                .1
                .saturating_add(self.cell_height.saturating_mul(row.into())),
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<Position> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return None;
        }

        let col = x.checked_sub(self.origin.0)? / self.cell_width;
        let row = y.checked_sub(self.origin.1)? / self.cell_height;
        let (rows, cols) = self.grid;
        if row >= u16::from(rows) || col >= u16::from(cols) {
            return None;
        }

        Some((row as Coord, col as Coord))
    }
}
