use core::ops::Index;
use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::*;

/// The grid of cells plus the index of every mine on it.
///
/// A board is only ever built whole, either by a [`BoardGenerator`] or from an explicit list of mine positions, and
/// its mine layout never changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines: Vec<Position>,
    opened_safe: CellCount,
}

impl Board {
    pub fn from_mine_positions(size: Position, mine_positions: &[Position]) -> Result<Self> {
        let (rows, cols) = validate_size(size)?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &position in mine_positions {
            if position.0 >= rows || position.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[position.to_nd_index()] = true;
        }

        let mines = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let cells = mult(rows, cols);
        if mines >= usize::from(cells) {
            return Err(GameError::TooManyMines {
                mines: mines.try_into().unwrap_or(CellCount::MAX),
                cells,
            });
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    /// Builds cells from an already validated mask and derives every neighbor count.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        let mut mines = Vec::new();

        for (index, &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                cells[index].value = CellValue::Mine;
                mines.push((index.0 as Coord, index.1 as Coord));
            }
        }

        for cell in cells.iter_mut() {
            if cell.is_mine() {
                continue;
            }
            let count = mine_mask
                .iter_neighbors(cell.position)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            cell.value = CellValue::from_count(count as u8);
        }

        Self {
            cells,
            mines,
            opened_safe: 0,
        }
    }

    pub fn size(&self) -> Position {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe
    }

    pub fn all_safe_opened(&self) -> bool {
        self.opened_safe == self.safe_cell_count()
    }

    /// Positions of every mine, in row-major order.
    pub fn mines(&self) -> &[Position] {
        &self.mines
    }

    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.to_nd_index())
    }

    pub fn contains(&self, (row, col): Position) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn iter_neighbors(&self, position: Position) -> NeighborIter {
        self.cells.iter_neighbors(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn count_flagged_neighbors(&self, position: Position) -> u8 {
        self.iter_neighbors(position)
            .filter(|&pos| self[pos].state == CellState::Flagged)
            .count() as u8
    }

    /// Opens one cell if it is still unopened.
    pub(crate) fn open(&mut self, position: Position) -> bool {
        let cell = &mut self.cells[position.to_nd_index()];
        let opened = cell.open();
        if opened && !cell.is_mine() {
            self.opened_safe += 1;
        }
        opened
    }

    pub(crate) fn toggle_flag(&mut self, position: Position) -> FlagOutcome {
        self.cells[position.to_nd_index()].toggle_flag()
    }

    /// Opens every mine, flagged or not.
    pub(crate) fn open_all_mines(&mut self) {
        for &position in &self.mines {
            self.cells[position.to_nd_index()].state = CellState::Opened;
        }
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[position.to_nd_index()]
    }
}

pub(crate) fn validate_size(size: Position) -> Result<Position> {
    let (rows, cols) = size;
    if rows == 0 || cols == 0 {
        Err(GameError::InvalidDimensions { rows, cols })
    } else {
        Ok(size)
    }
}
