use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column, got {rows}x{cols}")]
    InvalidDimensions { rows: Coord, cols: Coord },
    #[error("Too many mines ({mines}) for a board of {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Layout has {actual} mines but the config asks for {expected}")]
    MineCountMismatch { expected: CellCount, actual: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
