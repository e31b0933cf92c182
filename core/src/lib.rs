//! Minesweeper game engine: board generation, the per-cell state machine, flood-fill reveal, and the controller that
//! turns abstract input events into state changes.
//!
//! Nothing in here touches a terminal. A front end feeds [`Input`]s into [`Game::handle`], carries out the returned
//! [`Command`], renders [`Game::snapshot`], and publishes a [`GridLayout`] back so pointer clicks can be resolved.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use input::*;
pub use layout::*;
pub use reveal::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod input;
mod layout;
mod reveal;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Position,
    pub mines: CellCount,
    pub chord: ChordPolicy,
}

impl GameConfig {
    pub const ROWS: Coord = 10;
    pub const COLS: Coord = 13;
    pub const MINES: CellCount = mult(Self::ROWS, Self::COLS) / 4;

    pub const fn new(size: Position, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            chord: ChordPolicy::Always,
        }
    }

    pub const fn with_chord(self, chord: ChordPolicy) -> Self {
        Self { chord, ..self }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Needs at least one row and column, and at least one cell left free of mines.
    pub fn validate(&self) -> Result<()> {
        board::validate_size(self.size)?;
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells: self.total_cells(),
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new((Self::ROWS, Self::COLS), Self::MINES)
    }
}
