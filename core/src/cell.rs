use serde::{Deserialize, Serialize};

use crate::Position;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unopened,
    Opened,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Unopened | Self::Flagged)
    }
}

/// What lies under a cell: nothing, a count of adjacent mines, or a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Blank,
    Number(u8),
    Mine,
}

impl CellValue {
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Blank,
            n => Self::Number(n),
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Blank => Some(0),
            Self::Number(n) => Some(n),
            Self::Mine => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change applied to the remaining-mine counter.
    pub const fn counter_delta(self) -> i32 {
        match self {
            Self::NoChange => 0,
            Self::Flagged => -1,
            Self::Unflagged => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub value: CellValue,
    pub position: Position,
}

impl Cell {
    pub const fn new(position: Position) -> Self {
        Self {
            state: CellState::Unopened,
            value: CellValue::Blank,
            position,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.value.is_mine()
    }

    /// Unopened <-> Flagged; opened cells are left alone.
    pub fn toggle_flag(&mut self) -> FlagOutcome {
        match self.state {
            CellState::Unopened => {
                self.state = CellState::Flagged;
                FlagOutcome::Flagged
            }
            CellState::Flagged => {
                self.state = CellState::Unopened;
                FlagOutcome::Unflagged
            }
            CellState::Opened => FlagOutcome::NoChange,
        }
    }

    /// Opens an unopened cell, returning whether anything changed.
    pub fn open(&mut self) -> bool {
        if matches!(self.state, CellState::Unopened) {
            self.state = CellState::Opened;
            true
        } else {
            false
        }
    }
}
