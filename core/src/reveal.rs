use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Continued,
    HitMine,
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Continued, Continued) => Continued,
        }
    }
}

/// When re-revealing an opened cell is allowed to open its neighbors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordPolicy {
    /// Open every neighbor, regardless of flags.
    #[default]
    Always,
    /// Only open neighbors once the flagged neighbor count equals the cell's number.
    FlagsMatch,
}

impl ChordPolicy {
    pub fn allows(self, board: &Board, position: Position) -> bool {
        match self {
            Self::Always => true,
            Self::FlagsMatch => {
                board[position].value.count() == Some(board.count_flagged_neighbors(position))
            }
        }
    }
}

/// Opens `start` and flood-fills outward through blank cells.
///
/// Flagged and already opened cells are never touched, which also bounds the work to one visit per cell.
pub fn reveal(board: &mut Board, start: Position) -> RevealOutcome {
    let mut outcome = RevealOutcome::Continued;
    let mut to_visit = vec![start];

    while let Some(position) = to_visit.pop() {
        if !board.open(position) {
            continue;
        }

        match board[position].value {
            CellValue::Blank => to_visit.extend(
                board
                    .iter_neighbors(position)
                    .filter(|&pos| board[pos].state == CellState::Unopened),
            ),
            CellValue::Mine => outcome = RevealOutcome::HitMine,
            CellValue::Number(_) => {}
        }
    }

    outcome
}

/// Reveals every neighbor of an opened cell.
pub fn chord(board: &mut Board, center: Position, policy: ChordPolicy) -> RevealOutcome {
    if board[center].state != CellState::Opened || !policy.allows(board, center) {
        return RevealOutcome::Continued;
    }

    board
        .iter_neighbors(center)
        .map(|position| reveal(board, position))
        .fold(RevealOutcome::Continued, BitOr::bitor)
}
