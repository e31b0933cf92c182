use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
}

/// Identifies one arming of the one-second timer; ticks carrying an older id are stale.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickId(u64);

impl TickId {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Abstract input consumed by [`Game::handle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    MoveCursor(Direction),
    RevealActive,
    ToggleFlagActive,
    ChordNeighbors,
    PointerClick {
        x: u16,
        y: u16,
        button: PointerButton,
    },
    Tick(TickId),
    Resize {
        width: u16,
        height: u16,
    },
    Restart,
    Quit,
}

/// What the host runtime should do after an input was handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    #[default]
    None,
    /// Deliver `Input::Tick(id)` once, one second from now.
    ScheduleTick(TickId),
    Quit,
}
