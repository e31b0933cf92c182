use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use termsweep_core::{Direction, Input, PointerButton};

/// Key help shown next to the board, in display order.
pub const HELP: &[(&str, &str)] = &[
    ("↑/W", "Move up"),
    ("↓/S", "Move down"),
    ("←/A", "Move left"),
    ("→/D", "Move right"),
    ("ENTER/LeftM", "Reveal cell"),
    ("SPACE/RightM", "Flag cell"),
    ("C", "Chord"),
    ("R", "Restart"),
    ("Q", "Quit"),
];

/// Maps a terminal event to a game input, if it means anything to the game.
pub fn translate(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        &Event::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Input> {
    use KeyCode::*;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, Char('c')).then_some(Input::Quit);
    }

    let code = match key.code {
        Char(c) => Char(c.to_ascii_lowercase()),
        code => code,
    };
    Some(match code {
        Up | Char('w') => Input::MoveCursor(Direction::Up),
        Down | Char('s') => Input::MoveCursor(Direction::Down),
        Left | Char('a') => Input::MoveCursor(Direction::Left),
        Right | Char('d') => Input::MoveCursor(Direction::Right),
        Enter => Input::RevealActive,
        Char(' ') => Input::ToggleFlagActive,
        Char('c') => Input::ChordNeighbors,
        Char('r') => Input::Restart,
        Char('q') => Input::Quit,
        _ => return None,
    })
}

fn translate_mouse(mouse: &MouseEvent) -> Option<Input> {
    let button = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerButton::Left,
        MouseEventKind::Down(MouseButton::Right) => PointerButton::Right,
        _ => return None,
    };
    Some(Input::PointerClick {
        x: mouse.column,
        y: mouse.row,
        button,
    })
}
