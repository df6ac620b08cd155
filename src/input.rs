use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Turn(Direction),
    /// Pause, resume, or start over after a crash.
    Enter,
    Quit,
}

pub fn translate(ev: &KeyEvent) -> Option<Input> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    match ev.code {
        KeyCode::Left => Some(Input::Turn(Direction::Left)),
        KeyCode::Up => Some(Input::Turn(Direction::Up)),
        KeyCode::Right => Some(Input::Turn(Direction::Right)),
        KeyCode::Down => Some(Input::Turn(Direction::Down)),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char('q') => Some(Input::Quit),
        _ => None,
    }
}
