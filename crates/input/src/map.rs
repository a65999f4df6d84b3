//! Key and mouse mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Terminal cell the player clicked, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickAt {
    pub column: u16,
    pub row: u16,
}

/// Map keyboard input to game actions.
///
/// Presses and auto-repeats both map; releases never do.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        // Ctrl-C quits, so plain `c` only
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => None,

        // Overlays
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Continue),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Left-button presses become clicks; everything else is ignored.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<ClickAt> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(ClickAt {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}
