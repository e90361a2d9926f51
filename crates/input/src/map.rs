//! Mapping from terminal events to UI actions and cell pointer events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::types::{PointerPhase, UiAction};

/// Map keyboard input to UI actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    if should_quit(key) {
        return Some(UiAction::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::Right)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::Down)
        }

        KeyCode::Enter => Some(UiAction::Confirm),
        KeyCode::Char(' ') => Some(UiAction::Grab),
        KeyCode::Esc | KeyCode::Backspace => Some(UiAction::Back),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::Pause),

        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| UiAction::Select(d as u8)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Left-button gesture at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPointer {
    pub phase: PointerPhase,
    pub column: u16,
    pub row: u16,
}

/// Map a mouse event to a pointer gesture. Only the left button drags.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<CellPointer> {
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Drag,
        MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
        _ => return None,
    };
    Some(CellPointer {
        phase,
        column: mouse.column,
        row: mouse.row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_direction_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), Some(UiAction::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('L'))), Some(UiAction::Right));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('k'))), Some(UiAction::Up));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Down)), Some(UiAction::Down));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Enter)), Some(UiAction::Confirm));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char(' '))), Some(UiAction::Grab));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('p'))), Some(UiAction::Pause));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Esc)), Some(UiAction::Back));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('2'))), Some(UiAction::Select(2)));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('0'))), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('Q'))), Some(UiAction::Quit));
    }

    #[test]
    fn test_mouse_left_button_only() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(CellPointer {
                phase: PointerPhase::Down,
                column: 3,
                row: 4
            })
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6)).map(|p| p.phase),
            Some(PointerPhase::Drag)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 6)).map(|p| p.phase),
            Some(PointerPhase::Up)
        );
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)), None);
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::Moved, 0, 0)), None);
    }
}
