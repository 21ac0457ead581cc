//! Key and mouse mapping from terminal events to game actions.
//!
//! The grid keys mirror the board layout on a QWERTY keyboard:
//!
//! ```text
//! q w e      7 8 9
//! a s d  or  4 5 6
//! z x c      1 2 3
//! ```

use crate::types::{GameAction, ScreenPoint, GRID_SIDE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

const LETTER_GRID: [char; 9] = ['q', 'w', 'e', 'a', 's', 'd', 'z', 'x', 'c'];

/// Cell index for a grid key, in reading order.
pub fn cell_for_key(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    if let Some(i) = LETTER_GRID.iter().position(|&k| k == c) {
        return Some(i as u8);
    }
    // Number pad layout: 7-8-9 is the top row.
    let digit = c.to_digit(10)?;
    if digit == 0 {
        return None;
    }
    let d = (digit - 1) as u8;
    let row = GRID_SIDE - 1 - d / GRID_SIDE;
    Some(row * GRID_SIDE + d % GRID_SIDE)
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Claim),
        KeyCode::Char(c) => cell_for_key(c).and_then(GameAction::tap),
        _ => None,
    }
}

/// Screen position of a left-button press, if this event is one.
pub fn handle_mouse_event(event: MouseEvent) -> Option<ScreenPoint> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(ScreenPoint::new(event.column, event.row)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[test]
    fn test_letter_grid_keys() {
        assert_eq!(handle_key_event(key('q')), Some(GameAction::Tap(0)));
        assert_eq!(handle_key_event(key('s')), Some(GameAction::Tap(4)));
        assert_eq!(handle_key_event(key('c')), Some(GameAction::Tap(8)));
        assert_eq!(handle_key_event(key('E')), Some(GameAction::Tap(2)));
    }

    #[test]
    fn test_number_grid_keys() {
        assert_eq!(handle_key_event(key('7')), Some(GameAction::Tap(0)));
        assert_eq!(handle_key_event(key('9')), Some(GameAction::Tap(2)));
        assert_eq!(handle_key_event(key('5')), Some(GameAction::Tap(4)));
        assert_eq!(handle_key_event(key('1')), Some(GameAction::Tap(6)));
        assert_eq!(handle_key_event(key('3')), Some(GameAction::Tap(8)));
        assert_eq!(handle_key_event(key('0')), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(GameAction::Start)
        );
        assert_eq!(handle_key_event(key(' ')), Some(GameAction::Start));
        assert_eq!(handle_key_event(key('r')), Some(GameAction::Start));
        assert_eq!(handle_key_event(key('p')), Some(GameAction::Claim));
        assert_eq!(handle_key_event(key('m')), None);
    }

    #[test]
    fn test_control_chords_are_not_taps() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_left_click_reports_position() {
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse_event(down), Some(ScreenPoint::new(12, 7)));

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..down
        };
        assert_eq!(handle_mouse_event(right), None);

        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..down
        };
        assert_eq!(handle_mouse_event(moved), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key('q')));
        assert!(!should_quit(key('c')));
    }
}
