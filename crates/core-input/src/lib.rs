//! Terminal input: maps crossterm key events to editor events and runs the
//! async reader task.
//!
//! An Alt chord is delivered as the escape prefix followed by the bare key, so
//! `Alt+c` and `Esc` then `c` reach the mode controller identically.

mod async_service;
pub use async_service::AsyncInputShutdown;

use async_service::spawn_async_event_task;

use core_events::{Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CMods};
use tokio::task::JoinHandle;

/// Spawn the async input service backed by `crossterm::EventStream`.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}

/// Translate one crossterm key press into zero, one or two editor events.
///
/// Keys the editor has no use for (function keys, Home/End, ...) yield
/// nothing.
pub fn map_key_event(key: &CKeyEvent) -> Vec<Event> {
    let mods = map_mods(key.modifiers);
    if mods.contains(KeyModifiers::CTRL) && matches!(key.code, CKeyCode::Char('c' | 'C')) {
        return vec![Event::Input(InputEvent::CtrlC)];
    }
    let Some(code) = map_code(key.code) else {
        return Vec::new();
    };
    if mods.contains(KeyModifiers::ALT) {
        let rest = mods - KeyModifiers::ALT;
        return vec![
            key_event(KeyCode::Esc, KeyModifiers::empty()),
            key_event(code, rest),
        ];
    }
    vec![key_event(code, mods)]
}

fn key_event(code: KeyCode, mods: KeyModifiers) -> Event {
    Event::Input(InputEvent::Key(KeyEvent::new(code, mods)))
}

fn map_code(code: CKeyCode) -> Option<KeyCode> {
    Some(match code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    })
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
