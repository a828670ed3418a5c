//! Key → `Action` table for each input mode.
//!
//! Normal:
//! * arrows move, Backspace/Delete delete, Enter splits, Tab indents;
//! * any non-control character without Ctrl/Alt is inserted;
//! * Esc arms the modifier prefix.
//!
//! ModifierPending consumes exactly one key: `c` opens the command line, `x`
//! deletes the current line, Backspace deletes a word. Anything else cancels.
//!
//! Command: printable non-whitespace characters extend the command, Backspace
//! trims it, Esc cancels, Enter runs it.

use crate::{Action, EditKind, ModeChange, MotionKind};
use core_events::{KeyCode, KeyEvent};
use core_state::Mode;

pub fn translate_key(mode: Mode, key: &KeyEvent) -> Option<Action> {
    match mode {
        Mode::Normal => translate_normal(key),
        Mode::ModifierPending => Some(translate_modifier(key)),
        Mode::Command => translate_command(key),
    }
}

fn translate_normal(key: &KeyEvent) -> Option<Action> {
    if key.is_chord() {
        return None;
    }
    let action = match key.code {
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Backspace => Action::Edit(EditKind::DeleteBackward),
        KeyCode::Delete => Action::Edit(EditKind::DeleteForward),
        KeyCode::Enter => Action::Edit(EditKind::SplitLine),
        KeyCode::Tab => Action::Edit(EditKind::InsertTab),
        KeyCode::Esc => Action::ModeChange(ModeChange::EnterModifierPending),
        KeyCode::Char(c) if !c.is_control() => Action::Edit(EditKind::InsertChar(c)),
        KeyCode::Char(_) => return None,
    };
    Some(action)
}

fn translate_modifier(key: &KeyEvent) -> Action {
    if key.is_chord() {
        return Action::ModeChange(ModeChange::CancelModifier);
    }
    match key.code {
        KeyCode::Char('c') => Action::CommandStart,
        KeyCode::Char('x') => Action::Edit(EditKind::DeleteLine),
        KeyCode::Backspace => Action::Edit(EditKind::DeleteWordBackward),
        _ => Action::ModeChange(ModeChange::CancelModifier),
    }
}

fn translate_command(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::CommandCancel),
        KeyCode::Enter => Some(Action::CommandExecute),
        KeyCode::Backspace => Some(Action::CommandBackspace),
        KeyCode::Char(c) if !key.is_chord() && !c.is_control() && !c.is_whitespace() => {
            Some(Action::CommandChar(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyModifiers;

    fn k(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn normal_table() {
        use Action::*;
        let cases = [
            (KeyCode::Up, Motion(MotionKind::Up)),
            (KeyCode::Down, Motion(MotionKind::Down)),
            (KeyCode::Left, Motion(MotionKind::Left)),
            (KeyCode::Right, Motion(MotionKind::Right)),
            (KeyCode::Backspace, Edit(EditKind::DeleteBackward)),
            (KeyCode::Delete, Edit(EditKind::DeleteForward)),
            (KeyCode::Enter, Edit(EditKind::SplitLine)),
            (KeyCode::Tab, Edit(EditKind::InsertTab)),
            (KeyCode::Esc, ModeChange(crate::ModeChange::EnterModifierPending)),
            (KeyCode::Char('é'), Edit(EditKind::InsertChar('é'))),
            (KeyCode::Char(' '), Edit(EditKind::InsertChar(' '))),
        ];
        for (code, expected) in cases {
            assert_eq!(translate_key(Mode::Normal, &k(code)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn normal_ignores_control_characters_and_ctrl_chords() {
        assert_eq!(translate_key(Mode::Normal, &k(KeyCode::Char('\u{7f}'))), None);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CTRL);
        assert_eq!(translate_key(Mode::Normal, &ctrl_s), None);
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            translate_key(Mode::Normal, &shift_a),
            Some(Action::Edit(EditKind::InsertChar('A')))
        );
    }

    #[test]
    fn modifier_shortcuts_and_cancel() {
        let m = Mode::ModifierPending;
        assert_eq!(translate_key(m, &k(KeyCode::Char('c'))), Some(Action::CommandStart));
        assert_eq!(
            translate_key(m, &k(KeyCode::Char('x'))),
            Some(Action::Edit(EditKind::DeleteLine))
        );
        assert_eq!(
            translate_key(m, &k(KeyCode::Backspace)),
            Some(Action::Edit(EditKind::DeleteWordBackward))
        );
        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter, KeyCode::Up] {
            assert_eq!(
                translate_key(m, &k(code)),
                Some(Action::ModeChange(ModeChange::CancelModifier))
            );
        }
    }

    #[test]
    fn command_accepts_only_printable_non_space() {
        let m = Mode::Command;
        assert_eq!(translate_key(m, &k(KeyCode::Char('w'))), Some(Action::CommandChar('w')));
        assert_eq!(translate_key(m, &k(KeyCode::Char(' '))), None);
        assert_eq!(translate_key(m, &k(KeyCode::Tab)), None);
        assert_eq!(translate_key(m, &k(KeyCode::Left)), None);
        assert_eq!(translate_key(m, &k(KeyCode::Esc)), Some(Action::CommandCancel));
        assert_eq!(translate_key(m, &k(KeyCode::Enter)), Some(Action::CommandExecute));
        assert_eq!(translate_key(m, &k(KeyCode::Backspace)), Some(Action::CommandBackspace));
    }
}
