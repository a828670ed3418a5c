//! Command line editing and execution.
//!
//! Executing always returns to Normal mode, whether or not the command was
//! recognized. Unknown commands are dropped without a message.

use super::DispatchResult;
use super::command_parser::{CommandParser, ParsedCommand};
use crate::Action;
use core_state::{EditorState, Mode};

pub(crate) fn handle_command_action(action: Action, state: &mut EditorState) -> DispatchResult {
    match action {
        Action::CommandStart => {
            state.command_line.clear();
            state.mode = Mode::Command;
            DispatchResult::dirty()
        }
        Action::CommandChar(ch) => {
            state.command_line.push_char(ch);
            DispatchResult::dirty()
        }
        Action::CommandBackspace => {
            state.command_line.backspace();
            DispatchResult::dirty()
        }
        Action::CommandCancel => {
            state.command_line.clear();
            state.mode = Mode::Normal;
            DispatchResult::dirty()
        }
        Action::CommandExecute => {
            let raw = state.command_line.take();
            state.mode = Mode::Normal;
            execute_command(&raw, state)
        }
        _ => DispatchResult::clean(),
    }
}

fn execute_command(raw: &str, state: &mut EditorState) -> DispatchResult {
    let parsed = CommandParser::parse(raw);
    tracing::debug!(target: "actions.dispatch", command = ?parsed, "command_execute");
    match parsed {
        ParsedCommand::Quit => DispatchResult::quit(),
        ParsedCommand::Write => {
            state.save();
            DispatchResult::dirty()
        }
        ParsedCommand::WriteQuit => {
            state.save();
            DispatchResult::quit()
        }
        ParsedCommand::Unknown(_) => DispatchResult::dirty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    fn mk_state(path: impl Into<std::path::PathBuf>) -> EditorState {
        EditorState::new(Buffer::from_str("abc"), path)
    }

    fn run(state: &mut EditorState, cmd: &str) -> DispatchResult {
        handle_command_action(Action::CommandStart, state);
        for ch in cmd.chars() {
            handle_command_action(Action::CommandChar(ch), state);
        }
        handle_command_action(Action::CommandExecute, state)
    }

    #[test]
    fn start_enters_command_mode_with_empty_line() {
        let mut st = mk_state("t.txt");
        st.command_line.push_char('z');
        handle_command_action(Action::CommandStart, &mut st);
        assert_eq!(st.mode, Mode::Command);
        assert_eq!(st.command_line.buffer(), "");
    }

    #[test]
    fn cancel_clears_and_returns_to_normal() {
        let mut st = mk_state("t.txt");
        handle_command_action(Action::CommandStart, &mut st);
        handle_command_action(Action::CommandChar('w'), &mut st);
        handle_command_action(Action::CommandCancel, &mut st);
        assert_eq!(st.mode, Mode::Normal);
        assert_eq!(st.command_line.buffer(), "");
    }

    #[test]
    fn quit_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.txt");
        let mut st = mk_state(&path);
        st.dirty = true;
        let r = run(&mut st, "q");
        assert!(r.quit);
        assert!(!path.exists());
    }

    #[test]
    fn write_saves_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.txt");
        let mut st = mk_state(&path);
        st.dirty = true;
        let r = run(&mut st, "w");
        assert!(!r.quit);
        assert_eq!(st.mode, Mode::Normal);
        assert!(!st.dirty);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc\n");
    }

    #[test]
    fn unknown_command_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u.txt");
        let mut st = mk_state(&path);
        let r = run(&mut st, "wqa");
        assert!(!r.quit);
        assert_eq!(st.mode, Mode::Normal);
        assert_eq!(st.command_line.buffer(), "");
        assert!(!path.exists());
    }

    #[test]
    fn write_quit_quits_even_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = mk_state(dir.path().join("missing").join("f.txt"));
        st.dirty = true;
        let r = run(&mut st, "wq");
        assert!(r.quit);
        assert!(st.dirty);
    }
}
