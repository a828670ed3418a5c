//! Action vocabulary, key translation and dispatch.
//!
//! Keys become `Action`s through [`translate_key`], which reads only the
//! current [`Mode`](core_state::Mode). [`dispatch`] applies an action to the
//! session and performs every mode transition, so the whole state machine is
//! visible in `EditorState::mode` between events.

mod dispatcher;
mod key_translator;

pub use dispatcher::{CommandParser, DispatchResult, ParsedCommand, dispatch};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    InsertTab,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    SplitLine,
    DeleteLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Escape prefix seen; the next key is a shortcut.
    EnterModifierPending,
    /// The key after the prefix named no shortcut.
    CancelModifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    ModeChange(ModeChange),
    CommandStart,
    CommandChar(char),
    CommandBackspace,
    CommandCancel,
    /// Run the pending command line.
    CommandExecute,
}
