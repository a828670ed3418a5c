//! Dispatcher applying `Action` to the editor session.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `mode`    - modifier prefix arm/cancel
//! * `command` - command line editing and execution (`q`, `w`, `wq`)
//! * `edit`    - buffer mutation

use crate::Action;
use core_model::EditorModel;
use core_state::Mode;

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;

pub use command_parser::{CommandParser, ParsedCommand};

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The frame must be redrawn.
    pub dirty: bool,
    /// The session should end.
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Apply an action to the session. Returns whether a redraw is needed and
/// whether the editor should exit.
pub fn dispatch(action: Action, model: &mut EditorModel) -> DispatchResult {
    let (state, view) = model.split_state_and_view();

    // The modifier prefix covers exactly one key, whatever it maps to.
    if state.mode == Mode::ModifierPending {
        state.mode = Mode::Normal;
    }

    tracing::trace!(target: "actions.dispatch", ?action, mode = ?state.mode, "dispatch");
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, view),
        Action::Edit(kind) => edit::handle_edit(kind, state, view),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state),
        Action::CommandStart
        | Action::CommandChar(_)
        | Action::CommandBackspace
        | Action::CommandCancel
        | Action::CommandExecute => command::handle_command_action(action, state),
    }
}
