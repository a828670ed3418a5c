//! Modifier prefix transitions.

use super::DispatchResult;
use crate::ModeChange;
use core_state::{EditorState, Mode};

pub(crate) fn handle_mode_change(mc: ModeChange, state: &mut EditorState) -> DispatchResult {
    match mc {
        ModeChange::EnterModifierPending => {
            state.mode = Mode::ModifierPending;
        }
        ModeChange::CancelModifier => {
            // `dispatch` already left the pending state.
            tracing::trace!(target: "actions.dispatch", "modifier_cancelled");
        }
    }
    DispatchResult::clean()
}
