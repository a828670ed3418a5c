//! Cursor movement. Delegates to `core_text::motion`, which keeps the cursor
//! on a character boundary of an existing line.

use super::DispatchResult;
use crate::MotionKind;
use core_model::View;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let before = view.cursor;
    let buf = state.buffer();
    match kind {
        MotionKind::Left => motion::left(buf, &mut view.cursor),
        MotionKind::Right => motion::right(buf, &mut view.cursor),
        MotionKind::Up => motion::up(buf, &mut view.cursor),
        MotionKind::Down => motion::down(buf, &mut view.cursor),
    }
    if view.cursor == before {
        return DispatchResult::clean();
    }
    tracing::trace!(target: "actions.dispatch", ?kind, from_line = before.line, from_byte = before.byte, to_line = view.cursor.line, to_byte = view.cursor.byte, "motion");
    DispatchResult::dirty()
}
