//! Text edits. Every operation is bounded by the buffer's `Limits`; an edit
//! that would exceed them is a silent no-op and leaves the dirty flag alone.

use super::DispatchResult;
use crate::EditKind;
use core_model::View;
use core_state::EditorState;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let before = view.cursor;
    let buf = state.buffer_mut();
    let pos = &mut view.cursor;
    let changed = match kind {
        EditKind::InsertChar(c) => buf.insert_char(pos, c),
        EditKind::InsertTab => buf.insert_tab(pos),
        EditKind::DeleteBackward => buf.delete_backward(pos),
        EditKind::DeleteForward => buf.delete_forward(pos),
        EditKind::DeleteWordBackward => buf.delete_word_backward(pos),
        EditKind::SplitLine => buf.split_line(pos),
        EditKind::DeleteLine => buf.delete_line(pos),
    };
    if !changed {
        tracing::trace!(target: "actions.dispatch", ?kind, line = before.line, byte = before.byte, "edit_rejected");
        return DispatchResult::clean();
    }
    tracing::trace!(target: "actions.dispatch", ?kind, line = before.line, byte = before.byte, to_line = view.cursor.line, to_byte = view.cursor.byte, "edit");
    state.dirty = true;
    DispatchResult::dirty()
}
