//! Editor session model: one `EditorState` plus the `View` (cursor and
//! scroll offset) through which it is edited and rendered.
//!
//! `EditorModel` is the single owned session value threaded through input
//! handling and rendering; nothing here is global.
//!
//! Core invariants (must hold after every public call):
//! * The view cursor names an existing line and a character boundary on it.
//! * After `render_view(h)` with `h > 0`:
//!   `viewport_first_line <= cursor.line < viewport_first_line + h`.

use core_state::{EditorState, LoadOutcome};
use core_text::{Limits, Line, Position, utf8};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct View {
    pub cursor: Position,
    /// First buffer line visible on screen (the scroll offset).
    pub viewport_first_line: usize,
}

impl View {
    pub fn new(cursor: Position, viewport_first_line: usize) -> Self {
        Self {
            cursor,
            viewport_first_line,
        }
    }

    /// Scroll minimally so the cursor line is visible in `text_height` rows.
    /// Returns true if the first visible line changed.
    pub fn auto_scroll(&mut self, text_height: usize) -> bool {
        match compute_scroll_intent(self.viewport_first_line, self.cursor.line, text_height) {
            Some(new_first) => {
                self.viewport_first_line = new_first;
                true
            }
            None => false,
        }
    }
}

/// Compute the new first visible line that keeps `cursor_line` inside a
/// window of `text_height` rows starting at `first`.
///
/// Returns `None` when no scroll is needed. The window moves by the minimum
/// amount; it never re-centers.
pub fn compute_scroll_intent(first: usize, cursor_line: usize, text_height: usize) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    if cursor_line >= first + text_height {
        Some(cursor_line + 1 - text_height)
    } else if cursor_line < first {
        Some(cursor_line)
    } else {
        None
    }
}

/// Everything a render sink needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderView<'a> {
    /// Buffer index of the first visible line.
    pub first_line: usize,
    /// Visible lines, top to bottom.
    pub lines: &'a [Line],
    pub total_lines: usize,
    /// Cursor row relative to the top of the viewport.
    pub cursor_row: usize,
    /// Cursor column counted in encoded characters.
    pub cursor_col: usize,
    /// `[ path ] row/total`
    pub status: String,
    /// Pending command text while in command mode.
    pub command: Option<&'a str>,
}

pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            view: View::default(),
        }
    }

    /// Open `path` as a fresh session with the cursor at the origin.
    pub fn open(path: impl Into<PathBuf>, limits: Limits) -> (Self, LoadOutcome) {
        let (state, outcome) = EditorState::open(path, limits);
        (Self::new(state), outcome)
    }

    /// Test/helper constructor allowing an already prepared view to be injected.
    pub fn with_view(state: EditorState, mut view: View) -> Self {
        state.buffer().clamp_position(&mut view.cursor);
        Self { state, view }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
    pub fn cursor(&self) -> Position {
        self.view.cursor
    }

    /// Disjoint mutable borrows of the state and the view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Replace the document with `path` and reset cursor and scroll.
    pub fn load(&mut self, path: impl Into<PathBuf>, limits: Limits) -> LoadOutcome {
        let outcome = self.state.load(path, limits);
        self.view = View::default();
        outcome
    }

    pub fn save(&mut self) -> bool {
        self.state.save()
    }

    /// Update the scroll offset for `viewport_height` rows and describe the
    /// visible frame.
    pub fn render_view(&mut self, viewport_height: usize) -> RenderView<'_> {
        self.view.auto_scroll(viewport_height);
        let buffer = self.state.buffer();
        let total = buffer.line_count();
        let first = self.view.viewport_first_line.min(total.saturating_sub(1));
        let last = (first + viewport_height).min(total);
        let cursor = self.view.cursor;
        let cursor_col = buffer
            .line(cursor.line)
            .map(|l| utf8::codepoint_column(l.as_bytes(), cursor.byte))
            .unwrap_or(0);
        let status = format!(
            "[ {} ] {}/{}",
            self.state.file_name().display(),
            cursor.line + 1,
            total
        );
        let command = matches!(self.state.mode, core_state::Mode::Command)
            .then(|| self.state.command_line.buffer());
        RenderView {
            first_line: first,
            lines: &buffer.lines()[first..last],
            total_lines: total,
            cursor_row: cursor.line.saturating_sub(first),
            cursor_col,
            status,
            command,
        }
    }
}
