//! Line-vector text buffer and the edit operations that mutate it.
//!
//! The document is an ordered `Vec<Line>` with fixed capacities (`Limits`).
//! Every operation takes the cursor as `&mut Position` and returns `true` when
//! the document changed. Requests that would exceed a capacity are silent
//! no-ops: the buffer and cursor are left exactly as they were.
//!
//! Invariants (hold after every public call):
//! - `line_count() >= 1`.
//! - `line_count() <= limits.max_lines`.
//! - No line contains `\n`; edits never grow a line past `limits.line_capacity()`.
//! - A cursor returned from an operation names an existing line and sits on a
//!   character boundary of that line (see `utf8` for malformed input rules).

use tracing::trace;

pub mod line;
pub mod motion;
pub mod utf8;

pub use line::Line;

pub const DEFAULT_MAX_LINES: usize = 1000;
/// Maximum line length in bytes, counting the terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 256;
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Capacity limits applied to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_lines: usize,
    pub max_line_len: usize,
    pub tab_width: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl Limits {
    /// Content bytes a single line may hold (terminator excluded).
    pub fn line_capacity(&self) -> usize {
        self.max_line_len.saturating_sub(1).max(1)
    }
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.byte = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

/// The document: a non-empty ordered sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
    limits: Limits,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Buffer {
    /// A document holding a single empty line.
    pub fn new(limits: Limits) -> Self {
        Self {
            lines: vec![Line::new()],
            limits,
        }
    }

    /// Build from already split lines, enforcing the line-count cap and the
    /// non-empty invariant.
    pub fn from_lines(mut lines: Vec<Line>, limits: Limits) -> Self {
        lines.truncate(limits.max_lines);
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self { lines, limits }
    }

    /// Parse newline-delimited content.
    ///
    /// A final line without a terminating newline is kept; a terminating
    /// newline does not create an extra empty line. Records longer than the
    /// line capacity are split into several lines at character boundaries.
    /// Parsing stops once `max_lines` lines have been produced.
    pub fn from_bytes(content: &[u8], limits: Limits) -> Self {
        let cap = limits.line_capacity();
        let mut records: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();
        if content.ends_with(b"\n") {
            records.pop();
        }
        let mut lines = Vec::new();
        'records: for record in records {
            for chunk in chunk_record(record, cap) {
                if lines.len() >= limits.max_lines {
                    trace!(target: "text", max_lines = limits.max_lines, "line_cap_reached");
                    break 'records;
                }
                lines.push(Line::from_bytes(chunk.to_vec()));
            }
        }
        Self::from_lines(lines, limits)
    }

    /// Convenience constructor used heavily in tests.
    pub fn from_str(content: &str) -> Self {
        Self::from_bytes(content.as_bytes(), Limits::default())
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Byte length of a line for clamping purposes (0 for out of range).
    pub fn line_byte_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map(Line::len).unwrap_or(0)
    }

    /// Clamp a position to a valid line and a character boundary on it.
    pub fn clamp_position(&self, pos: &mut Position) {
        pos.clamp_to(self.lines.len(), |i| self.line_byte_len(i));
        if let Some(line) = self.lines.get(pos.line) {
            pos.byte = utf8::floor_boundary(line.as_bytes(), pos.byte);
        }
    }

    /// Insert one character at the cursor and advance by its encoded width.
    /// A newline is rejected; use `split_line` instead.
    pub fn insert_char(&mut self, pos: &mut Position, c: char) -> bool {
        if c == '\n' {
            return false;
        }
        let mut tmp = [0u8; 4];
        let encoded = c.encode_utf8(&mut tmp);
        self.insert_bytes(pos, encoded.as_bytes())
    }

    /// Insert `tab_width` spaces at the cursor.
    pub fn insert_tab(&mut self, pos: &mut Position) -> bool {
        let spaces = vec![b' '; self.limits.tab_width];
        self.insert_bytes(pos, &spaces)
    }

    fn insert_bytes(&mut self, pos: &mut Position, data: &[u8]) -> bool {
        let cap = self.limits.line_capacity();
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        if line.len() + data.len() > cap {
            trace!(target: "text", len = line.len(), add = data.len(), cap, "insert_rejected_capacity");
            return false;
        }
        let at = pos.byte.min(line.len());
        line.insert_at(at, data);
        pos.byte = at + data.len();
        true
    }

    /// Backspace: remove the character before the cursor, or join the current
    /// line onto the previous one when the cursor is at column 0.
    pub fn delete_backward(&mut self, pos: &mut Position) -> bool {
        if pos.byte == 0 {
            return self.join_with_previous(pos);
        }
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        let at = pos.byte.min(line.len());
        let width = utf8::prev_char_width(line.as_bytes(), at);
        if width == 0 {
            return false;
        }
        line.remove_range(at - width..at);
        pos.byte = at - width;
        self.snap_after_removal(pos);
        true
    }

    /// Remove the character under the cursor. Never joins the next line.
    pub fn delete_forward(&mut self, pos: &mut Position) -> bool {
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        if pos.byte >= line.len() {
            return false;
        }
        let width = utf8::char_width_at(line.as_bytes(), pos.byte);
        line.remove_range(pos.byte..pos.byte + width);
        self.snap_after_removal(pos);
        true
    }

    /// Delete trailing whitespace then the word before the cursor. At column 0
    /// this joins with the previous line exactly like `delete_backward`.
    pub fn delete_word_backward(&mut self, pos: &mut Position) -> bool {
        if pos.byte == 0 {
            return self.join_with_previous(pos);
        }
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        let end = pos.byte.min(line.len());
        let bytes = line.as_bytes();
        let mut start = end;
        while start > 0 && utf8::is_space(bytes[start - 1]) {
            start -= 1;
        }
        while start > 0 && !utf8::is_space(bytes[start - 1]) {
            start -= 1;
        }
        if start == end {
            return false;
        }
        line.remove_range(start..end);
        pos.byte = start;
        self.snap_after_removal(pos);
        true
    }

    /// Split the current line at the cursor; the suffix becomes a new line
    /// directly below and the cursor moves to its start.
    pub fn split_line(&mut self, pos: &mut Position) -> bool {
        if self.lines.len() >= self.limits.max_lines {
            trace!(target: "text", max_lines = self.limits.max_lines, "split_rejected_capacity");
            return false;
        }
        let Some(line) = self.lines.get_mut(pos.line) else {
            return false;
        };
        let at = pos.byte.min(line.len());
        let tail = line.split_off(at);
        self.lines.insert(pos.line + 1, tail);
        pos.line += 1;
        pos.byte = 0;
        true
    }

    /// Remove the current line. Deleting the only line leaves one empty line.
    /// The cursor row is clamped to the last line, never decremented past 0,
    /// and the column snapped onto the new current line.
    pub fn delete_line(&mut self, pos: &mut Position) -> bool {
        if pos.line >= self.lines.len() {
            return false;
        }
        let changed = if self.lines.len() == 1 {
            let was_empty = self.lines[0].is_empty();
            self.lines[0] = Line::new();
            !was_empty
        } else {
            self.lines.remove(pos.line);
            true
        };
        self.clamp_position(pos);
        changed
    }

    fn join_with_previous(&mut self, pos: &mut Position) -> bool {
        if pos.line == 0 || pos.line >= self.lines.len() {
            return false;
        }
        let prev_len = self.lines[pos.line - 1].len();
        let cur_len = self.lines[pos.line].len();
        let cap = self.limits.line_capacity();
        if prev_len + cur_len > cap {
            trace!(target: "text", prev_len, cur_len, cap, "join_rejected_capacity");
            return false;
        }
        let current = self.lines.remove(pos.line);
        self.lines[pos.line - 1].append(current);
        pos.line -= 1;
        pos.byte = prev_len;
        self.snap_after_removal(pos);
        true
    }

    /// Removing or joining bytes can fuse a stray lead byte with a stray
    /// continuation byte into one character; move the cursor back onto its
    /// start when that happens.
    fn snap_after_removal(&self, pos: &mut Position) {
        let before = *pos;
        self.clamp_position(pos);
        if *pos != before {
            trace!(target: "text", from = before.byte, to = pos.byte, "cursor_snapped_to_boundary");
        }
    }
}

/// Split one record into line-sized chunks cut at character boundaries.
fn chunk_record(record: &[u8], cap: usize) -> Vec<&[u8]> {
    if record.len() <= cap {
        return vec![record];
    }
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < record.len() {
        let mut end = start;
        while end < record.len() {
            let w = utf8::char_width_at(record, end);
            if end + w - start > cap {
                break;
            }
            end += w;
        }
        if end == start {
            end = start + 1;
        }
        chunks.push(&record[start..end]);
        start = end;
    }
    chunks
}
