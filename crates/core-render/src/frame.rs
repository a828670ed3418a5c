//! Frame composition: turns a `RenderView` into terminal rows.
//!
//! Screen layout for a terminal `height` rows tall:
//! * rows `0..height-3`: text, each prefixed by a right-aligned 1-based line
//!   number gutter (`{n:>digits}| `, digits sized to the total line count);
//! * row `height-3`: separator;
//! * row `height-2`: status (` [ path ] row/total `);
//! * row `height-1`: `:<command>` while in command mode, blank otherwise.
//!
//! Rows are clipped to the terminal width by display width. Control
//! characters and undecodable bytes draw as `?` so every encoded character
//! occupies exactly one glyph and the cursor column stays aligned.

use core_model::RenderView;
use core_text::utf8;
use unicode_width::UnicodeWidthChar;

/// Rows reserved below the text area (separator, status, command prompt).
pub const CHROME_ROWS: u16 = 3;

const SEPARATOR: char = '─';
const PLACEHOLDER: char = '?';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub bold: bool,
}

impl Row {
    fn plain(text: String) -> Self {
        Self { text, bold: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub rows: Vec<Row>,
    /// Cursor screen position `(column, row)`.
    pub cursor: (u16, u16),
}

impl Frame {
    pub fn row_text(&self, y: usize) -> Option<&str> {
        self.rows.get(y).map(|r| r.text.as_str())
    }
}

/// Number of text rows available in a terminal of `height` rows.
pub fn text_height(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS))
}

/// Width of the line-number gutter including the `| ` suffix.
pub fn gutter_width(total_lines: usize) -> usize {
    total_lines.max(1).to_string().len() + 2
}

pub fn compose_frame(view: &RenderView<'_>, width: u16, height: u16) -> Frame {
    let text_rows = text_height(height);
    let digits = gutter_width(view.total_lines) - 2;
    let mut rows = Vec::with_capacity(usize::from(height));

    for i in 0..text_rows {
        let text = match view.lines.get(i) {
            Some(line) => {
                let mut s = format!("{:>digits$}| ", view.first_line + i + 1);
                push_display_text(&mut s, line.as_bytes());
                s
            }
            None => String::new(),
        };
        rows.push(Row::plain(text));
    }
    rows.push(Row {
        text: SEPARATOR.to_string().repeat(usize::from(width)),
        bold: true,
    });
    rows.push(Row::plain(format!(" {} ", view.status)));
    rows.push(match view.command {
        Some(cmd) => Row {
            text: format!(":{cmd}"),
            bold: true,
        },
        None => Row::plain(String::new()),
    });
    rows.truncate(usize::from(height));
    for row in &mut rows {
        clip_to_width(&mut row.text, usize::from(width));
    }

    let (cx, cy) = match view.command {
        Some(cmd) => (1 + cmd.chars().count(), usize::from(height).saturating_sub(1)),
        None => (gutter_width(view.total_lines) + view.cursor_col, view.cursor_row),
    };
    let cursor = (
        clamp_u16(cx, width.saturating_sub(1)),
        clamp_u16(cy, height.saturating_sub(1)),
    );

    Frame {
        width,
        height,
        rows,
        cursor,
    }
}

/// Append one glyph per encoded character of `bytes`.
fn push_display_text(out: &mut String, bytes: &[u8]) {
    let mut at = 0;
    while at < bytes.len() {
        let w = utf8::char_width_at(bytes, at);
        let glyph = std::str::from_utf8(&bytes[at..at + w])
            .ok()
            .and_then(|s| s.chars().next())
            .filter(|c| !c.is_control())
            .unwrap_or(PLACEHOLDER);
        out.push(glyph);
        at += w;
    }
}

fn clip_to_width(s: &mut String, width: usize) {
    let mut used = 0;
    let mut cut = None;
    for (idx, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            cut = Some(idx);
            break;
        }
        used += w;
    }
    if let Some(idx) = cut {
        s.truncate(idx);
    }
}

fn clamp_u16(v: usize, max: u16) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX).min(max)
}
