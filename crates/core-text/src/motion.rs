//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor
//! state. Horizontal motions step one encoded character and wrap across line
//! boundaries; vertical motions keep the byte column unless the target line is
//! shorter, in which case the column is clamped (and snapped onto a boundary).

use crate::{Buffer, Position, utf8};

/// Move left one character, wrapping to the end of the previous line.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.byte > 0 {
        if let Some(line) = buf.line(pos.line) {
            let at = pos.byte.min(line.len());
            pos.byte = at - utf8::prev_char_width(line.as_bytes(), at);
        }
    } else if pos.line > 0 {
        pos.line -= 1;
        pos.byte = buf.line_byte_len(pos.line);
    }
}

/// Move right one character, wrapping to the start of the next line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    let len = buf.line_byte_len(pos.line);
    if pos.byte < len {
        if let Some(line) = buf.line(pos.line) {
            pos.byte += utf8::char_width_at(line.as_bytes(), pos.byte);
        }
    } else if pos.line + 1 < buf.line_count() {
        pos.line += 1;
        pos.byte = 0;
    }
}

/// Move up one line, clamping the column to the target line.
pub fn up(buf: &Buffer, pos: &mut Position) {
    if pos.line == 0 {
        return;
    }
    pos.line -= 1;
    buf.clamp_position(pos);
}

/// Move down one line, clamping the column to the target line.
pub fn down(buf: &Buffer, pos: &mut Position) {
    if pos.line + 1 >= buf.line_count() {
        return;
    }
    pos.line += 1;
    buf.clamp_position(pos);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_steps_over_multibyte_character() {
        let b = Buffer::from_str("漢a");
        let mut pos = Position::origin();
        right(&b, &mut pos);
        assert_eq!(pos.byte, 3);
        right(&b, &mut pos);
        assert_eq!(pos.byte, 4);
    }

    #[test]
    fn left_steps_back_over_multibyte_character() {
        let b = Buffer::from_str("a😀");
        let mut pos = Position::new(0, 5);
        left(&b, &mut pos);
        assert_eq!(pos.byte, 1);
    }

    #[test]
    fn horizontal_motion_wraps_lines() {
        let b = Buffer::from_str("ab\ncd");
        let mut pos = Position::new(0, 2);
        right(&b, &mut pos);
        assert_eq!(pos, Position::new(1, 0));
        left(&b, &mut pos);
        assert_eq!(pos, Position::new(0, 2));
    }

    #[test]
    fn horizontal_motion_stops_at_document_edges() {
        let b = Buffer::from_str("ab\ncd");
        let mut pos = Position::origin();
        left(&b, &mut pos);
        assert_eq!(pos, Position::origin());
        let mut end = Position::new(1, 2);
        right(&b, &mut end);
        assert_eq!(end, Position::new(1, 2));
    }

    #[test]
    fn vertical_motion_clamps_to_shorter_line() {
        let b = Buffer::from_str("long line\nab\nanother long");
        let mut pos = Position::new(0, 7);
        down(&b, &mut pos);
        assert_eq!(pos, Position::new(1, 2));
        down(&b, &mut pos);
        assert_eq!(pos, Position::new(2, 2));
    }

    #[test]
    fn vertical_motion_snaps_into_boundary() {
        let b = Buffer::from_str("abcd\n漢字");
        let mut pos = Position::new(0, 4);
        down(&b, &mut pos);
        assert_eq!(pos, Position::new(1, 3));
    }

    #[test]
    fn vertical_motion_clamped_at_edges() {
        let b = Buffer::from_str("a\nb");
        let mut pos = Position::origin();
        up(&b, &mut pos);
        assert_eq!(pos, Position::origin());
        let mut last = Position::new(1, 0);
        down(&b, &mut last);
        assert_eq!(last, Position::new(1, 0));
    }
}
