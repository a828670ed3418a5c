//! Byte-level UTF-8 helpers operating on raw line bytes.
//!
//! Lines are stored as bytes rather than `String` so that files containing
//! malformed sequences still load and edit. Every helper here therefore treats
//! an undecodable lead byte as a one byte character: editing always makes
//! forward progress and never splits a well-formed sequence.
//!
//! Invariants:
//! * `char_width_at` returns 0 only at or past the end of the slice.
//! * Stepping forward from 0 with `char_width_at` visits every boundary that
//!   `floor_boundary` can return.

/// Expected sequence length for a lead byte, or `None` when the byte cannot
/// start a sequence (continuation byte or invalid lead).
#[inline]
pub fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[inline]
pub fn is_continuation(b: u8) -> bool {
    (0x80..=0xBF).contains(&b)
}

/// Byte width of the character starting at `at`. Malformed or truncated
/// sequences count as a single byte.
pub fn char_width_at(bytes: &[u8], at: usize) -> usize {
    if at >= bytes.len() {
        return 0;
    }
    match sequence_len(bytes[at]) {
        Some(1) => 1,
        Some(n) => {
            let end = at + n;
            if end <= bytes.len() && bytes[at + 1..end].iter().all(|b| is_continuation(*b)) {
                n
            } else {
                1
            }
        }
        None => 1,
    }
}

/// Byte width of the character ending at `at` (the one a backspace removes).
///
/// Walks back over at most three continuation bytes to find a lead byte and
/// accepts it only when its encoded width reaches exactly `at`; otherwise the
/// single preceding byte is treated as the character.
pub fn prev_char_width(bytes: &[u8], at: usize) -> usize {
    let at = at.min(bytes.len());
    if at == 0 {
        return 0;
    }
    let mut start = at - 1;
    while start > 0 && at - start < 4 && is_continuation(bytes[start]) {
        start -= 1;
    }
    if char_width_at(bytes, start) == at - start {
        at - start
    } else {
        1
    }
}

/// Largest character boundary `<= at`, walking forward from the line start.
pub fn floor_boundary(bytes: &[u8], at: usize) -> usize {
    if at >= bytes.len() {
        return bytes.len();
    }
    let mut b = 0;
    while b < at {
        let w = char_width_at(bytes, b);
        if b + w > at {
            break;
        }
        b += w;
    }
    b
}

#[inline]
pub fn is_boundary(bytes: &[u8], at: usize) -> bool {
    at <= bytes.len() && floor_boundary(bytes, at) == at
}

/// Number of encoded characters in `bytes[..byte]`. This is the on-screen
/// cursor column; it deliberately ignores East Asian width and clustering.
pub fn codepoint_column(bytes: &[u8], byte: usize) -> usize {
    let limit = byte.min(bytes.len());
    let mut col = 0;
    let mut b = 0;
    while b < limit {
        b += char_width_at(bytes, b);
        col += 1;
    }
    col
}

/// ASCII `isspace` semantics (includes vertical tab, unlike
/// `u8::is_ascii_whitespace`).
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}
