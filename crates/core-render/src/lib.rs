//! Rendering: frame composition plus the sinks that paint frames.
//!
//! `compose_frame` is pure; a `RenderSink` decides how a frame reaches the
//! screen. The crossterm sink repaints every row each frame through the
//! batching `Writer`, which is cheap at this scale and never leaves stale
//! text behind after scrolling.

pub mod frame;
pub mod writer;

pub use frame::{CHROME_ROWS, Frame, Row, compose_frame, gutter_width, text_height};

use anyhow::Result;
use std::io::Write;
use writer::Writer;

/// Destination for composed frames.
pub trait RenderSink {
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Paints frames to any `Write` (normally stdout in raw mode).
pub struct CrosstermSink<W: Write> {
    out: W,
}

impl<W: Write> CrosstermSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CrosstermSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> RenderSink for CrosstermSink<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let mut w = Writer::new();
        w.hide_cursor();
        for (y, row) in frame.rows.iter().enumerate() {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            w.move_to(0, y);
            w.clear_line();
            if row.bold {
                w.bold(true);
                w.print(row.text.as_str());
                w.bold(false);
            } else {
                w.print(row.text.as_str());
            }
        }
        w.move_to(frame.cursor.0, frame.cursor.1);
        w.show_cursor();
        w.flush_to(&mut self.out)?;
        tracing::trace!(target: "render", rows = frame.rows.len(), cursor = ?frame.cursor, "frame_presented");
        Ok(())
    }
}

/// Keeps every presented frame; used by tests and headless runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<Frame>,
}

impl MemorySink {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl RenderSink for MemorySink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_sink_writes_rows_and_parks_cursor() {
        let frame = Frame {
            width: 10,
            height: 2,
            rows: vec![
                Row {
                    text: "1| abc".into(),
                    bold: false,
                },
                Row {
                    text: "──".into(),
                    bold: true,
                },
            ],
            cursor: (3, 0),
        };
        let mut sink = CrosstermSink::new(Vec::new());
        sink.present(&frame).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("1| abc"));
        assert!(out.contains("──"));
        // Final MoveTo targets the cursor (1-based CSI row;col).
        assert!(out.contains("\u{1b}[1;4H"));
    }

    #[test]
    fn memory_sink_records_frames() {
        let mut sink = MemorySink::default();
        let frame = Frame {
            width: 1,
            height: 0,
            rows: Vec::new(),
            cursor: (0, 0),
        };
        sink.present(&frame).unwrap();
        assert_eq!(sink.last(), Some(&frame));
    }
}
