//! Editor state: the document, its identity, the input mode and the pending
//! command line.
//!
//! The cursor and scroll offset live on the view (`core-model`) so this crate
//! stays buffer-centric. Load/save semantics:
//! - An unreadable path loads as a single empty line; the path is still kept
//!   as the document identity so a later save creates it.
//! - A failed save is logged and otherwise ignored. The buffer stays dirty.

use core_text::{Buffer, Limits};
use std::path::{Path, PathBuf};

pub mod io;
pub use io::StoreError;

/// Identity used when no path argument is supplied.
pub const DEFAULT_FILE_NAME: &str = "untitled.txt";

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys edit the buffer or move the cursor.
    #[default]
    Normal,
    /// The escape prefix was seen; the next key is read as a shortcut.
    ModifierPending,
    /// Keys build the command line (`:w`, `:q`, `:wq`).
    Command,
}

/// Pending command text typed after entering command mode (no leading ':').
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    /// Discard the pending command text.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Remove the last character; no-op when empty.
    pub fn backspace(&mut self) {
        self.buf.pop();
    }
    /// Take the buffered command, leaving the line empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Opened,
    NewDocument,
}

#[derive(Debug)]
pub struct EditorState {
    buffer: Buffer,
    pub file_name: PathBuf,
    pub mode: Mode,
    pub command_line: CommandLineState,
    /// True when the buffer has changes not yet written.
    pub dirty: bool,
}

impl EditorState {
    /// Create a new state around an existing buffer.
    pub fn new(buffer: Buffer, file_name: impl Into<PathBuf>) -> Self {
        Self {
            buffer,
            file_name: file_name.into(),
            mode: Mode::Normal,
            command_line: CommandLineState::default(),
            dirty: false,
        }
    }

    /// Open `path`, treating any read failure as a new empty document.
    pub fn open(path: impl Into<PathBuf>, limits: Limits) -> (Self, LoadOutcome) {
        let mut state = Self::new(Buffer::new(limits), path);
        let outcome = state.reload(limits);
        (state, outcome)
    }

    /// Replace the buffer with a fresh load of `path` and adopt it as identity.
    pub fn load(&mut self, path: impl Into<PathBuf>, limits: Limits) -> LoadOutcome {
        self.file_name = path.into();
        self.reload(limits)
    }

    fn reload(&mut self, limits: Limits) -> LoadOutcome {
        self.dirty = false;
        match io::read_buffer(&self.file_name, limits) {
            Ok(buffer) => {
                self.buffer = buffer;
                LoadOutcome::Opened
            }
            Err(StoreError::NotFound(path)) => {
                tracing::debug!(target: "io", file = %path.display(), "new_document");
                self.buffer = Buffer::new(limits);
                LoadOutcome::NewDocument
            }
            Err(e) => {
                tracing::warn!(target: "io", error = %e, "file_open_error");
                self.buffer = Buffer::new(limits);
                LoadOutcome::NewDocument
            }
        }
    }

    /// Write the buffer to its identity path. Returns true on success; failures
    /// are logged only.
    pub fn save(&mut self) -> bool {
        match io::write_lines(&self.file_name, self.buffer.lines()) {
            Ok(()) => {
                tracing::info!(
                    target: "io",
                    file = %self.file_name.display(),
                    line_count = self.buffer.line_count(),
                    "file_write_ok"
                );
                self.dirty = false;
                true
            }
            Err(e) => {
                tracing::error!(target: "io", error = %e, "file_write_error");
                false
            }
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }
}
