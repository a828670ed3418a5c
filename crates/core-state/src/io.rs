//! File store: newline-delimited load/store of a buffer.
//!
//! Writes truncate and rewrite the target in place. There is no temp-file
//! swap, so an interrupted write can leave a truncated file.

use core_text::{Buffer, Limits, Line};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read `path` into a buffer honoring `limits`.
pub fn read_buffer(path: &Path, limits: Limits) -> Result<Buffer, StoreError> {
    match std::fs::read(path) {
        Ok(content) => {
            let buffer = Buffer::from_bytes(&content, limits);
            tracing::debug!(
                target: "io",
                file = %path.display(),
                size_bytes = content.len(),
                line_count = buffer.line_count(),
                "file_read_ok"
            );
            Ok(buffer)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(StoreError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write every line followed by `\n`, overwriting `path`.
pub fn write_lines(path: &Path, lines: &[Line]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    for line in lines {
        out.write_all(line.as_bytes()).map_err(write_err)?;
        out.write_all(b"\n").map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        match read_buffer(&path, Limits::default()) {
            Err(StoreError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn write_appends_newline_to_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let buf = Buffer::from_str("a\n\nb");
        write_lines(&path, buf.lines()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a\n\nb\n");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.txt");
        let err = write_lines(&path, Buffer::from_str("x").lines()).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(err.to_string().contains("failed to write"));
    }

    #[test]
    fn malformed_bytes_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.bin");
        std::fs::write(&path, [b'a', 0xFF, b'\n', 0xC3, b'\n']).unwrap();
        let buf = read_buffer(&path, Limits::default()).unwrap();
        assert_eq!(buf.line_count(), 2);
        write_lines(&path, buf.lines()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), [b'a', 0xFF, b'\n', 0xC3, b'\n']);
    }
}
