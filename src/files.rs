//! Whole-file read and write primitives used by `read`, `write`, and
//! `newfile`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::token::Span;

/// The operation that hit an I/O failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
    Print,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "cannot read"),
            Self::Write => write!(f, "cannot write"),
            Self::Print => write!(f, "cannot print to"),
        }
    }
}

/// A failed file transfer, attributed to the command that caused it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{op} '{path}': {message} at line {}, column {}", span.line, span.column)]
pub struct IoError {
    pub op: IoOp,
    pub path: String,
    pub kind: io::ErrorKind,
    pub message: String,
    pub span: Span,
}

impl IoError {
    #[must_use]
    pub fn new(op: IoOp, path: impl Into<String>, err: &io::Error, span: Span) -> Self {
        Self {
            op,
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
            span,
        }
    }
}

/// Whole-file access. Each call transfers the entire content of one
/// file and holds no handle once it returns.
pub trait FileAccess {
    /// Read the whole file as text. Fails if the file is absent.
    fn read_whole_file(&self, path: &str) -> io::Result<String>;

    /// Replace the whole file with `text`, creating it if absent.
    fn write_whole_file(&self, path: &str, text: &str) -> io::Result<()>;
}

/// The real filesystem, optionally rooted at a base directory.
///
/// Relative script paths are resolved against the root; absolute
/// paths are used unchanged.
#[derive(Debug, Clone, Default)]
pub struct OsFiles {
    root: Option<PathBuf>,
}

impl OsFiles {
    /// Paths resolve against the process working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Paths resolve against `root`.
    #[must_use]
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => Path::new(path).to_path_buf(),
        }
    }
}

impl FileAccess for OsFiles {
    fn read_whole_file(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn write_whole_file(&self, path: &str, text: &str) -> io::Result<()> {
        fs::write(self.resolve(path), text)
    }
}

/// In-memory file table.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    files: RefCell<BTreeMap<String, String>>,
}

impl MemoryFiles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Current contents of `path`, if it exists.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Paths of every file, in sorted order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FileAccess for MemoryFiles {
    fn read_whole_file(&self, path: &str) -> io::Result<String> {
        self.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file '{path}' does not exist"),
            )
        })
    }

    fn write_whole_file(&self, path: &str, text: &str) -> io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = IoError::new(IoOp::Read, "a.txt", &err, Span::new(2, 5));
        assert_eq!(err.kind, io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "cannot read 'a.txt': gone at line 2, column 5");
    }

    #[test]
    fn memory_read_missing_is_not_found() {
        let files = MemoryFiles::new();
        let err = files.read_whole_file("nope.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "file 'nope.txt' does not exist");
    }

    #[test]
    fn memory_write_replaces_content() {
        let files = MemoryFiles::new().with_file("a.txt", "old contents");
        files.write_whole_file("a.txt", "new").expect("write");
        assert_eq!(files.get("a.txt").as_deref(), Some("new"));
        assert_eq!(files.paths(), vec!["a.txt".to_string()]);
    }

    #[test]
    fn os_files_rooted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = OsFiles::rooted(dir.path());
        files.write_whole_file("out.txt", "hello").expect("write");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).expect("read back"),
            "hello"
        );
        assert_eq!(files.read_whole_file("out.txt").expect("read"), "hello");
    }

    #[test]
    fn os_files_truncates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = OsFiles::rooted(dir.path());
        files.write_whole_file("f", "a long line").expect("write");
        files.write_whole_file("f", "").expect("truncate");
        assert_eq!(files.read_whole_file("f").expect("read"), "");
    }

    #[test]
    fn os_files_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = OsFiles::rooted(dir.path())
            .read_whole_file("missing.txt")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
