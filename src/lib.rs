//! Scanner, stack resolver, and executor for a tiny postfix scripting
//! language that prints text and reads and writes whole files.
//!
//! Operands come before the command that consumes them:
//!
//! ```text
//! "notes.txt" newfile
//! "notes.txt" "first line" write
//! "notes.txt" read print
//! ```
//!
//! A script runs in three stages: [`scan`] turns source text into
//! tokens, [`resolve`] binds the tokens into [`Command`]s on a single
//! stack, and [`execute`] performs the side effects.
//!
//! # Quick start
//!
//! ```
//! use shellscript_rs::{MemoryFiles, run_str};
//!
//! let files = MemoryFiles::new().with_file("greeting.txt", "hello");
//! let mut out = Vec::new();
//! run_str("\"greeting.txt\" read print", &files, &mut out).unwrap();
//! assert_eq!(out, b"hello\n");
//! ```
//!
//! ## Command order
//!
//! Every command is bound while popping the stack, so independent
//! commands run in the reverse of their source order:
//!
//! ```
//! use shellscript_rs::{MemoryFiles, run_str};
//!
//! let mut out = Vec::new();
//! run_str("\"a\" print\n\"b\" print\n", &MemoryFiles::new(), &mut out).unwrap();
//! assert_eq!(out, b"b\na\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod element;
pub mod executor;
pub mod files;
pub mod resolver;
pub mod scanner;
pub mod token;

use std::io::Write;

use tracing::info;

pub use element::{Command, Element, Stack};
pub use executor::execute;
pub use files::{FileAccess, IoError, IoOp, MemoryFiles, OsFiles};
pub use resolver::{Operand, SyntaxError, SyntaxErrorKind, resolve};
pub use scanner::{LexError, LexErrorKind, Scanner, scan};
pub use token::{Keyword, Span, Token, TokenKind};

/// Unified error type covering every stage of a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A scanner error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A resolver error.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// A file or output failure.
    #[error("{0}")]
    Io(#[from] IoError),
}

impl Error {
    /// Source location the error is attributed to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Syntax(e) => e.span,
            Self::Io(e) => e.span,
        }
    }
}

/// Scan and resolve a script in one step, without executing it.
pub fn compile_str<F>(input: &str, files: &F) -> Result<Vec<Command>, Error>
where
    F: FileAccess + ?Sized,
{
    let tokens = scan(input)?;
    resolve(&tokens, files)
}

/// Scan, resolve, and execute a script.
pub fn run_str<F, W>(input: &str, files: &F, out: &mut W) -> Result<(), Error>
where
    F: FileAccess + ?Sized,
    W: Write + ?Sized,
{
    let commands = compile_str(input, files)?;
    execute(&commands, files, out)?;
    info!(commands = commands.len(), "run complete");
    Ok(())
}
