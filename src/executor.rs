use std::io::Write;

use tracing::debug;

use crate::element::Command;
use crate::files::{FileAccess, IoError, IoOp};
use crate::token::Span;

/// Name used for the output sink in print errors.
pub const STDOUT: &str = "<stdout>";

/// Run resolved commands in order.
///
/// `print` writes to `out`; `write` and `newfile` go through `files`.
/// Commands that completed before a failure keep their effects.
///
/// # Errors
///
/// Returns the first `IoError`; no later command runs.
pub fn execute<F, W>(commands: &[Command], files: &F, out: &mut W) -> Result<(), IoError>
where
    F: FileAccess + ?Sized,
    W: Write + ?Sized,
{
    for command in commands {
        debug!(command = %command.keyword(), line = command.span().line, "executing");
        match command {
            Command::Print { arg, span } => {
                writeln!(out, "{arg}").map_err(|e| IoError::new(IoOp::Print, STDOUT, &e, *span))?;
            }
            Command::Write {
                content,
                filename,
                span,
            } => files
                .write_whole_file(filename, content)
                .map_err(|e| IoError::new(IoOp::Write, filename.as_str(), &e, *span))?,
            Command::Newfile { filename, span } => files
                .write_whole_file(filename, "")
                .map_err(|e| IoError::new(IoOp::Write, filename.as_str(), &e, *span))?,
        }
    }

    out.flush().map_err(|e| {
        let span = commands
            .last()
            .map_or(Span::new(1, 1), Command::span);
        IoError::new(IoOp::Print, STDOUT, &e, span)
    })
}
