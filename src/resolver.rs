//! Two-pass stack resolution.
//!
//! The first pass pushes every token onto a single stack, so the stack
//! mirrors the source from bottom to top. The second pass pops it
//! empty: each command keyword takes its operands from the elements
//! directly below it. A `read` computes a string literal in place,
//! which lets it feed `print` like any literal operand.
//!
//! Since commands are emitted in pop order, independent commands come
//! out in the reverse of their source order.

use std::fmt;

use tracing::debug;

use crate::Error;
use crate::element::{Command, Element, Stack};
use crate::files::{FileAccess, IoError, IoOp};
use crate::token::{Keyword, Span, Token, TokenKind};

/// Which operand of a command an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The sole operand of `print` and `newfile`.
    Argument,
    FileName,
    Content,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument => write!(f, "argument"),
            Self::FileName => write!(f, "file name argument"),
            Self::Content => write!(f, "content argument"),
        }
    }
}

/// Classifies a resolver error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Unknown word or character.
    Illegal(String),
    /// A string literal that no command consumed.
    LonelyStringLiteral(String),
    /// Nothing left on the stack for a command operand.
    MissingOperand { command: Keyword, operand: Operand },
    /// A command operand that is not a string literal.
    InvalidOperand { command: Keyword, operand: Operand },
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Illegal(text) => write!(f, "illegal '{text}'"),
            Self::LonelyStringLiteral(text) => {
                write!(f, "lonely string literal '{text}'")
            }
            Self::MissingOperand { command, operand } => {
                write!(f, "missing {operand} for '{command}'")
            }
            Self::InvalidOperand { command, operand } => {
                write!(f, "invalid {operand} for '{command}'")
            }
        }
    }
}

/// Error produced during resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

/// Resolve a token stream into bound commands, reading files through
/// `files` wherever a `read` is expanded.
///
/// # Errors
///
/// Returns `Error::Syntax` for illegal tokens, lonely literals, and
/// missing or mistyped operands, and `Error::Io` when a `read`
/// cannot load its file.
pub fn resolve<F>(tokens: &[Token], files: &F) -> Result<Vec<Command>, Error>
where
    F: FileAccess + ?Sized,
{
    let mut resolver = Resolver::new(files);
    resolver.materialize(tokens)?;
    let commands = resolver.reduce()?;
    debug_assert!(resolver.stack.is_empty());
    Ok(commands)
}

struct Resolver<'a, F: ?Sized> {
    files: &'a F,
    stack: Stack,
}

impl<'a, F> Resolver<'a, F>
where
    F: FileAccess + ?Sized,
{
    const fn new(files: &'a F) -> Self {
        Self {
            files,
            stack: Stack::new(),
        }
    }

    fn materialize(&mut self, tokens: &[Token]) -> Result<(), SyntaxError> {
        for token in tokens {
            let element = match token.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => continue,
                TokenKind::Illegal => {
                    return Err(SyntaxError {
                        kind: SyntaxErrorKind::Illegal(token.text.clone()),
                        span: token.span,
                    });
                }
                TokenKind::String => Element::StringLiteral {
                    text: token.text.clone(),
                    span: token.span,
                },
                TokenKind::Keyword(keyword) => Element::unbound(keyword, token.span),
            };
            self.stack.push(element);
        }
        debug!(depth = self.stack.len(), "stack materialized");
        Ok(())
    }

    fn reduce(&mut self) -> Result<Vec<Command>, Error> {
        let mut commands = Vec::new();

        while let Some(element) = self.stack.pop() {
            let command = match element {
                Element::Read { span } => {
                    self.expand_read(span)?;
                    continue;
                }
                Element::Print { span } => Command::Print {
                    arg: self.print_operand(span)?,
                    span,
                },
                Element::Newfile { span } => Command::Newfile {
                    filename: self.literal_operand(Keyword::Newfile, Operand::Argument, span)?,
                    span,
                },
                Element::Write { span } => {
                    let content = self.literal_operand(Keyword::Write, Operand::Content, span)?;
                    let filename = self.literal_operand(Keyword::Write, Operand::FileName, span)?;
                    Command::Write {
                        content,
                        filename,
                        span,
                    }
                }
                Element::StringLiteral { text, span } => {
                    return Err(SyntaxError {
                        kind: SyntaxErrorKind::LonelyStringLiteral(text),
                        span,
                    }
                    .into());
                }
            };
            debug!(command = %command.keyword(), line = command.span().line, "bound");
            commands.push(command);
        }

        Ok(commands)
    }

    /// Pop the next operand, which must be a string literal.
    fn literal_operand(
        &mut self,
        command: Keyword,
        operand: Operand,
        span: Span,
    ) -> Result<String, SyntaxError> {
        match self.stack.pop() {
            Some(Element::StringLiteral { text, .. }) => Ok(text),
            Some(_) => Err(SyntaxError {
                kind: SyntaxErrorKind::InvalidOperand { command, operand },
                span,
            }),
            None => Err(SyntaxError {
                kind: SyntaxErrorKind::MissingOperand { command, operand },
                span,
            }),
        }
    }

    /// `print` also accepts a `read`, expanded before the type check.
    fn print_operand(&mut self, span: Span) -> Result<String, Error> {
        match self.stack.pop() {
            Some(Element::Read { span: read_span }) => {
                self.expand_read(read_span)?;
                Ok(self.literal_operand(Keyword::Print, Operand::Argument, span)?)
            }
            Some(Element::StringLiteral { text, .. }) => Ok(text),
            Some(_) => Err(SyntaxError {
                kind: SyntaxErrorKind::InvalidOperand {
                    command: Keyword::Print,
                    operand: Operand::Argument,
                },
                span,
            }
            .into()),
            None => Err(SyntaxError {
                kind: SyntaxErrorKind::MissingOperand {
                    command: Keyword::Print,
                    operand: Operand::Argument,
                },
                span,
            }
            .into()),
        }
    }

    /// Replace a `read` and its file name with the file's contents.
    fn expand_read(&mut self, span: Span) -> Result<(), Error> {
        let path = self.literal_operand(Keyword::Read, Operand::FileName, span)?;
        let text = self
            .files
            .read_whole_file(&path)
            .map_err(|e| IoError::new(IoOp::Read, path.as_str(), &e, span))?;
        debug!(path = %path, bytes = text.len(), line = span.line, "expanded read");
        self.stack.push(Element::StringLiteral { text, span });
        Ok(())
    }
}
