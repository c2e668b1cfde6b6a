//! Values that live on the resolver stack and the commands they
//! resolve into.

use crate::token::{Keyword, Span};

/// A stack-resident value during resolution: a string literal or a
/// command keyword still waiting for its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    StringLiteral { text: String, span: Span },
    Print { span: Span },
    Newfile { span: Span },
    Write { span: Span },
    Read { span: Span },
}

impl Element {
    /// The unbound element for a command keyword.
    #[must_use]
    pub const fn unbound(keyword: Keyword, span: Span) -> Self {
        match keyword {
            Keyword::Print => Self::Print { span },
            Keyword::Newfile => Self::Newfile { span },
            Keyword::Write => Self::Write { span },
            Keyword::Read => Self::Read { span },
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::StringLiteral { span, .. }
            | Self::Print { span }
            | Self::Newfile { span }
            | Self::Write { span }
            | Self::Read { span } => *span,
        }
    }
}

/// A command with all of its operands bound, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print `arg` followed by a newline.
    Print { arg: String, span: Span },
    /// Create or truncate `filename`.
    Newfile { filename: String, span: Span },
    /// Replace the contents of `filename` with `content`.
    Write {
        content: String,
        filename: String,
        span: Span,
    },
}

impl Command {
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::Print { .. } => Keyword::Print,
            Self::Newfile { .. } => Keyword::Newfile,
            Self::Write { .. } => Keyword::Write,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Print { span, .. } | Self::Newfile { span, .. } | Self::Write { span, .. } => {
                *span
            }
        }
    }
}

/// The resolver's LIFO stack.
#[derive(Debug, Default)]
pub struct Stack {
    elements: Vec<Element>,
}

impl Stack {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove the most recently pushed element, if any.
    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
