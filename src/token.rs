use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The four command keywords of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Print,
    Newfile,
    Write,
    Read,
}

impl Keyword {
    /// Match a run of letters against the keyword table.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "print" => Some(Self::Print),
            "newfile" => Some(Self::Newfile),
            "write" => Some(Self::Write),
            "read" => Some(Self::Read),
            _ => None,
        }
    }

    /// The keyword as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Newfile => "newfile",
            Self::Write => "write",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. Always the last token of a scan.
    Eof,
    /// Line break.
    Newline,
    /// Unrecognized letter run or character.
    Illegal,
    /// Double-quoted string literal, quotes stripped.
    String,
    /// One of the command keywords.
    Keyword(Keyword),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eof => "EndOfFile",
            Self::Newline => "Newline",
            Self::Illegal => "Illegal",
            Self::String => "String",
            Self::Keyword(Keyword::Print) => "Print",
            Self::Keyword(Keyword::Newfile) => "Newfile",
            Self::Keyword(Keyword::Write) => "Write",
            Self::Keyword(Keyword::Read) => "Read",
        };
        f.write_str(name)
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.kind, self.text)
    }
}
