use std::fmt;

use tracing::trace;

use crate::token::{Keyword, Span, Token, TokenKind};

/// Classifies a scanner error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input reached before the closing double quote.
    UnclosedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedString => write!(f, "unclosed string literal"),
        }
    }
}

/// Error produced during scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Scan a script into a sequence of tokens ending in a single
/// [`TokenKind::Eof`] token.
///
/// # Errors
///
/// Returns `LexError` when a string literal is never closed.
pub fn scan(input: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(input).collect()
}

/// Lazy token stream over a script.
///
/// Yields tokens up to and including the end-of-input token, or up to
/// the first error, and then stops.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
            done: false,
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        while let Some(' ' | '\t' | '\r') = self.peek() {
            self.advance();
        }

        let span = self.span();
        let Some(ch) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span,
            });
        };

        match ch {
            '\n' => {
                trace!(line = span.line, "newline");
                self.advance();
                Ok(Token {
                    kind: TokenKind::Newline,
                    text: "\n".to_string(),
                    span,
                })
            }
            '"' => self.read_string(),
            c if c.is_ascii_alphabetic() => Ok(self.read_word()),
            c => {
                self.advance();
                Ok(Token {
                    kind: TokenKind::Illegal,
                    text: c.to_string(),
                    span,
                })
            }
        }
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    fn read_word(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;

        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }

        let text = self.input[start..self.pos].to_string();
        let kind = Keyword::from_word(&text).map_or(TokenKind::Illegal, TokenKind::Keyword);

        Token { kind, text, span }
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        self.advance(); // skip opening quote
        let start = self.pos;

        loop {
            match self.peek() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnclosedString,
                        span,
                    });
                }
                Some('"') => break,
                Some(_) => self.advance(),
            }
        }

        let text = self.input[start..self.pos].to_string();
        self.advance(); // skip closing quote

        Ok(Token {
            kind: TokenKind::String,
            text,
            span,
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind == TokenKind::Eof => self.done = true,
            Ok(token) => trace!(%token, line = token.span.line, "scanned"),
            Err(_) => self.done = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        scan(input)
            .expect("should scan")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keywords_and_strings() {
        assert_eq!(
            kinds(r#""a.txt" read print"#),
            vec![
                TokenKind::String,
                TokenKind::Keyword(Keyword::Read),
                TokenKind::Keyword(Keyword::Print),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn empty_input_is_just_eof() {
        let tokens = scan("").expect("should scan");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].span, Span::new(1, 1));
    }

    #[test]
    fn unknown_word_is_illegal() {
        let tokens = scan("echo").expect("should scan");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[0].text, "echo");
    }

    #[test]
    fn keyword_must_be_whole_letter_run() {
        let tokens = scan("printread").expect("should scan");
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[0].text, "printread");
    }

    #[test]
    fn stray_character_is_illegal() {
        let tokens = scan("print;").expect("should scan");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].text, ";");
        assert_eq!(tokens[1].span, Span::new(1, 6));
    }

    #[test]
    fn non_ascii_character_is_one_illegal_token() {
        let tokens = scan("é print").expect("should scan");
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[1].span, Span::new(1, 3));
    }

    #[test]
    fn whitespace_is_skipped_but_newlines_are_tokens() {
        assert_eq!(
            kinds(" \t\r\n print \r\n"),
            vec![
                TokenKind::Newline,
                TokenKind::Keyword(Keyword::Print),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_is_verbatim() {
        let tokens = scan(r#""a\nb \t""#).expect("should scan");
        assert_eq!(tokens[0].text, r"a\nb \t");
    }

    #[test]
    fn line_numbers() {
        let tokens = scan("print\n\n\"x\"\nread").expect("should scan");
        let lines: Vec<_> = tokens.iter().map(|t| t.span.line).collect();
        // print, nl, nl, "x", nl, read, eof
        assert_eq!(lines, vec![1, 1, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn multiline_string_keeps_opening_line() {
        let tokens = scan("\"a\nb\" print").expect("should scan");
        assert_eq!(tokens[0].text, "a\nb");
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span, Span::new(2, 4));
    }

    #[test]
    fn unclosed_string() {
        let err = scan("print \"abc").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnclosedString);
        assert_eq!(err.span, Span::new(1, 7));
        assert_eq!(err.to_string(), "unclosed string literal at line 1, column 7");
    }

    #[test]
    fn bom_stripping() {
        let tokens = scan("\u{FEFF}print").expect("should scan");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Print));
        assert_eq!(tokens[0].span, Span::new(1, 1));
    }

    #[test]
    fn scanner_stops_after_eof() {
        let mut scanner = Scanner::new("print");
        assert!(scanner.next().is_some());
        assert!(matches!(scanner.next(), Some(Ok(t)) if t.kind == TokenKind::Eof));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn scanner_stops_after_error() {
        let mut scanner = Scanner::new("\"open");
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert!(scanner.next().is_none());
    }
}
