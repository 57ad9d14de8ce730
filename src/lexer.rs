// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokenizer for path data and transform attributes.
//!
//! The lexer is lazy: tokens are produced one at a time as the interpreter
//! asks for them, with a single token of lookahead.

use core::fmt;

/// A token, with the byte offset in the source at which it starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'a> {
    /// What kind of token this is.
    pub kind: TokenKind<'a>,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}

/// The kinds of token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind<'a> {
    /// A number literal, e.g. `-1.5e3`, as it appears in the source.
    Number(&'a str),
    /// A single letter (path data only).
    Letter(char),
    /// A run of letters (transform attributes only).
    Word(&'a str),
    /// `,`
    Comma,
    /// A run of whitespace.
    Whitespace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// The end of the source.
    EndOfStream,
    /// Input that is not a valid token. The lexer stops after this.
    Error(&'static str),
}

/// Whether letters are returned one at a time or grouped into words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexMode {
    /// Path data, where command letters are frequently run together (`"zM"`).
    Letters,
    /// Transform attributes, where function names are words (`"skewX"`).
    Words,
}

/// A tokenizer with one token of lookahead.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    mode: LexMode,
    peeked: Option<Token<'a>>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for path data.
    pub fn new(src: &'a str) -> Self {
        Lexer::with_mode(src, LexMode::Letters)
    }

    /// Create a lexer for a transform attribute.
    pub fn words(src: &'a str) -> Self {
        Lexer::with_mode(src, LexMode::Words)
    }

    fn with_mode(src: &'a str, mode: LexMode) -> Self {
        Lexer {
            src,
            pos: 0,
            mode,
            peeked: None,
            failed: false,
        }
    }

    /// Consume and return the next token.
    ///
    /// Once the end of the source, or an error, has been reached, this keeps
    /// returning [`TokenKind::EndOfStream`].
    pub fn next_token(&mut self) -> Token<'a> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Token<'a> {
        match self.peeked {
            Some(token) => token,
            None => {
                let token = self.scan();
                self.peeked = Some(token);
                token
            }
        }
    }

    /// Consume any whitespace tokens.
    pub fn skip_whitespace(&mut self) {
        while self.peek().kind == TokenKind::Whitespace {
            self.next_token();
        }
    }

    /// Consume a `wsp* comma? wsp*` separator, returning whether a comma was seen.
    pub fn skip_separator(&mut self) -> bool {
        self.skip_whitespace();
        let comma = self.peek().kind == TokenKind::Comma;
        if comma {
            self.next_token();
            self.skip_whitespace();
        }
        comma
    }

    /// Byte offset of the next unconsumed token.
    pub fn position(&mut self) -> usize {
        self.peek().offset
    }

    fn scan(&mut self) -> Token<'a> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        if self.failed || start >= bytes.len() {
            return Token {
                kind: TokenKind::EndOfStream,
                offset: bytes.len(),
            };
        }
        let c = bytes[start];
        let kind = match c {
            b',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            b'(' => {
                self.pos += 1;
                TokenKind::OpenParen
            }
            b')' => {
                self.pos += 1;
                TokenKind::CloseParen
            }
            _ if is_wsp(c) => {
                while self.pos < bytes.len() && is_wsp(bytes[self.pos]) {
                    self.pos += 1;
                }
                TokenKind::Whitespace
            }
            b'+' | b'-' | b'.' | b'0'..=b'9' => self.scan_number(),
            _ if c.is_ascii_alphabetic() => match self.mode {
                LexMode::Letters => {
                    self.pos += 1;
                    TokenKind::Letter(c as char)
                }
                LexMode::Words => {
                    while self.pos < bytes.len() && bytes[self.pos].is_ascii_alphabetic() {
                        self.pos += 1;
                    }
                    TokenKind::Word(&self.src[start..self.pos])
                }
            },
            _ => TokenKind::Error("unexpected character"),
        };
        if let TokenKind::Error(_) = kind {
            self.failed = true;
        }
        Token {
            kind,
            offset: start,
        }
    }

    /// Scan `sign? (digits ('.' digits?)? | '.' digits) exponent?`.
    ///
    /// A second `.` or sign ends the number, so `1.5.5` is `1.5` then `.5`.
    fn scan_number(&mut self) -> TokenKind<'a> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let mut i = start;
        if matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let mut digits = i - int_start;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            digits += i - frac_start;
        }
        if digits == 0 {
            return TokenKind::Error("malformed number");
        }
        // The exponent is only taken when digits follow it; otherwise the `e`
        // is left for the next token.
        if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }
        self.pos = i;
        TokenKind::Number(&self.src[start..i])
    }
}

fn is_wsp(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {n:?}"),
            TokenKind::Letter(c) => write!(f, "letter {c:?}"),
            TokenKind::Word(w) => write!(f, "word {w:?}"),
            TokenKind::Comma => write!(f, "comma"),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::OpenParen => write!(f, "'('"),
            TokenKind::CloseParen => write!(f, "')'"),
            TokenKind::EndOfStream => write!(f, "end of input"),
            TokenKind::Error(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, TokenKind};

    fn kinds(mut lexer: Lexer<'_>) -> Vec<TokenKind<'_>> {
        let mut out = vec![];
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfStream {
                return out;
            }
            out.push(token.kind);
        }
    }

    #[test]
    fn path_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds(Lexer::new("M10,-2.5e1zL")),
            [
                Letter('M'),
                Number("10"),
                Comma,
                Number("-2.5e1"),
                Letter('z'),
                Letter('L')
            ]
        );
    }

    #[test]
    fn compact_numbers() {
        use TokenKind::*;
        assert_eq!(
            kinds(Lexer::new("1.5.5-3+.2")),
            [Number("1.5"), Number(".5"), Number("-3"), Number("+.2")]
        );
        assert_eq!(kinds(Lexer::new("7.")), [Number("7.")]);
    }

    #[test]
    fn exponent_needs_digits() {
        use TokenKind::*;
        assert_eq!(kinds(Lexer::new("2e")), [Number("2"), Letter('e')]);
        assert_eq!(kinds(Lexer::new("2E-1")), [Number("2E-1")]);
    }

    #[test]
    fn whitespace_runs() {
        use TokenKind::*;
        assert_eq!(
            kinds(Lexer::new(" \t\r\n1 \x0C 2")),
            [Whitespace, Number("1"), Whitespace, Number("2")]
        );
    }

    #[test]
    fn words() {
        use TokenKind::*;
        assert_eq!(
            kinds(Lexer::words("skewX(30) translate(1 2)")),
            [
                Word("skewX"),
                OpenParen,
                Number("30"),
                CloseParen,
                Whitespace,
                Word("translate"),
                OpenParen,
                Number("1"),
                Whitespace,
                Number("2"),
                CloseParen
            ]
        );
    }

    #[test]
    fn errors_stop_the_stream() {
        let mut lexer = Lexer::new("M 1 # 2");
        lexer.next_token();
        lexer.skip_whitespace();
        lexer.next_token();
        lexer.skip_whitespace();
        let bad = lexer.next_token();
        assert_eq!(bad.kind, TokenKind::Error("unexpected character"));
        assert_eq!(bad.offset, 4);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfStream);

        assert_eq!(kinds(Lexer::new("-.")), [TokenKind::Error("malformed number")]);
    }

    #[test]
    fn peek_and_separator() {
        let mut lexer = Lexer::new("1 , 2 3");
        assert_eq!(lexer.peek().kind, TokenKind::Number("1"));
        assert_eq!(lexer.next_token().kind, TokenKind::Number("1"));
        assert!(lexer.skip_separator());
        assert_eq!(lexer.position(), 4);
        lexer.next_token();
        assert!(!lexer.skip_separator());
        assert_eq!(lexer.next_token().kind, TokenKind::Number("3"));
    }
}
