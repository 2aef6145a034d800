use std::rc::Rc;

use tracing::trace;

use crate::{MK_CHAR_TOKEN, MK_TOKEN};

use super::tokens::{lookup_ident, Token, TokenKind};

/// Single-pass scanner over a byte buffer.
///
/// Any byte sequence is accepted; bytes outside the token alphabet come back as
/// `ILLEGAL` tokens one byte at a time.
///
/// `position` indexes the byte held in `ch`; `read_position` is always one past it.
/// Once the input is exhausted `ch` is 0 and `position` sits at `input.len()`.
///
/// Cloning is cheap: the input is shared, only the cursors are copied.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Rc<[u8]>,
    position: usize,
    read_position: usize,
    ch: u8,
    token_start: usize,
    drained: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Lexer {
        Lexer::from_bytes(input.as_bytes())
    }

    pub fn from_bytes(input: &[u8]) -> Lexer {
        let mut lexer = Lexer {
            input: Rc::from(input),
            position: 0,
            read_position: 0,
            ch: 0,
            token_start: 0,
            drained: false,
        };

        lexer.read_char();
        lexer
    }

    /// Produces the next token and advances past the bytes it covers.
    ///
    /// Never fails: unrecognised bytes come back as [`TokenKind::Illegal`], and once
    /// the input is drained every call returns [`TokenKind::EOF`].
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.position;

        let ch = self.ch;
        let token = match ch {
            b'=' => self.one_or_two(TokenKind::Assign, TokenKind::Eq),
            b'!' => self.one_or_two(TokenKind::Bang, TokenKind::NotEq),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Asterisk),
            b'/' => self.single(TokenKind::Slash),
            b'<' => self.single(TokenKind::Lt),
            b'>' => self.single(TokenKind::Gt),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            0 if self.at_eof() => Token::eof(),
            _ if is_letter(ch) => {
                let literal = self.read_identifier();
                MK_TOKEN!(lookup_ident(&literal), literal)
            }
            _ if ch.is_ascii_digit() => MK_TOKEN!(TokenKind::Int, self.read_number()),
            _ => self.single(TokenKind::Illegal),
        };

        trace!(kind = %token.kind, literal = %token.literal, offset = self.token_start, "token");
        token
    }

    /// Pure transition: consumes this state and returns the advanced state with its token.
    pub fn step(mut self) -> (Lexer, Token) {
        let token = self.next_token();
        (self, token)
    }

    /// Byte offset at which the most recently returned token started.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn read_char(&mut self) {
        self.ch = self.byte_at(self.read_position);
        self.position = self.read_position.min(self.input.len());
        self.read_position = self.position + 1;
    }

    /// Looks at the byte after `ch` without moving either cursor.
    fn peek_char(&self) -> u8 {
        self.byte_at(self.read_position)
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.input.get(index).copied().unwrap_or(0)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let token = MK_CHAR_TOKEN!(kind, self.ch);
        self.read_char();
        token
    }

    /// Resolves `=`/`==` and `!`/`!=`. The second byte is only consumed when it is `=`.
    fn one_or_two(&mut self, one: TokenKind, two: TokenKind) -> Token {
        if self.peek_char() != b'=' {
            return self.single(one);
        }

        let start = self.position;
        self.read_char();
        self.read_char();
        MK_TOKEN!(two, self.literal(start))
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }

        self.literal(start)
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }

        self.literal(start)
    }

    /// Text of `input[start..position]`. Multi-byte runs are always ASCII.
    fn literal(&self, start: usize) -> String {
        self.input[start..self.position]
            .iter()
            .map(|byte| *byte as char)
            .collect()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the first `EOF`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.drained {
            return None;
        }

        let token = self.next_token();
        self.drained = token.is_eof();
        Some(token)
    }
}

impl std::iter::FusedIterator for Lexer {}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Drains a fresh lexer over `source`, returning every token including the trailing `EOF`.
pub fn tokenize(source: impl AsRef<[u8]>) -> Vec<Token> {
    Lexer::from_bytes(source.as_ref()).collect()
}

/// Like [`tokenize`], pairing each token with the byte offset it starts at.
pub fn tokenize_spanned(source: impl AsRef<[u8]>) -> Vec<(usize, Token)> {
    let mut lexer = Lexer::from_bytes(source.as_ref());
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push((lexer.token_start(), token));

        if done {
            return tokens;
        }
    }
}
