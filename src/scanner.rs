//! Module `scanner` implements a one‑pass, streaming lexer for the Scheme subset.
//!
//! It transforms a source string into a sequence of `Token<'a>`s, skipping whitespace
//! and `;` comments, and emitting exactly one `EOF` token at the end. Designed as a
//! `FusedIterator`, it can be chained safely with other iterator adapters.
//!
//! # Token Recognition
//!
//! - Punctuation: `(`, `)` and the quote sugar `'`.
//! - String literals: `"` … `"` with `\n`, `\t`, `\\` and `\"` escapes.
//! - Hash literals: `#t`, `#f`, `#true`, `#false`, resolved via a perfect‑hash map.
//! - Atoms: any other run of non‑delimiter bytes.  An atom that looks like
//!   `[+-]?digits` is an integer, `[+-]?digits/digits` a rational, anything
//!   else a symbol.  Rationals are **not** reduced.
//!
//! # Example
//!
//! ```rust
//! use scheme_interpreter::scanner::Scanner;
//!
//! let mut scanner = Scanner::new("(+ 1 2) ; comment");
//! for result in &mut scanner {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{Result, SchemeError};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static `#` literal map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static HASH_LITERALS: phf::Map<&'static str, TokenType> = phf_map! {
    "#t"     => TokenType::TRUE,
    "#true"  => TokenType::TRUE,
    "#f"     => TokenType::FALSE,
    "#false" => TokenType::FALSE,
};

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a str,               // entire source text
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    /// Are we at (or past) the end of input?
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes()[self.curr]
        }
    }

    /// Bytes that end an atom.
    #[inline(always)]
    fn is_delimiter(b: u8) -> bool {
        matches!(
            b,
            b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')' | b'"' | b';' | b'\''
        )
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.curr`.  If the lexeme produces an
    /// actual token the kind is stored in `self.pending`.  Whitespace and
    /// comments are skipped by returning `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            b'(' => self.pending = Some(TokenType::LEFT_PAREN),
            b')' => self.pending = Some(TokenType::RIGHT_PAREN),
            b'\'' => self.pending = Some(TokenType::QUOTE),

            b' ' | b'\r' | b'\t' => {
                return Ok(());
            }

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            // ── comments (; … until newline) ─────────────────────────────
            b';' => {
                if let Some(pos) = memchr(b'\n', &self.bytes()[self.curr..]) {
                    self.curr += pos;
                } else {
                    self.curr = self.len();
                }

                return Ok(());
            }

            b'"' => {
                return self.parse_string();
            }

            _ => {
                return self.parse_atom();
            }
        }

        Ok(())
    }

    /// Parse a double‑quoted string literal, decoding escapes.
    fn parse_string(&mut self) -> Result<()> {
        let mut decoded = String::new();
        let mut chunk_start = self.curr;

        loop {
            if self.is_at_end() {
                return Err(SchemeError::lex(self.line, "Unterminated string."));
            }

            match self.peek() {
                b'"' => break,

                b'\\' => {
                    decoded.push_str(&self.src[chunk_start..self.curr]);
                    self.advance();

                    if self.is_at_end() {
                        return Err(SchemeError::lex(self.line, "Unterminated string."));
                    }

                    let escaped = match self.advance() {
                        b'n' => '\n',
                        b't' => '\t',
                        b'\\' => '\\',
                        b'"' => '"',
                        other => {
                            return Err(SchemeError::lex(
                                self.line,
                                format!("Unknown escape sequence: \\{}", other as char),
                            ));
                        }
                    };

                    decoded.push(escaped);
                    chunk_start = self.curr;
                }

                b'\n' => {
                    self.line += 1;
                    self.advance();
                }

                _ => {
                    self.advance();
                }
            }
        }

        decoded.push_str(&self.src[chunk_start..self.curr]);
        self.advance(); // closing quote

        self.pending = Some(TokenType::STRING(decoded));

        Ok(())
    }

    /// Consume the rest of an atom and classify it as a hash literal, a
    /// number, a rational or a symbol.
    fn parse_atom(&mut self) -> Result<()> {
        while !self.is_at_end() && !Self::is_delimiter(self.peek()) {
            self.advance();
        }

        let text: &'a str = &self.src[self.start..self.curr];

        if text.starts_with('#') {
            return match HASH_LITERALS.get(text) {
                Some(tt) => {
                    self.pending = Some(tt.clone());
                    Ok(())
                }
                None => Err(SchemeError::lex(
                    self.line,
                    format!("Unknown literal: {}", text),
                )),
            };
        }

        let tt = classify_atom(text).map_err(|msg| SchemeError::lex(self.line, msg))?;

        self.pending = Some(tt);

        Ok(())
    }
}

/// `[+-]?digits`
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn classify_atom(text: &str) -> std::result::Result<TokenType, String> {
    if is_integer_text(text) {
        let n = text
            .parse::<i64>()
            .map_err(|_| format!("Integer literal out of range: {}", text))?;

        return Ok(TokenType::NUMBER(n));
    }

    if let Some((num, den)) = text.split_once('/') {
        let den_is_digits = !den.is_empty() && den.bytes().all(|b| b.is_ascii_digit());

        if is_integer_text(num) && den_is_digits {
            let n = num
                .parse::<i64>()
                .map_err(|_| format!("Rational literal out of range: {}", text))?;
            let d = den
                .parse::<i64>()
                .map_err(|_| format!("Rational literal out of range: {}", text))?;

            if d == 0 {
                return Err(format!("Zero denominator in rational literal: {}", text));
            }

            return Ok(TokenType::RATIONAL(n, d));
        }
    }

    Ok(TokenType::SYMBOL)
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr <= self.len() {
            // 1. EOF guard – emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
            }

            // 2. Reset per‑token state.
            self.start = self.curr;
            self.pending = None;

            // 3. Attempt to scan a token.
            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            // 4. If a real token was recognised, build and return it.
            if let Some(tt) = self.pending.take() {
                let lex: &'a str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, lex, self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
