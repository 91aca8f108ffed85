use log::debug;
use serde::Serialize;
use std::fmt;
use std::mem;

/// The different kinds of tokens recognized by the Scheme scanner.
///
/// Variants without data represent punctuation or boolean literals.
/// `STRING`, `NUMBER` and `RATIONAL` carry their decoded literal values.
/// `SYMBOL` takes its name from the token's lexeme.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Serialize)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '\'' (quote sugar)
    QUOTE,

    /// An identifier such as `car`, `set-car!` or `<=`
    SYMBOL,

    /// A string literal (contents without quotes, escapes decoded)
    STRING(String),

    /// An exact integer literal
    #[serde(rename = "NUMBER")]
    NUMBER(i64),

    /// An exact rational literal `n/d`, kept exactly as written
    RATIONAL(i64, i64),

    /// '#t' / '#true'
    TRUE,

    /// '#f' / '#false'
    FALSE,

    /// End‑of‑file marker
    EOF,
}

impl PartialEq for TokenType {
    /// Two TokenTypes are equal if they share the same variant
    /// (ignoring any inner data). Uses `mem::discriminant` to compare.
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and line.
    pub fn new(token_type: TokenType, lexeme: &'a str, line: usize) -> Self {
        debug!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            line,
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ── 1. literal column ─────────────────────────────────────────────
        let mut ibuf = itoa::Buffer::new();
        let literal: String = match &self.token_type {
            TokenType::STRING(s) => s.clone(),
            TokenType::NUMBER(n) => ibuf.format(*n).to_owned(),
            TokenType::RATIONAL(n, d) => {
                let mut dbuf = itoa::Buffer::new();
                format!("{}/{}", ibuf.format(*n), dbuf.format(*d))
            }
            _ => "null".to_owned(),
        };

        // ── 2. variant name without payloads ───────────────────────────────
        let variant: &'static str = match self.token_type {
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::QUOTE => "QUOTE",
            TokenType::SYMBOL => "SYMBOL",
            TokenType::STRING(_) => "STRING",
            TokenType::NUMBER(_) => "NUMBER",
            TokenType::RATIONAL(..) => "RATIONAL",
            TokenType::TRUE => "TRUE",
            TokenType::FALSE => "FALSE",
            TokenType::EOF => "EOF",
        };

        write!(f, "{} {} {}", variant, self.lexeme, literal)
    }
}
