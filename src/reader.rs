/*!
Datum reader: tokens in, one [`Syntax`] tree out per call.

Grammar
-------

```text
datum   → atom | list | "'" datum ;
list    → "(" datum* ")" ;
atom    → NUMBER | RATIONAL | STRING | SYMBOL | "#t" | "#f" ;
```

`'d` is sugar for the two‑element list `(quote d)`.

Running out of tokens inside a list or after a `'` yields
[`SchemeError::Incomplete`] instead of a located error, so an interactive
driver can ask for more input and try again.

### Logging Policy

| Location               | Level  | Purpose                                   |
|------------------------|--------|-------------------------------------------|
| `Reader::new`          | `info` | Lifecycle milestone.                      |
| `read`                 | `debug`| Each complete datum.                      |
*/

use crate::error::{Result, SchemeError};
use crate::scanner::Scanner;
use crate::syntax::Syntax;
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Scan a whole source text, stopping at the first lexical error.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    Scanner::new(src).collect()
}

/// Reads data from an immutable slice of tokens terminated by `EOF`.
pub struct Reader<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
}

impl<'a> Reader<'a> {
    /// Construct a new reader.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Reader created with {} tokens", tokens.len());

        Self { tokens, current: 0 }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Read the next complete datum, or `Ok(None)` once input is exhausted.
    pub fn read(&mut self) -> Result<Option<Syntax>> {
        if self.is_at_end() {
            return Ok(None);
        }

        let datum = self.datum()?;

        debug!("Read datum: {}", datum);

        Ok(Some(datum))
    }

    /// Read every remaining datum.
    pub fn read_all(&mut self) -> Result<Vec<Syntax>> {
        let mut data = Vec::new();

        while let Some(datum) = self.read()? {
            data.push(datum);
        }

        Ok(data)
    }

    // ───────────────────────── datum rules ────────────────────────

    fn datum(&mut self) -> Result<Syntax> {
        if self.is_at_end() {
            return Err(SchemeError::Incomplete);
        }

        let token: &'a Token<'a> = self.advance();

        match &token.token_type {
            TokenType::LEFT_PAREN => self.list(),

            TokenType::RIGHT_PAREN => Err(SchemeError::parse(token.line, "Unexpected ')'")),

            TokenType::QUOTE => {
                let quoted = self.datum()?;

                Ok(Syntax::List(vec![
                    Syntax::Symbol("quote".to_owned()),
                    quoted,
                ]))
            }

            TokenType::NUMBER(n) => Ok(Syntax::Number(*n)),

            TokenType::RATIONAL(n, d) => Ok(Syntax::Rational {
                numerator: *n,
                denominator: *d,
            }),

            TokenType::STRING(s) => Ok(Syntax::String(s.clone())),

            TokenType::SYMBOL => Ok(Syntax::Symbol(token.lexeme.to_owned())),

            TokenType::TRUE => Ok(Syntax::True),

            TokenType::FALSE => Ok(Syntax::False),

            TokenType::EOF => Err(SchemeError::Incomplete),
        }
    }

    /// Elements up to the matching `)`; the `(` is already consumed.
    fn list(&mut self) -> Result<Syntax> {
        let mut items: Vec<Syntax> = Vec::new();

        loop {
            if self.is_at_end() {
                return Err(SchemeError::Incomplete);
            }

            if self.matches(TokenType::RIGHT_PAREN) {
                break;
            }

            items.push(self.datum()?);
        }

        Ok(Syntax::List(items))
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if !self.is_at_end() && self.peek().token_type == ttype {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<Syntax>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read().transpose()
    }
}
