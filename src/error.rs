//! Centralised error hierarchy for the **Scheme interpreter**.
//!
//! The reader side (scanner, reader) reports located errors; everything that
//! happens after a datum has been read (transformation and evaluation) fails
//! with the single flat [`SchemeError::Runtime`] kind.  Callers treat a runtime
//! failure as fatal to the current top‑level form only.
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::{debug, info};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemeError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Structural (reader) error, e.g. an unmatched `)`.
    #[error("[line {line}] Error: {message}")]
    Parse { message: String, line: usize },

    /// Input ended in the middle of a datum.  The REPL reacts by reading
    /// another line instead of reporting it.
    #[error("Unexpected end of input")]
    Incomplete,

    /// Transformation or evaluation failure.
    #[error("RuntimeError: {0}")]
    Runtime(String),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SchemeError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        SchemeError::Lex { message, line }
    }

    /// Helper constructor for the **reader**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        SchemeError::Parse { message, line }
    }

    /// Helper constructor for the transformer and the evaluator.
    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Runtime error: {}", message);

        SchemeError::Runtime(message)
    }

    /// `true` when more input could complete the datum being read.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, SchemeError::Incomplete)
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, SchemeError>;
