//! Read–transform–evaluate–print driver.
//!
//! One [`Repl`] owns one global environment for its whole lifetime.  A
//! runtime error aborts only the datum being processed: `RuntimeError` is
//! printed and the loop moves on.  `(exit)` stops it.

use std::io::{BufRead, Write};

use log::{debug, info};

use crate::environment::{Env, Environment};
use crate::error::{Result, SchemeError};
use crate::interpreter::Interpreter;
use crate::reader::Reader;
use crate::scanner::Scanner;
use crate::syntax::Syntax;
use crate::transform::transform;
use crate::value::Value;

pub const PROMPT: &str = "scm> ";

/// Whether the driver should keep going after a datum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

pub struct Repl<W: Write> {
    interpreter: Interpreter<W>,
    env: Env,
}

impl<W: Write> Repl<W> {
    pub fn new(out: W) -> Self {
        info!("Creating REPL with an empty global environment");

        Self {
            interpreter: Interpreter::with_output(out),
            env: Environment::empty(),
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    /// Transform and evaluate a single datum in the global environment.
    pub fn eval(&mut self, datum: &Syntax) -> Result<Value> {
        let expr = transform(datum, &self.env)?;
        debug!("Transformed {} into {:?}", datum, expr);
        self.interpreter.evaluate(&expr, &self.env)
    }

    /// Evaluate one datum and print its outcome.  Every datum other than
    /// `(exit)` ends its output with a newline, even when nothing else is
    /// printed.
    pub fn process(&mut self, datum: &Syntax) -> Result<Flow> {
        match self.eval(datum) {
            Ok(Value::Terminate) => {
                info!("(exit) evaluated, stopping");
                return Ok(Flow::Terminate);
            }

            Ok(Value::Void) => {}

            Ok(value) => write!(self.interpreter.output(), "{}", value)?,

            Err(SchemeError::Runtime(message)) => {
                debug!("Runtime error: {}", message);
                write!(self.interpreter.output(), "RuntimeError")?;
            }

            Err(e) => return Err(e),
        }

        writeln!(self.interpreter.output())?;

        Ok(Flow::Continue)
    }

    /// Run every datum of a complete source text.  Data before a lexical or
    /// read error are still evaluated; the error is then returned.  Runtime
    /// errors are printed and skipped.
    pub fn run_source(&mut self, src: &str) -> Result<Flow> {
        let (data, failure) = read_available(src);

        if self.process_all(&data)? == Flow::Terminate {
            return Ok(Flow::Terminate);
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(Flow::Continue),
        }
    }

    /// Line‑oriented loop.  Lines are accumulated until everything typed so
    /// far reads as complete data, then those data are processed in order.
    /// A read error is reported after the data that precede it have run.
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R, prompt: bool) -> Result<()> {
        let mut pending = String::new();

        loop {
            if prompt && pending.is_empty() {
                write!(self.interpreter.output(), "{}", PROMPT)?;
                self.interpreter.output().flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                info!("End of input");
                return Ok(());
            }

            pending.push_str(&line);

            let (data, failure) = read_available(&pending);
            if failure.as_ref().is_some_and(SchemeError::is_incomplete) {
                continue;
            }

            pending.clear();

            if self.process_all(&data)? == Flow::Terminate {
                return Ok(());
            }

            if let Some(e) = failure {
                writeln!(self.interpreter.output(), "{}", e)?;
            }
        }
    }

    fn process_all(&mut self, data: &[Syntax]) -> Result<Flow> {
        for datum in data {
            if self.process(datum)? == Flow::Terminate {
                return Ok(Flow::Terminate);
            }
        }

        Ok(Flow::Continue)
    }
}

/// Every datum that reads completely, plus the error that stopped reading.
///
/// Scanning stops at the first lexical error; a datum cut short by it is
/// dropped and the lexical error reported.  An unfinished datum at the very
/// end of clean input yields [`SchemeError::Incomplete`].
fn read_available(src: &str) -> (Vec<Syntax>, Option<SchemeError>) {
    let mut tokens = Vec::new();
    let mut failure = None;

    for token in Scanner::new(src) {
        match token {
            Ok(token) => tokens.push(token),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    let mut reader = Reader::new(&tokens);
    let mut data = Vec::new();

    loop {
        match reader.read() {
            Ok(Some(datum)) => data.push(datum),
            Ok(None) => break,
            Err(e) => {
                if !(e.is_incomplete() && failure.is_some()) {
                    failure = Some(e);
                }
                break;
            }
        }
    }

    (data, failure)
}
