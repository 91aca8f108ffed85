//! Exact numeric tower: integers and unreduced rationals.
//!
//! Integer ⊕ integer stays an integer (division only when it is exact).  As
//! soon as a rational is involved both operands are treated as fractions,
//! an integer `a` standing for `a/1`, and the result is built by
//! cross‑multiplication.  Results are never reduced, so `1/2 + 1/2` is `4/4`.
//!
//! Every intermediate product or sum is checked; leaving the `i64` range is
//! reported as an overflow instead of wrapping.

use std::cmp::Ordering;

use log::debug;

use crate::error::{Result, SchemeError};
use crate::value::Value;

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Frac(i64, i64),
}

impl Num {
    fn parts(self) -> (i64, i64) {
        match self {
            Num::Int(n) => (n, 1),
            Num::Frac(n, d) => (n, d),
        }
    }
}

fn num(value: &Value, message: &str) -> Result<Num> {
    match value {
        Value::Integer(n) => Ok(Num::Int(*n)),
        Value::Rational(ratio) => {
            let (n, d) = **ratio;
            Ok(Num::Frac(n, d))
        }
        _ => {
            debug!("Rejected non-numeric operand: {}", message);
            Err(SchemeError::runtime(message))
        }
    }
}

#[inline]
fn overflow() -> SchemeError {
    SchemeError::runtime("Integer overflow")
}

#[inline]
fn checked_add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b).ok_or_else(overflow)
}

#[inline]
fn checked_sub(a: i64, b: i64) -> Result<i64> {
    a.checked_sub(b).ok_or_else(overflow)
}

#[inline]
fn checked_mul(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b).ok_or_else(overflow)
}

// ───────────────────────────── binary operations ─────────────────────────────

pub fn add(lhs: &Value, rhs: &Value) -> Result<Value> {
    const MSG: &str = "Cannot add non-numeric values";

    match (num(lhs, MSG)?, num(rhs, MSG)?) {
        (Num::Int(a), Num::Int(b)) => Ok(Value::Integer(checked_add(a, b)?)),
        (l, r) => {
            let ((n1, d1), (n2, d2)) = (l.parts(), r.parts());
            let numerator = checked_add(checked_mul(n1, d2)?, checked_mul(n2, d1)?)?;
            Ok(Value::rational(numerator, checked_mul(d1, d2)?))
        }
    }
}

pub fn subtract(lhs: &Value, rhs: &Value) -> Result<Value> {
    const MSG: &str = "Cannot subtract non-numeric values";

    match (num(lhs, MSG)?, num(rhs, MSG)?) {
        (Num::Int(a), Num::Int(b)) => Ok(Value::Integer(checked_sub(a, b)?)),
        (l, r) => {
            let ((n1, d1), (n2, d2)) = (l.parts(), r.parts());
            let numerator = checked_sub(checked_mul(n1, d2)?, checked_mul(n2, d1)?)?;
            Ok(Value::rational(numerator, checked_mul(d1, d2)?))
        }
    }
}

pub fn multiply(lhs: &Value, rhs: &Value) -> Result<Value> {
    const MSG: &str = "Cannot multiply non-numeric values";

    match (num(lhs, MSG)?, num(rhs, MSG)?) {
        (Num::Int(a), Num::Int(b)) => Ok(Value::Integer(checked_mul(a, b)?)),
        (l, r) => {
            let ((n1, d1), (n2, d2)) = (l.parts(), r.parts());
            Ok(Value::rational(checked_mul(n1, n2)?, checked_mul(d1, d2)?))
        }
    }
}

/// Exact division.  `a / b` on integers is an integer iff `b` divides `a`.
pub fn divide(lhs: &Value, rhs: &Value) -> Result<Value> {
    const MSG: &str = "Cannot divide non-numeric values";

    match (num(lhs, MSG)?, num(rhs, MSG)?) {
        (_, Num::Int(0)) | (_, Num::Frac(0, _)) => Err(SchemeError::runtime("Division by zero")),
        (Num::Int(a), Num::Int(b)) => {
            if a.checked_rem(b).ok_or_else(overflow)? == 0 {
                Ok(Value::Integer(a.checked_div(b).ok_or_else(overflow)?))
            } else {
                Ok(Value::rational(a, b))
            }
        }
        (l, r) => {
            let ((n1, d1), (n2, d2)) = (l.parts(), r.parts());
            Ok(Value::rational(checked_mul(n1, d2)?, checked_mul(d1, n2)?))
        }
    }
}

/// Integer remainder; the result takes the sign of the dividend.
pub fn modulo(lhs: &Value, rhs: &Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Integer(_), Value::Integer(0)) => Err(SchemeError::runtime("Division by zero")),
        (Value::Integer(a), Value::Integer(b)) => {
            Ok(Value::Integer(a.checked_rem(*b).ok_or_else(overflow)?))
        }
        _ => Err(SchemeError::runtime("modulo is only defined for integers")),
    }
}

/// Integer exponentiation by repeated squaring.
pub fn expt(base: &Value, exponent: &Value) -> Result<Value> {
    let (Value::Integer(base), Value::Integer(exponent)) = (base, exponent) else {
        return Err(SchemeError::runtime("expt is only defined for integers"));
    };

    if *exponent < 0 {
        return Err(SchemeError::runtime(
            "Negative exponent not supported for integers",
        ));
    }

    if *base == 0 && *exponent == 0 {
        return Err(SchemeError::runtime("0^0 is undefined"));
    }

    let mut result: i64 = 1;
    let mut square: i64 = *base;
    let mut remaining: i64 = *exponent;

    while remaining > 0 {
        if remaining % 2 == 1 {
            result = result
                .checked_mul(square)
                .ok_or_else(|| SchemeError::runtime("Integer overflow in expt"))?;
        }

        remaining /= 2;

        if remaining > 0 {
            square = square
                .checked_mul(square)
                .ok_or_else(|| SchemeError::runtime("Integer overflow in expt"))?;
        }
    }

    Ok(Value::Integer(result))
}

/// Numeric ordering by cross‑multiplication.
pub fn compare(lhs: &Value, rhs: &Value) -> Result<Ordering> {
    const MSG: &str = "Wrong typename in numeric comparison";

    match (num(lhs, MSG)?, num(rhs, MSG)?) {
        (Num::Int(a), Num::Int(b)) => Ok(a.cmp(&b)),
        (l, r) => {
            let ((n1, d1), (n2, d2)) = (l.parts(), r.parts());
            Ok(checked_mul(n1, d2)?.cmp(&checked_mul(n2, d1)?))
        }
    }
}

// ───────────────────────────── unary operations ─────────────────────────────

pub fn negate(value: &Value) -> Result<Value> {
    match num(value, "Cannot negate non-numeric value")? {
        Num::Int(n) => Ok(Value::Integer(n.checked_neg().ok_or_else(overflow)?)),
        Num::Frac(n, d) => Ok(Value::rational(n.checked_neg().ok_or_else(overflow)?, d)),
    }
}

/// `1 / value`, always as a rational: `(/ 1)` is `1/1`, `(/ 3)` is `1/3`.
pub fn reciprocal(value: &Value) -> Result<Value> {
    match num(value, "Cannot compute reciprocal of non-numeric value")? {
        Num::Int(0) | Num::Frac(0, _) => Err(SchemeError::runtime("Division by zero")),
        Num::Int(n) => Ok(Value::rational(1, n)),
        Num::Frac(n, d) => Ok(Value::rational(d, n)),
    }
}

// ───────────────────────────── n‑ary folds ─────────────────────────────

/// `(+ …)`: `0` for no arguments.
pub fn sum(args: &[Value]) -> Result<Value> {
    match args.split_first() {
        None => Ok(Value::Integer(0)),
        Some((first, rest)) => {
            num(first, "Cannot add non-numeric values")?;
            rest.iter().try_fold(first.clone(), |acc, v| add(&acc, v))
        }
    }
}

/// `(- x)` negates; `(- x y …)` subtracts left to right.
pub fn difference(args: &[Value]) -> Result<Value> {
    match args {
        [] => Err(SchemeError::runtime("- requires at least 1 argument")),
        [only] => negate(only),
        [first, rest @ ..] => rest.iter().try_fold(first.clone(), |acc, v| subtract(&acc, v)),
    }
}

/// `(* …)`: `1` for no arguments.
pub fn product(args: &[Value]) -> Result<Value> {
    args.iter()
        .try_fold(Value::Integer(1), |acc, v| multiply(&acc, v))
}

/// `(/ x)` is the reciprocal; `(/ x y …)` divides left to right.
pub fn quotient(args: &[Value]) -> Result<Value> {
    match args {
        [] => Err(SchemeError::runtime("/ requires at least 1 argument")),
        [only] => reciprocal(only),
        [first, rest @ ..] => rest.iter().try_fold(first.clone(), |acc, v| divide(&acc, v)),
    }
}

// ───────────────────────────── comparisons ─────────────────────────────

/// The five numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessEq,
    Equal,
    GreaterEq,
    Greater,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessEq => "<=",
            Comparison::Equal => "=",
            Comparison::GreaterEq => ">=",
            Comparison::Greater => ">",
        }
    }

    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Less => ordering == Ordering::Less,
            Comparison::LessEq => ordering != Ordering::Greater,
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::GreaterEq => ordering != Ordering::Less,
            Comparison::Greater => ordering == Ordering::Greater,
        }
    }

    /// Two‑operand form.
    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<Value> {
        Ok(Value::Boolean(self.holds(compare(lhs, rhs)?)))
    }

    /// n‑ary form: every adjacent pair must satisfy the relation; stops at
    /// the first pair that does not.
    pub fn chain(self, args: &[Value]) -> Result<Value> {
        if args.len() < 2 {
            return Err(SchemeError::runtime(format!(
                "{} requires at least 2 arguments",
                self.symbol()
            )));
        }

        for window in args.windows(2) {
            if !self.holds(compare(&window[0], &window[1])?) {
                return Ok(Value::Boolean(false));
            }
        }

        Ok(Value::Boolean(true))
    }
}
