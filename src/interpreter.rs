use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::environment::{Env, Environment};
use crate::error::{Result, SchemeError};
use crate::expr::{BinaryOp, Binding, Expr, UnaryOp, VariadicOp};
use crate::numeric;
use crate::primitives::primitive;
use crate::value::{Procedure, Value};

/// Tree‑walking evaluator.  `display` writes to `out`.
///
/// Evaluation is plain recursion on the host stack; no tail calls are
/// eliminated.
pub struct Interpreter<W: Write = io::Stdout> {
    out: W,
}

impl Interpreter<io::Stdout> {
    /// An interpreter whose `display` goes to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        info!("Initializing Interpreter");

        Self { out }
    }

    /// The output sink, for drivers that print results alongside `display`.
    pub fn output(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluates an expression against `env` and returns its value.
    pub fn evaluate(&mut self, expr: &Expr, env: &Env) -> Result<Value> {
        let value = match expr {
            Expr::Fixnum(n) => Value::Integer(*n),
            Expr::RationalNum(n, d) => Value::rational(*n, *d),
            Expr::StringLit(s) => Value::string(s),
            Expr::True => Value::Boolean(true),
            Expr::False => Value::Boolean(false),
            Expr::MakeVoid => Value::Void,
            Expr::Exit => Value::Terminate,

            Expr::Var(name) => self.evaluate_variable(name, env)?,

            Expr::Unary(op, operand) => {
                let operand = self.evaluate(operand, env)?;
                self.evaluate_unary(*op, operand)?
            }

            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.evaluate(lhs, env)?;
                let rhs = self.evaluate(rhs, env)?;
                evaluate_binary(*op, &lhs, &rhs)?
            }

            Expr::Variadic(op, operands) => {
                let args = self.evaluate_all(operands, env)?;
                evaluate_variadic(*op, args)?
            }

            Expr::Quote(datum) => Value::from(datum),

            Expr::Begin(body) => self.evaluate_sequence(body, env)?,

            Expr::And(operands) => {
                let mut result = Value::Boolean(true);
                for operand in operands {
                    result = self.evaluate(operand, env)?;
                    if !result.is_truthy() {
                        return Ok(Value::Boolean(false));
                    }
                }
                result
            }

            Expr::Or(operands) => {
                for operand in operands {
                    let result = self.evaluate(operand, env)?;
                    if result.is_truthy() {
                        return Ok(result);
                    }
                }
                Value::Boolean(false)
            }

            Expr::If(condition, consequent, alternative) => {
                if self.evaluate(condition, env)?.is_truthy() {
                    debug!("Condition is truthy; evaluating consequent");
                    self.evaluate(consequent, env)?
                } else {
                    debug!("Condition is falsy; evaluating alternative");
                    self.evaluate(alternative, env)?
                }
            }

            Expr::Cond(clauses) => self.evaluate_cond(clauses, env)?,

            Expr::Lambda(lambda) => Value::Procedure(Rc::new(Procedure {
                lambda: Rc::clone(lambda),
                env: Rc::clone(env),
            })),

            Expr::Apply(operator, operands) => self.evaluate_apply(operator, operands, env)?,

            Expr::Define(name, rhs) => {
                let value = self.evaluate(rhs, env)?;
                env.borrow_mut().define(name, value);
                info!("Defined '{}'", name);
                Value::Void
            }

            Expr::Let(bindings, body) => self.evaluate_let(bindings, body, env)?,

            Expr::Letrec(bindings, body) => self.evaluate_letrec(bindings, body, env)?,

            Expr::Set(name, rhs) => {
                let value = self.evaluate(rhs, env)?;
                if !env.borrow_mut().assign(name, value) {
                    return Err(SchemeError::runtime(format!(
                        "Undefined variable: {}",
                        name
                    )));
                }
                Value::Void
            }
        };

        Ok(value)
    }

    fn evaluate_all(&mut self, exprs: &[Expr], env: &Env) -> Result<Vec<Value>> {
        exprs.iter().map(|e| self.evaluate(e, env)).collect()
    }

    /// Last value, or void for an empty sequence.
    fn evaluate_sequence(&mut self, exprs: &[Expr], env: &Env) -> Result<Value> {
        let mut result = Value::Void;
        for expr in exprs {
            result = self.evaluate(expr, env)?;
        }
        Ok(result)
    }

    fn evaluate_variable(&self, name: &str, env: &Env) -> Result<Value> {
        debug!("Looking up variable '{}'", name);

        if let Some(value) = env.borrow().get(name) {
            return Ok(value);
        }

        if primitive(name).is_some() {
            return Err(SchemeError::runtime(format!(
                "Primitive {} used as variable without being called",
                name
            )));
        }

        Err(SchemeError::runtime(format!("Undefined variable: {}", name)))
    }

    fn evaluate_unary(&mut self, op: UnaryOp, operand: Value) -> Result<Value> {
        let result = match op {
            UnaryOp::Not => Value::Boolean(matches!(operand, Value::Boolean(false))),

            UnaryOp::Car => match operand {
                Value::Pair(pair) => pair.borrow().car.clone(),
                _ => return Err(SchemeError::runtime("car requires a pair")),
            },

            UnaryOp::Cdr => match operand {
                Value::Pair(pair) => pair.borrow().cdr.clone(),
                _ => return Err(SchemeError::runtime("cdr requires a pair")),
            },

            UnaryOp::IsBoolean => Value::Boolean(matches!(operand, Value::Boolean(_))),
            UnaryOp::IsNumber => Value::Boolean(matches!(operand, Value::Integer(_))),
            UnaryOp::IsNull => Value::Boolean(matches!(operand, Value::Null)),
            UnaryOp::IsPair => Value::Boolean(matches!(operand, Value::Pair(_))),
            UnaryOp::IsProcedure => Value::Boolean(matches!(operand, Value::Procedure(_))),
            UnaryOp::IsSymbol => Value::Boolean(matches!(operand, Value::Symbol(_))),
            UnaryOp::IsString => Value::Boolean(matches!(operand, Value::String(_))),
            UnaryOp::IsList => Value::Boolean(operand.is_list()),

            UnaryOp::Display => {
                match &operand {
                    Value::String(s) => write!(self.out, "{}", s)?,
                    other => write!(self.out, "{}", other)?,
                }
                Value::Void
            }
        };

        Ok(result)
    }

    fn evaluate_cond(&mut self, clauses: &[Vec<Expr>], env: &Env) -> Result<Value> {
        for clause in clauses {
            let Some((test, body)) = clause.split_first() else {
                continue;
            };

            let test_value = self.evaluate(test, env)?;
            if !test_value.is_truthy() {
                continue;
            }

            if body.is_empty() {
                return Ok(test_value);
            }

            return self.evaluate_sequence(body, env);
        }

        Ok(Value::Void)
    }

    fn evaluate_apply(&mut self, operator: &Expr, operands: &[Expr], env: &Env) -> Result<Value> {
        let Value::Procedure(procedure) = self.evaluate(operator, env)? else {
            return Err(SchemeError::runtime("Attempt to apply a non-procedure"));
        };

        let args = self.evaluate_all(operands, env)?;

        let params = procedure.params();
        if args.len() != params.len() {
            return Err(SchemeError::runtime(format!(
                "Wrong number of arguments: expected {} but got {}",
                params.len(),
                args.len()
            )));
        }

        // Extend the captured scope, not the caller's.
        let frame = Environment::child(&procedure.env);
        {
            let mut scope = frame.borrow_mut();
            for (param, arg) in params.iter().zip(args) {
                scope.define(param, arg);
            }
        }

        debug!("Applying procedure with {} argument(s)", params.len());
        self.evaluate(&procedure.lambda.body, &frame)
    }

    fn evaluate_let(&mut self, bindings: &[Binding], body: &Expr, env: &Env) -> Result<Value> {
        let mut values = Vec::with_capacity(bindings.len());
        for (name, init) in bindings {
            values.push((name, self.evaluate(init, env)?));
        }

        let scope = Environment::child(env);
        {
            let mut scope = scope.borrow_mut();
            for (name, value) in values {
                scope.define(name, value);
            }
        }

        self.evaluate(body, &scope)
    }

    /// Names are bound to `Null` first, then each initializer runs inside the
    /// new scope and its binding is overwritten straight away.
    fn evaluate_letrec(&mut self, bindings: &[Binding], body: &Expr, env: &Env) -> Result<Value> {
        let scope = Environment::child(env);
        {
            let mut placeholders = scope.borrow_mut();
            for (name, _) in bindings {
                placeholders.define(name, Value::Null);
            }
        }

        for (name, init) in bindings {
            let value = self.evaluate(init, &scope)?;
            scope.borrow_mut().assign(name, value);
        }

        self.evaluate(body, &scope)
    }
}

fn evaluate_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add => numeric::add(lhs, rhs),
        BinaryOp::Sub => numeric::subtract(lhs, rhs),
        BinaryOp::Mul => numeric::multiply(lhs, rhs),
        BinaryOp::Div => numeric::divide(lhs, rhs),
        BinaryOp::Modulo => numeric::modulo(lhs, rhs),
        BinaryOp::Expt => numeric::expt(lhs, rhs),
        BinaryOp::Compare(comparison) => comparison.apply(lhs, rhs),

        BinaryOp::Cons => Ok(Value::cons(lhs.clone(), rhs.clone())),

        BinaryOp::SetCar => match lhs {
            Value::Pair(pair) => {
                pair.borrow_mut().car = rhs.clone();
                Ok(Value::Void)
            }
            _ => Err(SchemeError::runtime("set-car! requires a pair")),
        },

        BinaryOp::SetCdr => match lhs {
            Value::Pair(pair) => {
                pair.borrow_mut().cdr = rhs.clone();
                Ok(Value::Void)
            }
            _ => Err(SchemeError::runtime("set-cdr! requires a pair")),
        },

        BinaryOp::IsEq => Ok(Value::Boolean(is_eq(lhs, rhs))),
    }
}

fn evaluate_variadic(op: VariadicOp, args: Vec<Value>) -> Result<Value> {
    match op {
        VariadicOp::Add => numeric::sum(&args),
        VariadicOp::Sub => numeric::difference(&args),
        VariadicOp::Mul => numeric::product(&args),
        VariadicOp::Div => numeric::quotient(&args),
        VariadicOp::Compare(comparison) => comparison.chain(&args),
        VariadicOp::List => Ok(Value::list(args)),
    }
}

/// Integers, booleans and symbols compare by content; null and void are
/// singletons; everything else compares by identity.
fn is_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Symbol(a), Value::Symbol(b)) => a == b,
        (Value::Null, Value::Null) | (Value::Void, Value::Void) => true,
        (Value::Rational(a), Value::Rational(b)) => Rc::ptr_eq(a, b),
        (Value::String(a), Value::String(b)) => Rc::ptr_eq(a, b),
        (Value::Pair(a), Value::Pair(b)) => Rc::ptr_eq(a, b),
        (Value::Procedure(a), Value::Procedure(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
