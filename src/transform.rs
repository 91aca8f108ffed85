//! Syntax‑to‑expression transformation.
//!
//! Dispatch for a list `(op arg …)` whose head is a symbol, in priority order:
//!
//! 1. `op` is bound in the current environment → application of that variable
//!    (a local binding shadows primitives and keywords alike);
//! 2. `op` names a primitive → fixed‑arity node when the operand count is the
//!    primitive's natural arity, variadic node otherwise, arity error for
//!    primitives that have no variadic form;
//! 3. `op` is a reserved word → shape‑checked special form;
//! 4. otherwise → application of a not‑yet‑bound variable.
//!
//! The transformer keeps no scopes of its own: bodies of `lambda`, `let` and
//! `letrec` are transformed against the *outer* environment.

use std::rc::Rc;

use log::debug;

use crate::environment::Env;
use crate::error::{Result, SchemeError};
use crate::expr::{BinaryOp, Binding, Expr, Lambda, UnaryOp, VariadicOp};
use crate::primitives::{primitive, reserved_word, Primitive, ReservedWord};
use crate::syntax::Syntax;

/// Turn one datum into an expression tree, given the environment it will be
/// evaluated in.
pub fn transform(syntax: &Syntax, env: &Env) -> Result<Expr> {
    Transformer::new(env).transform(syntax)
}

/// Borrowed view of the environment used for the "is `op` bound?" check.
pub struct Transformer<'e> {
    env: &'e Env,
}

impl<'e> Transformer<'e> {
    pub fn new(env: &'e Env) -> Self {
        Self { env }
    }

    pub fn transform(&self, syntax: &Syntax) -> Result<Expr> {
        match syntax {
            Syntax::Number(n) => Ok(Expr::Fixnum(*n)),

            Syntax::Rational {
                numerator,
                denominator,
            } => Ok(Expr::RationalNum(*numerator, *denominator)),

            Syntax::String(s) => Ok(Expr::StringLit(s.clone())),

            Syntax::Symbol(s) => Ok(Expr::Var(s.clone())),

            Syntax::True => Ok(Expr::True),

            Syntax::False => Ok(Expr::False),

            Syntax::List(items) => self.transform_list(items),
        }
    }

    fn transform_all(&self, items: &[Syntax]) -> Result<Vec<Expr>> {
        items.iter().map(|s| self.transform(s)).collect()
    }

    fn transform_list(&self, items: &[Syntax]) -> Result<Expr> {
        let Some((head, operands)) = items.split_first() else {
            return Ok(Expr::Quote(Syntax::List(Vec::new())));
        };

        let Some(op) = head.symbol() else {
            debug!("Non-symbol operator, building application");
            return Ok(Expr::Apply(
                Box::new(self.transform(head)?),
                self.transform_all(operands)?,
            ));
        };

        if self.env.borrow().contains(op) {
            debug!("'{}' is bound, building application", op);
            return self.application(op, operands);
        }

        if let Some(prim) = primitive(op) {
            debug!("'{}' is primitive {:?}", op, prim);
            return self.primitive_form(op, prim, self.transform_all(operands)?);
        }

        if let Some(word) = reserved_word(op) {
            debug!("'{}' is reserved word {:?}", op, word);
            return self.special_form(op, word, items);
        }

        debug!("'{}' is unbound, building application", op);
        self.application(op, operands)
    }

    fn application(&self, op: &str, operands: &[Syntax]) -> Result<Expr> {
        Ok(Expr::Apply(
            Box::new(Expr::Var(op.to_owned())),
            self.transform_all(operands)?,
        ))
    }

    // ───────────────────────────── primitives ─────────────────────────────

    fn primitive_form(&self, name: &str, prim: Primitive, mut args: Vec<Expr>) -> Result<Expr> {
        // Arithmetic and comparison: binary node for two operands, variadic otherwise.
        let arithmetic = match prim {
            Primitive::Add => Some((BinaryOp::Add, VariadicOp::Add)),
            Primitive::Sub => Some((BinaryOp::Sub, VariadicOp::Sub)),
            Primitive::Mul => Some((BinaryOp::Mul, VariadicOp::Mul)),
            Primitive::Div => Some((BinaryOp::Div, VariadicOp::Div)),
            Primitive::Compare(c) => Some((BinaryOp::Compare(c), VariadicOp::Compare(c))),
            _ => None,
        };

        if let Some((binary, variadic)) = arithmetic {
            return if args.len() == 2 {
                binary_node(name, binary, args)
            } else {
                Ok(Expr::Variadic(variadic, args))
            };
        }

        let binary = match prim {
            Primitive::Modulo => Some(BinaryOp::Modulo),
            Primitive::Expt => Some(BinaryOp::Expt),
            Primitive::IsEq => Some(BinaryOp::IsEq),
            Primitive::Cons => Some(BinaryOp::Cons),
            Primitive::SetCar => Some(BinaryOp::SetCar),
            Primitive::SetCdr => Some(BinaryOp::SetCdr),
            _ => None,
        };

        if let Some(op) = binary {
            return binary_node(name, op, args);
        }

        let unary = match prim {
            Primitive::Not => Some(UnaryOp::Not),
            Primitive::IsBoolean => Some(UnaryOp::IsBoolean),
            Primitive::IsNumber => Some(UnaryOp::IsNumber),
            Primitive::IsNull => Some(UnaryOp::IsNull),
            Primitive::IsPair => Some(UnaryOp::IsPair),
            Primitive::IsProcedure => Some(UnaryOp::IsProcedure),
            Primitive::IsSymbol => Some(UnaryOp::IsSymbol),
            Primitive::IsString => Some(UnaryOp::IsString),
            Primitive::IsList => Some(UnaryOp::IsList),
            Primitive::Car => Some(UnaryOp::Car),
            Primitive::Cdr => Some(UnaryOp::Cdr),
            Primitive::Display => Some(UnaryOp::Display),
            _ => None,
        };

        if let Some(op) = unary {
            expect_arity(name, &args, 1)?;
            let operand = args.pop().ok_or_else(|| arity_error(name))?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }

        match prim {
            Primitive::List => Ok(Expr::Variadic(VariadicOp::List, args)),
            Primitive::And => Ok(Expr::And(args)),
            Primitive::Or => Ok(Expr::Or(args)),
            Primitive::Void => {
                expect_arity(name, &args, 0)?;
                Ok(Expr::MakeVoid)
            }
            Primitive::Exit => {
                expect_arity(name, &args, 0)?;
                Ok(Expr::Exit)
            }
            _ => Err(SchemeError::runtime(format!("Unknown primitive: {}", name))),
        }
    }

    // ───────────────────────────── special forms ─────────────────────────────

    /// `items` is the whole form, keyword included.
    fn special_form(&self, name: &str, word: ReservedWord, items: &[Syntax]) -> Result<Expr> {
        match word {
            ReservedWord::Quote => {
                expect_len(name, items, 2)?;
                Ok(Expr::Quote(items[1].clone()))
            }

            ReservedWord::Begin => Ok(Expr::Begin(self.transform_all(&items[1..])?)),

            ReservedWord::If => {
                expect_len(name, items, 4)?;
                Ok(Expr::If(
                    Box::new(self.transform(&items[1])?),
                    Box::new(self.transform(&items[2])?),
                    Box::new(self.transform(&items[3])?),
                ))
            }

            ReservedWord::Cond => {
                let clauses = items[1..]
                    .iter()
                    .map(|clause| {
                        let parts = clause
                            .list()
                            .ok_or_else(|| SchemeError::runtime("Cond clause must be a list"))?;
                        self.transform_all(parts)
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Expr::Cond(clauses))
            }

            ReservedWord::Lambda => {
                expect_len(name, items, 3)?;
                let list = items[1]
                    .list()
                    .ok_or_else(|| SchemeError::runtime("Lambda parameters must be a list"))?;
                let params = symbols(list, "Lambda parameters must be symbols")?;

                Ok(Expr::Lambda(Rc::new(Lambda {
                    params,
                    body: self.transform(&items[2])?,
                })))
            }

            ReservedWord::Define => {
                expect_len(name, items, 3)?;
                self.define(&items[1], &items[2])
            }

            ReservedWord::Let => {
                expect_len(name, items, 3)?;
                let bindings = self.bindings(&items[1], "Let bindings must be a list")?;
                Ok(Expr::Let(bindings, Box::new(self.transform(&items[2])?)))
            }

            ReservedWord::Letrec => {
                expect_len(name, items, 3)?;
                let bindings = self.bindings(&items[1], "Letrec bindings must be a list")?;
                Ok(Expr::Letrec(bindings, Box::new(self.transform(&items[2])?)))
            }

            ReservedWord::Set => {
                expect_len(name, items, 3)?;
                let var = items[1]
                    .symbol()
                    .ok_or_else(|| SchemeError::runtime("Set! variable must be a symbol"))?;
                Ok(Expr::Set(
                    var.to_owned(),
                    Box::new(self.transform(&items[2])?),
                ))
            }
        }
    }

    /// `(define name expr)` or `(define (name param …) body)`.
    fn define(&self, target: &Syntax, body: &Syntax) -> Result<Expr> {
        if let Some(var) = target.symbol() {
            return Ok(Expr::Define(var.to_owned(), Box::new(self.transform(body)?)));
        }

        let Some((head, params)) = target.list().and_then(|l| l.split_first()) else {
            return Err(SchemeError::runtime("Invalid define syntax"));
        };

        let func = head
            .symbol()
            .ok_or_else(|| SchemeError::runtime("Function name must be a symbol"))?;

        let lambda = Lambda {
            params: symbols(params, "Parameters must be symbols")?,
            body: self.transform(body)?,
        };

        Ok(Expr::Define(
            func.to_owned(),
            Box::new(Expr::Lambda(Rc::new(lambda))),
        ))
    }

    /// `((name init) …)`
    fn bindings(&self, syntax: &Syntax, not_a_list: &str) -> Result<Vec<Binding>> {
        let list = syntax
            .list()
            .ok_or_else(|| SchemeError::runtime(not_a_list))?;

        list.iter()
            .map(|binding| match binding.list() {
                Some([var, init]) => {
                    let var = var
                        .symbol()
                        .ok_or_else(|| SchemeError::runtime("Binding variable must be a symbol"))?;
                    Ok((var.to_owned(), self.transform(init)?))
                }
                _ => Err(SchemeError::runtime(
                    "Each binding must be a list of 2 elements",
                )),
            })
            .collect()
    }
}

fn arity_error(name: &str) -> SchemeError {
    SchemeError::runtime(format!("Wrong number of arguments for {}", name))
}

fn expect_arity(name: &str, args: &[Expr], n: usize) -> Result<()> {
    if args.len() != n {
        return Err(arity_error(name));
    }
    Ok(())
}

fn expect_len(name: &str, items: &[Syntax], n: usize) -> Result<()> {
    if items.len() != n {
        return Err(arity_error(name));
    }
    Ok(())
}

fn binary_node(name: &str, op: BinaryOp, args: Vec<Expr>) -> Result<Expr> {
    expect_arity(name, &args, 2)?;
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(lhs), Some(rhs)) => Ok(Expr::Binary(op, Box::new(lhs), Box::new(rhs))),
        _ => Err(arity_error(name)),
    }
}

fn symbols(items: &[Syntax], message: &str) -> Result<Vec<String>> {
    items
        .iter()
        .map(|s| {
            s.symbol()
                .map(str::to_owned)
                .ok_or_else(|| SchemeError::runtime(message))
        })
        .collect()
}
