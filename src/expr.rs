use std::rc::Rc;

use crate::numeric::Comparison;
use crate::syntax::Syntax;

/// Primitives taking exactly one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Car,
    Cdr,
    IsBoolean,
    IsNumber,
    IsNull,
    IsPair,
    IsProcedure,
    IsSymbol,
    IsString,
    IsList,
    Display,
}

/// Primitives in their two‑operand form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Modulo,
    Expt,
    Compare(Comparison),
    Cons,
    SetCar,
    SetCdr,
    IsEq,
}

/// Primitives applied to any other number of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariadicOp {
    Add,
    Sub,
    Mul,
    Div,
    Compare(Comparison),
    List,
}

/// Parameter names and body of a `lambda`, shared by every closure made from it.
#[derive(Debug)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Expr,
}

/// A `let`/`letrec` binding: name and initializer.
pub type Binding = (String, Expr);

/// Evaluator‑ready form of one datum.  Built once by the transformer and
/// evaluated any number of times.
#[derive(Debug, Clone)]
pub enum Expr {
    // Self‑evaluating literals
    Fixnum(i64),
    RationalNum(i64, i64),
    StringLit(String),
    True,
    False,

    // (void) / (exit)
    MakeVoid,
    Exit,

    // Variable reference
    Var(String),

    // Primitive applications, arity fixed by the transformer
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Variadic(VariadicOp, Vec<Expr>),

    // Special forms
    Quote(Syntax),
    Begin(Vec<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Cond(Vec<Vec<Expr>>), // each clause: test followed by body
    Lambda(Rc<Lambda>),
    Define(String, Box<Expr>),
    Let(Vec<Binding>, Box<Expr>),
    Letrec(Vec<Binding>, Box<Expr>),
    Set(String, Box<Expr>),

    // Procedure application: operator, operands
    Apply(Box<Expr>, Vec<Expr>),
}
