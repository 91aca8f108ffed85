use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::environment::Env;
use crate::expr::Lambda;
use crate::syntax::Syntax;

/// Run‑time data.  Everything is immutable except the two slots of a
/// [`Pair`], which are shared by every holder of the `Rc`.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),

    /// Numerator and denominator exactly as produced; never reduced and the
    /// denominator's sign is never normalised.  Shared so that `eq?` sees
    /// the same rational through every binding that holds it.
    Rational(Rc<(i64, i64)>),

    Boolean(bool),

    /// Reference counted so that `eq?` can observe identity.
    String(Rc<str>),

    Symbol(String),

    Pair(Rc<RefCell<Pair>>),

    Null,

    Void,

    Procedure(Rc<Procedure>),

    /// Tells the driver to stop; produced only by `(exit)`.
    Terminate,
}

#[derive(Debug, Clone)]
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

/// A closure: the `lambda` it came from plus the scope it was evaluated in.
pub struct Procedure {
    pub lambda: Rc<Lambda>,
    pub env: Env,
}

impl Procedure {
    pub fn params(&self) -> &[String] {
        &self.lambda.params
    }
}

// The captured scope usually (indirectly) contains the procedure itself.
impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("params", &self.lambda.params)
            .finish_non_exhaustive()
    }
}

impl Value {
    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Pair(Rc::new(RefCell::new(Pair { car, cdr })))
    }

    pub fn rational(numerator: i64, denominator: i64) -> Self {
        Value::Rational(Rc::new((numerator, denominator)))
    }

    pub fn string(s: &str) -> Self {
        Value::String(Rc::from(s))
    }

    /// Right‑nested pairs ending in `Null`, built right to left.
    pub fn list(items: Vec<Value>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Value::Null, |tail, item| Value::cons(item, tail))
    }

    /// Only an explicit `#f` is false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    /// `true` iff following `cdr`s ends in `Null`.
    pub fn is_list(&self) -> bool {
        let mut current = self.clone();

        loop {
            let next = match &current {
                Value::Null => return true,
                Value::Pair(pair) => pair.borrow().cdr.clone(),
                _ => return false,
            };

            current = next;
        }
    }
}

/// `quote`: deep conversion of a datum, nothing is evaluated.
impl From<&Syntax> for Value {
    fn from(syntax: &Syntax) -> Self {
        match syntax {
            Syntax::Number(n) => Value::Integer(*n),
            Syntax::Rational {
                numerator,
                denominator,
            } => Value::rational(*numerator, *denominator),
            Syntax::String(s) => Value::string(s),
            Syntax::Symbol(s) => Value::Symbol(s.clone()),
            Syntax::True => Value::Boolean(true),
            Syntax::False => Value::Boolean(false),
            Syntax::List(items) => Value::list(items.iter().map(Value::from).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => f.write_str(itoa::Buffer::new().format(*n)),

            Value::Rational(ratio) => {
                let (n, d) = **ratio;
                let mut dbuf = itoa::Buffer::new();
                write!(f, "{}/{}", itoa::Buffer::new().format(n), dbuf.format(d))
            }

            Value::Boolean(true) => write!(f, "#t"),

            Value::Boolean(false) => write!(f, "#f"),

            Value::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }

            Value::Symbol(s) => write!(f, "{}", s),

            Value::Pair(pair) => {
                write!(f, "(")?;
                let mut current = Rc::clone(pair);
                loop {
                    let (car, cdr) = {
                        let cell = current.borrow();
                        (cell.car.clone(), cell.cdr.clone())
                    };

                    write!(f, "{}", car)?;

                    match cdr {
                        Value::Pair(next) => {
                            write!(f, " ")?;
                            current = next;
                        }
                        Value::Null => break,
                        tail => {
                            write!(f, " . {}", tail)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }

            Value::Null => write!(f, "()"),

            Value::Void => write!(f, "#<void>"),

            Value::Procedure(_) => write!(f, "#<procedure>"),

            Value::Terminate => write!(f, "#<terminate>"),
        }
    }
}
