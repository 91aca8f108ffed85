use serde::Serialize;
use std::fmt;

/// One datum exactly as read: structural, but not yet given any meaning.
///
/// The transformer turns a `Syntax` into an [`Expr`](crate::expr::Expr);
/// `quote` keeps it around and converts it into a value tree on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Syntax {
    Number(i64),

    /// `n/d` as written, never reduced.
    Rational { numerator: i64, denominator: i64 },

    String(String),

    Symbol(String),

    True,

    False,

    /// `( … )`, including the empty list `()`.
    List(Vec<Syntax>),
}

impl Syntax {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Syntax::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&[Syntax]> {
        match self {
            Syntax::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Prints the datum back in s‑expression form.
impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Syntax::Number(n) => write!(f, "{}", itoa::Buffer::new().format(*n)),

            Syntax::Rational {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),

            Syntax::String(s) => write!(f, "{:?}", s),

            Syntax::Symbol(s) => write!(f, "{}", s),

            Syntax::True => write!(f, "#t"),

            Syntax::False => write!(f, "#f"),

            Syntax::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
