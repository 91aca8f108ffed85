//! Names the transformer recognises without consulting the environment.

use phf::phf_map;

use crate::numeric::Comparison;

/// Built‑in operators, recognised by name at transformation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Add,
    Sub,
    Mul,
    Div,
    Modulo,
    Expt,
    Compare(Comparison),
    And,
    Or,
    Not,
    IsEq,
    IsBoolean,
    IsNumber,
    IsNull,
    IsPair,
    IsProcedure,
    IsSymbol,
    IsString,
    IsList,
    Cons,
    Car,
    Cdr,
    SetCar,
    SetCdr,
    List,
    Display,
    Void,
    Exit,
}

/// Keywords with their own, non‑call syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedWord {
    Quote,
    Begin,
    If,
    Cond,
    Lambda,
    Define,
    Let,
    Letrec,
    Set,
}

pub static PRIMITIVES: phf::Map<&'static str, Primitive> = phf_map! {
    "+"          => Primitive::Add,
    "-"          => Primitive::Sub,
    "*"          => Primitive::Mul,
    "/"          => Primitive::Div,
    "modulo"     => Primitive::Modulo,
    "expt"       => Primitive::Expt,
    "<"          => Primitive::Compare(Comparison::Less),
    "<="         => Primitive::Compare(Comparison::LessEq),
    "="          => Primitive::Compare(Comparison::Equal),
    ">="         => Primitive::Compare(Comparison::GreaterEq),
    ">"          => Primitive::Compare(Comparison::Greater),
    "and"        => Primitive::And,
    "or"         => Primitive::Or,
    "not"        => Primitive::Not,
    "eq?"        => Primitive::IsEq,
    "boolean?"   => Primitive::IsBoolean,
    "number?"    => Primitive::IsNumber,
    "null?"      => Primitive::IsNull,
    "pair?"      => Primitive::IsPair,
    "procedure?" => Primitive::IsProcedure,
    "symbol?"    => Primitive::IsSymbol,
    "string?"    => Primitive::IsString,
    "list?"      => Primitive::IsList,
    "cons"       => Primitive::Cons,
    "car"        => Primitive::Car,
    "cdr"        => Primitive::Cdr,
    "set-car!"   => Primitive::SetCar,
    "set-cdr!"   => Primitive::SetCdr,
    "list"       => Primitive::List,
    "display"    => Primitive::Display,
    "void"       => Primitive::Void,
    "exit"       => Primitive::Exit,
};

pub static RESERVED_WORDS: phf::Map<&'static str, ReservedWord> = phf_map! {
    "quote"  => ReservedWord::Quote,
    "begin"  => ReservedWord::Begin,
    "if"     => ReservedWord::If,
    "cond"   => ReservedWord::Cond,
    "lambda" => ReservedWord::Lambda,
    "define" => ReservedWord::Define,
    "let"    => ReservedWord::Let,
    "letrec" => ReservedWord::Letrec,
    "set!"   => ReservedWord::Set,
};

#[inline]
pub fn primitive(name: &str) -> Option<Primitive> {
    PRIMITIVES.get(name).copied()
}

#[inline]
pub fn reserved_word(name: &str) -> Option<ReservedWord> {
    RESERVED_WORDS.get(name).copied()
}
