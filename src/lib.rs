pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod numeric;
pub mod primitives;
pub mod reader;
pub mod repl;
pub mod scanner;
pub mod syntax;
pub mod token;
pub mod transform;
pub mod value;
