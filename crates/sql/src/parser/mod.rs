//! Parses raw WHERE-predicate strings into a structured clause sequence.

pub mod ast;
mod parser;

pub use ast::{Clause, ClauseSequence, Operator, Separator, Value};
pub use parser::{parse, Parser};
