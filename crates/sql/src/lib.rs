pub mod builder;
pub mod parser;
pub mod vocab;

pub use builder::SelectBuilder;
pub use parser::{parse, Clause, ClauseSequence, Operator, Separator, Value};
pub use vocab::Vocabulary;
