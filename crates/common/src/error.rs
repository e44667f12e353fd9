use serde::{Deserialize, Serialize};

/// A classified parse failure. Every failure mode of the clause parser
/// maps to exactly one kind; the byte position into the input line is
/// attached where the parser knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub pos: Option<usize>,
}

impl ParseError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, pos: None }
    }

    pub fn at(kind: ErrorKind, pos: usize) -> Self {
        Self { kind, pos: Some(pos) }
    }
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.kind.fmt(f)?;
        if let Some(pos) = self.pos {
            write!(f, " at byte {pos}")?;
        }
        Ok(())
    }
}

/// The failure categories of the clause parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// End of input was reached before the terminating `;`.
    UnexpectedEnd,
    /// A `;` appeared in the middle of a field token.
    UnexpectedTerminator,
    /// A field token began with `.`.
    InvalidField,
    /// The field name is a reserved word.
    ForbiddenKeyword(String),
    /// The operator token is not in the allowed vocabulary.
    UnknownOperator(String),
    /// A quoted value was missing its closing quote.
    UnterminatedQuote,
    /// A numeric-looking value did not parse as a number.
    NotANumber(String),
    /// A value began with a character that is neither a quote nor
    /// numeric.
    UnexpectedCharacter(char),
    /// The separator token is not in the allowed vocabulary.
    UnknownSeparator(String),
    /// Input continued past the terminating `;`.
    TrailingInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorKind::UnexpectedEnd => write!(f, "expected terminating `;`, got end of input"),
            ErrorKind::UnexpectedTerminator => write!(f, "unexpected `;`"),
            ErrorKind::InvalidField => write!(f, "field cannot begin with `.`"),
            ErrorKind::ForbiddenKeyword(word) => write!(f, "forbidden keyword {word}"),
            ErrorKind::UnknownOperator(op) => write!(f, "unknown operator {op}"),
            ErrorKind::UnterminatedQuote => write!(f, "expected closing quote, got end of input"),
            ErrorKind::NotANumber(value) => write!(f, "value {value} is not a number"),
            ErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c}"),
            ErrorKind::UnknownSeparator(sep) => write!(f, "unknown separator {sep}"),
            ErrorKind::TrailingInput => write!(f, "unexpected input after terminating `;`"),
        }
    }
}
