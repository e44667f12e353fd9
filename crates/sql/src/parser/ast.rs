use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

/// A single comparison unit of a predicate: `field operator value`. It
/// is built from a raw predicate string by the parser, and passed on to
/// the builder which renders it into a WHERE condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// The column being compared, optionally qualified as table.column.
    pub field: String,
    /// The comparison operator.
    pub operator: Operator,
    /// The literal the column is compared against.
    pub value: Value,
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// A comparison operator. The allowed vocabulary is a closed list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Like,
}

impl Operator {
    /// All operators, in vocabulary order.
    pub const ALL: [Operator; 7] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessThan,
        Operator::GreaterThan,
        Operator::LessThanOrEqual,
        Operator::GreaterThanOrEqual,
        Operator::Like,
    ];

    /// The operator's source token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Like => "LIKE",
        }
    }
}

impl TryFrom<&str> for Operator {
    // Use a cheap static string, since this just indicates it's not an
    // operator.
    type Error = &'static str;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            "=" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::LessThan,
            ">" => Self::GreaterThan,
            "<=" => Self::LessThanOrEqual,
            ">=" => Self::GreaterThanOrEqual,
            "LIKE" => Self::Like,
            _ => return Err("not an operator"),
        })
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical connective joining one clause to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Separator {
    And,
    Or,
}

impl Separator {
    /// All separators, in vocabulary order.
    pub const ALL: [Separator; 2] = [Separator::And, Separator::Or];

    /// The separator's source token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::And => "AND",
            Separator::Or => "OR",
        }
    }
}

impl TryFrom<&str> for Separator {
    type Error = &'static str;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            "AND" => Self::And,
            "OR" => Self::Or,
            _ => return Err("not a separator"),
        })
    }
}

impl std::fmt::Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal value: either the raw content of a quoted string, or a
/// number parsed as a 64-bit float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A quoted string literal, with quotes stripped and no escape
    /// handling.
    String(String),
    /// A numeric literal. Rendered in fixed six-decimal notation, e.g.
    /// 18.000000.
    Number(f64),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n:.6}"),
        }
    }
}

/// An ordered sequence of clauses, each paired with the separator that
/// joins it to the next clause. The last clause never has a separator,
/// and every other clause always does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClauseSequence {
    clauses: Vec<(Clause, Option<Separator>)>,
}

impl ClauseSequence {
    /// Appends a clause and its trailing separator, if any.
    pub(crate) fn push(&mut self, clause: Clause, separator: Option<Separator>) {
        self.clauses.push((clause, separator));
    }

    /// The clauses in source order.
    pub fn clauses(&self) -> &[(Clause, Option<Separator>)] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Renders the sequence as a WHERE condition string, terminated by
    /// `;`: `field1 op1 value1 sep1 ... fieldN opN valueN;`.
    pub fn condition(&self) -> String {
        self.clauses
            .iter()
            .map(|(clause, separator)| match separator {
                Some(separator) => format!("{clause} {separator}"),
                None => format!("{clause};"),
            })
            .join(" ")
    }
}

impl std::fmt::Display for ClauseSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.condition())
    }
}
