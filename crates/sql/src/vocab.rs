//! The closed token vocabularies the parser validates against. These
//! are read-only configuration: constructed once, then shared freely
//! across parses without synchronization.

use std::collections::HashSet;

use serde::Deserialize;

use crate::parser::{Operator, Separator};

/// Field names disallowed because they collide with reserved syntax.
/// Matched case-sensitively.
const FORBIDDEN: [&str; 10] = [
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "DROP", "TABLE", "AND", "OR",
];

/// The token vocabularies used to validate field, operator, and
/// separator tokens. The defaults cover the full operator and separator
/// sets and the reserved keywords above; a configuration file may
/// override any of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Field names to reject.
    pub forbidden: HashSet<String>,
    /// Allowed operator tokens.
    pub operators: HashSet<String>,
    /// Allowed separator tokens.
    pub separators: HashSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            forbidden: FORBIDDEN.into_iter().map(String::from).collect(),
            operators: Operator::ALL.into_iter().map(|op| op.to_string()).collect(),
            separators: Separator::ALL.into_iter().map(|sep| sep.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_tokens() {
        let vocab = Vocabulary::default();
        for operator in Operator::ALL {
            assert!(vocab.operators.contains(operator.as_str()));
        }
        for separator in Separator::ALL {
            assert!(vocab.separators.contains(separator.as_str()));
        }
        assert!(vocab.forbidden.contains("SELECT"));
        assert!(!vocab.forbidden.contains("select"));
    }
}
