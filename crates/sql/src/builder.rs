//! Builds SELECT query strings from a rendered WHERE condition. This is
//! the downstream consumer of the parser: it takes the condition string
//! produced by a clause sequence and assembles the final SQL text.

use itertools::Itertools as _;

use whereq_common::{errinput, Result};

use crate::parser::Value;

/// A SELECT query builder. Collects the projected columns, the source
/// table, and an optional pre-rendered WHERE condition, and renders
/// them into SQL text plus a list of bound parameters (always empty
/// here, since the condition embeds its literals).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectBuilder {
    columns: Vec<String>,
    from: Option<String>,
    r#where: Option<String>,
}

impl SelectBuilder {
    /// Creates a builder projecting the given columns.
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Creates a builder projecting all columns, i.e. `SELECT *`.
    pub fn all() -> Self {
        Self::new(["*"])
    }

    /// Sets the table to select from.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(table.into());
        self
    }

    /// Sets the WHERE condition, as pre-rendered text.
    pub fn r#where(mut self, condition: impl Into<String>) -> Self {
        self.r#where = Some(condition.into());
        self
    }

    /// Renders the query as SQL text and bound parameters.
    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        if self.columns.is_empty() {
            return errinput!("select must have at least one column");
        }
        let Some(from) = &self.from else {
            return errinput!("select must have a from table");
        };
        let mut sql = format!("SELECT {} FROM {from}", self.columns.iter().join(", "));
        if let Some(condition) = &self.r#where {
            sql = format!("{sql} WHERE {condition}");
        }
        Ok((sql, Vec::new()))
    }
}
