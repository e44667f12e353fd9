use whereq_common::{ErrorKind, ParseError, Result};

use crate::parser::ast::{Clause, ClauseSequence, Operator, Separator, Value};
use crate::vocab::Vocabulary;

/// Parses a raw predicate line into a clause sequence, validating each
/// token against the given vocabularies.
pub fn parse(input: &str, vocab: &Vocabulary) -> Result<ClauseSequence> {
    Parser::new(input, vocab).parse()
}

/// The parser processes a raw predicate string of the form
/// `field operator value [separator field operator value ...];` into an
/// ordered clause sequence. It walks the input byte by byte in four
/// alternating phases (field, operator, value, separator), validating
/// each token against closed vocabularies as it goes.
///
/// The cursor only ever moves forward, and tokens are captured as index
/// ranges into the input rather than accumulated character by
/// character. Any phase failure aborts the whole parse; no partial
/// sequence is ever returned.
///
/// The field phase does not skip leading spaces, while the operator,
/// value, and separator phases tolerate any number of them. A field
/// token therefore must immediately follow the previous delimiter.
pub struct Parser<'a> {
    input: &'a str,
    vocab: &'a Vocabulary,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input line.
    pub fn new(input: &'a str, vocab: &'a Vocabulary) -> Parser<'a> {
        Parser { input, vocab, pos: 0 }
    }

    /// Parses the input to completion. The sequence terminates at a `;`
    /// found where a separator was expected, and the `;` must be the
    /// last character of the input.
    pub fn parse(mut self) -> Result<ClauseSequence> {
        let mut sequence = ClauseSequence::default();
        loop {
            let field = self.parse_field()?;
            let operator = self.parse_operator()?;
            let value = self.parse_value()?;
            let clause = Clause { field: field.to_string(), operator, value };
            match self.parse_separator()? {
                Some(separator) => sequence.push(clause, Some(separator)),
                None => {
                    sequence.push(clause, None);
                    break;
                }
            }
        }
        // The cursor now sits on the terminating `;`, which must be the
        // final character.
        if self.pos + 1 < self.input.len() {
            return ParseError::at(ErrorKind::TrailingInput, self.pos + 1).into();
        }
        Ok(sequence)
    }

    /// Scans a field name, up to a delimiting space (consumed). The
    /// token must be non-empty, can't begin with `.` (but may contain
    /// one, for qualified names like table.column), and can't be a
    /// forbidden keyword.
    fn parse_field(&mut self) -> Result<&'a str> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => return ParseError::new(ErrorKind::UnexpectedEnd).into(),
                Some(b';') => {
                    return ParseError::at(ErrorKind::UnexpectedTerminator, self.pos).into()
                }
                Some(b'.') if self.pos == start => {
                    return ParseError::at(ErrorKind::InvalidField, self.pos).into()
                }
                Some(b' ') if self.pos > start => break,
                Some(_) => self.pos += 1,
            }
        }
        let field = &self.input[start..self.pos];
        self.pos += 1; // the delimiting space

        // Case-sensitive exact match against the forbidden set.
        if self.vocab.forbidden.contains(field) {
            return ParseError::at(ErrorKind::ForbiddenKeyword(field.to_string()), start).into();
        }
        Ok(field)
    }

    /// Scans an operator token, skipping leading spaces and ending at a
    /// delimiting space (consumed). The token must exactly match the
    /// allowed operator vocabulary.
    fn parse_operator(&mut self) -> Result<Operator> {
        self.skip_spaces();
        let start = self.pos;
        loop {
            match self.peek() {
                None => return ParseError::new(ErrorKind::UnexpectedEnd).into(),
                Some(b' ') => break,
                Some(_) => self.pos += 1,
            }
        }
        let token = &self.input[start..self.pos];
        self.pos += 1; // the delimiting space

        if self.vocab.operators.contains(token) {
            if let Ok(operator) = Operator::try_from(token) {
                return Ok(operator);
            }
        }
        ParseError::at(ErrorKind::UnknownOperator(token.to_string()), start).into()
    }

    /// Scans a literal value, skipping leading spaces. The first
    /// character dispatches on the value form: a quote begins a string
    /// literal, a digit, `-`, or `.` begins a number, and anything else
    /// is an error.
    fn parse_value(&mut self) -> Result<Value> {
        self.skip_spaces();
        match self.peek() {
            None => ParseError::new(ErrorKind::UnexpectedEnd).into(),
            Some(quote @ (b'\'' | b'"')) => self.parse_string(quote),
            Some(b'0'..=b'9' | b'-' | b'.') => self.parse_number(),
            Some(_) => match self.input[self.pos..].chars().next() {
                Some(c) => ParseError::at(ErrorKind::UnexpectedCharacter(c), self.pos).into(),
                None => ParseError::new(ErrorKind::UnexpectedEnd).into(),
            },
        }
    }

    /// Scans a quoted string literal up to the matching quote
    /// (consumed). The raw bytes between the quotes become the value;
    /// there is no escape handling.
    fn parse_string(&mut self, quote: u8) -> Result<Value> {
        let opening = self.pos;
        self.pos += 1;
        let start = self.pos;
        loop {
            match self.peek() {
                None => return ParseError::at(ErrorKind::UnterminatedQuote, opening).into(),
                Some(c) if c == quote => break,
                Some(_) => self.pos += 1,
            }
        }
        let value = &self.input[start..self.pos];
        self.pos += 1; // the closing quote
        Ok(Value::String(value.to_string()))
    }

    /// Scans a numeric literal up to a space or `;` delimiter (not
    /// consumed), and parses it as a 64-bit float.
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => return ParseError::new(ErrorKind::UnexpectedEnd).into(),
                Some(b' ' | b';') => break,
                Some(_) => self.pos += 1,
            }
        }
        let token = &self.input[start..self.pos];
        match token.parse::<f64>() {
            Ok(number) => Ok(Value::Number(number)),
            Err(_) => ParseError::at(ErrorKind::NotANumber(token.to_string()), start).into(),
        }
    }

    /// Scans a separator token, or detects the end of the sequence. A
    /// `;` at the cursor terminates the sequence without consuming it;
    /// otherwise leading spaces are skipped and the token (ending at a
    /// consumed delimiting space) must match the allowed separator
    /// vocabulary.
    fn parse_separator(&mut self) -> Result<Option<Separator>> {
        match self.peek() {
            None => return ParseError::new(ErrorKind::UnexpectedEnd).into(),
            Some(b';') => return Ok(None),
            Some(_) => {}
        }
        self.skip_spaces();
        let start = self.pos;
        loop {
            match self.peek() {
                None => return ParseError::new(ErrorKind::UnexpectedEnd).into(),
                Some(b' ') => break,
                Some(_) => self.pos += 1,
            }
        }
        let token = &self.input[start..self.pos];
        self.pos += 1; // the delimiting space

        if self.vocab.separators.contains(token) {
            if let Ok(separator) = Separator::try_from(token) {
                return Ok(Some(separator));
            }
        }
        ParseError::at(ErrorKind::UnknownSeparator(token.to_string()), start).into()
    }

    /// Returns the byte at the cursor, if any.
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Advances the cursor past any spaces.
    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whereq_common::Error;

    /// Parses the input with the default vocabularies.
    fn parse(input: &str) -> Result<ClauseSequence> {
        super::parse(input, &Vocabulary::default())
    }

    /// Asserts that the input fails with the given error.
    #[track_caller]
    fn assert_error(input: &str, expect: ParseError) {
        assert_eq!(parse(input), Err(Error::Parse(expect)), "input: {input}");
    }

    #[test]
    fn single_numeric_clause() {
        let sequence = parse("age > 18;").unwrap();
        assert_eq!(
            sequence.clauses().to_vec(),
            vec![(
                Clause {
                    field: "age".to_string(),
                    operator: Operator::GreaterThan,
                    value: Value::Number(18.0),
                },
                None,
            )]
        );
        assert_eq!(sequence.condition(), "age > 18.000000;");
    }

    #[test]
    fn quoted_string_round_trips() {
        let sequence = parse("name = 'Ann';").unwrap();
        assert_eq!(
            sequence.clauses().to_vec(),
            vec![(
                Clause {
                    field: "name".to_string(),
                    operator: Operator::Equal,
                    value: Value::String("Ann".to_string()),
                },
                None,
            )]
        );
    }

    #[test]
    fn double_quoted_string() {
        let sequence = parse("city = \"New York\";").unwrap();
        assert_eq!(sequence.clauses()[0].0.value, Value::String("New York".to_string()));
    }

    #[test]
    fn empty_quoted_string() {
        let sequence = parse("name = '';").unwrap();
        assert_eq!(sequence.clauses()[0].0.value, Value::String(String::new()));
    }

    #[test]
    fn multiple_clauses_preserve_order() {
        let sequence = parse("age > 18 AND city = 'NY' OR age <= 65;").unwrap();
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.clauses()[0].1, Some(Separator::And));
        assert_eq!(sequence.clauses()[1].1, Some(Separator::Or));
        assert_eq!(sequence.clauses()[2].1, None);
        assert_eq!(
            sequence.condition(),
            "age > 18.000000 AND city = NY OR age <= 65.000000;"
        );
    }

    #[test]
    fn qualified_field_name() {
        let sequence = parse("users.age >= 21;").unwrap();
        assert_eq!(sequence.clauses()[0].0.field, "users.age");
    }

    #[test]
    fn negative_and_fractional_numbers() {
        let sequence = parse("balance > -2.5;").unwrap();
        assert_eq!(sequence.clauses()[0].0.value, Value::Number(-2.5));
        assert_eq!(sequence.condition(), "balance > -2.500000;");
    }

    #[test]
    fn operator_tolerates_leading_spaces() {
        let sequence = parse("age   >   18;").unwrap();
        assert_eq!(sequence.clauses()[0].0.operator, Operator::GreaterThan);
        assert_eq!(sequence.clauses()[0].0.value, Value::Number(18.0));
    }

    #[test]
    fn field_does_not_skip_leading_space() {
        // A single leading space is accumulated into the field token.
        let sequence = parse(" age > 18;").unwrap();
        assert_eq!(sequence.clauses()[0].0.field, " age");
        // With two leading spaces the second delimits the token, so the
        // field is a lone space and "age" lands in the operator phase.
        assert_error(
            "  age > 18;",
            ParseError::at(ErrorKind::UnknownOperator("age".to_string()), 2),
        );
    }

    #[test]
    fn empty_input() {
        assert_error("", ParseError::new(ErrorKind::UnexpectedEnd));
    }

    #[test]
    fn missing_terminator() {
        assert_error("age > 18", ParseError::new(ErrorKind::UnexpectedEnd));
    }

    #[test]
    fn terminator_inside_field() {
        assert_error("age; > 18;", ParseError::at(ErrorKind::UnexpectedTerminator, 3));
    }

    #[test]
    fn field_starting_with_dot() {
        assert_error(".age > 18;", ParseError::at(ErrorKind::InvalidField, 0));
    }

    #[test]
    fn forbidden_keyword_field() {
        assert_error(
            "SELECT = 1;",
            ParseError::at(ErrorKind::ForbiddenKeyword("SELECT".to_string()), 0),
        );
        // The match is case-sensitive, so lowercase passes.
        assert!(parse("select = 1;").is_ok());
    }

    #[test]
    fn unknown_operator() {
        assert_error(
            "age ~ 18;",
            ParseError::at(ErrorKind::UnknownOperator("~".to_string()), 4),
        );
    }

    #[test]
    fn unterminated_quote() {
        assert_error("name = 'Ann;", ParseError::at(ErrorKind::UnterminatedQuote, 7));
        assert_error("name = '", ParseError::at(ErrorKind::UnterminatedQuote, 7));
    }

    #[test]
    fn not_a_number() {
        assert_error(
            "age > 1-8;",
            ParseError::at(ErrorKind::NotANumber("1-8".to_string()), 6),
        );
    }

    #[test]
    fn unexpected_value_character() {
        assert_error("age > x;", ParseError::at(ErrorKind::UnexpectedCharacter('x'), 6));
    }

    #[test]
    fn unknown_separator() {
        assert_error(
            "age > 18 XOR city = 'NY';",
            ParseError::at(ErrorKind::UnknownSeparator("XOR".to_string()), 9),
        );
    }

    #[test]
    fn dangling_separator() {
        // A separator always loops back to the field phase, so the `;`
        // that follows is rejected there.
        assert_error("age > 18 AND ;", ParseError::at(ErrorKind::UnexpectedTerminator, 13));
    }

    #[test]
    fn space_before_terminator() {
        // The `;` only terminates the sequence when it sits exactly at
        // the cursor when the separator phase begins.
        assert_error("age > 18 ;", ParseError::new(ErrorKind::UnexpectedEnd));
    }

    #[test]
    fn trailing_input() {
        assert_error("age > 18; ", ParseError::at(ErrorKind::TrailingInput, 9));
        assert_error("age > 18;;", ParseError::at(ErrorKind::TrailingInput, 9));
    }

    #[test]
    fn restricted_vocabulary() {
        let vocab = Vocabulary {
            operators: ["=".to_string()].into(),
            ..Vocabulary::default()
        };
        assert!(super::parse("age = 18;", &vocab).is_ok());
        assert_eq!(
            super::parse("age > 18;", &vocab),
            Err(Error::Parse(ParseError::at(
                ErrorKind::UnknownOperator(">".to_string()),
                4
            ))),
        );
    }

    #[test]
    fn parse_is_idempotent() {
        let input = "age > 18 AND city = 'NY';";
        assert_eq!(parse(input), parse(input));
        assert_eq!(parse("age > 1-8;"), parse("age > 1-8;"));
    }
}
