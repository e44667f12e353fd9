//! The interactive read loop: reads one predicate per line, parses and
//! renders it, and prints the resulting SQL or the parse error.

use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use whereq_common::Result;
use whereq_sql::Vocabulary;

/// Runs the interactive loop until `exit` or end of input. Parse
/// failures are printed and the loop resumes; they never end the
/// session.
pub fn run(vocab: &Vocabulary, table: &str) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") {
                    break;
                }
                editor.add_history_entry(&line)?;
                match crate::render(&line, vocab, table) {
                    Ok(sql) => println!("{sql}"),
                    Err(err) => println!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                debug!("read loop failed: {err}");
                return Err(err.into());
            }
        }
    }
    Ok(())
}
