//! whereq reads simplified WHERE predicates, one per line, parses them
//! into a clause sequence, and prints the resulting SELECT query. By
//! default it runs an interactive prompt; `--command` and `--file` run
//! it non-interactively.

mod repl;

use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;

use whereq_common::Result;
use whereq_sql::{parse, SelectBuilder, Vocabulary};

#[derive(Parser)]
#[command(name = "whereq", version, about = "Parses WHERE predicates into SELECT queries.")]
struct Args {
    /// The table to select from in rendered queries.
    #[arg(long, default_value = "some_table")]
    table: String,

    /// A TOML file overriding the built-in token vocabularies.
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Parses a single predicate and exits.
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Parses every non-empty line of a file and exits.
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// The log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_str(&args.log_level)?.start()?;
    let vocab = load_vocab(args.vocab.as_deref())?;

    if let Some(predicate) = &args.command {
        println!("{}", render(predicate, &vocab, &args.table)?);
        return Ok(());
    }
    if let Some(path) = &args.file {
        return run_file(path, &vocab, &args.table);
    }
    repl::run(&vocab, &args.table)
}

/// Parses every non-empty line of the given file. Parse failures are
/// printed and don't stop the run, matching the interactive loop.
fn run_file(path: &Path, vocab: &Vocabulary, table: &str) -> Result<()> {
    for line in std::fs::read_to_string(path)?.lines() {
        if line.is_empty() {
            continue;
        }
        match render(line, vocab, table) {
            Ok(sql) => println!("{sql}"),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

/// Parses a predicate line and renders it as a SELECT query.
fn render(line: &str, vocab: &Vocabulary, table: &str) -> Result<String> {
    let sequence = parse(line, vocab)?;
    debug!("parsed {} clauses from {line:?}", sequence.len());
    let (sql, _params) =
        SelectBuilder::all().from(table).r#where(sequence.condition()).to_sql()?;
    Ok(sql)
}

/// Loads the token vocabularies: the built-in defaults, overridden by
/// the given TOML file if one was provided.
fn load_vocab(path: Option<&Path>) -> Result<Vocabulary> {
    let Some(path) = path else {
        return Ok(Vocabulary::default());
    };
    let config = config::Config::builder().add_source(config::File::from(path)).build()?;
    Ok(config.try_deserialize()?)
}
