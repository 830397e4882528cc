//! Word-frequency table CLI.
//!
//! Imports the given files, then reads commands from stdin (`help` lists
//! them) unless `--batch` is set.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive session over a corpus
//! cargo run --release --bin wordtable -- --capacity 1009 --hash djb2 corpus.txt
//!
//! # One-shot import and summary
//! cargo run --release --bin wordtable -- --batch corpus.txt
//! ```

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use wordtable::builder::TableBuilder;
use wordtable::hash::HashFunction;
use wordtable::shell::Shell;
use wordtable::table::DEFAULT_CAPACITY;

/// Chained word-frequency hash table.
#[derive(Parser, Debug)]
#[command(name = "wordtable")]
#[command(about = "Count word frequencies in a fixed-capacity chained hash table")]
struct Args {
    /// Number of buckets (fixed for the session).
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Hash function by name (polynomial, xor, multiplicative, djb2, sdbm, crc) or id 1-6.
    #[arg(long, default_value = "polynomial")]
    hash: HashFunction,

    /// Import the files and print statistics without reading commands.
    #[arg(long)]
    batch: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Text files to import at startup.
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut table = TableBuilder::new(args.capacity)
        .hash_function(args.hash)
        .build()
        .context("invalid table configuration")?;

    for path in &args.files {
        table
            .import(path)
            .with_context(|| format!("unable to import {}", path.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.batch {
        writeln!(out, "{}", table.stats())?;
        if let Ok(word) = table.find_max() {
            writeln!(out, "Head of longest chain: {word}")?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        writeln!(
            out,
            "wordtable ready ({} buckets, {}); type 'help'",
            table.capacity(),
            table.hash_function()
        )?;
    }
    let mut shell = Shell::new(table);
    shell.run(stdin.lock(), &mut out)?;

    let stats = shell.into_table().stats();
    debug!(
        unique_words = stats.unique_words,
        total_words = stats.total_words,
        collisions = stats.collisions,
        "session finished"
    );
    Ok(())
}
