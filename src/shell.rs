//! Line-oriented command loop over a [`WordTable`].
//!
//! Used by the `wordtable` binary. Each input line is one [`Command`]; table
//! errors and bad commands are reported on the output and the loop goes on.
//!
//! ```
//! use wordtable::shell::Shell;
//! use wordtable::table::WordTable;
//!
//! let mut shell = Shell::new(WordTable::new(16).unwrap());
//! shell.table_mut().insert("rust");
//!
//! let mut out = Vec::new();
//! shell.run("find Rust!\nexit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("rust: 1"));
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::hash::HashFunction;
use crate::ingest;
use crate::table::WordTable;

const DEFAULT_TOP: usize = 10;
const DEFAULT_HEAP_SLOTS: usize = 15;

const HELP: &str = "\
commands:
  import <path>    import words from a text file
  find <word>      frequency of a word
  max              head word of the longest bucket chain
  stats            table counters
  top [n]          n most frequent words (default 10)
  heap [n]         first n heap slots by level (default 15)
  compare <path>   collisions per hash function for a file
  help             this text
  exit | quit      leave";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Import(PathBuf),
    Find(String),
    Max,
    Stats,
    Top(usize),
    Heap(usize),
    Compare(PathBuf),
    Help,
    Exit,
}

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a count")]
    BadCount(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));
        let arg = |cmd: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(cmd))
            } else {
                Ok(rest)
            }
        };
        let count = |default: usize| {
            if rest.is_empty() {
                Ok(default)
            } else {
                rest.parse()
                    .map_err(|_| CommandError::BadCount(rest.to_owned()))
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "import" => Ok(Command::Import(PathBuf::from(arg("import")?))),
            "find" => Ok(Command::Find(arg("find")?.to_owned())),
            "max" => Ok(Command::Max),
            "stats" => Ok(Command::Stats),
            "top" => Ok(Command::Top(count(DEFAULT_TOP)?)),
            "heap" => Ok(Command::Heap(count(DEFAULT_HEAP_SLOTS)?)),
            "compare" => Ok(Command::Compare(PathBuf::from(arg("compare")?))),
            "help" | "?" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive driver owning one table.
#[derive(Debug)]
pub struct Shell {
    table: WordTable,
}

impl Shell {
    pub fn new(table: WordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &WordTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut WordTable {
        &mut self.table
    }

    pub fn into_table(self) -> WordTable {
        self.table
    }

    /// Reads commands from `input` until end of input or `exit`.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }
            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(&command, out)?,
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    Flow::Continue
                },
            };
            out.flush()?;
            if flow == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command, writing its result to `out`.
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "executing");
        match command {
            Command::Import(path) => match self.table.import(path) {
                Ok(stats) => writeln!(out, "Done!\n\n{stats}")?,
                Err(err) => writeln!(out, "error: unable to import {}: {err}", path.display())?,
            },
            Command::Find(word) => match ingest::normalize(word) {
                Some(word) => writeln!(out, "{word}: {}", self.table.find_freq(&word))?,
                None => writeln!(out, "error: '{word}' has no letters to look up")?,
            },
            Command::Max => match self.table.find_max() {
                Ok(word) => writeln!(out, "{word}")?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Stats => writeln!(out, "{}", self.table.stats())?,
            Command::Top(n) => {
                for (rank, (word, freq)) in self.table.top_words(*n).into_iter().enumerate() {
                    writeln!(out, "{:>4}. {word} {freq}", rank + 1)?;
                }
            },
            Command::Heap(n) => write!(out, "{}", self.table.render_heap(*n))?,
            Command::Compare(path) => self.compare(path, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Imports `path` into one fresh table per hash function and reports
    /// the collision count of each.
    fn compare<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<()> {
        for f in HashFunction::ALL {
            let result = WordTable::with_hash_function(self.table.capacity(), f)
                .and_then(|mut table| table.import(path));
            match result {
                Ok(stats) => writeln!(out, "{:>2} {:<15} {}", f.id(), f.name(), stats.collisions)?,
                Err(err) => {
                    writeln!(out, "error: unable to import {}: {err}", path.display())?;
                    break;
                },
            }
        }
        Ok(())
    }
}
