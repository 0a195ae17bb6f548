use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::relocate::{ConflictPolicy, ReexportPolicy};

#[derive(Parser, Debug)]
#[command(name = "relocate")]
#[command(author, version, about = "Move declarations between source files and fix up their imports")]
pub struct Args {
    /// Path to a config file (default: nearest .relocate.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move a declaration (or a line range) into another file
    #[command(group(ArgGroup::new("selection").required(true).args(["symbol", "line", "lines"])))]
    Move {
        /// File the code currently lives in
        file: PathBuf,

        /// Declaration to move, by name
        #[arg(short, long)]
        symbol: Option<String>,

        /// Move the declaration enclosing this 1-based line
        #[arg(short, long)]
        line: Option<usize>,

        /// Move an explicit 1-based inclusive range, e.g. 10:24
        #[arg(long, value_parser = parse_line_range)]
        lines: Option<(usize, usize)>,

        /// Destination, relative to the source file's directory.
        /// Prompts for one when omitted on a terminal.
        #[arg(short, long)]
        to: Option<String>,

        /// Print the result without writing either file
        #[arg(long)]
        dry_run: bool,

        /// Output a JSON report
        #[arg(long)]
        json: bool,

        /// Override the configured conflict policy
        #[arg(long, value_enum)]
        on_conflict: Option<ConflictPolicy>,

        /// Override the configured re-export policy
        #[arg(long, value_enum)]
        reexport: Option<ReexportPolicy>,

        /// Answer yes to conflict prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// List destination candidates next to a file
    Candidates {
        /// File the code currently lives in
        file: PathBuf,

        /// Directory to browse, relative to the file's directory
        #[arg(short, long, default_value = "")]
        dir: String,

        /// Filter entries by a case-insensitive substring
        #[arg(short, long, default_value = "")]
        search: String,

        /// Never browse above this directory
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the import path from one file to another
    Path {
        /// Importing file
        from: String,

        /// Imported file
        to: String,
    },
}

/// Parse `A:B` (or a single `A`) into a 1-based inclusive range.
pub fn parse_line_range(s: &str) -> Result<(usize, usize), String> {
    let (start, end) = match s.split_once(':') {
        Some((a, b)) => (a, b),
        None => (s, s),
    };
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start line: {}", start))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end line: {}", end))?;
    if start == 0 || end < start {
        return Err(format!("invalid line range: {}", s));
    }
    Ok((start, end))
}
