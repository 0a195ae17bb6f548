use thiserror::Error;

/// Reasons a move is refused. Both files stay untouched in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("selected text is empty")]
    EmptySelection,

    #[error("no declaration encloses line {line}")]
    NoEnclosingSymbol { line: usize },

    #[error("no declaration named `{0}` found")]
    SymbolNotFound(String),

    #[error("line range {start}:{end} is outside the file ({lines} lines)")]
    InvalidRange {
        start: usize,
        end: usize,
        lines: usize,
    },

    #[error("`{symbol}` is already declared in the destination")]
    Conflict { symbol: String },

    #[error("source and destination are the same file")]
    SameFile,
}

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
