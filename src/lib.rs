//! Move a TypeScript/JavaScript declaration from one file to another and
//! rewrite the imports and exports on both sides.
//!
//! The text engine in [`analyze`] works line by line with regular
//! expressions; [`relocate`] composes it into a single move, and [`cli`]
//! reads and writes the files.

pub mod analyze;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod logging;
pub mod relocate;
pub mod scan;
pub mod types;

pub use analyze::{
    insert_after_directives_and_comments, merge_imports, relative_import_path, remove_named_import,
    HeuristicOutline, OutlineProvider,
};
pub use config::RelocateConfig;
pub use error::{ConfigError, MoveError};
pub use relocate::{plan_move, update_imports_for_move, MoveOptions, MovePlan, MoveRequest, Selection};
pub use types::{ModulePathPair, MoveResult, SymbolName};
