mod args;
mod candidates;
mod move_cmd;
mod tui;

pub use args::{parse_line_range, Args, Command};
pub use candidates::{run_candidates, run_path};
pub use move_cmd::{run_move, MoveArgs};
pub use tui::{print_error, print_success};
