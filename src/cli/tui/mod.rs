mod picker;
mod theme;

pub use picker::{confirm_conflict, pick_destination};
pub use theme::{print_error, print_rule, print_success, relocate_theme};
