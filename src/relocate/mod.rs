pub mod linker;
pub mod plan;
pub mod policy;
pub mod selection;

pub use linker::{add_named_import, link_move, update_imports_for_move, Linkage};
pub use plan::{plan_move, MoveOptions, MovePlan, MoveReport, MoveRequest, MoveStage};
pub use policy::{ConflictDecision, ConflictPolicy, ReexportPolicy};
pub use selection::{analyze_selection, resolve_selection, ResolvedSpan, SelectedCode, Selection};
