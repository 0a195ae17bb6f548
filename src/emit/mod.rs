mod json;
mod summary;

pub use json::{BufferOutput, CandidatesOutput, MoveOutput};
pub use summary::render_summary;
