mod candidates;

pub use candidates::{list_candidates, new_file_name, normalize, Candidate, CandidateKind, CandidateQuery};
