use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::relocate::{MovePlan, MoveReport};
use crate::scan::Candidate;

#[derive(Serialize)]
pub struct MoveOutput {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub target: String,
    pub dry_run: bool,
    pub report: MoveReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffers: Option<BufferOutput>,
}

/// Full updated text, only included for dry runs
#[derive(Serialize)]
pub struct BufferOutput {
    pub source: String,
    pub target: String,
}

impl MoveOutput {
    pub fn from_plan(plan: &MovePlan, dry_run: bool) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            source: plan.source_path.clone(),
            target: plan.target_path.clone(),
            dry_run,
            report: plan.report.clone(),
            buffers: dry_run.then(|| BufferOutput {
                source: plan.result.updated_source_code.clone(),
                target: plan.result.updated_target_code.clone(),
            }),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Serialize)]
pub struct CandidatesOutput<'a> {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub file: String,
    pub directory: String,
    pub candidates: &'a [Candidate],
}

impl<'a> CandidatesOutput<'a> {
    pub fn new(file: &str, directory: &str, candidates: &'a [Candidate]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            file: file.to_string(),
            directory: directory.to_string(),
            candidates,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
