//! One move, from selection to linked buffers.
//!
//! A move passes through `Selected → Relocated → Linked → Saved`. Everything
//! up to `Linked` happens here on plain strings; only a finished
//! [`MovePlan`] can be handed to the commit step, so a half-linked pair of
//! buffers is never written.

use serde::Serialize;
use tracing::{debug, warn};

use super::linker::link_move;
use super::policy::{
    check_conflict, conflict_marker, export_carried, forward_reexport, needs_export_marker,
    remove_self_import, should_forward, ConflictDecision, ConflictPolicy, ReexportPolicy,
};
use super::selection::{analyze_selection, resolve_selection, Selection};
use crate::analyze::declaration::{ensure_exported, references};
use crate::analyze::outline::{LineRange, OutlineProvider};
use crate::analyze::{LineEnding, SourceBuffer};
use crate::error::MoveError;
use crate::types::{DeclarationKind, ModulePathPair, MoveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStage {
    Selected,
    Relocated,
    Linked,
    Saved,
}

/// Inputs of one move: both files' paths and current text plus the selection
#[derive(Debug, Clone)]
pub struct MoveRequest<'a> {
    pub source_path: &'a str,
    pub target_path: &'a str,
    pub source_code: &'a str,
    pub target_code: &'a str,
    pub selection: Selection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOptions {
    pub reexport: ReexportPolicy,
    pub on_conflict: ConflictPolicy,
}

/// What a move did, for display and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub stage: MoveStage,
    pub symbol: Option<String>,
    pub kind: Option<DeclarationKind>,
    /// 1-based, inclusive lines taken from the source
    pub moved_lines: (usize, usize),
    pub conflict: bool,
    pub exported: bool,
    pub forwarded: bool,
    pub source_imported: bool,
    pub carried: Vec<String>,
    pub paths: ModulePathPair,
}

/// A fully linked move, ready to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub source_path: String,
    pub target_path: String,
    pub result: MoveResult,
    pub report: MoveReport,
}

impl MovePlan {
    pub fn mark_saved(&mut self) {
        self.report.stage = MoveStage::Saved;
    }
}

fn same_file(a: &str, b: &str) -> bool {
    a.replace('\\', "/") == b.replace('\\', "/")
}

/// Remove the moved lines, folding the blank lines on either side into one.
fn cut_lines(source: &str, range: LineRange) -> String {
    let mut buffer = SourceBuffer::parse(source).remove_range(range.start, range.end);
    if range.start > 0 {
        let blank = |line: Option<&str>| line.map(|l| l.trim().is_empty()).unwrap_or(false);
        if blank(buffer.line(range.start - 1)) && blank(buffer.line(range.start)) {
            buffer = buffer.remove_line(range.start - 1);
        }
    }
    buffer.into_text()
}

/// Append `block` to the end of `target`, separated by a blank line.
fn append_block(target: &str, block: &str, marker: Option<String>) -> String {
    let ending = if target.is_empty() {
        LineEnding::Lf
    } else {
        LineEnding::detect(target)
    };
    let eol = ending.as_str();

    let mut out = String::with_capacity(target.len() + block.len() + 64);
    if !target.trim().is_empty() {
        out.push_str(target.trim_end_matches(&['\r', '\n'][..]));
        out.push_str(eol);
        out.push_str(eol);
    }
    if let Some(marker) = marker {
        out.push_str(&marker);
        out.push_str(eol);
    }
    out.push_str(&block.replace('\n', eol));
    out.push_str(eol);
    out
}

/// Compute both updated buffers for moving the selection out of the source.
///
/// `confirm` is asked about name clashes when the conflict policy is
/// [`ConflictPolicy::Ask`]. On error nothing has been changed.
pub fn plan_move<F>(
    request: &MoveRequest<'_>,
    options: MoveOptions,
    outline: &dyn OutlineProvider,
    confirm: F,
) -> Result<MovePlan, MoveError>
where
    F: FnOnce(&str) -> bool,
{
    if same_file(request.source_path, request.target_path) {
        return Err(MoveError::SameFile);
    }

    let span = resolve_selection(request.source_code, &request.selection, outline)?;
    let code = analyze_selection(&span.text);
    let paths = ModulePathPair::between(request.source_path, request.target_path);
    debug!(stage = ?MoveStage::Selected, start = span.range.start + 1, end = span.range.end + 1, symbol = ?code.symbol);

    let mut report = MoveReport {
        stage: MoveStage::Selected,
        symbol: code.symbol.as_ref().map(|s| s.to_string()),
        kind: code.kind,
        moved_lines: (span.range.start + 1, span.range.end + 1),
        conflict: false,
        exported: code.was_exported,
        forwarded: false,
        source_imported: false,
        carried: Vec::new(),
        paths: paths.clone(),
    };

    let mut source = cut_lines(request.source_code, span.range);

    let Some(symbol) = code.symbol.as_ref().map(|s| s.as_str()) else {
        // Plain text range: nothing to link
        let target = append_block(request.target_code, &code.text, None);
        report.stage = MoveStage::Linked;
        return Ok(MovePlan {
            source_path: request.source_path.to_string(),
            target_path: request.target_path.to_string(),
            result: MoveResult {
                updated_source_code: source,
                updated_target_code: target,
            },
            report,
        });
    };

    let annotate = match check_conflict(request.target_code, symbol, code.kind, options.on_conflict, confirm) {
        ConflictDecision::NoConflict => false,
        ConflictDecision::Proceed { annotate } => {
            warn!(symbol, "destination already declares this name");
            report.conflict = true;
            annotate
        }
        ConflictDecision::Abort => {
            return Err(MoveError::Conflict {
                symbol: symbol.to_string(),
            })
        }
    };

    let forwarded = should_forward(options.reexport, &source, symbol, code.was_exported);
    if forwarded {
        source = forward_reexport(&source, symbol, &paths.source_to_target);
    }
    let exported = needs_export_marker(code.was_exported, references(&source, symbol), forwarded);
    let moved = if exported {
        ensure_exported(&code.text, symbol)
    } else {
        code.text.clone()
    };

    let target = remove_self_import(request.target_code, &paths.target_to_source, symbol);
    let target = append_block(&target, &moved, annotate.then(|| conflict_marker(symbol)));
    report.stage = MoveStage::Relocated;
    report.forwarded = forwarded;
    report.exported = exported;
    debug!(stage = ?MoveStage::Relocated, symbol, forwarded, exported);

    let (mut result, linkage) = link_move(
        request.source_path,
        request.target_path,
        symbol,
        &source,
        &target,
        Some(&moved),
    );
    result.updated_source_code = export_carried(&result.updated_source_code, &linkage.carried);

    report.stage = MoveStage::Linked;
    report.source_imported = linkage.source_imported;
    report.carried = linkage.carried;
    debug!(stage = ?MoveStage::Linked, symbol, carried = ?report.carried);

    Ok(MovePlan {
        source_path: request.source_path.to_string(),
        target_path: request.target_path.to_string(),
        result,
        report,
    })
}
