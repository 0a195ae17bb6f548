//! Turning a user selection into the exact lines to move.

use crate::analyze::declaration::{first_declaration, strip_export};
use crate::analyze::outline::{find_by_name, find_enclosing, LineRange, OutlineProvider};
use crate::analyze::SourceBuffer;
use crate::error::MoveError;
use crate::types::{DeclarationKind, SymbolName};

/// What the user pointed at. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Explicit inclusive line range
    Range { start_line: usize, end_line: usize },
    /// A cursor; expands to the declaration around it
    Cursor { line: usize },
    /// A declaration by name
    Symbol(String),
}

/// Whole lines picked out of the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Zero-based, inclusive
    pub range: LineRange,
    pub text: String,
}

/// The moved code with its `export` marker split off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCode {
    pub text: String,
    pub was_exported: bool,
    /// Declared name, absent for an arbitrary range
    pub symbol: Option<SymbolName>,
    pub kind: Option<DeclarationKind>,
}

pub fn resolve_selection(
    source: &str,
    selection: &Selection,
    outline: &dyn OutlineProvider,
) -> Result<ResolvedSpan, MoveError> {
    let buffer = SourceBuffer::parse(source);

    let range = match selection {
        Selection::Range {
            start_line,
            end_line,
        } => {
            if *start_line == 0 || start_line > end_line || *end_line > buffer.len() {
                return Err(MoveError::InvalidRange {
                    start: *start_line,
                    end: *end_line,
                    lines: buffer.len(),
                });
            }
            LineRange {
                start: start_line - 1,
                end: end_line - 1,
            }
        }
        Selection::Cursor { line } => {
            let nodes = outline.outline(source);
            find_enclosing(&nodes, line.saturating_sub(1))
                .map(|node| node.range)
                .ok_or(MoveError::NoEnclosingSymbol { line: *line })?
        }
        Selection::Symbol(name) => {
            let nodes = outline.outline(source);
            find_by_name(&nodes, name)
                .map(|node| node.range)
                .ok_or_else(|| MoveError::SymbolNotFound(name.clone()))?
        }
    };

    let text = buffer
        .lines()
        .get(range.start..=range.end)
        .ok_or(MoveError::InvalidRange {
            start: range.start + 1,
            end: range.end + 1,
            lines: buffer.len(),
        })?
        .join("\n");
    if text.trim().is_empty() {
        return Err(MoveError::EmptySelection);
    }
    Ok(ResolvedSpan { range, text })
}

/// Split the export marker off the selected text and find what it declares.
pub fn analyze_selection(text: &str) -> SelectedCode {
    let (text, was_exported) = strip_export(text);
    let declared = first_declaration(&text);
    SelectedCode {
        was_exported,
        symbol: declared.as_ref().map(|(_, name)| name.clone()),
        kind: declared.map(|(kind, _)| kind),
        text,
    }
}
