//! Document outline: named line ranges used to expand a cursor to the
//! declaration around it.
//!
//! Editors normally supply this through a language service. The heuristic
//! provider here finds declarations with the same patterns as
//! [`super::declaration`] and measures their extent by scanning brackets,
//! skipping strings and comments.

use once_cell::sync::Lazy;
use regex::Regex;

use super::prologue::{LineClass, PrologueScanner};
use crate::types::DeclarationKind;

static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?(?:async\s+)?(?P<keyword>interface|type|class|function\s*\*?|(?:const\s+)?enum|const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

static METHOD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[ \t]+(?:(?:public|private|protected|static|readonly|async|abstract|override|get|set)\s+)*(?P<name>[A-Za-z_$#][\w$]*)\s*(?:<[^>]*>)?\s*\(",
    )
    .unwrap()
});

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "return"];

/// Zero-based, inclusive line span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
}

/// A named range in a document, possibly with nested members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub name: String,
    pub kind: DeclarationKind,
    /// Whole declaration including leading doc comments and decorators
    pub range: LineRange,
    pub children: Vec<OutlineNode>,
}

/// Supplies the outline of a document.
pub trait OutlineProvider {
    fn outline(&self, content: &str) -> Vec<OutlineNode>;
}

/// Regex and bracket-matching outline for TypeScript/JavaScript-like text
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicOutline;

impl OutlineProvider for HeuristicOutline {
    fn outline(&self, content: &str) -> Vec<OutlineNode> {
        let lines: Vec<&str> = content.split('\n').collect();
        let line_starts = line_starts(content);
        let scan = Scan {
            content,
            lines: &lines,
            line_starts: &line_starts,
            prologue_end: first_code_line(&lines),
        };
        collect_nodes(&scan, 0, lines.len(), None)
    }
}

/// Outermost node whose range contains `line`; parents are checked before children.
pub fn find_enclosing(nodes: &[OutlineNode], line: usize) -> Option<&OutlineNode> {
    for node in nodes {
        if node.range.contains(line) {
            return Some(node);
        }
        if let Some(child) = find_enclosing(&node.children, line) {
            return Some(child);
        }
    }
    None
}

/// First node named `name`, preferring top-level nodes
pub fn find_by_name<'a>(nodes: &'a [OutlineNode], name: &str) -> Option<&'a OutlineNode> {
    nodes
        .iter()
        .find(|n| n.name == name)
        .or_else(|| nodes.iter().find_map(|n| find_by_name(&n.children, name)))
}

/// Shared state of one outline pass
struct Scan<'a> {
    content: &'a str,
    lines: &'a [&'a str],
    line_starts: &'a [usize],
    /// First line after the file's leading comments and directives
    prologue_end: usize,
}

fn first_code_line(lines: &[&str]) -> usize {
    let mut scanner = PrologueScanner::new();
    lines
        .iter()
        .enumerate()
        .position(|(index, line)| scanner.classify(index, line) == LineClass::Code)
        .unwrap_or(lines.len())
}

fn line_starts(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn line_index_at_offset(line_starts: &[usize], offset: usize) -> usize {
    match line_starts.binary_search(&offset) {
        Ok(line) => line,
        Err(next) => next.saturating_sub(1),
    }
}

fn kind_for(keyword: &str) -> Option<DeclarationKind> {
    if keyword.ends_with("enum") {
        Some(DeclarationKind::Enum)
    } else if keyword.starts_with("function") {
        Some(DeclarationKind::Function)
    } else {
        DeclarationKind::from_keyword(keyword)
    }
}

fn is_block_bodied(kind: DeclarationKind) -> bool {
    matches!(
        kind,
        DeclarationKind::Interface
            | DeclarationKind::Class
            | DeclarationKind::Function
            | DeclarationKind::Enum
    )
}

/// Match a declaration (or, inside a class, a method) at the start of `line`
fn match_node(line: &str, top_level: bool, parent: Option<DeclarationKind>) -> Option<(String, DeclarationKind)> {
    if let Some(cap) = DECLARATION_PATTERN.captures(line) {
        let indent = cap.name("indent").map(|m| m.as_str().len()).unwrap_or(0);
        if top_level && indent > 0 {
            return None;
        }
        let kind = kind_for(cap.name("keyword")?.as_str())?;
        return Some((cap.name("name")?.as_str().to_string(), kind));
    }

    if parent == Some(DeclarationKind::Class) {
        let cap = METHOD_PATTERN.captures(line)?;
        let name = cap.name("name")?.as_str();
        if CONTROL_KEYWORDS.contains(&name) {
            return None;
        }
        return Some((name.to_string(), DeclarationKind::Function));
    }
    None
}

fn collect_nodes(scan: &Scan<'_>, from: usize, to: usize, parent: Option<DeclarationKind>) -> Vec<OutlineNode> {
    let mut nodes = Vec::new();
    let mut index = from;

    while index < to {
        let Some((name, kind)) = match_node(scan.lines[index], parent.is_none(), parent) else {
            index += 1;
            continue;
        };

        let block = is_block_bodied(kind) || parent == Some(DeclarationKind::Class);
        let end_offset = find_statement_end(scan.content, scan.line_starts[index], block);
        let end = line_index_at_offset(scan.line_starts, end_offset).clamp(index, to.saturating_sub(1).max(index));
        let start = leading_doc_start(scan.lines, index, from, scan.prologue_end);

        let children = if kind == DeclarationKind::Class || kind == DeclarationKind::Function {
            collect_nodes(scan, index + 1, end, Some(kind))
        } else {
            Vec::new()
        };

        nodes.push(OutlineNode {
            name,
            kind,
            range: LineRange { start, end },
            children,
        });
        index = end + 1;
    }

    nodes
}

/// Walk up over doc comments and decorators directly above `index`.
///
/// Inside the file prologue only a `/** … */` block ending right above is
/// taken; headers and license comments stay with the file.
fn leading_doc_start(lines: &[&str], index: usize, floor: usize, prologue_end: usize) -> usize {
    let mut start = index;
    while start > floor {
        let above = lines[start - 1].trim();
        let is_doc = above.starts_with("/*")
            || above.starts_with('*')
            || above.starts_with("//")
            || above.starts_with('@');
        if !is_doc {
            break;
        }
        if start - 1 < prologue_end {
            return doc_block_start(lines, start, floor).unwrap_or(start);
        }
        start -= 1;
    }
    start
}

/// First line of the `/** … */` block that ends on the line above `below`
fn doc_block_start(lines: &[&str], below: usize, floor: usize) -> Option<usize> {
    if !lines[below - 1].trim_end().ends_with("*/") {
        return None;
    }
    (floor..below)
        .rev()
        .take_while(|&i| {
            let line = lines[i].trim();
            line.starts_with('*') || line.starts_with("/*")
        })
        .find(|&i| lines[i].trim().starts_with("/**"))
}

fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            b'\n' if quote != b'`' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn continues_on_next_line(current: &str, next: Option<&str>) -> bool {
    const TRAILING: &[&str] = &["=", ",", "(", "[", "{", "|", "&", "=>", "+", "-", "?", ":", "."];
    const LEADING: &[&str] = &[".", "|", "&", "?", ":", "="];

    let current = current.trim_end();
    if current.is_empty() || TRAILING.iter().any(|t| current.ends_with(t)) {
        return true;
    }
    let next = next.map(str::trim_start).unwrap_or("");
    LEADING.iter().any(|l| next.starts_with(l))
}

/// Byte offset where the statement starting at `start` ends.
///
/// Block-bodied declarations end at the brace closing their first top-level
/// `{`; everything else ends at a top-level `;` or at a line break that does
/// not continue the expression.
fn find_statement_end(content: &str, start: usize, block_bodied: bool) -> usize {
    let bytes = content.as_bytes();
    let (mut parens, mut brackets, mut braces) = (0i32, 0i32, 0i32);
    let mut line_start = start;
    let mut i = start;

    while i < bytes.len() {
        let at_top = parens <= 0 && brackets <= 0 && braces <= 0;
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = content[i..].find('\n').map(|n| i + n).unwrap_or(bytes.len());
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = content[i + 2..].find("*/").map(|n| i + 2 + n + 2).unwrap_or(bytes.len());
                continue;
            }
            b'(' => parens += 1,
            b')' => parens -= 1,
            b'[' => brackets += 1,
            b']' => brackets -= 1,
            b'{' => braces += 1,
            b'}' => {
                braces -= 1;
                if block_bodied && braces == 0 && parens <= 0 && brackets <= 0 {
                    return i;
                }
            }
            b';' if at_top => return i,
            b'\n' if at_top && !block_bodied => {
                let current = &content[line_start..i];
                let next = content[i + 1..].lines().find(|l| !l.trim().is_empty());
                if !continues_on_next_line(current, next) {
                    return i.saturating_sub(1).max(start);
                }
                line_start = i + 1;
            }
            b'\n' => line_start = i + 1,
            _ => {}
        }
        i += 1;
    }
    bytes.len().saturating_sub(1).max(start)
}
