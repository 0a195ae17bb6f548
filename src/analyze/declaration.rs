//! Declaration and reference heuristics over plain text.
//!
//! A declaration is a line starting with one of the declaring keywords
//! (`interface`, `type`, `class`, `function`, `enum`, `const`, `let`, `var`),
//! optionally preceded by `export`, `declare`, `abstract` or `async`.
//! Default exports are only recognised as the head of moved text; they are
//! never listed among a file's declarations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::imports::NamedImport;
use crate::types::{Declaration, DeclarationKind, SymbolName};

static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)(?P<export>export\s+)?(?P<default>default\s+)?(?:declare\s+)?(?:abstract\s+)?(?:async\s+)?(?P<keyword>interface|type|class|function\s*\*?|(?:const\s+)?enum|const|let|var)\s+(?P<name>[A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_$][\w$]*").unwrap());

const MEMBER_MODIFIERS: &[&str] = &["readonly", "public", "private", "protected", "static", "declare", "override"];

static REEXPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*export\s*(?:\*|\{[^}]*\})\s*from\s*['"]"#).unwrap());

fn kind_for(keyword: &str) -> Option<DeclarationKind> {
    if keyword.ends_with("enum") {
        Some(DeclarationKind::Enum)
    } else if keyword.starts_with("function") {
        Some(DeclarationKind::Function)
    } else {
        DeclarationKind::from_keyword(keyword)
    }
}

/// A declaration line: the declaration, its indent and whether it is `export default`
fn parse_head(line_index: usize, line: &str) -> Option<(Declaration, usize, bool)> {
    let cap = DECLARATION_PATTERN.captures(line)?;
    let keyword = cap.name("keyword")?.as_str();
    let kind = kind_for(keyword)?;
    let indent = cap.name("indent").map(|m| m.as_str().len()).unwrap_or(0);
    let default = cap.name("default").is_some();
    if default && cap.name("export").is_none() {
        return None;
    }

    Some((
        Declaration {
            kind,
            name: cap.name("name")?.as_str().to_string(),
            exported: cap.name("export").is_some(),
            line_index,
        },
        indent,
        default,
    ))
}

fn parse_declaration(line_index: usize, line: &str) -> Option<(Declaration, usize)> {
    match parse_head(line_index, line)? {
        (_, _, true) => None,
        (decl, indent, false) => Some((decl, indent)),
    }
}

/// Top-level (unindented) declarations, in file order
pub fn declarations(source: &str) -> Vec<Declaration> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| parse_declaration(index, line))
        .filter(|(_, indent)| *indent == 0)
        .map(|(decl, _)| decl)
        .collect()
}

/// Names declared at any nesting depth
pub fn declared_names(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| parse_declaration(index, line))
        .map(|(decl, _)| decl.name)
        .collect()
}

pub fn find_declaration(source: &str, name: &str) -> Option<Declaration> {
    declarations(source).into_iter().find(|d| d.name == name)
}

pub fn declares(source: &str, name: &str) -> bool {
    find_declaration(source, name).is_some()
}

/// Whether `target` already declares a type, class or function named `name`,
/// at any nesting depth.
pub fn has_declaration_conflict(target: &str, name: &str) -> bool {
    let pattern = format!(
        r"(?m)(?:^|[^\w$])(?:interface|type|class|function|enum)\s+{}(?:[^\w$]|$)",
        regex::escape(name)
    );
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(target),
        Err(_) => false,
    }
}

/// Whether a `kind` declaration named `name` would clash with `target`.
///
/// On top of [`has_declaration_conflict`], a top-level variable clashes with
/// anything else that lives in the value space. Interfaces and type aliases
/// may share a name with a variable.
pub fn has_move_conflict(target: &str, name: &str, kind: Option<DeclarationKind>) -> bool {
    if has_declaration_conflict(target, name) {
        return true;
    }
    let is_value = !matches!(kind, Some(DeclarationKind::Interface | DeclarationKind::TypeAlias));
    is_value
        && declarations(target)
            .iter()
            .any(|d| d.name == name && d.kind == DeclarationKind::Variable)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Word-safe occurrence of `name` in `line` that is not a member access
fn line_mentions(line: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(found) = line[from..].find(name) {
        let start = from + found;
        let end = start + name.len();
        let before = &line[..start];
        let prev = before.chars().next_back();
        let next = line[end..].chars().next();

        let prev_ok = match prev {
            None => true,
            Some('.') => before.ends_with("..."),
            Some(c) => !is_ident_char(c),
        };
        let next_ok = next.map(|c| !is_ident_char(c)).unwrap_or(true);
        if prev_ok && next_ok {
            return true;
        }
        from = end;
    }
    false
}

/// Lines that link modules rather than use symbols
fn is_linkage_line(line: &str) -> bool {
    NamedImport::parse(line).is_some()
        || REEXPORT_PATTERN.is_match(line)
        || line.trim_start().starts_with("import ")
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Whether `source` uses `name` outside import/re-export statements and comments.
pub fn references(source: &str, name: &str) -> bool {
    source
        .lines()
        .filter(|line| !is_linkage_line(line) && !is_comment_line(line))
        .map(|line| line.split("//").next().unwrap_or(line))
        .any(|line| line_mentions(line, name))
}

/// Blank out string literal contents on one line.
///
/// `${…}` substitutions inside template literals stay visible.
fn mask_strings(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut substitution: Option<usize> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    out.push(' ');
                    if chars.next().is_some() {
                        out.push(' ');
                    }
                } else if c == q {
                    quote = None;
                    out.push(c);
                } else if q == '`' && c == '$' && chars.peek() == Some(&'{') {
                    chars.next();
                    out.push_str("${");
                    quote = None;
                    substitution = Some(0);
                } else {
                    out.push(' ');
                }
            }
            None => {
                match (c, substitution) {
                    ('\'' | '"' | '`', _) => quote = Some(c),
                    ('{', Some(depth)) => substitution = Some(depth + 1),
                    ('}', Some(0)) => {
                        substitution = None;
                        quote = Some('`');
                    }
                    ('}', Some(depth)) => substitution = Some(depth - 1),
                    _ => {}
                }
                out.push(c);
            }
        }
    }
    out
}

/// Whether the identifier spanning `start..end` of `code` names a property,
/// member or parameter (`key: …`, `key?: …`) rather than using a symbol.
fn is_property_key(code: &str, start: usize, end: usize) -> bool {
    let after = code[end..].trim_start();
    let after = after.strip_prefix(&['?', '!'][..]).unwrap_or(after).trim_start();
    if !after.starts_with(':') {
        return false;
    }
    let before = code[..start].trim_end();
    match before.chars().next_back() {
        None | Some('{') | Some(',') | Some(';') | Some('(') => true,
        Some(_) => {
            let previous = before
                .rsplit(|c: char| !is_ident_char(c))
                .next()
                .unwrap_or("");
            MEMBER_MODIFIERS.contains(&previous)
        }
    }
}

/// Identifiers used in `text`, ignoring comments, linkage lines, strings,
/// member names and property keys
pub fn referenced_identifiers(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for line in text.lines() {
        if is_linkage_line(line) || is_comment_line(line) {
            continue;
        }
        let masked = mask_strings(line);
        let code = masked.split("//").next().unwrap_or(masked.as_str());
        for m in IDENTIFIER_PATTERN.find_iter(code) {
            let before = &code[..m.start()];
            let member = before.ends_with('.') && !before.ends_with("...");
            let inside_word = before.chars().next_back().map(|c| c.is_ascii_digit()).unwrap_or(false);
            if !member && !inside_word && !is_property_key(code, m.start(), m.end()) {
                found.insert(m.as_str().to_string());
            }
        }
    }
    found
}

/// Remove the `export` marker from the first unindented declaration in `text`.
///
/// Returns the text and whether a marker was removed. `export default` is
/// left in place.
pub fn strip_export(text: &str) -> (String, bool) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if let Some(cap) = DECLARATION_PATTERN.captures(line) {
            if cap.name("indent").map(|m| !m.as_str().is_empty()).unwrap_or(false) {
                offset += line.len();
                continue;
            }
            if cap.name("default").is_some() {
                return (text.to_string(), false);
            }
            if let Some(export) = cap.name("export") {
                let mut stripped = String::with_capacity(text.len());
                stripped.push_str(&text[..offset + export.start()]);
                stripped.push_str(&text[offset + export.end()..]);
                return (stripped, true);
            }
            return (text.to_string(), false);
        }
        offset += line.len();
    }
    (text.to_string(), false)
}

/// Name and kind of the first unindented declaration in `text`, including
/// an `export default` one
pub fn first_declaration(text: &str) -> Option<(DeclarationKind, SymbolName)> {
    text.lines().enumerate().find_map(|(index, line)| {
        let (decl, indent, _) = parse_head(index, line)?;
        if indent > 0 {
            return None;
        }
        Some((decl.kind, SymbolName::new(&decl.name)?))
    })
}

/// Put `export ` in front of the top-level declaration of `name` unless it
/// already has one.
pub fn ensure_exported(source: &str, name: &str) -> String {
    match find_declaration(source, name) {
        Some(decl) if !decl.exported => {
            let mut offset = 0;
            for (index, line) in source.split_inclusive('\n').enumerate() {
                if index == decl.line_index {
                    let mut out = String::with_capacity(source.len() + 7);
                    out.push_str(&source[..offset]);
                    out.push_str("export ");
                    out.push_str(&source[offset..]);
                    return out;
                }
                offset += line.len();
            }
            source.to_string()
        }
        _ => source.to_string(),
    }
}
