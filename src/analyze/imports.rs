//! Single-line, brace-delimited named imports.
//!
//! `import { a, b } from './module';` is the only shape recognised. Default,
//! namespace, aliased and multi-line imports are left alone.

use once_cell::sync::Lazy;
use regex::Regex;

use super::buffer::SourceBuffer;
use crate::types::ImportStatement;

static NAMED_IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<indent>\s*)import\s*\{(?P<names>[^}]*)\}\s*from\s*(?P<quote>['"])(?P<path>[^'"]*)['"](?P<semi>\s*;)?(?P<rest>.*)$"#,
    )
    .unwrap()
});

/// A named import split into the parts needed to re-serialize it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    pub indent: String,
    pub names: Vec<String>,
    pub quote: char,
    pub module_path: String,
    pub semicolon: bool,
    /// Anything after the statement, e.g. a trailing comment
    pub trailing: String,
}

impl NamedImport {
    pub fn parse(line: &str) -> Option<Self> {
        let cap = NAMED_IMPORT_PATTERN.captures(line)?;
        let names = split_names(cap.name("names").map(|m| m.as_str()).unwrap_or(""));
        let quote = cap
            .name("quote")
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or('\'');

        Some(Self {
            indent: cap.name("indent").map(|m| m.as_str()).unwrap_or("").to_string(),
            names,
            quote,
            module_path: cap.name("path").map(|m| m.as_str()).unwrap_or("").to_string(),
            semicolon: cap.name("semi").is_some(),
            trailing: cap.name("rest").map(|m| m.as_str()).unwrap_or("").to_string(),
        })
    }

    pub fn render(&self) -> String {
        format!(
            "{}import {{ {} }} from {q}{}{q}{}{}",
            self.indent,
            self.names.join(", "),
            self.module_path,
            if self.semicolon { ";" } else { "" },
            self.trailing,
            q = self.quote,
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}

/// Case-insensitive ascending order, ties broken by exact comparison
fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

/// Build the statement `import { name } from '<module_path>';`
pub fn import_statement(name: &str, module_path: &str) -> String {
    format!("import {{ {} }} from '{}';", name, module_path)
}

/// First named import in `source` whose module path is exactly `module_path`.
pub fn find_existing_import(source: &str, module_path: &str) -> Option<ImportStatement> {
    find_in_buffer(&SourceBuffer::parse(source), module_path)
}

pub(crate) fn find_in_buffer(buffer: &SourceBuffer, module_path: &str) -> Option<ImportStatement> {
    buffer.lines().iter().enumerate().find_map(|(index, line)| {
        let parsed = NamedImport::parse(line)?;
        if parsed.module_path != module_path {
            return None;
        }
        Some(ImportStatement {
            line_index: index,
            raw_text: line.clone(),
            module_path: parsed.module_path,
            imported_names: parsed.names,
        })
    })
}

/// Every name bound by a named import anywhere in `source`
pub fn imported_names(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(NamedImport::parse)
        .flat_map(|import| import.names)
        .collect()
}

/// Add `new_name` to an import statement, keeping the name list sorted.
///
/// A name that is already imported leaves the statement exactly as it was.
pub fn merge_imports(existing_import: &str, new_name: &str) -> String {
    let Some(mut import) = NamedImport::parse(existing_import) else {
        return existing_import.to_string();
    };
    if import.contains(new_name) {
        return existing_import.to_string();
    }

    import.names.push(new_name.to_string());
    sort_names(&mut import.names);
    import.render()
}

/// Remove one name from an import statement.
///
/// Returns `None` when no names would remain: an empty `import {}` is never
/// produced.
pub fn remove_named_import(import_statement: &str, name_to_remove: &str) -> Option<String> {
    let Some(mut import) = NamedImport::parse(import_statement) else {
        return Some(import_statement.to_string());
    };
    let Some(position) = import.names.iter().position(|n| n == name_to_remove) else {
        return Some(import_statement.to_string());
    };

    import.names.remove(position);
    if import.names.is_empty() {
        None
    } else {
        Some(import.render())
    }
}

/// Remove `name_to_remove` from the import of `module_path` in `source`,
/// deleting the whole line when it was the last name.
pub fn remove_import_from_source(source: &str, module_path: &str, name_to_remove: &str) -> String {
    let buffer = SourceBuffer::parse(source);
    let Some(existing) = find_in_buffer(&buffer, module_path) else {
        return source.to_string();
    };

    match remove_named_import(&existing.raw_text, name_to_remove) {
        None => buffer.remove_line(existing.line_index).into_text(),
        Some(modified) => buffer.replace_line(existing.line_index, modified).into_text(),
    }
}
