//! Export lists: local `export { a, b };` and forwarding `export { a } from './m';`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::buffer::SourceBuffer;

static EXPORT_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<indent>\s*)export\s*\{(?P<names>[^}]*)\}(?:\s*from\s*(?P<quote>['"])(?P<path>[^'"]*)['"])?(?P<semi>\s*;)?(?P<rest>.*)$"#,
    )
    .unwrap()
});

/// One `export { … }` statement, with or without a `from` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportList {
    pub indent: String,
    pub names: Vec<String>,
    /// Quote and module path of a forwarding export
    pub from: Option<(char, String)>,
    pub semicolon: bool,
    pub trailing: String,
}

impl ExportList {
    pub fn parse(line: &str) -> Option<Self> {
        let cap = EXPORT_LIST_PATTERN.captures(line)?;
        let rest = cap.name("rest").map(|m| m.as_str()).unwrap_or("");
        // `export { a } as …` and similar are not export lists
        if !rest.trim().is_empty() && !rest.trim_start().starts_with("//") {
            return None;
        }

        let names = cap
            .name("names")
            .map(|m| m.as_str())
            .unwrap_or("")
            .split(',')
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        let from = match (cap.name("quote"), cap.name("path")) {
            (Some(quote), Some(path)) => Some((
                quote.as_str().chars().next().unwrap_or('\''),
                path.as_str().to_string(),
            )),
            _ => None,
        };

        Some(Self {
            indent: cap.name("indent").map(|m| m.as_str()).unwrap_or("").to_string(),
            names,
            from,
            semicolon: cap.name("semi").is_some(),
            trailing: rest.to_string(),
        })
    }

    pub fn render(&self) -> String {
        let from = match &self.from {
            Some((quote, path)) => format!(" from {q}{}{q}", path, q = quote),
            None => String::new(),
        };
        format!(
            "{}export {{ {} }}{}{}{}",
            self.indent,
            self.names.join(", "),
            from,
            if self.semicolon { ";" } else { "" },
            self.trailing
        )
    }

    pub fn is_local(&self) -> bool {
        self.from.is_none()
    }

    /// Position of the specifier exporting `name` (`name` or `name as alias`)
    fn position_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| n.split_whitespace().next() == Some(name))
    }
}

/// Build `export { name } from '<module_path>';`
pub fn reexport_statement(name: &str, module_path: &str) -> String {
    format!("export {{ {} }} from '{}';", name, module_path)
}

/// Whether a local `export { … }` list in `source` exports `name`
pub fn exports_locally(source: &str, name: &str) -> bool {
    source
        .lines()
        .filter_map(ExportList::parse)
        .any(|list| list.is_local() && list.position_of(name).is_some())
}

/// Whether `source` already forwards `name` from `module_path`
pub fn has_reexport(source: &str, name: &str, module_path: &str) -> bool {
    source.lines().filter_map(ExportList::parse).any(|list| {
        matches!(&list.from, Some((_, path)) if path == module_path) && list.position_of(name).is_some()
    })
}

/// Drop `name` from every local export list, deleting lists that end up empty.
pub fn remove_from_export_lists(source: &str, name: &str) -> String {
    let mut buffer = SourceBuffer::parse(source);
    let mut index = 0;
    while index < buffer.len() {
        let parsed = buffer
            .line(index)
            .and_then(ExportList::parse)
            .filter(|list| list.is_local());
        if let Some(mut list) = parsed {
            if let Some(position) = list.position_of(name) {
                list.names.remove(position);
                if list.names.is_empty() {
                    buffer = buffer.remove_line(index);
                    continue;
                }
                buffer = buffer.replace_line(index, list.render());
            }
        }
        index += 1;
    }
    buffer.into_text()
}

/// Forward `name` from `module_path`, merging into an existing forwarding
/// list for that module or appending a new statement at the end of the file.
pub fn add_reexport(source: &str, name: &str, module_path: &str) -> String {
    if has_reexport(source, name, module_path) {
        return source.to_string();
    }

    let buffer = SourceBuffer::parse(source);
    let existing = buffer.lines().iter().enumerate().find_map(|(index, line)| {
        let list = ExportList::parse(line)?;
        match &list.from {
            Some((_, path)) if path == module_path => Some((index, list)),
            _ => None,
        }
    });

    if let Some((index, mut list)) = existing {
        list.names.push(name.to_string());
        list.names
            .sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        return buffer.replace_line(index, list.render()).into_text();
    }

    let statement = reexport_statement(name, module_path);
    let at = match buffer.lines().last() {
        Some(last) if last.is_empty() => buffer.len() - 1,
        _ => buffer.len(),
    };
    buffer.insert_lines(at, vec![statement]).into_text()
}
