//! Import rewriting for a symbol that moved from one file to another.

use std::collections::BTreeSet;

use tracing::debug;

use crate::analyze::declaration::{declared_names, declares, referenced_identifiers, references};
use crate::analyze::imports::{find_in_buffer, import_statement, imported_names, merge_imports};
use crate::analyze::prologue::insert_after_directives_and_comments;
use crate::analyze::SourceBuffer;
use crate::types::{ModulePathPair, MoveResult};

/// Which imports a link step added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linkage {
    pub paths: ModulePathPair,
    /// The source now imports the moved symbol from the target
    pub source_imported: bool,
    /// Names the target now imports back from the source
    pub carried: Vec<String>,
}

/// Import `name` from `module_path`: merge into an existing import of that
/// module, or insert a new statement after the prologue.
pub fn add_named_import(code: &str, name: &str, module_path: &str) -> String {
    let buffer = SourceBuffer::parse(code);
    match find_in_buffer(&buffer, module_path) {
        Some(existing) => {
            let merged = merge_imports(&existing.raw_text, name);
            buffer.replace_line(existing.line_index, merged).into_text()
        }
        None => insert_after_directives_and_comments(code, &import_statement(name, module_path)),
    }
}

/// Rewrite imports on both sides of a move of `symbol_name`.
///
/// The source imports the symbol from the target when it still uses it.
/// The target imports, from the source, every name it uses that the source
/// declares and the target neither declares nor already imports.
pub fn update_imports_for_move(
    source_file_path: &str,
    target_file_path: &str,
    symbol_name: &str,
    source_code: &str,
    target_code: &str,
) -> MoveResult {
    link_move(
        source_file_path,
        target_file_path,
        symbol_name,
        source_code,
        target_code,
        None,
    )
    .0
}

/// Same as [`update_imports_for_move`], reporting what was linked.
///
/// `moved_text` narrows the names considered for importing back into the
/// target to those used by the moved code; `None` considers the whole target.
pub fn link_move(
    source_file_path: &str,
    target_file_path: &str,
    symbol_name: &str,
    source_code: &str,
    target_code: &str,
    moved_text: Option<&str>,
) -> (MoveResult, Linkage) {
    let paths = ModulePathPair::between(source_file_path, target_file_path);

    let mut source = source_code.to_string();
    let source_imported =
        references(source_code, symbol_name) && !declares(source_code, symbol_name);
    if source_imported {
        debug!(symbol = symbol_name, path = %paths.source_to_target, "importing moved symbol into source");
        source = add_named_import(&source, symbol_name, &paths.source_to_target);
    }

    let target_locals = declared_names(target_code);
    let target_imports: BTreeSet<String> = imported_names(target_code).into_iter().collect();
    let carried: Vec<String> = referenced_identifiers(moved_text.unwrap_or(target_code))
        .into_iter()
        .filter(|name| name != symbol_name)
        .filter(|name| !target_locals.contains(name) && !target_imports.contains(name))
        .filter(|name| declares(source_code, name))
        .collect();

    let mut target = target_code.to_string();
    for name in &carried {
        debug!(symbol = %name, path = %paths.target_to_source, "importing source declaration into target");
        target = add_named_import(&target, name, &paths.target_to_source);
    }

    (
        MoveResult {
            updated_source_code: source,
            updated_target_code: target,
        },
        Linkage {
            paths,
            source_imported,
            carried,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_gets_import_when_symbol_still_used() {
        let source = "\nconst test: Test = { prop: 'x' };\n";
        let target = "export const x = 1;\nexport interface Test {\n  prop: string;\n}\n";
        let result = update_imports_for_move("src/source.ts", "src/target.ts", "Test", source, target);
        assert_eq!(
            result.updated_source_code,
            "\nimport { Test } from './target';\n\nconst test: Test = { prop: 'x' };\n"
        );
        assert_eq!(result.updated_target_code, target);
    }

    #[test]
    fn test_unused_symbol_adds_no_import() {
        let source = "export const y = 2;\n";
        let target = "export interface Test {}\n";
        let result = update_imports_for_move("src/source.ts", "src/target.ts", "Test", source, target);
        assert_eq!(result.updated_source_code, source);
    }

    #[test]
    fn test_merges_into_existing_import() {
        let source = "import { Other } from './target';\nconst t: Test = {};\nconst o: Other = {};";
        let target = "export interface Other {}\nexport interface Test {}";
        let result = update_imports_for_move("src/source.ts", "src/target.ts", "Test", source, target);
        assert_eq!(
            result.updated_source_code,
            "import { Other, Test } from './target';\nconst t: Test = {};\nconst o: Other = {};"
        );
    }

    #[test]
    fn test_different_directories() {
        let source = "const t: Test = {};";
        let target = "export interface Test {}";
        let result = update_imports_for_move(
            "src/components/source.ts",
            "src/utils/target.ts",
            "Test",
            source,
            target,
        );
        assert!(result
            .updated_source_code
            .contains("import { Test } from '../utils/target';"));
    }

    #[test]
    fn test_target_imports_names_left_in_source() {
        let source = "export interface Other {}\n";
        let target = "import { existingImport } from './source';\nexport interface Test {\n  prop: Other;\n}\n";
        let (result, linkage) =
            link_move("src/source.ts", "src/target.ts", "Test", source, target, None);
        assert_eq!(linkage.carried, vec!["Other"]);
        assert!(!linkage.source_imported);
        assert!(result
            .updated_target_code
            .starts_with("import { existingImport, Other } from './source';\n"));
    }

    #[test]
    fn test_target_locals_are_not_imported() {
        let source = "const result = 1;\nexport interface Other {}\n";
        let target = "export function run() {\n  const result = 2;\n  return result;\n}\n";
        let (_, linkage) = link_move("a.ts", "b.ts", "run", source, target, None);
        assert!(linkage.carried.is_empty());
    }

    #[test]
    fn test_moved_text_narrows_carried_names() {
        let source = "export const a = 1;\nexport const b = 2;\n";
        let target = "const x = a;\nexport function f() { return b; }\n";
        let (_, linkage) = link_move(
            "a.ts",
            "b.ts",
            "f",
            source,
            target,
            Some("export function f() { return b; }"),
        );
        assert_eq!(linkage.carried, vec!["b"]);
    }

    #[test]
    fn test_property_keys_do_not_import_source_names() {
        let source = "const id = 1;\nconst u: User = { id: 'x' };\n";
        let target = "export interface User {\n  id: string;\n  label?: string;\n}\n";
        let (result, linkage) = link_move("a.ts", "b.ts", "User", source, target, Some(target));
        assert!(linkage.carried.is_empty());
        assert_eq!(result.updated_target_code, target);
    }

    #[test]
    fn test_is_idempotent() {
        let source = "'use strict';\nconst t: Test = {};\n";
        let target = "export interface Test { o: Other }\n";
        let source_with_other = format!("export interface Other {{}}\n{}", source);
        let first = update_imports_for_move("src/a.ts", "src/b.ts", "Test", &source_with_other, target);
        let second = update_imports_for_move(
            "src/a.ts",
            "src/b.ts",
            "Test",
            &first.updated_source_code,
            &first.updated_target_code,
        );
        assert_eq!(first, second);
        assert!(first.updated_target_code.contains("import { Other } from './a';"));
    }
}
