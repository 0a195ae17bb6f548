//! Conflict detection and export decisions for a moved declaration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analyze::declaration::{ensure_exported, has_move_conflict};
use crate::analyze::exports::{add_reexport, exports_locally, remove_from_export_lists};
use crate::analyze::imports::remove_import_from_source;
use crate::types::DeclarationKind;

/// What to do when the destination already declares the moved name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave both files untouched
    #[default]
    Abort,
    /// Move anyway, with a warning comment above the copy
    Annotate,
    /// Ask before moving; declining aborts
    Ask,
}

/// Whether the original file keeps forwarding the moved symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReexportPolicy {
    /// Never forward; importers must follow the symbol
    Never,
    /// Forward symbols the original file exported
    #[default]
    Exported,
    /// Always forward
    Always,
}

/// Outcome of the conflict check for one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    NoConflict,
    Proceed { annotate: bool },
    Abort,
}

pub fn conflict_marker(name: &str) -> String {
    format!("// WARNING: Duplicate symbol \"{}\" below", name)
}

/// Decide how to handle a name clash in `target` for a moved `kind` declaration.
///
/// `confirm` is only consulted for [`ConflictPolicy::Ask`]; it receives the
/// clashing name and returns whether to go ahead.
pub fn check_conflict<F>(
    target: &str,
    name: &str,
    kind: Option<DeclarationKind>,
    policy: ConflictPolicy,
    confirm: F,
) -> ConflictDecision
where
    F: FnOnce(&str) -> bool,
{
    if !has_move_conflict(target, name, kind) {
        return ConflictDecision::NoConflict;
    }
    match policy {
        ConflictPolicy::Abort => ConflictDecision::Abort,
        ConflictPolicy::Annotate => ConflictDecision::Proceed { annotate: true },
        ConflictPolicy::Ask => {
            if confirm(name) {
                ConflictDecision::Proceed { annotate: true }
            } else {
                ConflictDecision::Abort
            }
        }
    }
}

/// Whether the source file should forward `name` after it moves away
pub fn should_forward(policy: ReexportPolicy, source: &str, name: &str, was_exported: bool) -> bool {
    match policy {
        ReexportPolicy::Never => false,
        ReexportPolicy::Always => true,
        ReexportPolicy::Exported => was_exported || exports_locally(source, name),
    }
}

/// Replace local exports of `name` with `export { name } from '<source_to_target>';`
pub fn forward_reexport(source: &str, name: &str, source_to_target: &str) -> String {
    let without_local = remove_from_export_lists(source, name);
    add_reexport(&without_local, name, source_to_target)
}

/// The moved copy is exported when it was before, or when the original file
/// still needs it through an import or a forwarding export.
pub fn needs_export_marker(was_exported: bool, still_referenced: bool, forwarded: bool) -> bool {
    was_exported || still_referenced || forwarded
}

/// Drop the target's import of `name` from the file it just moved out of.
pub fn remove_self_import(target: &str, target_to_source: &str, name: &str) -> String {
    remove_import_from_source(target, target_to_source, name)
}

/// Export every declaration the target now imports back from the source.
pub fn export_carried(source: &str, carried: &[String]) -> String {
    carried
        .iter()
        .fold(source.to_string(), |text, name| ensure_exported(&text, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERFACE: Option<DeclarationKind> = Some(DeclarationKind::Interface);

    #[test]
    fn test_no_conflict() {
        let decision = check_conflict("export const x = 1;", "Test", INTERFACE, ConflictPolicy::Abort, |_| true);
        assert_eq!(decision, ConflictDecision::NoConflict);
    }

    #[test]
    fn test_conflict_policies() {
        let target = "interface Test {\n  otherProp: number;\n}";
        assert_eq!(
            check_conflict(target, "Test", INTERFACE, ConflictPolicy::Abort, |_| true),
            ConflictDecision::Abort
        );
        assert_eq!(
            check_conflict(target, "Test", INTERFACE, ConflictPolicy::Annotate, |_| false),
            ConflictDecision::Proceed { annotate: true }
        );
        assert_eq!(
            check_conflict(target, "Test", INTERFACE, ConflictPolicy::Ask, |_| false),
            ConflictDecision::Abort
        );
        assert_eq!(
            check_conflict(target, "Test", INTERFACE, ConflictPolicy::Ask, |name| name == "Test"),
            ConflictDecision::Proceed { annotate: true }
        );
    }

    #[test]
    fn test_variable_redeclaration_is_a_conflict() {
        let target = "const limit = 99;\n";
        let variable = Some(DeclarationKind::Variable);
        assert_eq!(
            check_conflict(target, "limit", variable, ConflictPolicy::Abort, |_| true),
            ConflictDecision::Abort
        );
        assert_eq!(
            check_conflict(target, "limit", INTERFACE, ConflictPolicy::Abort, |_| true),
            ConflictDecision::NoConflict
        );
    }

    #[test]
    fn test_should_forward() {
        let source = "export { a, Test };";
        assert!(should_forward(ReexportPolicy::Exported, source, "Test", false));
        assert!(should_forward(ReexportPolicy::Exported, "", "Test", true));
        assert!(!should_forward(ReexportPolicy::Exported, "", "Test", false));
        assert!(!should_forward(ReexportPolicy::Never, source, "Test", true));
        assert!(should_forward(ReexportPolicy::Always, "", "Test", false));
    }

    #[test]
    fn test_forward_reexport() {
        let source = "const a = 1;\nexport { a, Test };\n";
        assert_eq!(
            forward_reexport(source, "Test", "./target"),
            "const a = 1;\nexport { a };\nexport { Test } from './target';\n"
        );
    }

    #[test]
    fn test_needs_export_marker() {
        assert!(needs_export_marker(true, false, false));
        assert!(needs_export_marker(false, true, false));
        assert!(needs_export_marker(false, false, true));
        assert!(!needs_export_marker(false, false, false));
    }

    #[test]
    fn test_remove_self_import() {
        let target = "import { Helper, Test } from './source';\nexport interface Test {}\n";
        assert_eq!(
            remove_self_import(target, "./source", "Test"),
            "import { Helper } from './source';\nexport interface Test {}\n"
        );
    }

    #[test]
    fn test_export_carried() {
        let source = "interface A {}\ntype B = string;\nexport const c = 1;\n";
        let carried = vec!["A".to_string(), "B".to_string(), "c".to_string()];
        assert_eq!(
            export_carried(source, &carried),
            "export interface A {}\nexport type B = string;\nexport const c = 1;\n"
        );
    }
}
