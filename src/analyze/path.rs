//! Module-relative import paths between two file locations.
//!
//! Works purely on the path strings: nothing here touches the file system.

use crate::types::ModulePathPair;

/// Normalize separators to `/` and drop the extension of the last segment.
fn clean_module_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let file_start = normalized.rfind('/').map(|i| i + 1).unwrap_or(0);
    match normalized[file_start..].rfind('.') {
        Some(dot) if dot > 0 => normalized[..file_start + dot].to_string(),
        _ => normalized,
    }
}

fn parent_dir(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

/// Relative import path from `from_file` to `to_file`
///
/// "src/components/source.ts" → "src/utils/target.ts" gives "../utils/target"
pub fn relative_import_path(from_file: &str, to_file: &str) -> String {
    let from = clean_module_path(from_file);
    let to = clean_module_path(to_file);

    if parent_dir(&from) == parent_dir(&to) {
        let basename = to.rsplit('/').next().unwrap_or("");
        return format!("./{}", basename);
    }

    let from_parts: Vec<&str> = from.split('/').collect();
    let to_parts: Vec<&str> = to.split('/').collect();
    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // The file's own segment is not a step
    let back_steps = (from_parts.len() - common).saturating_sub(1);
    let prefix = if back_steps > 0 {
        vec![".."; back_steps].join("/")
    } else {
        ".".to_string()
    };

    let remaining = to_parts[common..].join("/");
    if remaining.is_empty() {
        prefix
    } else {
        format!("{}/{}", prefix, remaining)
    }
}

impl ModulePathPair {
    pub fn between(source_file: &str, target_file: &str) -> Self {
        Self {
            source_to_target: relative_import_path(source_file, target_file),
            target_to_source: relative_import_path(target_file, source_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_directory() {
        assert_eq!(
            relative_import_path("src/source.ts", "src/target.ts"),
            "./target"
        );
        assert_eq!(relative_import_path("source.ts", "types.tsx"), "./types");
    }

    #[test]
    fn test_sibling_directories() {
        assert_eq!(
            relative_import_path("src/components/source.ts", "src/utils/target.ts"),
            "../utils/target"
        );
        assert_eq!(
            relative_import_path("src/utils/target.ts", "src/components/source.ts"),
            "../components/source"
        );
    }

    #[test]
    fn test_deeper_and_shallower() {
        assert_eq!(
            relative_import_path("src/a.ts", "src/models/user/types.ts"),
            "./models/user/types"
        );
        assert_eq!(
            relative_import_path("src/models/user/types.ts", "src/a.ts"),
            "../../a"
        );
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(
            relative_import_path(r"C:\proj\src\components\source.ts", r"C:\proj\src\utils\target.ts"),
            "../utils/target"
        );
        assert_eq!(
            relative_import_path(r"src\components\source.ts", "src/utils/target.ts"),
            "../utils/target"
        );
    }

    #[test]
    fn test_dotted_directories_keep_their_names() {
        assert_eq!(
            relative_import_path("src/v1.2/a.ts", "src/v1.2/b.spec.ts"),
            "./b.spec"
        );
    }

    #[test]
    fn test_target_is_ancestor_segment() {
        assert_eq!(relative_import_path("src/a/b.ts", "src/a"), ".");
        assert_eq!(relative_import_path("src/a", "src/a/b.ts"), "./b");
    }

    #[test]
    fn test_module_path_pair() {
        let pair = ModulePathPair::between("src/components/source.ts", "src/utils/target.ts");
        assert_eq!(pair.source_to_target, "../utils/target");
        assert_eq!(pair.target_to_source, "../components/source");
    }
}
