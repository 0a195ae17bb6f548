use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use serde::Serialize;
use tracing::warn;

const NEW_FILE_EXTENSION: &str = "ts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Parent,
    Directory,
    File,
    New,
}

/// One entry of the destination picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub label: String,
    pub description: String,
    /// Relative to the source file's directory, `/`-separated
    pub relative_path: String,
}

/// Where the listing happens and what it may show
#[derive(Debug, Clone)]
pub struct CandidateQuery<'a> {
    pub current_file: &'a Path,
    /// Directory being browsed, relative to the current file's directory
    pub relative_dir: &'a str,
    pub search: &'a str,
    /// Browsing never goes above this directory; defaults to the file's own
    pub workspace_root: Option<&'a Path>,
    pub extensions: &'a [String],
    pub default_target: &'a str,
}

/// Lexically resolve `.` and `..` without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let climbs_out = matches!(out.components().next_back(), None | Some(Component::ParentDir));
                if climbs_out {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// `path` relative to `base`, both already normalized, with `/` separators
fn relative_to(base: &Path, path: &Path) -> String {
    let base: Vec<_> = base.components().collect();
    let path: Vec<_> = path.components().collect();
    let common = base.iter().zip(&path).take_while(|(a, b)| a == b).count();

    let ups = std::iter::repeat("..".to_string()).take(base.len() - common);
    let downs = path[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    ups.chain(downs).collect::<Vec<_>>().join("/")
}

fn has_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|s| s == ext))
        .unwrap_or(false)
}

/// File name for a new destination typed as `search`.
///
/// Empty input gives `default_target`; a bare name gets `.ts`; an unknown
/// extension is replaced with `.ts`.
pub fn new_file_name(search: &str, default_target: &str, extensions: &[String]) -> String {
    let name = if search.trim().is_empty() {
        default_target.to_string()
    } else {
        search.trim().to_string()
    };
    if has_extension(&name, extensions) {
        return name;
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 && !name[dot..].contains('/') => {
            format!("{}.{}", &name[..dot], NEW_FILE_EXTENSION)
        }
        _ => format!("{}.{}", name, NEW_FILE_EXTENSION),
    }
}

fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

fn sort_by_name(names: &mut [String]) {
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
}

/// List destinations: parent, directories, source files, then a new file.
///
/// Ignore files (`.gitignore`, `.ignore`) and hidden entries are skipped.
pub fn list_candidates(query: &CandidateQuery<'_>) -> Vec<Candidate> {
    let current_file = normalize(&absolute(query.current_file));
    let file_dir = current_file.parent().map(Path::to_path_buf).unwrap_or_default();
    let current_dir = normalize(&file_dir.join(query.relative_dir));
    let limit = query
        .workspace_root
        .map(|root| normalize(&absolute(root)))
        .unwrap_or_else(|| file_dir.clone());

    let mut items = Vec::new();

    if current_dir != limit {
        if let Some(parent) = current_dir.parent() {
            let name = parent
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "..".to_string());
            items.push(Candidate {
                kind: CandidateKind::Parent,
                label: "..".to_string(),
                description: format!("Go to {}", name),
                relative_path: relative_to(&file_dir, parent),
            });
        }
    }

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    let walker = WalkBuilder::new(&current_dir).max_depth(Some(1)).build();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !matches_search(&name, query.search) {
            continue;
        }
        if file_type.is_dir() {
            dirs.push(name);
        } else if file_type.is_file()
            && has_extension(&name, query.extensions)
            && normalize(entry.path()) != current_file
        {
            files.push(name);
        }
    }
    sort_by_name(&mut dirs);
    sort_by_name(&mut files);

    for name in dirs {
        items.push(Candidate {
            kind: CandidateKind::Directory,
            relative_path: relative_to(&file_dir, &current_dir.join(&name)),
            label: name,
            description: "Directory".to_string(),
        });
    }
    for name in files {
        let relative_path = relative_to(&file_dir, &current_dir.join(&name));
        items.push(Candidate {
            kind: CandidateKind::File,
            description: relative_path.clone(),
            label: name,
            relative_path,
        });
    }

    let new_name = new_file_name(query.search, query.default_target, query.extensions);
    let location = if query.relative_dir.is_empty() {
        "current directory"
    } else {
        query.relative_dir
    };
    items.push(Candidate {
        kind: CandidateKind::New,
        label: "New File".to_string(),
        description: format!("Create '{}' in {}", new_name, location),
        relative_path: relative_to(&file_dir, &current_dir.join(&new_name)),
    });

    items
}
