use anyhow::{Context, Result};
use console::{style, Emoji};
use std::path::Path;

use super::move_cmd::config_start;
use crate::analyze::relative_import_path;
use crate::config::RelocateConfig;
use crate::emit::CandidatesOutput;
use crate::scan::{list_candidates, CandidateKind, CandidateQuery};

static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");
static NEW: Emoji<'_, '_> = Emoji("✨ ", "+ ");
static UP: Emoji<'_, '_> = Emoji("⬆️  ", "^ ");

pub fn run_candidates(
    file: &Path,
    dir: &str,
    search: &str,
    root: Option<&Path>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = RelocateConfig::discover(config_path, &config_start(file))
        .context("Failed to load config")?;

    let candidates = list_candidates(&CandidateQuery {
        current_file: file,
        relative_dir: dir,
        search,
        workspace_root: root,
        extensions: &config.source_extensions,
        default_target: &config.default_target,
    });

    if json {
        let output = CandidatesOutput::new(&file.to_string_lossy(), dir, &candidates);
        println!("{}", output.to_json());
        return Ok(());
    }

    for candidate in &candidates {
        let icon = match candidate.kind {
            CandidateKind::Parent => &UP,
            CandidateKind::Directory => &FOLDER,
            CandidateKind::File => &FILE,
            CandidateKind::New => &NEW,
        };
        let path = if candidate.relative_path.is_empty() {
            "."
        } else {
            candidate.relative_path.as_str()
        };
        println!(
            "{}{} {}",
            icon,
            style(path).green(),
            style(format!("({})", candidate.description)).dim()
        );
    }
    Ok(())
}

pub fn run_path(from: &str, to: &str) -> Result<()> {
    println!("{}", relative_import_path(from, to));
    Ok(())
}
