use anyhow::{Context, Result};
use console::style;
use inquire::{Confirm, Select, Text};
use std::fmt;
use std::path::Path;

use super::theme::relocate_theme;
use crate::config::RelocateConfig;
use crate::scan::{list_candidates, new_file_name, Candidate, CandidateKind, CandidateQuery};

struct Choice(Candidate);

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.0.kind {
            CandidateKind::Parent => "↑",
            CandidateKind::Directory => "▸",
            CandidateKind::File => " ",
            CandidateKind::New => "+",
        };
        write!(f, "{} {}  {}", icon, self.0.label, style(&self.0.description).dim())
    }
}

/// Browse for a destination starting next to `current_file`.
///
/// Returns the chosen path relative to the file's directory.
pub fn pick_destination(
    current_file: &Path,
    workspace_root: Option<&Path>,
    config: &RelocateConfig,
) -> Result<String> {
    let mut relative_dir = String::new();

    loop {
        let candidates = list_candidates(&CandidateQuery {
            current_file,
            relative_dir: &relative_dir,
            search: "",
            workspace_root,
            extensions: &config.source_extensions,
            default_target: &config.default_target,
        });
        let options: Vec<Choice> = candidates.into_iter().map(Choice).collect();
        let location = if relative_dir.is_empty() { "." } else { relative_dir.as_str() };

        let Choice(picked) = Select::new(&format!("Move to ({})", location), options)
            .with_render_config(relocate_theme())
            .with_page_size(15)
            .prompt()
            .context("Destination selection cancelled")?;

        match picked.kind {
            CandidateKind::Parent | CandidateKind::Directory => relative_dir = picked.relative_path,
            CandidateKind::File => return Ok(picked.relative_path),
            CandidateKind::New => {
                let name = Text::new("New file name:")
                    .with_default(&config.default_target)
                    .with_render_config(relocate_theme())
                    .prompt()
                    .context("Destination selection cancelled")?;
                let name = new_file_name(&name, &config.default_target, &config.source_extensions);
                return Ok(if relative_dir.is_empty() {
                    name
                } else {
                    format!("{}/{}", relative_dir, name)
                });
            }
        }
    }
}

/// Ask whether to move `name` into a file that already declares it.
/// Anything but an explicit yes declines.
pub fn confirm_conflict(name: &str, target: &str) -> bool {
    Confirm::new(&format!(
        "{} already declares `{}`. Move it anyway?",
        target, name
    ))
    .with_default(false)
    .with_help_message("The moved copy will be marked with a warning comment")
    .with_render_config(relocate_theme())
    .prompt()
    .unwrap_or(false)
}
