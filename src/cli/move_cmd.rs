use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::tui::{confirm_conflict, pick_destination, print_rule, print_success};
use crate::analyze::HeuristicOutline;
use crate::config::RelocateConfig;
use crate::emit::{render_summary, MoveOutput};
use crate::relocate::{plan_move, ConflictPolicy, MoveOptions, MovePlan, MoveRequest, ReexportPolicy, Selection};
use crate::scan::normalize;

/// Everything `relocate move` was asked to do
#[derive(Debug, Clone)]
pub struct MoveArgs {
    pub file: PathBuf,
    pub selection: Selection,
    pub to: Option<String>,
    pub dry_run: bool,
    pub json: bool,
    pub on_conflict: Option<ConflictPolicy>,
    pub reexport: Option<ReexportPolicy>,
    pub yes: bool,
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Directory config discovery starts from: the file's own, made absolute
pub(crate) fn config_start(file: &Path) -> PathBuf {
    let dir = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::canonicalize(&dir).unwrap_or(dir)
}

/// Destination path: `to` resolved against the source file's directory.
fn resolve_target(file: &Path, to: &str) -> PathBuf {
    let dir = file.parent().unwrap_or(Path::new(""));
    normalize(&dir.join(to))
}

fn read_target(path: &Path) -> Result<String> {
    if path.exists() {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    } else {
        debug!(path = %path.display(), "destination does not exist yet");
        Ok(String::new())
    }
}

fn stage(path: &Path, content: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut file = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to stage write in {}", dir.display()))?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Write both buffers. Nothing is replaced until both are staged.
fn commit(plan: &MovePlan, source: &Path, target: &Path) -> Result<()> {
    let staged_target = stage(target, &plan.result.updated_target_code)?;
    let staged_source = stage(source, &plan.result.updated_source_code)?;

    staged_target
        .persist(target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    staged_source
        .persist(source)
        .with_context(|| format!("Failed to write {}", source.display()))?;
    Ok(())
}

fn print_buffer(title: &str, content: &str) {
    print_rule();
    println!("{}", style(title).bold());
    print_rule();
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
}

pub fn run_move(args: &MoveArgs, config_path: Option<&Path>) -> Result<()> {
    let config = RelocateConfig::discover(config_path, &config_start(&args.file))
        .context("Failed to load config")?;

    let source_code = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let to = match &args.to {
        Some(to) => to.clone(),
        None if console::user_attended() && !args.json => pick_destination(&args.file, None, &config)?,
        None => config.default_target.clone(),
    };
    if !config.is_source_file(&to) {
        warn!(destination = %to, "destination does not have a configured source extension");
    }
    let target = resolve_target(&args.file, &to);
    let target_code = read_target(&target)?;

    let source_name = display_path(&args.file);
    let target_name = display_path(&target);

    let mut options: MoveOptions = config.move_options();
    if let Some(policy) = args.on_conflict {
        options.on_conflict = policy;
    }
    if let Some(policy) = args.reexport {
        options.reexport = policy;
    }

    let request = MoveRequest {
        source_path: &source_name,
        target_path: &target_name,
        source_code: &source_code,
        target_code: &target_code,
        selection: args.selection.clone(),
    };
    let confirm = |name: &str| {
        if args.yes {
            true
        } else if console::user_attended() {
            confirm_conflict(name, &target_name)
        } else {
            false
        }
    };

    let mut plan = plan_move(&request, options, &HeuristicOutline, confirm)?;

    if args.dry_run {
        if args.json {
            println!("{}", MoveOutput::from_plan(&plan, true).to_json());
        } else {
            for line in render_summary(&plan.report, &source_name, &target_name, true) {
                println!("{}", line);
            }
            print_buffer(&source_name, &plan.result.updated_source_code);
            print_buffer(&target_name, &plan.result.updated_target_code);
        }
        return Ok(());
    }

    commit(&plan, &args.file, &target)?;
    plan.mark_saved();
    info!(source = %source_name, target = %target_name, symbol = ?plan.report.symbol, "move committed");

    if args.json {
        println!("{}", MoveOutput::from_plan(&plan, false).to_json());
    } else {
        for line in render_summary(&plan.report, &source_name, &target_name, false) {
            println!("{}", line);
        }
        print_success("Both files written");
    }
    Ok(())
}
