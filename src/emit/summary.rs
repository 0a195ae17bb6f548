use console::{style, Emoji};

use crate::relocate::MoveReport;

static MOVED: Emoji<'_, '_> = Emoji("📦 ", "");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Human readable lines describing a finished (or previewed) move
pub fn render_summary(report: &MoveReport, source: &str, target: &str, dry_run: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let what = match (&report.symbol, report.kind) {
        (Some(name), Some(kind)) => format!("{} {}", kind, style(name).yellow().bold()),
        (Some(name), None) => style(name).yellow().bold().to_string(),
        _ => format!("lines {}-{}", report.moved_lines.0, report.moved_lines.1),
    };
    let verb = if dry_run { "Would move" } else { "Moved" };

    lines.push(format!(
        "{}{} {} {} {}",
        MOVED,
        verb,
        what,
        style("→").dim(),
        style(target).green()
    ));

    if report.conflict {
        lines.push(format!(
            "   {}destination already declared this name; copy marked with a warning",
            WARN
        ));
    }
    if report.source_imported {
        lines.push(format!(
            "   {} now imports it from {}",
            style(source).cyan(),
            style(&report.paths.source_to_target).dim()
        ));
    }
    if report.forwarded {
        lines.push(format!(
            "   {} re-exports it from {}",
            style(source).cyan(),
            style(&report.paths.source_to_target).dim()
        ));
    }
    if !report.carried.is_empty() {
        lines.push(format!(
            "   {} imports {} from {}",
            style(target).green(),
            report.carried.join(", "),
            style(&report.paths.target_to_source).dim()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relocate::MoveStage;
    use crate::types::{DeclarationKind, ModulePathPair};

    fn report() -> MoveReport {
        MoveReport {
            stage: MoveStage::Linked,
            symbol: Some("Test".to_string()),
            kind: Some(DeclarationKind::Interface),
            moved_lines: (2, 4),
            conflict: false,
            exported: true,
            forwarded: false,
            source_imported: true,
            carried: vec!["Other".to_string()],
            paths: ModulePathPair {
                source_to_target: "./target".to_string(),
                target_to_source: "./source".to_string(),
            },
        }
    }

    #[test]
    fn test_summary_lines() {
        console::set_colors_enabled(false);
        let lines = render_summary(&report(), "source.ts", "target.ts", false);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Moved interface Test"));
        assert!(lines[1].contains("./target"));
        assert!(lines[2].contains("imports Other from ./source"));
    }

    #[test]
    fn test_dry_run_wording() {
        console::set_colors_enabled(false);
        let mut report = report();
        report.symbol = None;
        report.kind = None;
        let lines = render_summary(&report, "a.ts", "b.ts", true);
        assert!(lines[0].contains("Would move lines 2-4"));
    }
}
