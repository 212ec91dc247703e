use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::Path;

use crate::git::RepoRecord;

/// Rendering parameters. Plain data, no process-wide styling state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub color: bool,
}

impl RenderStyle {
    pub fn plain() -> Self {
        Self { color: false }
    }
}

/// Write the report: a header, one bullet line per repository in discovery
/// order, and a summary when nothing is dirty. Clean entries render green,
/// dirty ones red.
pub fn render(
    records: &[RepoRecord],
    style: RenderStyle,
    home: Option<&Path>,
    out: &mut impl Write,
) -> io::Result<()> {
    let header = "Repository Status";
    if style.color {
        writeln!(out, "{}", header.magenta().bold())?;
    } else {
        writeln!(out, "{header}")?;
    }
    writeln!(out)?;

    for record in records {
        let line = format!(
            "{} ({})",
            display_path(&record.path, home),
            if record.is_clean() { "clean" } else { &record.reason }
        );
        if style.color {
            let bullet = "•".yellow().to_string();
            if record.is_clean() {
                writeln!(out, "{bullet} {}", line.green())?;
            } else {
                writeln!(out, "{bullet} {}", line.red())?;
            }
        } else {
            writeln!(out, "• {line}")?;
        }
    }

    if records.is_empty() {
        writeln!(out, "No git repositories found.")?;
    } else if records.iter().all(RepoRecord::is_clean) {
        writeln!(out)?;
        let summary = format!("All {} repositories clean.", records.len());
        if style.color {
            writeln!(out, "{}", summary.green().bold())?;
        } else {
            writeln!(out, "{summary}")?;
        }
    }

    Ok(())
}

/// Abbreviate paths under the home directory with a leading `~`.
fn display_path(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if let Ok(rest) = path.strip_prefix(home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
