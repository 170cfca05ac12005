//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! The `render_*` functions build strings and never print.

use std::fmt::Write;

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::VersionRecord;
use crate::planner::IncrementPlan;
use crate::scanner::RepositoryIndex;

const SEMVER_NOTE: &str =
    "Version order is based on the semantic versioning specification (http://semver.org/)";
const UNTAGGED_NOTE: &str = "Commits without version tags are not shown";
const NO_VERSION: &str = "Could not find a single version";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render the versions of an index as a table
///
/// With `all` every version is listed highest first; otherwise each
/// repository shows its highest version, or `N/A` when it has none. A
/// single-repository index leaves out the repository column.
///
/// # Arguments
/// * `index` - Repositories and their versions
/// * `all` - List every version instead of only the highest
/// * `date_format` - chrono format string for the commit date
pub fn render_version_table(index: &RepositoryIndex, all: bool, date_format: &str) -> String {
    if index.version_count() == 0 {
        return format!("{}\n", NO_VERSION);
    }

    let single = match index.paths().as_slice() {
        [path] => Some(path.display().to_string()),
        _ => None,
    };

    let title = match (&single, all) {
        (Some(path), true) => format!("All versions of '{}'", path),
        (Some(path), false) => format!("Highest version of '{}'", path),
        (None, true) => "All versions per repository".to_string(),
        (None, false) => "Highest versions per repository".to_string(),
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (path, versions) in index.iter() {
        let records: Vec<VersionRecord> = if all {
            versions.iter().cloned().collect()
        } else {
            vec![versions.highest()]
        };

        for record in records {
            let mut row = Vec::with_capacity(4);
            if single.is_none() {
                row.push(path.display().to_string());
            }
            row.extend(version_cells(&record, date_format));
            rows.push(row);
        }
    }

    let mut header = vec!["Date", "Commit", "Version"];
    if single.is_none() {
        header.insert(0, "Repository");
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!("{}\n", style(title).bold());
    if all {
        out.push_str("(ordered from the highest to the lowest)\n");
    }
    out.push('\n');

    let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    out.push_str(&format!(
        "{}\n",
        style(table_line(&header, &widths)).underlined()
    ));
    for row in &rows {
        out.push_str(&table_line(row, &widths));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("{}\n", style(SEMVER_NOTE).dim()));
    out.push_str(&format!("{}\n", style(UNTAGGED_NOTE).dim()));
    out
}

/// Render the summary shown before a version increase is confirmed
pub fn render_plan(plan: &IncrementPlan) -> String {
    let current = if plan.current.is_sentinel() {
        "N/A".to_string()
    } else {
        plan.current.to_string()
    };

    format!(
        "{}\n  Branch:  {}\n  Commit:  {} {} ({})\n  From:    {}\n  To:      {}\n",
        style("Version increase").bold(),
        plan.branch,
        plan.head.short_hash(),
        plan.head.subject,
        plan.head.author,
        style(current).red(),
        style(plan.tag_name()).green()
    )
}

fn version_cells(record: &VersionRecord, date_format: &str) -> [String; 3] {
    if record.is_sentinel() {
        return [String::new(), String::new(), "N/A".to_string()];
    }

    let mut date = String::new();
    if let Some(local) = record.date() {
        if write!(date, "{}", local.format(date_format)).is_err() {
            date = local.to_rfc3339();
        }
    }

    let commit = record.commit();
    let short = commit.get(..7).unwrap_or(commit);
    [date, short.to_string(), record.to_string()]
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
