//! Output formatting for CLI display
//!
//! Plain-text rendering of tree rows and selected items for the
//! non-interactive commands. Matches are highlighted with `colored`;
//! quiet mode drops decoration and prints tab-separated fields for scripts.

use crate::search::Segment;
use crate::state::SelectedItem;
use crate::taxonomy::NodeKind;
use crate::view::Row;
use colored::Colorize;

/// Join name segments, highlighting the matched ones
#[must_use]
pub fn highlight_segments(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.matched {
                segment.text.yellow().bold().to_string()
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

/// Marker shown before a node name
#[must_use]
pub const fn expansion_marker(row: &Row<'_>) -> &'static str {
    match (row.kind(), row.has_children, row.expanded) {
        (NodeKind::RecordType, _, _) | (_, false, _) => "·",
        (_, true, true) => "▾",
        (_, true, false) => "▸",
    }
}

/// Format a single tree row
#[must_use]
pub fn format_row(row: &Row<'_>, quiet: bool) -> String {
    let line_id = row.line_id.map_or_else(String::new, |id| id.to_string());

    if quiet {
        return format!("{line_id}\t{}", row.name());
    }

    let indent = "  ".repeat(row.depth());
    let selection = if row.selected {
        "●".green().to_string()
    } else if row.selectable {
        "○".to_string()
    } else {
        "○".dimmed().to_string()
    };
    let name = if row.selected {
        highlight_segments(&row.segments).bold().to_string()
    } else {
        highlight_segments(&row.segments)
    };

    format!(
        "{:>4} {indent}{} {selection} {name}",
        line_id.dimmed(),
        expansion_marker(row)
    )
}

/// Format every row, one per line
#[must_use]
pub fn format_rows(rows: &[Row<'_>], quiet: bool) -> String {
    rows.iter()
        .map(|row| format_row(row, quiet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a selected item
#[must_use]
pub fn format_selected(item: &SelectedItem, quiet: bool) -> String {
    if quiet {
        let line_id = item.line_id.map_or_else(|| "-".to_string(), |id| id.to_string());
        return format!("{line_id}\t{}\t{}", item.path.key(), item.name());
    }

    format!(
        "{} {} {}\n  {} {}\n  {} {}",
        item.kind().label().cyan().bold(),
        item.name().bold(),
        item.line_label().dimmed(),
        "path:".dimmed(),
        item.breadcrumb(),
        "key: ".dimmed(),
        item.path.key()
    )
}
