//! Tabular rendering of the task list.
//!
//! Pure projection: takes a slice of tasks and produces the table string the
//! `list` command prints. Styling degrades to plain text automatically when
//! stdout is not a terminal.

use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use taskpad_core::task::Task;

/// Titles wider than this are truncated on display; the stored title is
/// never modified.
const MAX_TITLE_WIDTH: usize = 40;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const COLUMN_GAP: &str = "  ";

/// Creation timestamp in local time, minute precision.
pub fn format_timestamp(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

fn status_glyph(done: bool) -> ColoredString {
    if done {
        "✓".green()
    } else {
        "✗".red()
    }
}

/// Render the full task table: position (1-based), title, creation time and
/// a status glyph per task, with a styled header row. Done tasks render with
/// a struck-through title.
pub fn render_table(tasks: &[Task]) -> String {
    let rows: Vec<(String, String, String, bool)> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            (
                (idx + 1).to_string(),
                truncate_to_width(&task.title, MAX_TITLE_WIDTH),
                format_timestamp(&task.created_at),
                task.done,
            )
        })
        .collect();

    let index_width = column_width("#", rows.iter().map(|row| row.0.as_str()));
    let title_width = column_width("Task", rows.iter().map(|row| row.1.as_str()));
    let created_width = column_width("Created", rows.iter().map(|row| row.2.as_str()));

    let mut lines = vec![
        [
            pad_cell(&"#".cyan().to_string(), "#", index_width),
            pad_cell(&"Task".cyan().to_string(), "Task", title_width),
            pad_cell(&"Created".cyan().to_string(), "Created", created_width),
            "Status".cyan().to_string(),
        ]
        .join(COLUMN_GAP),
        "-".repeat(index_width + title_width + created_width + "Status".width() + 3 * COLUMN_GAP.len()),
    ];

    for (index, title, created, done) in &rows {
        let styled_title = if *done {
            title.strikethrough().to_string()
        } else {
            title.clone()
        };
        lines.push(
            [
                pad_cell(index, index, index_width),
                pad_cell(&styled_title, title, title_width),
                pad_cell(created, created, created_width),
                status_glyph(*done).to_string(),
            ]
            .join(COLUMN_GAP),
        );
    }

    lines.join("\n") + "\n"
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.width())
        .chain([header.width()])
        .max()
        .unwrap_or(0)
}

/// Pad with spaces to `width` display columns. The plain text is measured
/// instead of the rendered cell so ANSI escapes don't skew the padding.
fn pad_cell(rendered: &str, plain: &str, width: usize) -> String {
    let fill = width.saturating_sub(plain.width());
    format!("{rendered}{}", " ".repeat(fill))
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}
