// Output formatting utilities

use crate::dashboard::Dashboard;
use crate::filter::{importance_label, status_label, Axis, BoardFilter, LabelTier};
use crate::models::{Bug, BugTask, Card};
use crate::repo::ImportRecord;
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

/// Narrowest milestone column still worth drawing
const MIN_MILESTONE_COLUMN: usize = 6;

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Apply bold formatting if in TTY mode
fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn dim_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_DIM, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Truncate to `width` characters, marking the cut with ".."
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 2 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 2).collect();
    cut.push_str("..");
    cut
}

/// Text pieces of one cell, each with its label tier
type Segments = Vec<(String, LabelTier)>;

/// Fit segments into `width` columns, color them, and pad to `width`
fn render_segments(segments: &[(String, LabelTier)], width: usize, is_tty: bool) -> String {
    let plain: String = segments.iter().map(|(text, _)| text.as_str()).collect();
    let plain_len = plain.chars().count();
    if plain_len > width || !is_tty {
        let fitted = truncate(&plain, width);
        let pad = width.saturating_sub(fitted.chars().count());
        return format!("{}{}", fitted, " ".repeat(pad));
    }

    let mut out = String::new();
    for (text, tier) in segments {
        match tier.ansi_fg() {
            Some(color) => out.push_str(&format!("{}{}{}", color, text, ANSI_RESET)),
            None => out.push_str(text),
        }
    }
    out.push_str(&" ".repeat(width - plain_len));
    out
}

/// Column geometry of the board for a terminal `total_width` wide
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout<'a> {
    pub title_width: usize,
    pub milestone_width: usize,
    pub milestones: Vec<&'a str>,
}

pub fn board_layout<'a>(filter: &BoardFilter<'a>, total_width: usize) -> BoardLayout<'a> {
    let percent = filter.milestone_column_width_percent();
    let milestones = filter.active_milestones();
    if milestones.is_empty() || percent <= 0.0 {
        return BoardLayout { title_width: total_width, milestone_width: 0, milestones: Vec::new() };
    }

    let milestone_width = ((total_width as f64 * percent / 100.0).floor() as usize).max(MIN_MILESTONE_COLUMN);
    let used = milestone_width * milestones.len();
    let title_width = total_width.saturating_sub(used).max(total_width / 2);
    BoardLayout { title_width, milestone_width, milestones }
}

/// Label segments for a task cell: "Status Importance"
fn task_segments(task: &BugTask) -> Segments {
    let mut segments = Vec::new();
    if let Some(status) = task.status.as_deref() {
        segments.push((status.to_string(), status_label(Some(status))));
    }
    if let Some(importance) = task.importance.as_deref() {
        if !segments.is_empty() {
            segments.push(("/".to_string(), LabelTier::None));
        }
        segments.push((importance.to_string(), importance_label(Some(importance))));
    }
    segments
}

/// Cell contents for one bug under one milestone column
fn milestone_cell(filter: &BoardFilter<'_>, bug: &Bug, milestone: &str) -> Segments {
    let mut segments = Vec::new();
    for task in bug.tasks.iter() {
        if filter.resolve_milestone_key(&task.milestone) != milestone || !filter.milestone_cell_visible(task) {
            continue;
        }
        if !segments.is_empty() {
            segments.push((", ".to_string(), LabelTier::None));
        }
        segments.extend(task_segments(task));
    }
    segments
}

fn bug_heading(bug: &Bug) -> String {
    match bug.id {
        Some(id) => format!("#{} {}", id, bug.title),
        None => bug.title.clone(),
    }
}

/// Format the milestone board
pub fn format_board(dashboard: &Dashboard, total_width: usize, is_tty: bool) -> String {
    let filter = dashboard.filter();
    let layout = board_layout(&filter, total_width);
    let visible = dashboard.visible_bugs();
    let mut output = String::new();

    let mut line = render_segments(&[("Bug".to_string(), LabelTier::None)], layout.title_width.saturating_sub(1), false);
    for milestone in &layout.milestones {
        line.push(' ');
        line.push_str(&render_segments(
            &[(milestone.to_string(), LabelTier::None)],
            layout.milestone_width.saturating_sub(1),
            false,
        ));
    }
    output.push_str(&bold_if_tty(line.trim_end(), is_tty));
    output.push('\n');
    output.push_str(&"-".repeat(total_width.min(line.trim_end().chars().count().max(3))));
    output.push('\n');

    if visible.is_empty() {
        output.push_str("No bugs match the current filters.\n");
    }

    for bug in &visible {
        let mut row = render_segments(&[(bug_heading(bug), LabelTier::None)], layout.title_width.saturating_sub(1), is_tty);
        for milestone in &layout.milestones {
            row.push(' ');
            let cell = milestone_cell(&filter, bug, milestone);
            row.push_str(&render_segments(&cell, layout.milestone_width.saturating_sub(1), is_tty));
        }
        output.push_str(row.trim_end());
        output.push('\n');
    }

    let footer = if layout.milestones.is_empty() {
        format!("{} of {} bugs shown; no milestones shown", visible.len(), dashboard.bugs().len())
    } else {
        format!(
            "{} of {} bugs shown; {} milestone column{} at {:.2}% each",
            visible.len(),
            dashboard.bugs().len(),
            layout.milestones.len(),
            if layout.milestones.len() == 1 { "" } else { "s" },
            filter.milestone_column_width_percent()
        )
    };
    output.push_str(&dim_if_tty(&footer, is_tty));
    output.push('\n');
    output
}

/// Board as JSON for scripting
pub fn board_json(dashboard: &Dashboard) -> serde_json::Value {
    let filter = dashboard.filter();
    let bugs: Vec<serde_json::Value> = dashboard
        .visible_bugs()
        .iter()
        .map(|bug| {
            let tasks: Vec<serde_json::Value> = bug
                .tasks
                .iter()
                .filter(|task| filter.milestone_cell_visible(task))
                .map(|task| {
                    serde_json::json!({
                        "milestone": filter.resolve_milestone_key(&task.milestone),
                        "status": task.status,
                        "importance": task.importance,
                        "visible": filter.task_visible(task),
                        "status_label": status_label(task.status.as_deref()).css_class(),
                        "importance_label": importance_label(task.importance.as_deref()).css_class(),
                    })
                })
                .collect();
            serde_json::json!({
                "id": bug.id,
                "title": bug.title,
                "web_link": bug.web_link,
                "tags": bug.tags,
                "tasks": tasks,
            })
        })
        .collect();

    serde_json::json!({
        "revision": dashboard.revision(),
        "milestones": filter.active_milestones(),
        "milestone_width_percent": filter.milestone_column_width_percent(),
        "bugs": bugs,
    })
}

/// Format the milestone catalog with show flags
pub fn format_milestones(dashboard: &Dashboard, is_tty: bool) -> String {
    let filter = dashboard.filter();
    let mut output = String::new();
    output.push_str(&bold_if_tty(&format!("Milestones for {}", dashboard.project_url()), is_tty));
    output.push('\n');
    for (index, name) in dashboard.catalog().names().iter().enumerate() {
        let mark = if dashboard.state().is_active(Axis::Milestone, name) { "x" } else { " " };
        output.push_str(&format!("[{}] {:>2}  {}\n", mark, index, name));
    }
    let percent = filter.milestone_column_width_percent();
    if percent > 0.0 {
        output.push_str(&format!("Column width: {:.2}%\n", percent));
    } else {
        output.push_str("Column width: none (no milestones shown)\n");
    }
    output
}

/// Format kanban cards as "Lane  Title  (Board)" lines
pub fn format_cards(cards: &[&Card], is_tty: bool) -> String {
    if cards.is_empty() {
        return "No cards assigned.\n".to_string();
    }
    let lane_width = cards.iter().map(|c| c.lane_title.chars().count()).max().unwrap_or(0).max(4);
    let mut output = String::new();
    output.push_str(&bold_if_tty(&format!("{:<width$}  Title", "Lane", width = lane_width), is_tty));
    output.push('\n');
    for card in cards {
        let mut line = format!("{:<width$}  {}", card.lane_title, card.title, width = lane_width);
        if !card.board_title.is_empty() {
            line.push_str(&dim_if_tty(&format!("  ({})", card.board_title), is_tty));
        }
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Format relative time (e.g., "2h ago", "30m ago")
pub fn format_relative_time(ts: i64, now: i64) -> String {
    let diff = (now - ts).max(0);

    if diff < 60 {
        format!("{}s ago", diff)
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86400)
    }
}

/// One-line summary of the last import
pub fn format_import_status(record: Option<&ImportRecord>, now: i64) -> String {
    match record {
        Some(record) => format!(
            "Revision {}: {} {} imported {}",
            record.revision,
            record.record_count,
            record.kind,
            format_relative_time(record.imported_ts, now)
        ),
        None => "Nothing imported yet".to_string(),
    }
}
