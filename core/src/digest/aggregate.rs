use super::mention::{format_short_date, Mention};
use crate::classify::CategorySet;
use crate::task::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStyle {
    /// Separator before an appended `d/m/yyyy`; `None` leaves the date off.
    pub date_separator: Option<&'static str>,
}

impl LineStyle {
    pub const PLAIN: Self = Self { date_separator: None };
    /// ` — d/m/yyyy`, used by the per-assignee and per-area layouts.
    pub const DATED: Self = Self { date_separator: Some(" — ") };
    /// ` - d/m/yyyy`, used by the board-wide category layout.
    pub const DATED_HYPHEN: Self = Self { date_separator: Some(" - ") };

    fn suffix(self, task: &Task) -> String {
        match self.date_separator {
            Some(sep) => format!("{sep}{}", format_short_date(task.due_date)),
            None => String::new(),
        }
    }
}

/// `• activity: mention` line used by the per-area layouts.
pub fn mention_line(task: &Task, style: LineStyle) -> String {
    format!(
        "• {}: {}{}",
        task.activity,
        Mention::for_task(task),
        style.suffix(task)
    )
}

/// Tasks grouped under `**label**` headers, in the order of the category set
/// with the catch-all last. Empty categories produce no header.
pub fn lines_by_category(tasks: &[Task], categories: &CategorySet, style: LineStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for label in categories.display_order() {
        let mut in_group = tasks.iter().filter(|t| t.in_group(label)).peekable();
        if in_group.peek().is_none() {
            continue;
        }
        lines.push(format!("**{label}**"));
        lines.extend(in_group.map(|t| mention_line(t, style)));
    }
    lines
}

/// Tasks grouped by who they are assigned to. Unassigned tasks come first,
/// the remaining groups follow in first-seen order; each group ends with a
/// blank line.
pub fn lines_by_recipients(tasks: &[Task], style: LineStyle) -> Vec<String> {
    let mut groups: Vec<(Mention, Vec<&Task>)> = Vec::new();
    for task in tasks {
        let key = Mention::for_task(task);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(task),
            None => groups.push((key, vec![task])),
        }
    }
    if let Some(pos) = groups.iter().position(|(k, _)| *k == Mention::Unassigned) {
        let unassigned = groups.remove(pos);
        groups.insert(0, unassigned);
    }

    let mut lines = Vec::new();
    for (key, members) in groups {
        lines.push(match key {
            Mention::Recipients(_) => key.to_string(),
            _ => format!("**{key}**"),
        });
        for task in members {
            lines.push(format!("• {}{}", task.activity, style.suffix(task)));
        }
        lines.push(String::new());
    }
    lines
}
