use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Literal written in the status column for tasks that still need doing.
pub const NOT_DONE_MARKER: &str = "no realizado";
pub const DONE_MARKER: &str = "realizado";

/// Completion state of a row, validated once when the row is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotDone,
    Done,
}

impl TaskStatus {
    /// Unknown or empty status text yields `None`; such rows are skipped.
    pub fn parse(cell: &str) -> Option<Self> {
        let normalized = cell.trim().to_lowercase();
        match normalized.as_str() {
            NOT_DONE_MARKER => Some(Self::NotDone),
            DONE_MARKER => Some(Self::Done),
            _ => None,
        }
    }
}

/// One actionable item extracted from one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub activity: String,
    /// Resolved recipient ids, de-duplicated, in first-match order.
    pub recipient_ids: Vec<String>,
    /// Names as written in the sheet, before resolution.
    pub raw_names: Vec<String>,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Task {
    pub fn is_assigned_to(&self, recipient_id: &str) -> bool {
        self.recipient_ids.iter().any(|id| id == recipient_id)
    }

    pub fn in_group(&self, label: &str) -> bool {
        self.group.as_deref() == Some(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Today,
    Overdue,
    Future,
}

impl Bucket {
    pub fn for_due_date(due: NaiveDate, today: NaiveDate) -> Self {
        match due.cmp(&today) {
            std::cmp::Ordering::Equal => Self::Today,
            std::cmp::Ordering::Less => Self::Overdue,
            std::cmp::Ordering::Greater => Self::Future,
        }
    }
}

/// Classification result for one board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub today: Vec<Task>,
    pub overdue: Vec<Task>,
    pub future: Vec<Task>,
}

impl Buckets {
    pub fn push(&mut self, bucket: Bucket, task: Task) {
        match bucket {
            Bucket::Today => self.today.push(task),
            Bucket::Overdue => self.overdue.push(task),
            Bucket::Future => self.future.push(task),
        }
    }

    pub fn get(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::Overdue => &self.overdue,
            Bucket::Future => &self.future,
        }
    }

    /// Nothing due today and nothing overdue. Future tasks alone do not make a digest.
    pub fn nothing_due(&self) -> bool {
        self.today.is_empty() && self.overdue.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.nothing_due() && self.future.is_empty()
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.overdue.len() + self.future.len()
    }

    /// Stable ascending sort of the overdue and future buckets.
    pub fn sort_by_due_date(&mut self) {
        self.overdue.sort_by_key(|t| t.due_date);
        self.future.sort_by_key(|t| t.due_date);
    }
}
