use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::task::Task;

pub const UNASSIGNED_LABEL: &str = "SIN ASIGNAR";
pub const FORMAT_ERROR_LABEL: &str =
    "Formato incorrecto (si son varios asignados, separarlos con comas)";

/// Who a task is shown as assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mention {
    /// The recipients cell was empty.
    Unassigned,
    /// Names were written but none matched a known recipient.
    FormatError,
    Recipients(Vec<String>),
}

impl Mention {
    pub fn for_task(task: &Task) -> Self {
        if task.raw_names.is_empty() && task.recipient_ids.is_empty() {
            Self::Unassigned
        } else if task.recipient_ids.is_empty() {
            Self::FormatError
        } else {
            Self::Recipients(task.recipient_ids.clone())
        }
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str(UNASSIGNED_LABEL),
            Self::FormatError => f.write_str(FORMAT_ERROR_LABEL),
            Self::Recipients(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "<@{id}>")?;
                }
                Ok(())
            }
        }
    }
}

/// Short es-MX date, `d/m/yyyy` without padding.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(raw: &[&str], ids: &[&str]) -> Task {
        Task {
            activity: "x".into(),
            recipient_ids: ids.iter().map(|s| s.to_string()).collect(),
            raw_names: raw.iter().map(|s| s.to_string()).collect(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            group: None,
        }
    }

    #[test]
    fn unassigned_and_format_error_never_collide() {
        let unassigned = Mention::for_task(&task(&[], &[]));
        let broken = Mention::for_task(&task(&["Pedro"], &[]));
        assert_eq!(unassigned, Mention::Unassigned);
        assert_eq!(broken, Mention::FormatError);
        assert_ne!(unassigned.to_string(), broken.to_string());
    }

    #[test]
    fn recipients_render_as_mentions() {
        let m = Mention::for_task(&task(&["Ana", "Luis"], &["1", "2"]));
        assert_eq!(m.to_string(), "<@1>, <@2>");
    }

    #[test]
    fn short_date_has_no_padding() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_short_date(d), "5/3/2024");
    }
}
