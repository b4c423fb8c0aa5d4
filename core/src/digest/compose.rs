use chrono::NaiveDate;

use super::aggregate::{lines_by_category, lines_by_recipients, mention_line, LineStyle};
use super::mention::format_short_date;
use crate::classify::CategorySet;
use crate::task::{Bucket, Buckets, Task};

pub const NO_ACTIVITIES_TODAY: &str = "— No hay actividades para hoy —";

/// Board digest grouped by area. `None` when nothing is due today or overdue.
pub fn category_digest(
    buckets: &Buckets,
    categories: &CategorySet,
    today: NaiveDate,
) -> Option<Vec<String>> {
    if buckets.nothing_due() {
        return None;
    }

    let mut lines = vec![format!("📋 Actividades para {}", format_short_date(today))];
    lines.extend(lines_by_category(&buckets.today, categories, LineStyle::PLAIN));

    if !buckets.overdue.is_empty() {
        lines.push("⏳ Pendientes:".to_string());
        lines.extend(lines_by_category(&buckets.overdue, categories, LineStyle::DATED_HYPHEN));
    }
    Some(lines)
}

/// Board digest grouped by assignee set. `None` when nothing is due today or overdue.
pub fn recipient_digest(title: &str, buckets: &Buckets, today: NaiveDate) -> Option<Vec<String>> {
    if buckets.nothing_due() {
        return None;
    }

    let mut lines = vec![
        format!("📋 **{title} — {}**", format_short_date(today)),
        String::new(),
    ];
    lines.extend(lines_by_recipients(&buckets.today, LineStyle::PLAIN));

    if !buckets.overdue.is_empty() {
        lines.push("⌛ **Pendientes:**".to_string());
        lines.push(String::new());
        lines.extend(lines_by_recipients(&buckets.overdue, LineStyle::DATED));
    }
    Some(lines)
}

/// Digest for a single area of a category board. Always has content, even
/// when the area has nothing today.
pub fn area_digest(area: &str, buckets: &Buckets, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("📋 Actividades **{area}** para {}", format_short_date(today)),
        String::new(),
    ];

    let due_today: Vec<&Task> = buckets.today.iter().filter(|t| t.in_group(area)).collect();
    if due_today.is_empty() {
        lines.push(NO_ACTIVITIES_TODAY.to_string());
    } else {
        lines.extend(due_today.into_iter().map(|t| mention_line(t, LineStyle::PLAIN)));
    }

    let pending: Vec<&Task> = buckets.overdue.iter().filter(|t| t.in_group(area)).collect();
    if !pending.is_empty() {
        lines.push(String::new());
        lines.push("⏳ Pendientes:".to_string());
        lines.extend(pending.into_iter().map(|t| mention_line(t, LineStyle::DATED)));
    }
    lines
}

struct PersonalSection {
    bucket: Bucket,
    heading: &'static str,
    empty: &'static str,
}

const PERSONAL_SECTIONS: [PersonalSection; 3] = [
    PersonalSection {
        bucket: Bucket::Today,
        heading: "📋 **Tus actividades para HOY**",
        empty: "✅ No tienes actividades para hoy.",
    },
    PersonalSection {
        bucket: Bucket::Overdue,
        heading: "⌛ **Tus actividades PENDIENTES**",
        empty: "✅ ¡No tienes actividades pendientes!",
    },
    PersonalSection {
        bucket: Bucket::Future,
        heading: "🤖 **Tus actividades FUTURAS**",
        empty: "✅ No tienes actividades en el futuro.",
    },
];

/// Everything assigned to one recipient across boards, as today / pending /
/// future sections with one header per board.
pub fn personal_digest(recipient_id: &str, boards: &[(&str, &Buckets)]) -> Vec<String> {
    let mut lines = Vec::new();

    for (idx, section) in PERSONAL_SECTIONS.iter().enumerate() {
        lines.push(section.heading.to_string());
        lines.push(String::new());

        let mut any = false;
        for (title, buckets) in boards {
            let mine: Vec<&Task> = buckets
                .get(section.bucket)
                .iter()
                .filter(|t| t.is_assigned_to(recipient_id))
                .collect();
            if mine.is_empty() {
                continue;
            }
            any = true;
            lines.push(format!("**{title}**"));
            for task in mine {
                lines.push(match section.bucket {
                    Bucket::Today => format!("• {}", task.activity),
                    _ => format!("• [{}] {}", format_short_date(task.due_date), task.activity),
                });
            }
            lines.push(String::new());
        }

        if !any {
            lines.push(section.empty.to_string());
            if idx + 1 < PERSONAL_SECTIONS.len() {
                lines.push(String::new());
            }
        }
    }
    lines
}
