use chrono::NaiveDate;

use super::layout::{cell, CategorySet, ColumnLayout};
use crate::resolver::{split_raw_names, NameResolver};
use crate::task::{Bucket, Buckets, Task, TaskStatus};

/// Everything needed to turn rows of one sheet into tasks.
#[derive(Clone, Copy)]
pub struct RowContext<'a> {
    pub layout: &'a ColumnLayout,
    pub resolver: &'a NameResolver,
    pub categories: Option<&'a CategorySet>,
}

fn digits(part: &str) -> Option<&str> {
    (!part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())).then_some(part)
}

/// `d/m/yyyy`: exactly three unsigned decimal parts, and a real calendar date.
pub fn parse_due_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.trim().split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let (day, month, year) = (digits(day)?, digits(month)?, digits(year)?);
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns `None` for rows that are not actionable: blank activity, a status
/// other than "not done", or a malformed date.
pub fn classify_row(row: &[String], ctx: &RowContext<'_>, today: NaiveDate) -> Option<(Bucket, Task)> {
    let layout = ctx.layout;

    let activity = cell(row, layout.activity).trim();
    if activity.is_empty() {
        return None;
    }

    if TaskStatus::parse(cell(row, layout.status)) != Some(TaskStatus::NotDone) {
        return None;
    }

    let due_date = parse_due_date(cell(row, layout.date))?;

    let names_cell = cell(row, layout.recipients);
    let raw_names = split_raw_names(names_cell);
    let recipient_ids = ctx.resolver.resolve(names_cell);

    let group = match (ctx.categories, layout.category) {
        (Some(set), Some(col)) => Some(set.resolve(cell(row, col))),
        (Some(set), None) => Some(set.catch_all.clone()),
        (None, _) => None,
    };

    let task = Task {
        activity: activity.to_string(),
        recipient_ids,
        raw_names,
        due_date,
        group,
    };
    Some((Bucket::for_due_date(due_date, today), task))
}

/// Classify a whole sheet. Bucket contents keep row order; overdue and future
/// are then sorted by due date.
pub fn classify_rows(rows: &[Vec<String>], ctx: &RowContext<'_>, today: NaiveDate) -> Buckets {
    let mut buckets = Buckets::default();
    let mut skipped = 0usize;
    for row in rows {
        match classify_row(row, ctx, today) {
            Some((bucket, task)) => buckets.push(bucket, task),
            None => skipped += 1,
        }
    }
    buckets.sort_by_due_date();

    tracing::debug!(
        target: "taskcast.classify",
        rows = rows.len(),
        skipped = skipped,
        today = buckets.today.len(),
        overdue = buckets.overdue.len(),
        future = buckets.future.len(),
        "rows classified"
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::RecipientMap;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn resolver() -> NameResolver {
        let map: RecipientMap = [("Ana", "111"), ("Luis", "222")]
            .into_iter()
            .map(|(n, id)| (n.to_string(), id.to_string()))
            .collect();
        NameResolver::new(&map).unwrap()
    }

    const LAYOUT: ColumnLayout = ColumnLayout {
        activity: 0,
        recipients: 2,
        date: 3,
        status: 4,
        category: None,
    };

    #[test]
    fn parse_due_date_accepts_day_month_year() {
        assert_eq!(parse_due_date("5/3/2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_due_date(" 05 / 03 / 2024 "), Some(date(2024, 3, 5)));
    }

    #[test]
    fn parse_due_date_rejects_malformed() {
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("2024-03-05"), None);
        assert_eq!(parse_due_date("5/3"), None);
        assert_eq!(parse_due_date("5/3/2024/1"), None);
        assert_eq!(parse_due_date("a/3/2024"), None);
        assert_eq!(parse_due_date("31/2/2024"), None);
    }

    #[test]
    fn parse_due_date_rejects_signed_parts() {
        assert_eq!(parse_due_date("+5/+3/+2024"), None);
        assert_eq!(parse_due_date("1/1/-7"), None);
        assert_eq!(parse_due_date("-1/1/2024"), None);
        assert_eq!(parse_due_date("1/ /2024"), None);
    }

    #[test]
    fn whitespace_activity_is_dropped() {
        let r = resolver();
        let ctx = RowContext { layout: &LAYOUT, resolver: &r, categories: None };
        for blank in ["", " ", "\t  \n"] {
            let cells = row(&[blank, "", "Ana", "1/1/2020", "no realizado"]);
            assert!(classify_row(&cells, &ctx, date(2020, 1, 1)).is_none());
        }
    }

    #[test]
    fn done_and_unknown_status_are_dropped() {
        let r = resolver();
        let ctx = RowContext { layout: &LAYOUT, resolver: &r, categories: None };
        for status in ["realizado", "", "pendiente"] {
            let cells = row(&["x", "", "Ana", "1/1/2099", status]);
            assert!(classify_row(&cells, &ctx, date(2020, 1, 1)).is_none());
        }
    }

    #[test]
    fn short_rows_are_padded() {
        let r = resolver();
        let ctx = RowContext { layout: &LAYOUT, resolver: &r, categories: None };
        assert!(classify_row(&row(&["x", "", "Ana"]), &ctx, date(2020, 1, 1)).is_none());
    }

    #[test]
    fn classify_row_is_pure() {
        let r = resolver();
        let ctx = RowContext { layout: &LAYOUT, resolver: &r, categories: None };
        let cells = row(&["x", "", "Ana, Luis", "2/1/2020", "No realizado"]);
        let first = classify_row(&cells, &ctx, date(2020, 1, 1));
        let second = classify_row(&cells, &ctx, date(2020, 1, 1));
        assert_eq!(first, second);
        let (bucket, task) = first.unwrap();
        assert_eq!(bucket, Bucket::Future);
        assert_eq!(task.recipient_ids, vec!["111", "222"]);
        assert_eq!(task.raw_names, vec!["Ana", "Luis"]);
        assert_eq!(task.group, None);
    }

    #[test]
    fn category_comes_from_first_word() {
        let r = resolver();
        let set = CategorySet::new(vec!["RM".into(), "TS".into()], "Otros");
        let layout = ColumnLayout { category: Some(1), ..LAYOUT };
        let ctx = RowContext { layout: &layout, resolver: &r, categories: Some(&set) };
        let today = date(2020, 1, 1);

        let (_, t) = classify_row(&row(&["x", "ts 1.2", "", "1/1/2020", "no realizado"]), &ctx, today).unwrap();
        assert_eq!(t.group.as_deref(), Some("TS"));
        let (_, t) = classify_row(&row(&["x", "??", "", "1/1/2020", "no realizado"]), &ctx, today).unwrap();
        assert_eq!(t.group.as_deref(), Some("Otros"));
    }

    #[test]
    fn classify_rows_buckets_and_sorts() {
        let r = resolver();
        let ctx = RowContext { layout: &LAYOUT, resolver: &r, categories: None };
        let rows = vec![
            row(&["late-2", "", "", "3/1/2020", "no realizado"]),
            row(&["today", "", "", "5/1/2020", "no realizado"]),
            row(&["late-1", "", "", "1/1/2020", "no realizado"]),
            row(&["soon-2", "", "", "9/1/2020", "no realizado"]),
            row(&["soon-1", "", "", "6/1/2020", "no realizado"]),
            row(&["bad", "", "", "nope", "no realizado"]),
        ];
        let buckets = classify_rows(&rows, &ctx, date(2020, 1, 5));
        let names = |tasks: &[Task]| tasks.iter().map(|t| t.activity.clone()).collect::<Vec<_>>();
        assert_eq!(names(&buckets.today), vec!["today"]);
        assert_eq!(names(&buckets.overdue), vec!["late-1", "late-2"]);
        assert_eq!(names(&buckets.future), vec!["soon-1", "soon-2"]);
    }
}
