mod common;

use chrono::NaiveDate;
use common::{resolver, rows};
use pretty_assertions::assert_eq;
use taskcast_core::api::{
    category_digest, chunk_lines, classify_rows, recipient_digest, CategorySet, ColumnLayout,
    Mention, RowContext, DEFAULT_MAX_CHUNK_LEN,
};

const LAYOUT: ColumnLayout = ColumnLayout {
    activity: 0,
    recipients: 2,
    date: 3,
    status: 4,
    category: Some(0),
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

#[test]
fn rows_land_in_the_right_buckets() {
    let names = resolver(&[("Ana", "111")]);
    let categories = CategorySet::new(vec!["RM".into(), "TS".into()], "Otros");
    let ctx = RowContext {
        layout: &LAYOUT,
        resolver: &names,
        categories: Some(&categories),
    };
    let input = rows(&[
        &["TS task1", "", "Ana", "01/01/2020", "no realizado"],
        &["RM task2", "", "", "02/06/2099", "no realizado"],
    ]);

    let buckets = classify_rows(&input, &ctx, today());

    assert_eq!(buckets.today.len(), 1);
    assert_eq!(buckets.today[0].activity, "TS task1");
    assert_eq!(buckets.today[0].recipient_ids, vec!["111"]);
    assert_eq!(buckets.today[0].group.as_deref(), Some("TS"));

    assert_eq!(buckets.future.len(), 1);
    assert_eq!(buckets.future[0].activity, "RM task2");
    assert_eq!(Mention::for_task(&buckets.future[0]), Mention::Unassigned);

    assert!(buckets.overdue.is_empty());
}

#[test]
fn large_board_is_chunked_without_splitting_lines() {
    let names = resolver(&[("Ana", "111"), ("Luis", "222")]);
    let ctx = RowContext {
        layout: &LAYOUT,
        resolver: &names,
        categories: None,
    };
    let mut input = Vec::new();
    for i in 0..300 {
        let who = if i % 2 == 0 { "Ana" } else { "Luis" };
        input.push(vec![
            format!("Actividad número {i} con una descripción algo larga"),
            String::new(),
            who.to_string(),
            format!("{}/12/2019", 1 + i % 28),
            "No realizado".to_string(),
        ]);
    }

    let buckets = classify_rows(&input, &ctx, today());
    assert_eq!(buckets.overdue.len(), 300);

    let lines = recipient_digest("Actividades Tubos", &buckets, today()).unwrap();
    let chunks = chunk_lines(&lines, DEFAULT_MAX_CHUNK_LEN);
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= DEFAULT_MAX_CHUNK_LEN));

    let non_blank: Vec<&str> = lines.iter().map(String::as_str).filter(|l| !l.is_empty()).collect();
    let rejoined: Vec<&str> = chunks
        .iter()
        .flat_map(|c| c.split('\n'))
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(rejoined, non_blank);
}

#[test]
fn category_digest_for_today_only() {
    let names = resolver(&[("Ana", "111")]);
    let categories = CategorySet::new(vec!["RM".into(), "TS".into()], "Otros");
    let ctx = RowContext {
        layout: &LAYOUT,
        resolver: &names,
        categories: Some(&categories),
    };
    let input = rows(&[
        &["TS task1", "", "Ana", "01/01/2020", "no realizado"],
        &["XX task3", "", "Nadie", "01/01/2020", "no realizado"],
        &["TS done", "", "Ana", "01/01/2020", "realizado"],
    ]);
    let buckets = classify_rows(&input, &ctx, today());
    let lines = category_digest(&buckets, &categories, today()).unwrap();
    assert_eq!(
        lines,
        vec![
            "📋 Actividades para 1/1/2020",
            "**TS**",
            "• TS task1: <@111>",
            "**Otros**",
            "• XX task3: Formato incorrecto (si son varios asignados, separarlos con comas)",
        ]
    );
}
