use chrono::NaiveDate;

use super::deliver::deliver;
use super::target::{resolve_target, Target};
use crate::classify::{classify_rows, RowContext};
use crate::config::{BoardConfig, Grouping};
use crate::context::AppContext;
use crate::digest::{area_digest, category_digest, personal_digest, recipient_digest};
use crate::error::CoreError;
use crate::service::Destination;
use crate::task::Buckets;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Sent(usize),
    /// Nothing due today or overdue; no message sent.
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub label: String,
    pub kind: OutcomeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    pub outcomes: Vec<Outcome>,
}

impl SendReport {
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.kind, OutcomeKind::Failed(_)))
            .count()
    }

    pub fn messages(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.kind {
                OutcomeKind::Sent(n) => n,
                _ => 0,
            })
            .sum()
    }
}

/// Fetch and classify one board.
pub async fn load_board(
    ctx: &AppContext,
    board: &BoardConfig,
    today: NaiveDate,
) -> Result<Buckets, CoreError> {
    let rows = ctx
        .rows()
        .fetch_rows(&board.sheet_id, &board.range)
        .await
        .map_err(|source| CoreError::Fetch {
            board: board.key.clone(),
            source,
        })?;

    let row_ctx = RowContext {
        layout: &board.columns,
        resolver: ctx.resolver(),
        categories: board.categories.as_ref(),
    };
    Ok(classify_rows(&rows, &row_ctx, today))
}

/// The board's digest in its configured grouping; `None` when there is nothing to send.
pub fn board_digest(board: &BoardConfig, buckets: &Buckets, today: NaiveDate) -> Option<Vec<String>> {
    match (board.grouping, board.categories.as_ref()) {
        (Grouping::Category, Some(categories)) => category_digest(buckets, categories, today),
        _ => recipient_digest(&board.title, buckets, today),
    }
}

fn destination_for(board: &BoardConfig, dm: Option<&str>) -> Result<Destination, CoreError> {
    if let Some(user) = dm {
        return Ok(Destination::DirectMessage(user.to_string()));
    }
    board
        .channel_id
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(|c| Destination::Channel(c.to_string()))
        .ok_or_else(|| {
            CoreError::Config(format!(
                "board `{}` has no channel_id; pass a direct-message recipient instead",
                board.key
            ))
        })
}

async fn send_board(
    ctx: &AppContext,
    board: &BoardConfig,
    dm: Option<&str>,
    today: NaiveDate,
) -> Result<OutcomeKind, CoreError> {
    let destination = destination_for(board, dm)?;
    let buckets = load_board(ctx, board, today).await?;
    let Some(lines) = board_digest(board, &buckets, today) else {
        tracing::info!(target: "taskcast.engine", board = %board.key, "nothing due; skipping");
        return Ok(OutcomeKind::Skipped);
    };
    let sent = deliver(ctx.sink(), &destination, &lines, ctx.cfg().delivery.max_message_len).await?;
    Ok(OutcomeKind::Sent(sent))
}

async fn send_area(
    ctx: &AppContext,
    board: &BoardConfig,
    area: &str,
    dm: Option<&str>,
    today: NaiveDate,
) -> Result<OutcomeKind, CoreError> {
    let destination = destination_for(board, dm)?;
    let buckets = load_board(ctx, board, today).await?;
    let lines = area_digest(area, &buckets, today);
    let sent = deliver(ctx.sink(), &destination, &lines, ctx.cfg().delivery.max_message_len).await?;
    Ok(OutcomeKind::Sent(sent))
}

/// Send the digest for `target` (`all`, a board key or an area label).
///
/// With `dm` set, messages go to that user instead of the board channels.
/// For `all`, a failing board is logged and recorded and the remaining
/// boards still run.
#[tracing::instrument(name = "engine.send_target", skip(ctx, today), fields(today = %today))]
pub async fn send_target(
    ctx: &AppContext,
    target: &str,
    dm: Option<&str>,
    today: NaiveDate,
) -> Result<SendReport, CoreError> {
    let mut report = SendReport::default();

    match resolve_target(ctx.cfg(), target)? {
        Target::All => {
            for board in &ctx.cfg().boards {
                let kind = match send_board(ctx, board, dm, today).await {
                    Ok(kind) => kind,
                    Err(e) => {
                        tracing::error!(target: "taskcast.engine", board = %board.key, error = %e, "board failed");
                        OutcomeKind::Failed(e.to_string())
                    }
                };
                report.outcomes.push(Outcome {
                    label: board.key.clone(),
                    kind,
                });
            }
        }
        t @ Target::Board(board) => {
            let kind = send_board(ctx, board, dm, today).await?;
            report.outcomes.push(Outcome { label: t.label(), kind });
        }
        t @ Target::Area { board, area } => {
            let kind = send_area(ctx, board, area, dm, today).await?;
            report.outcomes.push(Outcome { label: t.label(), kind });
        }
    }

    Ok(report)
}

/// Everything assigned to `recipient_id` across all boards, sent by direct message.
#[tracing::instrument(name = "engine.send_personal", skip(ctx, today), fields(today = %today))]
pub async fn send_personal(
    ctx: &AppContext,
    recipient_id: &str,
    today: NaiveDate,
) -> Result<usize, CoreError> {
    let mut loaded = Vec::with_capacity(ctx.cfg().boards.len());
    for board in &ctx.cfg().boards {
        loaded.push((board.title.as_str(), load_board(ctx, board, today).await?));
    }
    let sections: Vec<(&str, &Buckets)> = loaded.iter().map(|(t, b)| (*t, b)).collect();
    let lines = personal_digest(recipient_id, &sections);

    let destination = Destination::DirectMessage(recipient_id.to_string());
    deliver(ctx.sink(), &destination, &lines, ctx.cfg().delivery.max_message_len).await
}
