//! Command handlers: apply CLI overrides, build the context and report results.
use chrono::NaiveDate;
use taskcast_core::api as core_api;
use taskcast_core::api::{CliError, CoreError, Grouping, OutcomeKind, SendReport};

use crate::commands::cli::{Args, MineArgs, SendArgs};

pub fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Load config and fold the command-line overrides into it.
pub fn load_config(args: &Args) -> Result<core_api::LoadedConfig, CliError> {
    let mut loaded = core_api::load(args.config.as_deref())
        .map_err(|e| CliError::Config(format!("{e:#}")))?;
    if args.dry_run {
        loaded.cfg.delivery.dry_run = true;
    }
    Ok(loaded)
}

pub fn build_context(loaded: &core_api::LoadedConfig) -> Result<core_api::AppContext, CliError> {
    let factory = taskcast_plugins::PluginServicesFactory;
    Ok(core_api::AppContext::from_loaded(loaded, &factory)?)
}

pub fn render_report(report: &SendReport) -> Vec<String> {
    report
        .outcomes
        .iter()
        .map(|o| match &o.kind {
            OutcomeKind::Sent(n) => format!("{}: sent {} message(s)", o.label, n),
            OutcomeKind::Skipped => format!("{}: nothing due, skipped", o.label),
            OutcomeKind::Failed(e) => format!("{}: FAILED {}", o.label, e),
        })
        .collect()
}

#[tracing::instrument(name = "cli.send", skip(ctx, today))]
pub async fn run_send(
    ctx: &core_api::AppContext,
    send: &SendArgs,
    today: NaiveDate,
) -> Result<i32, CliError> {
    let report = core_api::send_target(ctx, &send.target, send.dm.as_deref(), today).await?;
    for line in render_report(&report) {
        println!("{line}");
    }
    let failed = report.failed();
    if failed > 0 {
        return Err(CoreError::Partial {
            failed,
            total: report.outcomes.len(),
        }
        .into());
    }
    Ok(0)
}

#[tracing::instrument(name = "cli.mine", skip(ctx, today))]
pub async fn run_mine(
    ctx: &core_api::AppContext,
    mine: &MineArgs,
    today: NaiveDate,
) -> Result<i32, CliError> {
    let user = mine.user.trim();
    if user.is_empty() {
        return Err(CliError::Command("--user must not be empty".into()));
    }
    let sent = core_api::send_personal(ctx, user, today).await?;
    println!("{user}: sent {sent} message(s)");
    Ok(0)
}

/// One line per board, then one indented line per area of category boards.
pub fn render_list(cfg: &core_api::AppConfig) -> Vec<String> {
    let mut out = Vec::new();
    if cfg.boards.is_empty() {
        out.push("no boards configured".to_string());
        return out;
    }
    for board in &cfg.boards {
        let channel = board
            .channel_id
            .as_deref()
            .map(|c| format!("channel {c}"))
            .unwrap_or_else(|| "no channel".to_string());
        let grouping = match board.grouping {
            Grouping::Category => "category",
            Grouping::Recipients => "recipients",
        };
        out.push(format!("{}\t{}\t{}\t{}", board.key, board.title, grouping, channel));
        if board.grouping == Grouping::Category {
            if let Some(categories) = &board.categories {
                for label in &categories.labels {
                    out.push(format!("  area {label}"));
                }
            }
        }
    }
    out
}

pub fn run_list(cfg: &core_api::AppConfig) -> Result<i32, CliError> {
    cfg.validate()?;
    for line in render_list(cfg) {
        println!("{line}");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_api::Outcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_today_wins() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(today_or_local(Some(d)), d);
    }

    #[test]
    fn report_lines() {
        let report = SendReport {
            outcomes: vec![
                Outcome { label: "departamento".into(), kind: OutcomeKind::Sent(2) },
                Outcome { label: "fisio".into(), kind: OutcomeKind::Skipped },
                Outcome { label: "tubos".into(), kind: OutcomeKind::Failed("boom".into()) },
            ],
        };
        assert_eq!(
            render_report(&report),
            vec![
                "departamento: sent 2 message(s)",
                "fisio: nothing due, skipped",
                "tubos: FAILED boom",
            ]
        );
    }

    #[test]
    fn list_shows_boards_and_areas() {
        let cfg: core_api::AppConfig = toml::from_str(
            r#"
[[boards]]
key = "departamento"
title = "Departamento"
sheet_id = "s1"
range = "A:N"
channel_id = "100"
grouping = "category"
columns = { activity = 1, recipients = 7, date = 8, status = 13, category = 0 }
categories = { labels = ["RM", "TS"] }

[[boards]]
key = "fisio"
title = "Actividades Fisio"
sheet_id = "s2"
range = "A:Q"
columns = { activity = 0, recipients = 8, date = 10, status = 16 }
"#,
        )
        .unwrap();
        assert_eq!(
            render_list(&cfg),
            vec![
                "departamento\tDepartamento\tcategory\tchannel 100",
                "  area RM",
                "  area TS",
                "fisio\tActividades Fisio\trecipients\tno channel",
            ]
        );
    }
}
