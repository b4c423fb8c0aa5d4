use clap::Parser;
use taskcast_cli::app;
use taskcast_cli::commands::cli;
use taskcast_core::api::{CliError, CoreError, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let loaded = app::load_config(&args)?;
    init_tracing(&loaded.cfg.logging).map_err(CliError::Command)?;

    let today = app::today_or_local(args.today);
    tracing::debug!(
        target: "taskcast.cli",
        today = %today,
        dry_run = loaded.cfg.delivery.dry_run,
        boards = loaded.cfg.boards.len(),
        "config loaded"
    );

    match &args.command {
        cli::Commands::List => app::run_list(&loaded.cfg),
        cli::Commands::Send(send) => {
            let ctx = app::build_context(&loaded)?;
            app::run_send(&ctx, send, today).await
        }
        cli::Commands::Mine(mine) => {
            let ctx = app::build_context(&loaded)?;
            app::run_mine(&ctx, mine, today).await
        }
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: fetch / delivery / IO error
    // 30: unknown target
    match e {
        CliError::Config(_) => 11,
        CliError::Core(ce) => match ce {
            CoreError::Config(_) => 11,
            CoreError::UnknownTarget(_) => 30,
            CoreError::Fetch { .. } => 20,
            CoreError::Delivery { .. } => 20,
            CoreError::Partial { .. } => 20,
        },
        CliError::Command(_) => 20,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("taskcast"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("taskcast.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(exit_code_for_error(&CliError::Config("x".into())), 11);
        assert_eq!(exit_code_for_error(&CoreError::Config("x".into()).into()), 11);
        assert_eq!(exit_code_for_error(&CoreError::UnknownTarget("x".into()).into()), 30);
        assert_eq!(
            exit_code_for_error(&CoreError::Partial { failed: 1, total: 2 }.into()),
            20
        );
        assert_eq!(exit_code_for_error(&CliError::Command("x".into())), 20);
    }
}
