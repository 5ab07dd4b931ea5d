use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pomofocus::cli::args::{Cli, Commands};
use pomofocus::cli::commands;
use pomofocus::config::{ColorSetting, Config, Paths};
use pomofocus::core::{Clock, SystemClock};
use pomofocus::features::focus::{LocalNotifier, NotificationScheduler};
use pomofocus::{PersistenceGateway, Pomodoro};

/// Log filter override.
const LOG_ENV: &str = "POMOFOCUS_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    // Completions need no state
    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "pomofocus", &mut io::stdout());
        return Ok(());
    }

    let paths = match cli.data_dir {
        Some(root) => Paths::with_root(root),
        None => Paths::new()?,
    };
    paths
        .ensure_dirs()
        .with_context(|| format!("Failed to prepare {}", paths.root.display()))?;

    let config = Config::load_or_init(&paths.config_file)?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let _guard = init_logging(&paths, &config.general.log_level)?;
    info!(root = %paths.root.display(), "Starting pomofocus");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let gateway = PersistenceGateway::open(&paths, Arc::clone(&clock))
        .with_context(|| format!("Failed to open {}", paths.database.display()))?;
    let notifier = Arc::new(LocalNotifier::from_config(&config.notifications));
    let scheduler: Arc<dyn NotificationScheduler> = Arc::clone(&notifier) as _;
    let mut app = Pomodoro::open(config.timer, gateway, scheduler, clock);

    let output = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            pomofocus::tui::run(app, notifier, config.notifications.sound)?;
            return Ok(());
        }
        command => commands::execute(&mut app, command, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Send logs to a file under the data directory so the TUI is never
/// overdrawn.
fn init_logging(paths: &Paths, default_level: &str) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log filter '{default_level}'"))?;

    let appender = tracing_appender::rolling::never(&paths.logs, "pomofocus.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
