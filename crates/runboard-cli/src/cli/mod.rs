//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use runboard_core::config::{self, Config};
use runboard_core::filter::FilterState;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "runboard")]
#[command(version)]
#[command(about = "Terminal dashboard for game telemetry events")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the telemetry server (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    #[command(flatten)]
    filter_args: FilterArgs,

    /// Disable the automatic refresh timer in the dashboard
    #[arg(long = "no-auto-refresh")]
    no_auto_refresh: bool,
}

/// Filter arguments shared by the dashboard and the one-shot commands.
#[derive(clap::Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Only show events of this type
    #[arg(long = "event-type", global = true, value_name = "TYPE")]
    event_type: Option<String>,

    /// Only show events from this game seed
    #[arg(long, global = true, value_name = "SEED")]
    seed: Option<String>,
}

impl From<&FilterArgs> for FilterState {
    fn from(args: &FilterArgs) -> Self {
        FilterState::new(
            args.event_type.clone().unwrap_or_default(),
            args.seed.clone().unwrap_or_default(),
        )
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print a page of events as a table
    Events {
        /// Page of results to print
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Print aggregate statistics
    Stats,

    /// Trigger a server-side data refresh
    Refresh,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;

    if let Some(server) = &cli.server {
        config.server_url = server.trim_end_matches('/').to_string();
    }

    let filter: FilterState = (&cli.filter_args).into();

    // Default to the interactive dashboard.
    let Some(command) = cli.command else {
        let _guard = init_tracing(true)?;
        let auto_refresh = !cli.no_auto_refresh;
        tracing::info!(server = %config.server_url, auto_refresh, "starting dashboard");
        return runboard_tui::run_dashboard(config, filter, auto_refresh).await;
    };

    let _guard = init_tracing(false)?;
    match command {
        Commands::Events { page } => commands::events::run(&config, &filter, page).await,
        Commands::Stats => commands::stats::run(&config).await,
        Commands::Refresh => commands::refresh::run(&config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Initializes the tracing subscriber.
///
/// The dashboard logs to a rolling file under `${RUNBOARD_HOME}/logs` so the
/// alternate screen stays clean; one-shot commands log to stderr. The filter
/// comes from `RUNBOARD_LOG`.
fn init_tracing(dashboard: bool) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if dashboard {
        let filter =
            EnvFilter::try_from_env("RUNBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
        let logs_dir = config::paths::logs_dir();
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("create log directory {}", logs_dir.display()))?;
        let appender = tracing_appender::rolling::daily(logs_dir, "runboard.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        let filter =
            EnvFilter::try_from_env("RUNBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}
