#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context as _;
use clap::{CommandFactory, Parser, Subcommand};
use hse_core::config::load_user_config;
use hse_core::{Clock, FixedClock, HseError, SystemClock, UserConfig};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "hse",
    author,
    version,
    about = "hse: dashboard metrics over HSE site-management snapshots",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text or json.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Compute the report as of this instant instead of now.
    #[arg(long, global = true, value_name = "RFC3339")]
    now: Option<String>,

    /// Exported snapshot to read.
    #[arg(
        short,
        long,
        global = true,
        env = "HSE_SNAPSHOT",
        default_value = "snapshot.json"
    )]
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn clock(&self) -> Result<Box<dyn Clock>, HseError> {
        let Some(raw) = self.now.as_deref() else {
            return Ok(Box::new(SystemClock));
        };
        Ok(Box::new(FixedClock::at(raw)?))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Trackers",
        about = "List action items with derived priority and status",
        long_about = "List action items, filtered by project, status, owner and free text, with their effective priority, overdue state and days left.",
        after_help = "EXAMPLES:\n    # Every action in the snapshot\n    hse actions\n\n    # Open actions on one project\n    hse actions --project p-1 --status Open\n\n    # Search action text and sources\n    hse actions --search crane --json"
    )]
    Actions(cmd::actions::ActionsArgs),

    #[command(
        next_help_heading = "Trackers",
        about = "Show project portfolio analytics",
        after_help = "EXAMPLES:\n    # All projects\n    hse projects\n\n    # One organization\n    hse projects --org o-1"
    )]
    Projects(cmd::projects::ProjectsArgs),

    #[command(
        next_help_heading = "Registers",
        about = "List incident reports",
        after_help = "EXAMPLES:\n    # Open near misses\n    hse reports --type \"Near Miss\" --status submitted"
    )]
    Reports(cmd::reports::ReportsArgs),

    #[command(
        next_help_heading = "Registers",
        about = "List permits to work",
        after_help = "EXAMPLES:\n    # Active permits\n    hse permits --group active\n\n    # Find a permit by number\n    hse permits --search PTW-0042"
    )]
    Permits(cmd::permits::PermitsArgs),

    #[command(
        next_help_heading = "Registers",
        about = "Show checklist runs and verify their scores",
        long_about = "Show checklist runs with their stored score, result tallies and failed items. With --verify, exit non-zero when a stored score disagrees with its results.",
        after_help = "EXAMPLES:\n    # Runs in Arabic where translated\n    hse checklists --lang ar\n\n    # Integrity check for CI\n    hse checklists --verify --json"
    )]
    Checklists(cmd::checklists::ChecklistsArgs),

    #[command(
        next_help_heading = "Overview",
        about = "Show recent activity across reports, inspections and permits",
        after_help = "EXAMPLES:\n    # Latest 20 entries\n    hse feed\n\n    # Permits on one project\n    hse feed --project p-1 --type ptw -n 5"
    )]
    Feed(cmd::feed::FeedArgs),

    #[command(
        next_help_heading = "Overview",
        about = "Show the dashboard overview",
        after_help = "EXAMPLES:\n    # Dashboard counters as of a fixed instant\n    hse stats --now 2024-06-10T12:00:00Z\n\n    # Include safety rates\n    hse stats --manhours 400000 --recordables 2 --lti 1"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Utilities",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Bash\n    hse completions bash > /etc/bash_completion.d/hse"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HSE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "hse=debug,info"
        } else {
            "hse=info,warn"
        })
    });

    let format = env::var("HSE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Logs go to stderr so stdout stays parseable.
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn user_config() -> UserConfig {
    load_user_config().unwrap_or_else(|err| {
        warn!(%err, "ignoring user config");
        UserConfig::default()
    })
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let load = || -> anyhow::Result<cmd::Context> {
        let clock = cli.clock().context("resolving --now")?;
        let project_root = env::current_dir()?;
        cmd::Context::load(&cli.snapshot, &project_root, clock.as_ref())
    };

    match &cli.command {
        Commands::Actions(args) => cmd::actions::run_actions(args, &load()?, output),
        Commands::Projects(args) => cmd::projects::run_projects(args, &load()?, output),
        Commands::Reports(args) => cmd::reports::run_reports(args, &load()?, output),
        Commands::Permits(args) => cmd::permits::run_permits(args, &load()?, output),
        Commands::Checklists(args) => cmd::checklists::run_checklists(args, &load()?, output),
        Commands::Feed(args) => cmd::feed::run_feed(args, &load()?, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, &load()?, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let user_config = user_config();
    let output = resolve_output_mode(cli.format, cli.json, user_config.output.as_deref());

    if let Err(err) = run(&cli, output) {
        render_error(output, &CliError::from(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
