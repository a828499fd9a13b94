use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use stalled_pr_notifier::config::{self, Config};
use stalled_pr_notifier::github::{is_input_error, GithubSource, PullRequestSource, SnapshotSource};
use stalled_pr_notifier::slack::{SlackSink, StdoutSink};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print stalled PRs (default if no subcommand)
    Check {
        /// Print the reminder text exactly as it would be posted
        #[arg(long)]
        plain: bool,
    },
    /// Post the stalled-PR reminder to the configured Slack channel
    Notify {
        /// Print the message instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "stalled-pr-notifier")]
#[command(about = "Daily reminder about stalled pull requests", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/stalled-pr-notifier/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Read PRs from a JSON snapshot instead of GitHub
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Reference time (RFC 3339), defaults to the current time
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    /// Override thresholds.opened_cutoff_days
    #[arg(long, global = true)]
    opened_cutoff_days: Option<i64>,

    /// Override thresholds.update_cutoff_days
    #[arg(long, global = true)]
    update_cutoff_days: Option<i64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool, command: &Commands) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        match command {
            Commands::Notify { .. } => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        }
    };

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(default_level, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// RUST_LOG wins when set and valid; otherwise the command's default level
fn log_filter(default_level: tracing::Level, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(default_level.into()))
}

/// Exit code for a failed run: bad input data is a config/input problem,
/// anything else came from the network side
fn exit_code_for(e: &anyhow::Error) -> i32 {
    if is_input_error(e) {
        EXIT_CONFIG
    } else {
        EXIT_NETWORK
    }
}

fn exit_with(e: anyhow::Error) -> ! {
    eprintln!("Error: {:#}", e);
    std::process::exit(exit_code_for(&e));
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Check { plain: false });
    init_logging(cli.verbose, &command);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let mut config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Some(days) = cli.opened_cutoff_days {
        config.thresholds.opened_cutoff_days = days;
    }
    if let Some(days) = cli.update_cutoff_days {
        config.thresholds.update_cutoff_days = days;
    }

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    tracing::debug!(
        repository = %config.repository.full_name(),
        opened_cutoff_days = config.thresholds.opened_cutoff_days,
        update_cutoff_days = config.thresholds.update_cutoff_days,
        "Loaded config"
    );

    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.input {
        Some(path) => run_command(&SnapshotSource::new(path), command, &config, now, cli.verbose).await,
        None => {
            let token = match stalled_pr_notifier::credentials::get_github_token() {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Credential error: {}", e);
                    std::process::exit(EXIT_AUTH);
                }
            };
            let client = match stalled_pr_notifier::github::create_client(&token) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to create GitHub client: {:#}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };
            let source = GithubSource::new(client, config.repository.clone());
            run_command(&source, command, &config, now, cli.verbose).await
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

async fn run_command<S: PullRequestSource>(
    source: &S,
    command: Commands,
    config: &Config,
    now: DateTime<Utc>,
    verbose: bool,
) {
    match command {
        Commands::Check { plain } => check(source, config, now, plain, verbose).await,
        Commands::Notify { dry_run } => notify(source, config, now, dry_run, verbose).await,
        Commands::Init => unreachable!("init is handled before any source is built"),
    }
}

async fn check<S: PullRequestSource>(
    source: &S,
    config: &Config,
    now: DateTime<Utc>,
    plain: bool,
    verbose: bool,
) {
    use stalled_pr_notifier::{output, stall};

    let prs = match source.list_pull_requests().await {
        Ok(prs) => prs,
        Err(e) => exit_with(e),
    };
    let stalled = stall::find_stalled_prs(&prs, now, &config.thresholds);

    if plain {
        println!("{}", stall::render_report(&stalled));
        return;
    }

    let use_colors = output::should_use_colors();
    if verbose && !stalled.is_empty() {
        for report in &stalled {
            println!("{}", output::format_stalled_detail(report, now, use_colors));
            println!();
        }
    } else {
        println!("{}", output::format_stalled_table(&stalled, use_colors));
    }

    if verbose {
        let summary = stalled_pr_notifier::notify::RunSummary {
            total: prs.len(),
            active: stall::filter_active_prs(&prs).len(),
            stalled: stalled.len(),
            delivered: false,
        };
        eprintln!();
        eprintln!("{}", output::format_summary(&summary));
    }
}

async fn notify<S: PullRequestSource>(
    source: &S,
    config: &Config,
    now: DateTime<Utc>,
    dry_run: bool,
    verbose: bool,
) {
    use stalled_pr_notifier::notify::run_stall_check;

    let result = if dry_run {
        run_stall_check(source, &StdoutSink, now, &config.thresholds).await
    } else {
        let Some(slack) = config.slack.as_ref() else {
            eprintln!("No Slack channel configured. Add to your config file:");
            eprintln!("  slack:");
            eprintln!("    channel: \"#eng-reviews\"");
            std::process::exit(EXIT_CONFIG);
        };
        let token = match stalled_pr_notifier::credentials::get_slack_token() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Credential error: {}", e);
                std::process::exit(EXIT_AUTH);
            }
        };
        let sink = SlackSink::new(token, slack.channel.clone());
        run_stall_check(source, &sink, now, &config.thresholds).await
    };

    match result {
        Ok(summary) => {
            if verbose {
                eprintln!("{}", stalled_pr_notifier::output::format_summary(&summary));
            }
        }
        Err(e) => exit_with(e),
    }
}
