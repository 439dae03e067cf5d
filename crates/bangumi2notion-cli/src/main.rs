use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "bangumi2notion")]
#[command(about = "Mirror a Bangumi collection into a Notion database")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the Bangumi collection into the Notion database
    #[command(
        long_about = "Fetch every configured category and collection status from Bangumi and create or update the matching Notion pages. Pages absent from the collection are never deleted."
    )]
    Sync {
        /// Preview decisions without writing to Notion
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,

        /// Tags synced per subject (overrides config)
        #[arg(long, value_name = "N")]
        tag_limit: Option<usize>,

        /// Pacing delay between items in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show resolved configuration (masks sensitive data)
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Sync {
            dry_run,
            tag_limit,
            delay_ms,
        } => {
            commands::sync::run_sync(cli.config.as_deref(), dry_run, tag_limit, delay_ms, &output)
                .await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            commands::config::run_config(cmd, cli.config.as_deref(), &output)
        }
    }
}
