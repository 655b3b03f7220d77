use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use video_search_client::commands::download::RowPick;
use video_search_client::commands::{run_download, run_search};
use video_search_client::utils::logging::{init_tracing, LogTarget};
use video_search_client::{ui, AppConfig, AppState, NAME, VERSION};

/// Search for videos and download them through the search/download API
#[derive(Parser, Debug)]
#[command(name = "video-search", version, about)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "VIDEO_SEARCH_CONFIG",
        help = "Configuration file to use (default: platform config dir)"
    )]
    config: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "Override the API base URL")]
    base_url: Option<String>,

    #[arg(short, long, value_name = "DIR", help = "Override the download directory")]
    output_dir: Option<String>,

    #[arg(short, long, value_name = "FORMAT", help = "Override the default output format")]
    format: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive page (default)
    Ui,
    /// Run one search and print `videoId<TAB>title` lines
    Search { query: String },
    /// Search, then download one of the results
    Download {
        query: String,
        #[arg(long, default_value_t = 0, conflicts_with = "video_id")]
        pick: usize,
        #[arg(long, value_name = "ID")]
        video_id: Option<String>,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .unwrap_or_else(|err| {
        warn!("Failed to load configuration: {:#}. Using defaults", err);
        AppConfig::default()
    });

    config.apply_overrides(
        cli.base_url.clone(),
        cli.output_dir.clone(),
        cli.format.clone(),
    );
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Command::Ui));

    let log_target = match AppConfig::get_logs_dir() {
        Ok(dir) if interactive => LogTarget::File(dir),
        _ => LogTarget::Stderr,
    };
    init_tracing(log_target);
    info!("📚 {} v{} starting", NAME, VERSION);

    let config = load_config(&cli)?;
    let mut state = AppState::new(config)?;
    let mut stdout = std::io::stdout();

    let succeeded = match cli.command {
        None | Some(Command::Ui) => {
            ui::run(state).await?;
            true
        }
        Some(Command::Search { query }) => run_search(&mut state, query, &mut stdout).await?,
        Some(Command::Download {
            query,
            pick,
            video_id,
        }) => {
            let pick = match video_id {
                Some(id) => RowPick::VideoId(id),
                None => RowPick::Index(pick),
            };
            run_download(&mut state, query, pick, &mut stdout).await?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
