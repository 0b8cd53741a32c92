/// Cadence - headless player for a Cadence music server
mod commands;
mod config;
mod observer;
mod output;

use anyhow::Context;
use cadence_playback::{player, PlaybackConfig, PlaybackController, Player, PlayerHandle};
use cadence_server_client::ServerClient;
use clap::Parser;
use commands::{Command, HELP};
use config::AppConfig;
use observer::{write_playlist, SharedView, TerminalObserver};
use output::HeadlessOutput;
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Headless player for a Cadence music server", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./cadence.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server base URL, overriding the configuration
    #[arg(short, long)]
    server: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "cadence={0},cadence_playback={0},cadence_server_client={0}",
                    default_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }
    config.validate()?;

    info!(server = %config.server.url, "Starting Cadence");

    let client = ServerClient::new(config.server_config()).context("Invalid server settings")?;
    let mut catalog = client.catalog();
    if let Some(path) = &config.catalog.fallback_path {
        catalog = catalog.with_fallback_file(path);
    }

    let (handle, mailbox) = player::channel();
    let output = HeadlessOutput::new(
        handle.clone(),
        config.playback.nominal_bitrate_kbps,
        config.tick(),
    );
    let view = SharedView::default();
    let observer = TerminalObserver::new(std::io::stdout(), Arc::clone(&view));
    let controller = PlaybackController::new(
        output,
        observer,
        PlaybackConfig {
            volume: config.playback.initial_volume,
        },
    );
    let player_task = Player::new(
        controller,
        Arc::new(catalog),
        Arc::new(client.tracks()),
        mailbox,
    )
    .spawn();

    handle.initialize()?;
    println!("Type 'help' for commands.");

    run_prompt(&handle, &view).await?;

    handle.shutdown()?;
    player_task.await.context("Player task failed")?;
    info!("Stopped");

    Ok(())
}

/// Read commands from stdin until `quit` or end of input
async fn run_prompt(handle: &PlayerHandle, view: &SharedView) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}. Type 'help' for commands.", e);
                continue;
            }
        };

        match command {
            Command::Play(index) => handle.play_track(index)?,
            Command::Toggle => handle.toggle_play()?,
            Command::Next => handle.play_next()?,
            Command::Previous => handle.play_previous()?,
            Command::Seek(fraction) => handle.seek(fraction)?,
            Command::Volume(level) => handle.set_volume(level)?,
            Command::Reload => handle.reload()?,
            Command::List => match view.lock() {
                Ok(view) => write_playlist(&mut std::io::stdout(), &view)?,
                Err(_) => warn!("Playlist view unavailable"),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
