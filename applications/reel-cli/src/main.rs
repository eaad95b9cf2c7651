//! Reel CLI - headless driver for the documentary player

use anyhow::Context;
use clap::{Parser, Subcommand};
use reel_core::{PlayerSettings, SeriesCatalog, SeriesId};
use reel_cli::{simulate, ReelConfig, SimulationOptions};
use reel_storage::{settings, JsonFileSettingsStore, SettingsStore};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reel-cli")]
#[command(about = "Headless driver for the Reel documentary player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./reel.toml if present)
    #[arg(short, long, global = true, env = "REEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an episode on a simulated clock, following auto-advance
    Play {
        /// Series catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,
        /// Series id
        #[arg(short, long)]
        series: String,
        /// Zero-based episode index
        #[arg(short, long, default_value_t = 0)]
        episode: usize,
        /// Simulated length of every video, in seconds
        #[arg(long, default_value_t = 8)]
        video_secs: u64,
        /// Clock step per simulated frame, in milliseconds
        #[arg(long, default_value_t = 50)]
        step_ms: u64,
        /// Episodes to play before stopping
        #[arg(long, default_value_t = 1)]
        max_episodes: usize,
        /// Seed for transition styles
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show or change the persisted player settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print volume and mute
    Show,
    /// Set the volume (0.0 - 1.0); also unmutes
    Volume {
        /// New volume
        value: f32,
    },
    /// Toggle mute
    Mute,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_cli=info,reel_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ReelConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    match cli.command {
        Commands::Play {
            catalog,
            series,
            episode,
            video_secs,
            step_ms,
            max_episodes,
            seed,
        } => {
            let options = SimulationOptions {
                step: Duration::from_millis(step_ms),
                video_length: Duration::from_secs(video_secs),
                max_episodes,
            };
            play(&config, &catalog, &SeriesId::new(series), episode, seed, &options)?;
        }
        Commands::Settings { action } => {
            manage_settings(&config, &action)?;
        }
    }

    Ok(())
}

fn open_store(config: &ReelConfig) -> anyhow::Result<Arc<dyn SettingsStore>> {
    let path = &config.storage.settings_path;
    let store = JsonFileSettingsStore::open(path)
        .with_context(|| format!("Failed to open settings store at {}", path.display()))?;
    Ok(Arc::new(store))
}

fn play(
    config: &ReelConfig,
    catalog_path: &Path,
    series_id: &SeriesId,
    episode: usize,
    seed: Option<u64>,
    options: &SimulationOptions,
) -> anyhow::Result<()> {
    let catalog = SeriesCatalog::load(catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let store = open_store(config)?;

    let mut player = config.player.clone();
    if seed.is_some() {
        player.seed = seed;
    }

    tracing::info!("Starting playback of {} episode {}", series_id, episode + 1);
    let report = simulate::run(&catalog, store, &player, series_id, episode, options)?;

    for episode in &report.episodes {
        println!(
            "Episode {} ({}): items {:?}, skipped {:?}, {:.1}s -> {}",
            episode.episode_index + 1,
            episode.episode_id,
            episode.items_shown,
            episode.items_failed,
            episode.elapsed.as_secs_f64(),
            episode.route
        );
    }
    if let Some(route) = report.final_route() {
        println!("Next route: {}", route);
    }

    Ok(())
}

fn manage_settings(config: &ReelConfig, action: &SettingsAction) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut current = settings::load_player_settings(store.as_ref());

    match action {
        SettingsAction::Show => {}
        SettingsAction::Volume { value } => {
            current = PlayerSettings::new(*value, false);
            settings::save_player_settings(store.as_ref(), &current)?;
        }
        SettingsAction::Mute => {
            current.muted = !current.muted;
            settings::save_player_settings(store.as_ref(), &current)?;
        }
    }

    println!("volume: {:.2}", current.volume);
    println!("muted:  {}", current.muted);
    Ok(())
}
