/// Cadence - headless driver for the playback engine
use anyhow::{bail, Context, Result};
use cadence_audio::{BAND_COUNT, EQ_FREQUENCIES};
use cadence_core::TrackId;
use cadence_playback::{
    DeviceEvent, PlayQueue, PlaybackEvent, PlaybackManager, PlayerAction, PlayerStore,
    RecencyLedger,
};
use cadence_storage::{PlayerStorage, RedbStore};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod device;

use config::CadenceConfig;
use device::SimulatedDevice;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Inspect and drive Cadence player state", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the state database path
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the persisted player state
    Inspect,
    /// Edit the persisted equalizer
    Eq {
        #[command(subcommand)]
        action: EqCommand,
    },
    /// Edit the persisted play queue
    Queue {
        #[command(subcommand)]
        action: QueueCommand,
    },
    /// Play through a catalog on a simulated device
    Simulate {
        /// Catalog JSON file
        catalog: PathBuf,
        /// Number of tracks to run to completion
        #[arg(short, long, default_value_t = 10)]
        steps: usize,
        /// Start with shuffle enabled
        #[arg(long)]
        shuffle: bool,
        /// Start with single-track repeat enabled
        #[arg(long)]
        repeat: bool,
    },
}

#[derive(Subcommand)]
enum EqCommand {
    /// Set band gains in dB, lowest band first
    Set {
        #[arg(num_args = 1..=BAND_COUNT, allow_negative_numbers = true, required = true)]
        gains: Vec<f32>,
    },
    /// Flatten every band
    Reset,
}

#[derive(Subcommand)]
enum QueueCommand {
    /// Queue a catalog track
    Add {
        /// Catalog JSON file
        catalog: PathBuf,
        /// Track id
        id: String,
    },
    /// Drop a track from the queue
    Remove {
        /// Track id
        id: String,
    },
    /// Empty the queue
    Clear,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cadence=info,cadence_playback=info,cadence_storage=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CadenceConfig::load(cli.config.as_deref())?;
    if let Some(state) = cli.state {
        config.storage.path = state;
    }

    match cli.command {
        Commands::Inspect => inspect(&open_storage(&config.storage.path)?, &config),
        Commands::Eq { action } => edit_equalizer(&open_storage(&config.storage.path)?, action),
        Commands::Queue { action } => edit_queue(&open_storage(&config.storage.path)?, action),
        Commands::Simulate {
            catalog,
            steps,
            shuffle,
            repeat,
        } => {
            config.playback.shuffle |= shuffle;
            config.playback.repeat |= repeat;
            simulate(&config, &catalog, steps)
        }
    }
}

fn open_storage(path: &Path) -> Result<PlayerStorage> {
    let store = RedbStore::open(path)
        .with_context(|| format!("Failed to open state database {}", path.display()))?;
    Ok(PlayerStorage::new(Arc::new(store)))
}

fn inspect(storage: &PlayerStorage, config: &CadenceConfig) -> Result<()> {
    println!("State: {}", config.storage.path.display());

    match storage.load_current_track() {
        Some(track) => println!("Current: {} - {}", track.artists.display(), track.title),
        None => println!("Current: (none)"),
    }

    let volume = storage.load_volume();
    println!(
        "Volume:  {:.0}%{}",
        volume.level * 100.0,
        if volume.muted { " (muted)" } else { "" }
    );

    let gains = storage.load_equalizer();
    println!("Equalizer:");
    for (band, freq) in EQ_FREQUENCIES.iter().enumerate() {
        let gain = gains.get(band).copied().unwrap_or(0.0);
        println!("  {:>6} Hz  {:+5.1} dB", freq, gain);
    }

    let queue = storage.load_queue();
    println!("Queue ({}):", queue.len());
    for (i, entry) in queue.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, entry.artists.display(), entry.title);
    }

    let recent = RecencyLedger::from_entries(storage.load_recent(), config.playback.history_limit);
    println!("Recently played ({}):", recent.len());
    for entry in recent.entries() {
        println!("  {}  {}", entry.played_at.format("%Y-%m-%d %H:%M"), entry.id);
    }

    Ok(())
}

fn edit_equalizer(storage: &PlayerStorage, action: EqCommand) -> Result<()> {
    let mut gains = storage.load_equalizer();
    gains.resize(BAND_COUNT, 0.0);

    match action {
        EqCommand::Set { gains: values } => {
            if values.iter().any(|g| !g.is_finite()) {
                bail!("Equalizer gains must be finite numbers");
            }
            gains[..values.len()].copy_from_slice(&values);
        }
        EqCommand::Reset => gains.fill(0.0),
    }

    storage.save_equalizer(&gains)?;
    info!("Equalizer saved");
    Ok(())
}

fn edit_queue(storage: &PlayerStorage, action: QueueCommand) -> Result<()> {
    let mut queue = PlayQueue::from_entries(storage.load_queue());

    match action {
        QueueCommand::Add { catalog, id } => {
            let tracks = catalog::load(&catalog)?;
            let track = catalog::find(&tracks, &id)
                .with_context(|| format!("No track '{id}' in {}", catalog.display()))?;
            if !queue.enqueue(track.into()) {
                println!("'{id}' is already queued");
                return Ok(());
            }
        }
        QueueCommand::Remove { id } => {
            if !queue.remove(&TrackId::new(id.clone())) {
                println!("'{id}' is not queued");
                return Ok(());
            }
        }
        QueueCommand::Clear => queue.clear(),
    }

    storage.save_queue(&queue.entries())?;
    println!("Queue now holds {} track(s)", queue.len());
    Ok(())
}

fn simulate(config: &CadenceConfig, catalog_path: &Path, steps: usize) -> Result<()> {
    let catalog = catalog::load(catalog_path)?;
    let storage = open_storage(&config.storage.path)?;
    let device = SimulatedDevice::new(&catalog);
    let manager = PlaybackManager::with_storage(device, config.playback.clone(), storage);
    let store = PlayerStore::new(manager);

    store.dispatch(PlayerAction::Restore);
    store.dispatch(PlayerAction::SetCollection(
        catalog.into_iter().map(|(track, _)| track).collect(),
    ));

    let start = if store.state().current_track.is_some() {
        PlayerAction::Resume
    } else {
        PlayerAction::PlayIndex(0)
    };
    report(store.dispatch(start));

    for step in 1..=steps {
        let state = store.state();
        let Some(track) = state.current_track else {
            break;
        };
        if !state.is_playing {
            warn!("Playback stopped before step {}", step);
            break;
        }

        println!(
            "{:>3}. {} - {} [{:.0}s]",
            step,
            track.artists.display(),
            track.title,
            state.duration
        );

        // Jump to the end and let the device report it
        store.dispatch(PlayerAction::Device(DeviceEvent::TimeUpdate {
            position: state.duration,
        }));
        report(store.dispatch(PlayerAction::Device(DeviceEvent::Ended)));
    }

    store.dispatch(PlayerAction::Pause);
    let state = store.state();
    info!(
        "Stopped with {} queued, shuffle {}, repeat {}",
        state.queue.len(),
        state.is_shuffled,
        state.is_repeating
    );
    Ok(())
}

fn report(events: Vec<PlaybackEvent>) {
    for event in events {
        if let PlaybackEvent::Error { message } = event {
            warn!("{}", message);
        }
    }
}
