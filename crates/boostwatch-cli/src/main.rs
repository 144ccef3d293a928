use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use boostwatch_core::{
    Boostwatch, FileEffectBridge, MemoryReader, OverlayOutput, OverlaySettings, PlayerSampler,
    ProcessHandle, ReadMemory, SparkMaterials,
};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod display;
mod input;
mod shutdown;

use config::Config;
use input::Keyboard;
use shutdown::ShutdownSignal;

#[derive(Parser)]
#[command(name = "boostwatch")]
#[command(about = "Roll-boost practice telemetry overlay")]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the overlay output directory from the config
    #[arg(short, long)]
    overlay_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("boostwatch_cli=info".parse()?)
                .add_directive("boostwatch_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    info!("Boostwatch starting...");

    // Load config
    let mut config = match Config::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };
    if let Some(dir) = args.overlay_dir {
        config.overlay_dir = dir;
    }
    if config.overlay_enabled {
        std::fs::create_dir_all(&config.overlay_dir)?;
    }

    let shutdown = Arc::new(ShutdownSignal::new());
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.trigger())?;
    }

    let settings = Arc::new(OverlaySettings::new());
    let keyboard = Keyboard::new(Arc::clone(&settings), Arc::clone(&shutdown));

    // Main loop: wait for the game process, reconnect after it exits.
    while !shutdown.is_shutdown() {
        info!("Waiting for {} process...", config.process_name);

        match ProcessHandle::find_and_open(&config.process_name) {
            Ok(process) => {
                info!(
                    "Found {} (pid {}, base {:#x})",
                    config.process_name, process.pid, process.base_address
                );

                if let Err(e) = run_tracker(&process, &config, &settings, &keyboard, &shutdown) {
                    error!("Tracker error: {}", e);
                }

                if !shutdown.is_shutdown() {
                    info!("Process disconnected, waiting for reconnect...");
                }
            }
            Err(_) => {
                // Process not up yet, wait and retry.
            }
        }

        if shutdown.wait(Duration::from_secs(5)) {
            break;
        }
    }

    info!("Boostwatch stopped");
    Ok(())
}

fn run_tracker(
    process: &ProcessHandle,
    config: &Config,
    settings: &Arc<OverlaySettings>,
    keyboard: &Keyboard,
    shutdown: &ShutdownSignal,
) -> Result<()> {
    let reader = MemoryReader::new(process);
    let sampler = PlayerSampler::new(&config.entity_name);
    let materials = SparkMaterials::new(config.spark_red_texture, config.spark_yellow_texture);
    let mut boostwatch = Boostwatch::new(Arc::clone(settings), materials);
    let overlay = OverlayOutput::new(config.overlay_enabled, &config.overlay_dir);
    let bridge = FileEffectBridge::new(&config.effects_path);
    let mut rng = rand::thread_rng();
    let interval = Duration::from_millis(config.frame_interval_ms);

    info!(
        "Tracking '{}' every {}ms (p: particles, o: window size, q: quit)",
        sampler.entity_name(),
        config.frame_interval_ms
    );

    let mut overlay_warned = false;
    loop {
        keyboard.poll()?;

        // Check if the process is still alive by reading its image header.
        if reader.read_bytes(process.base_address, 4).is_err() {
            info!("Process terminated");
            break;
        }

        let sample = sampler.sample(&reader);
        boostwatch.tick(sample.as_ref(), &bridge, &mut rng);

        let snap = boostwatch.snapshot();
        if let Err(e) = overlay.write_snapshot(&snap) {
            if !overlay_warned {
                warn!("Overlay write failed: {}", e);
                overlay_warned = true;
            }
        }
        display::print_status(&snap, sample.is_some());

        if shutdown.wait(interval) {
            break;
        }
    }

    Ok(())
}
