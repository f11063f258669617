//! parkourcore demo runner.
//!
//! Runs the ledge traversal controller headless against a small box world:
//! a character walks into a wall, grabs the ledge, is aligned against it,
//! climbs and walks back out. Every traversal transition is logged.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --ticks 300 --debug
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;

use parkourcore::components::transform::WorldTransform;
use parkourcore::components::traversal::TraversalState;
use parkourcore::game::{
    TraversalLog, build_update_schedule, demo_config, demo_montages, setup_demo, step,
};
use parkourcore::resources::debugmode::DebugShapes;
use parkourcore::resources::montagestore::MontageStore;
use parkourcore::resources::traversalconfig::{TraversalConfig, resolve_config_path};

/// Ledge traversal controller demo
#[derive(Parser)]
#[command(version, about = "Runs the ledge traversal controller against a demo scene.")]
struct Cli {
    /// INI file with traversal tuning (default: ./traversal.ini if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON montage library (default: built-in demo montages).
    #[arg(long, value_name = "PATH")]
    montages: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 240)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Record probe debug shapes.
    #[arg(long)]
    debug: bool,

    /// Write the default configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(path) = cli.write_config {
        return match TraversalConfig::with_path(path).save_to_file() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match resolve_config_path(cli.config.as_deref()) {
        Some(path) => {
            let mut config = TraversalConfig::with_path(path);
            if let Err(e) = config.load_from_file() {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
            config
        }
        None => demo_config(),
    };

    let montages = match cli.montages.as_deref() {
        Some(path) => match MontageStore::load_json(path) {
            Ok(store) => {
                log::info!("Loaded {} montages from {:?}", store.montages.len(), path);
                store
            }
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => demo_montages(),
    };

    let mut world = World::new();
    let character = match setup_demo(&mut world, config, montages, cli.debug) {
        Ok(entity) => entity,
        Err(e) => {
            log::error!("Failed to set up demo scene: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut update = build_update_schedule();
    for _ in 0..cli.ticks {
        step(&mut world, &mut update, cli.dt);
    }

    let transitions = &world.resource::<TraversalLog>().transitions;
    log::info!("{} traversal transitions:", transitions.len());
    for t in transitions {
        log::info!("  {:?}: {} -> {}", t.entity, t.from, t.to);
    }
    if let (Some(transform), Some(state)) = (
        world.get::<WorldTransform>(character),
        world.get::<TraversalState>(character),
    ) {
        log::info!(
            "Final: mode={} position={:?} forward={:?}",
            state.mode,
            transform.translation,
            transform.forward()
        );
    }
    if cli.debug {
        log::info!(
            "{} debug shapes recorded on the last tick",
            world.resource::<DebugShapes>().len()
        );
    }
    ExitCode::SUCCESS
}
