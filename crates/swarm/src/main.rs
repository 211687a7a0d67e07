//! # SWARM
//!
//! Headless driver for the swarm core.
//!
//! - Loads `AppConfig` from the TOML path given as the first argument
//! - Scatters `spawn_count` entities at random positions
//! - Ticks the world at a fixed rate and summarizes each frame
//!
//! ```bash
//! RUST_LOG=debug swarm config/swarm.toml
//! ```

mod config;
mod render;
mod tick;

use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swarm_core::{ConfigResult, World};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, DriverConfig};
use crate::render::HeadlessRenderer;
use crate::tick::TickLoop;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    };

    match config.and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig) -> ConfigResult<()> {
    let AppConfig { world, driver } = config;
    let mut world = World::new(world)?;

    let spawned = populate(&mut world, &driver);
    info!(
        spawned,
        capacity = world.capacity(),
        "swarm populated"
    );

    let mut tick_loop = TickLoop::new(driver.tick_rate);
    let mut renderer = HeadlessRenderer::new(world.bounds(), world.palette_size(), driver.entity_size);
    info!(
        tick = ?tick_loop.tick_duration(),
        max_ticks = driver.max_ticks,
        "tick loop started"
    );

    while driver.max_ticks == 0 || tick_loop.tick_count() < driver.max_ticks {
        if !tick_loop.should_tick() {
            tick_loop.wait_for_next_tick();
            continue;
        }

        let start = tick_loop.begin_tick();
        world.tick();
        tick_loop.end_tick(start);

        // Render strictly between ticks; the next tick waits for this to finish.
        let frame = renderer.render(&world);
        if tick_loop.tick_count() % driver.report_every == 0 {
            info!(
                tick = world.tick_count(),
                live = frame.live,
                per_color = ?frame.per_color,
                occupied_cells = frame.occupied_cells,
                "frame"
            );
        }
    }

    let stats = tick_loop.stats();
    info!(
        ticks = tick_loop.tick_count(),
        min_us = stats.min_tick_us,
        max_us = stats.max_tick_us,
        avg_us = stats.avg_tick_us,
        late = stats.late_ticks,
        "shutdown"
    );
    Ok(())
}

/// Spawns up to `spawn_count` entities at uniformly random positions.
///
/// Startup positions come from their own generator so they do not shift the
/// world's color and movement draws. Stops at the first exhausted spawn.
fn populate(world: &mut World, driver: &DriverConfig) -> usize {
    let mut rng = match driver.spawn_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let bounds = world.bounds();

    let mut spawned = 0;
    for _ in 0..driver.spawn_count {
        let x = rng.gen_range(0..bounds.width);
        let y = rng.gen_range(0..bounds.height);
        if let Err(err) = world.spawn(x, y) {
            warn!(
                requested = driver.spawn_count,
                spawned,
                "{err}; dropping remaining spawns"
            );
            break;
        }
        spawned += 1;
    }
    spawned
}
