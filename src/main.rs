use anyhow::Result;
use clap::Parser;
use log::{error, info};

use crossroad_sim::simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "crossroad_sim")]
#[command(about = "Unsignalled four-way crossroad simulation")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Keep at least this many vehicles in the world
    #[arg(long)]
    min_vehicles: Option<usize>,

    /// Log a world summary every N ticks (0 to disable)
    #[arg(long, default_value = "100")]
    report_every: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(err) = run_headless(&cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

/// Run the simulation without any presentation, logging summaries as it goes
fn run_headless(cli: &Cli) -> Result<()> {
    let mut config = SimConfig::default();
    if let Some(min_vehicles) = cli.min_vehicles {
        config.min_vehicle_count = min_vehicles;
    }

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    info!("Running crossroad simulation for {} ticks", cli.ticks);
    world.log_summary();

    for tick in 1..=cli.ticks {
        world.tick();

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            info!("--- After tick {} ---", tick);
            world.log_summary();
        }
    }

    let stats = world.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", stats.ticks);
    info!("Total vehicles spawned: {}", stats.total_spawned);
    info!("Total vehicles exited: {}", stats.total_exited);
    info!("Active vehicles: {}", world.len());
    info!("Deadlock breaks: {}", stats.deadlock_breaks);
    info!(
        "Yields: {} direct, {} right-of-way",
        stats.direct_blocks, stats.right_of_way_yields
    );
    info!(
        "Throughput: {:.3} vehicles/tick",
        if stats.ticks > 0 {
            stats.total_exited as f64 / stats.ticks as f64
        } else {
            0.0
        }
    );

    Ok(())
}
