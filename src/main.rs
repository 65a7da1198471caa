use anyhow::Result;
use clap::Parser;
use shepherding_core::config::NetworkStrategy;
use shepherding_core::init_logging;
use shepherding_lib::{load_config, Simulation};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of sheep
    #[arg(long)]
    sheep: Option<usize>,

    /// Number of shepherds
    #[arg(long)]
    shepherds: Option<usize>,

    /// Tick budget
    #[arg(long)]
    ticks: Option<u64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Shepherd-shepherd avoidance range
    #[arg(long)]
    l3: Option<f64>,

    /// Collection threshold in radians
    #[arg(long)]
    collection_threshold: Option<f64>,

    /// Drive threshold in radians
    #[arg(long)]
    drive_threshold: Option<f64>,

    /// Neighbor network: metric or voronoi
    #[arg(long)]
    network: Option<NetworkStrategy>,

    /// Directory for tick logs; enables logging
    #[arg(short, long)]
    output: Option<String>,

    /// Disable tick logs even if the config enables them
    #[arg(long)]
    no_log: bool,

    /// Exchange poses and drive points with an external robot controller
    #[arg(long)]
    bridge: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(n) = args.sheep {
        config.world.n_sheep = n;
    }
    if let Some(n) = args.shepherds {
        config.world.n_shepherd = n;
    }
    if let Some(t) = args.ticks {
        config.world.max_ticks = t;
    }
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if let Some(l3) = args.l3 {
        config.shepherd.l3 = l3;
    }
    if let Some(t) = args.collection_threshold {
        config.shepherd.collection_threshold = t;
    }
    if let Some(t) = args.drive_threshold {
        config.shepherd.drive_threshold = t;
    }
    if let Some(strategy) = args.network {
        config.network.strategy = strategy;
    }
    if let Some(dir) = args.output {
        config.output.enabled = true;
        config.output.dir = dir;
    }
    if args.no_log {
        config.output.enabled = false;
    }
    if args.bridge {
        config.bridge.enabled = true;
    }
    config.validate()?;

    let mut sim = Simulation::from_config(config)?;
    let summary = sim.run()?;

    println!(
        "ticks={} penned={}/{} finished={} seed={} mean_distance={:.2}",
        summary.ticks,
        summary.penned,
        summary.n_sheep,
        summary.finished,
        summary.seed,
        summary.mean_distance_to_pen
    );
    Ok(())
}
