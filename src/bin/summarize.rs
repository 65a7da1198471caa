use clap::Parser;
use shepherding_data::{SheepRecord, SheepState};
use shepherding_io::history::{read_tick_log, RunParameters, PARAMETERS_FILE, SHEEP_LOG};
use std::path::PathBuf;

/// Summarizes one or more run directories written by the simulator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run output directories
    #[arg(required = true)]
    runs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("run\tfinal_tick\tpenned\tsheep\tskipped\tseed");
    for dir in &args.runs {
        let log = read_tick_log::<SheepRecord, _>(dir.join(SHEEP_LOG))?;
        let seed = RunParameters::load(dir.join(PARAMETERS_FILE))
            .map(|p| p.seed.to_string())
            .unwrap_or_else(|_| "-".to_string());
        let (final_tick, penned, total) = match log.ticks.last() {
            Some(last) => (
                last.first().map_or(0, |r| r.tick),
                last.iter().filter(|r| r.state == SheepState::Staying).count(),
                last.len(),
            ),
            None => (0, 0, 0),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            dir.display(),
            final_tick,
            penned,
            total,
            log.skipped,
            seed
        );
    }
    Ok(())
}
