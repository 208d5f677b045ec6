//! Lattice Life CLI - Run simulations from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use lattice_life::{
    compute::{LatticeStats, Simulation, StepClock},
    schema::{CELL_SIZE_RANGE, GAP_RANGE, SimulationConfig},
};

/// How often the realtime loop polls the step clock.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [steps] [--realtime]", args[0]);
        eprintln!();
        eprintln!("Run a Lattice Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  steps        Number of generations (default: 100)");
        eprintln!("  --realtime   Step on the configured timer period instead of flat out");
        eprintln!();
        eprintln!("Example configuration is printed with the --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let realtime = args.iter().skip(2).any(|a| a == "--realtime");
    let steps: u64 = args
        .iter()
        .skip(2)
        .find_map(|s| s.parse().ok())
        .unwrap_or(100);

    let mut config = SimulationConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config {}: {}", config_path.display(), e);
        std::process::exit(1);
    });
    if !config.running {
        log::info!("Config has running=false; starting anyway for a headless run");
        config.running = true;
    }
    if !config.within_panel_ranges() {
        log::warn!(
            "cell_size {} / gap {} lie outside the panel ranges {:?} / {:?}",
            config.cell_size,
            config.gap,
            CELL_SIZE_RANGE,
            GAP_RANGE
        );
    }

    println!("Lattice Life Simulation");
    println!("=======================");
    println!(
        "Cell size: {}  Gap: {}  Extent: {}",
        config.cell_size, config.gap, config.outer_extent
    );
    println!(
        "Lattice: {0}x{0}x{0} ({1} cells)",
        config.side(),
        config.cell_count().unwrap_or_default()
    );
    println!("Steps: {}", steps);
    println!();

    let period_ms = config.step_period_ms;
    let mut sim = Simulation::new(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let initial_stats = sim.stats();
    println!("Initial state:");
    print_stats(&initial_stats);
    println!();

    if sim.lattice().is_empty() {
        println!("Lattice is empty; nothing to simulate.");
        return;
    }

    println!("Running simulation...");
    let start = Instant::now();

    if realtime {
        run_realtime(&mut sim, steps, period_ms, start);
    } else {
        for i in 0..steps {
            sim.step();

            // Print progress every 10%
            if (i + 1) % (steps / 10).max(1) == 0 {
                let stats = sim.stats();
                let elapsed = start.elapsed().as_secs_f32();
                println!(
                    "  Step {}/{}: alive={} ({:.1}%), {:.1} steps/s",
                    i + 1,
                    steps,
                    stats.alive_cells,
                    stats.alive_fraction * 100.0,
                    (i + 1) as f32 / elapsed
                );
            }
        }
    }

    let elapsed = start.elapsed();
    let final_stats = sim.stats();

    println!();
    println!("Final state:");
    print_stats(&final_stats);
    println!();
    println!(
        "Time: {:.2}s ({:.1} steps/s)",
        elapsed.as_secs_f32(),
        final_stats.generation as f32 / elapsed.as_secs_f32()
    );
}

/// Step on the fixed-period timer, dropping ticks that arrive late.
fn run_realtime(sim: &mut Simulation, steps: u64, period_ms: u64, start: Instant) {
    let mut clock = StepClock::from_millis(period_ms, start.elapsed());

    while sim.generation() < steps {
        if clock.poll(start.elapsed()) {
            sim.step();
            let stats = sim.stats();
            println!(
                "  Generation {}: alive={} ({:.1}%)",
                stats.generation,
                stats.alive_cells,
                stats.alive_fraction * 100.0
            );
        }
        thread::sleep(POLL_INTERVAL);
    }

    if clock.skipped() > 0 {
        println!("  Skipped {} late tick(s)", clock.skipped());
    }
}

fn print_stats(stats: &LatticeStats) {
    println!("  Generation: {}", stats.generation);
    println!(
        "  Alive cells: {} / {} ({:.1}%)",
        stats.alive_cells,
        stats.total_cells,
        stats.alive_fraction * 100.0
    );
}

fn print_example_config() {
    let config = SimulationConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing config: {e}"),
    }
    println!();
    println!(
        "Panel ranges: cell_size {}..={}, gap {}..={}",
        CELL_SIZE_RANGE.start(),
        CELL_SIZE_RANGE.end(),
        GAP_RANGE.start(),
        GAP_RANGE.end()
    );
}
