//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations of the snake matchup to analyze balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 1000 games on medium
//!   cargo run --bin simulate -- -n 200 -m hard    # 200 games against the hard AI
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use snakepit::difficulty::DifficultyMode;
use snakepit::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SNAKEPIT BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Games:          {}", config.num_games);
    println!("  Difficulty:     {}", config.mode.name());
    println!("  Max Ticks:      {}", config.max_ticks_per_game);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--games" => {
                if i + 1 < args.len() {
                    config.num_games = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-m" | "--mode" => {
                if i + 1 < args.len() {
                    if let Some(mode) = DifficultyMode::from_name(&args[i + 1]) {
                        config.mode = mode;
                    }
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_game = args[i + 1].parse().unwrap_or(10_000);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::matchup_test(config.mode);
            }
            "--drift" => {
                config = SimConfig::adaptive_drift_test(100);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Snakepit Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --games <N>     Number of games to simulate (default: 1000)");
    println!("    -m, --mode <MODE>   AI difficulty: easy, medium, hard, adaptive");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Max ticks per game (default: 10,000)");
    println!("    -v, --verbose       Per-game output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick check (200 games at the current mode)");
    println!("    --drift             Adaptive drift check (100 games on adaptive)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                      # Default run");
    println!("    cargo run --bin simulate -- -n 200 -m hard    # 200 games vs hard AI");
    println!("    cargo run --bin simulate -- --seed 42         # Reproducible");
    println!("    cargo run --bin simulate -- --drift           # Watch adaptive settle");
}
