//! Self-play CLI.
//!
//! Plays computer-vs-computer matches and writes one JSON record per match.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of matches to play (default: 10)
//!   --variant V     9mm or 12mm (default: 9mm)
//!   --max-plies N   Ply cap per match (default: 400)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use morris::selfplay::{self, SelfPlayConfig};

/// Parses the value following a flag, exiting with usage on failure.
fn value_of<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value_of(&args, i, "--games");
            }
            "--variant" => {
                i += 1;
                config.variant = value_of(&args, i, "--variant");
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = value_of(&args, i, "--max-plies");
            }
            "--threads" => {
                i += 1;
                config.threads = value_of(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value_of(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(value_of(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !quiet {
        eprintln!(
            "Self-play: {} {} matches, ply cap {}, {} threads",
            config.num_games, config.variant, config.max_plies, config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("self-play failed: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} matches in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, quiet) {
        eprintln!("Wrote {} matches to {}", games.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of matches to play (default: 10)");
    eprintln!("  --variant V      9mm or 12mm (default: 9mm)");
    eprintln!("  --max-plies N    Ply cap per match (default: 400)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
