//! hograph demo - replays the higher-order graph walkthroughs.
//!
//! This is the entry point for the `hograph-demo` binary.

use std::env;
use std::fs;
use std::process;

use hograph_demo::{print_help, Scenario};
use hograph_storage::StorageConfig;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let mut verbose = false;
    let mut config = StorageConfig::default();
    let mut scenarios = Vec::new();

    let mut rest = env::args().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--strict" => config = StorageConfig::strict(),
            "-h" | "--help" => {
                print_help();
                return;
            }
            "--config" => {
                let Some(path) = rest.next() else {
                    eprintln!("--config needs a file");
                    process::exit(2);
                };
                config = match fs::read_to_string(&path) {
                    Ok(json) => match StorageConfig::from_json(&json) {
                        Ok(config) => config,
                        Err(e) => {
                            eprintln!("Error parsing {}: {}", path, e);
                            process::exit(2);
                        }
                    },
                    Err(e) => {
                        eprintln!("Error reading {}: {}", path, e);
                        process::exit(2);
                    }
                };
            }
            name => match name.parse::<Scenario>() {
                Ok(scenario) => scenarios.push(scenario),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    print_help();
                    process::exit(2);
                }
            },
        }
    }

    // RUST_LOG wins over -v
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_target(false).init();

    if scenarios.is_empty() {
        scenarios = Scenario::ALL.to_vec();
    }

    let mut failed = false;
    for scenario in scenarios {
        println!("== {} ==", scenario);
        match scenario.run(&config) {
            Ok(transcript) => {
                for line in transcript.lines() {
                    println!("{}", line);
                }
            }
            Err(e) => {
                error!(%scenario, error = %e, "scenario failed");
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
        println!();
    }

    if failed {
        process::exit(1);
    }
}
