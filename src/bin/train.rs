//! Train one neural network per symbol CSV file
//!
//! Usage: cargo run --bin train -- --data data --models models/neural_network

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use stock_nn_trainer::{TrainerConfig, TrainingJob};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut data_dir = PathBuf::from("data");
    let mut model_dir = PathBuf::from("models/neural_network");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    data_dir = PathBuf::from(value);
                }
                i += 2;
            }
            "--models" | "-m" => {
                if let Some(value) = args.get(i + 1) {
                    model_dir = PathBuf::from(value);
                }
                i += 2;
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    let config = TrainerConfig::new(data_dir, model_dir);
    let job = TrainingJob::new(config);
    job.run()?;

    Ok(())
}

fn print_help() {
    println!("Train one neural network per stock-symbol CSV file");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin train -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -d, --data <DIR>      Directory of <symbol>.csv files (default: data)");
    println!("    -m, --models <DIR>    Output directory for <symbol>_nn.json artifacts");
    println!("                          (default: models/neural_network)");
    println!("        --help            Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin train -- --data data --models models/neural_network");
}
