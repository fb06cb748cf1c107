use clap::Parser;

use log::{error, info};
use std::process::ExitCode;

use yolo2classdirs::{run, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Starting to sort {} ...", args.input_dir);

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to sort dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
