use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Converts the OurAirports csv dump into the airport table served at runtime.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to `airports.csv`.
    #[arg(default_value = "./airports.csv")]
    input: PathBuf,

    /// Where to write the json table.
    #[arg(default_value = "./resources/airports.json")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match airports::import::process_airports(&args.input, &args.output) {
        Ok(count) => {
            println!("Processed {} airports with IATA codes.", count);
            ExitCode::SUCCESS
        }
        Err(why) => {
            log::error!("Could not process '{}': {}", args.input.display(), why);
            ExitCode::FAILURE
        }
    }
}
