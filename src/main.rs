use anyhow::Result;

use slam_forecast::cli::Command;
use slam_forecast::services::SimulateRequest;
use slam_forecast::{handle_head_to_head, handle_rate, handle_simulate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Rate {
            system,
            data,
            out,
            year,
            seed,
        } => handle_rate(system, &data, &out, year, seed),
        Command::HeadToHead { data, out_dir } => handle_head_to_head(&data, &out_dir),
        Command::Simulate {
            tournament,
            year,
            surface,
            system,
            trials,
            data,
            ratings,
            out,
            seed,
            no_head_to_head,
        } => handle_simulate(&SimulateRequest {
            tournament,
            year,
            surface,
            system,
            trials,
            data,
            ratings,
            out,
            seed,
            head_to_head: !no_head_to_head,
        }),
    }
}
