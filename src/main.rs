//! Moving average CLI — Binary Entrypoint
//! Reads an event log, computes the per-minute moving average of delivery
//! durations and writes it next to the other outputs.

use std::process::ExitCode;

use clap::Parser;
use delivery_moving_average::{
    cli::CliArgs, logging::init_tracing, run, AppConfig, MovingAverageError, Parameters,
};

fn real_main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let params = Parameters::from_args(&args)?;
    let cfg = AppConfig::load()?;

    let summary = run(&params, &cfg)?;

    println!("The Output is:");
    print!("{}", summary.rendered);
    Ok(())
}

fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e
                .downcast_ref::<MovingAverageError>()
                .map_or(1, MovingAverageError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
