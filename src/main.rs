use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use orrery::{
    errors::OrreryResult,
    input::{self, Cli},
    output::csv_output::CSVController,
    sim, SolarSystem,
};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> OrreryResult<()> {
    let runtime_params = input::gather_program_arguments(cli)?;
    let store = input::load_element_store(&runtime_params)?;
    let system = SolarSystem::new(store);

    let mut output_controller = CSVController::new(&runtime_params.output_dir)?;
    tracing::info!("Writing results to {}", output_controller.run_dir().display());

    sim::simulate(&system, &runtime_params, &mut output_controller)?;

    if runtime_params.write_paths {
        let points = sim::write_out_orbit_paths(&system, &runtime_params, &mut output_controller)?;
        tracing::info!("Wrote {} orbit path points", points);
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
