use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::{
    bodies::ElementStore,
    errors::{OrreryError, OrreryResult},
    kepler::DEFAULT_PATH_SAMPLES,
    time::{parse_timestamp, MIN_STEP_DAYS},
};

/// Defines the argument structure for the orrery program.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "orrery",
    version,
    about = "Heliocentric planet positions and orbit paths from J2000.0 Keplerian elements."
)]
pub struct Cli {
    /// Start date (RFC 3339, YYYY-MM-DD[ HH:MM[:SS]] or YYYY/MM/DD, UTC). Defaults to now.
    #[arg(short, long, value_name = "DATE", default_value = "now")]
    pub date: String,

    /// Halt date. Without it a single snapshot at the start date is written.
    #[arg(short, long, value_name = "DATE")]
    pub end: Option<String>,

    /// Step interval in days between written snapshots.
    #[arg(short, long, value_name = "DAYS", default_value_t = 1.0)]
    pub step: f64,

    /// JSON element table replacing the compiled-in planets.
    #[arg(long, value_name = "FILE")]
    pub elements: Option<PathBuf>,

    /// Restrict output to a single body.
    #[arg(short, long, value_name = "NAME")]
    pub body: Option<String>,

    /// Orbit path resolution, in intervals per revolution.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PATH_SAMPLES)]
    pub samples: usize,

    /// Also write the sampled orbit path of every selected body.
    #[arg(long)]
    pub paths: bool,

    /// Output directory, a timestamped run directory is created inside it.
    #[arg(short, long, value_name = "DIR_NAME", default_value = "output")]
    pub out: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parameters for one run, validated from the command line.
#[derive(Debug, Clone)]
pub struct RuntimeParameters {
    pub start_date: DateTime<Utc>,
    pub halt_date: Option<DateTime<Utc>>,
    pub step_days: f64,
    pub elements_file: Option<PathBuf>,
    pub body: Option<String>,
    pub path_samples: usize,
    pub write_paths: bool,
    pub output_dir: PathBuf,
}

/// Turn raw command line values into run parameters.
///
/// ### Argument
/// * 'cli' - Parsed command line.
///
/// ### Return
/// The run parameters, or an error when a date does not parse, the step is shorter
/// than a microsecond, the halt date precedes the start date or no path samples are asked for.
///
pub fn gather_program_arguments(cli: Cli) -> OrreryResult<RuntimeParameters> {
    let start_date = parse_timestamp(&cli.date)?;
    let halt_date = cli.end.as_deref().map(parse_timestamp).transpose()?;

    if !(cli.step.is_finite() && cli.step >= MIN_STEP_DAYS) {
        return Err(OrreryError::InvalidParameters(format!(
            "step must be at least one microsecond ({MIN_STEP_DAYS:e} days), got {}",
            cli.step
        )));
    }
    if let Some(halt) = halt_date {
        if halt < start_date {
            return Err(OrreryError::InvalidParameters(format!(
                "halt date {halt} precedes start date {start_date}"
            )));
        }
    }
    if cli.samples == 0 {
        return Err(OrreryError::InvalidSampleCount(cli.samples));
    }

    Ok(RuntimeParameters {
        start_date,
        halt_date,
        step_days: cli.step,
        elements_file: cli.elements,
        body: cli.body,
        path_samples: cli.samples,
        write_paths: cli.paths,
        output_dir: cli.out,
    })
}

/// Load the element table the run asked for: the JSON file when one was given,
/// the compiled-in planets otherwise. An unknown `--body` is rejected here.
pub fn load_element_store(params: &RuntimeParameters) -> OrreryResult<ElementStore> {
    let store = match &params.elements_file {
        Some(path) => ElementStore::from_json_file(path)?,
        None => ElementStore::planets()?,
    };

    if let Some(body) = &params.body {
        store.get(body)?;
    }

    Ok(store)
}
