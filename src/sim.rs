use chrono::{DateTime, Utc};

use crate::{
    errors::OrreryResult,
    input::RuntimeParameters,
    output::{PathPointOut, PositionOut, SimulationOutput},
    system::SolarSystem,
    time::offset_days,
};

/// Names of the bodies a run writes out: the selected one, or the whole store.
fn selected_bodies(
    system: &SolarSystem,
    runtime_params: &RuntimeParameters,
) -> OrreryResult<Vec<String>> {
    match &runtime_params.body {
        Some(name) => Ok(vec![system.store().get(name)?.name.clone()]),
        None => Ok(system.store().names().map(str::to_string).collect()),
    }
}

fn should_simulation_halt(
    current_time: &DateTime<Utc>,
    runtime_params: &RuntimeParameters,
) -> bool {
    match runtime_params.halt_date {
        Some(halt_date) => *current_time > halt_date,
        None => true,
    }
}

fn write_out_positions(
    system: &SolarSystem,
    bodies: &[String],
    timestamp: &DateTime<Utc>,
    output_controller: &mut dyn SimulationOutput,
) -> OrreryResult<()> {
    for body in bodies {
        let position = system.get_position(body, timestamp)?;
        output_controller.write_position(PositionOut::new(body, timestamp, &position))?;
    }

    Ok(())
}

/// Write the sampled orbit path of every selected body.
pub fn write_out_orbit_paths(
    system: &SolarSystem,
    runtime_params: &RuntimeParameters,
    output_controller: &mut dyn SimulationOutput,
) -> OrreryResult<usize> {
    let bodies = selected_bodies(system, runtime_params)?;
    let mut written = 0;

    for body in &bodies {
        let path = system.get_orbit_path(body, runtime_params.path_samples)?;
        for (index, point) in path.iter().enumerate() {
            output_controller.write_path_point(PathPointOut::new(body, index, point))?;
        }
        written += path.len();
    }

    output_controller.flush()?;
    Ok(written)
}

/// Main entry point of a run. Writes the position of every selected body at the start
/// date, then every `step_days` until the halt date is passed. Without a halt date
/// a single snapshot is written.
///
/// ### Return
/// The number of snapshots written.
///
pub fn simulate(
    system: &SolarSystem,
    runtime_params: &RuntimeParameters,
    output_controller: &mut dyn SimulationOutput,
) -> OrreryResult<u64> {
    let bodies = selected_bodies(system, runtime_params)?;
    let mut step_count: u64 = 0;

    tracing::info!(
        "Propagating {} bodies from {} every {} days",
        bodies.len(),
        runtime_params.start_date,
        runtime_params.step_days
    );

    loop {
        // Offsetting from the start each step keeps rounding from accumulating.
        let current_time = offset_days(
            &runtime_params.start_date,
            step_count as f64 * runtime_params.step_days,
        )?;

        if step_count > 0 && should_simulation_halt(&current_time, runtime_params) {
            break;
        }

        write_out_positions(system, &bodies, &current_time, output_controller)?;
        step_count += 1;
    }

    output_controller.flush()?;
    tracing::info!("Wrote {} snapshots", step_count);

    Ok(step_count)
}
