use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{errors::OrreryResult, time::elapsed_days, types::Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionOut {
    pub body: String,          // Name of the body
    pub timestamp: String,     // RFC 3339 UTC
    pub days_since_epoch: f64, // Signed days from J2000.0
    pub x_au: f64,             // Coordinate of body in the x axis
    pub y_au: f64,             // Coordinate of body in the y axis
    pub z_au: f64,             // Coordinate of body in the z axis
    pub r_au: f64,             // Distance from the Sun
}

impl PositionOut {
    pub fn new(body: &str, timestamp: &DateTime<Utc>, position: &Position) -> Self {
        PositionOut {
            body: body.to_string(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            days_since_epoch: elapsed_days(timestamp),
            x_au: position.x,
            y_au: position.y,
            z_au: position.z,
            r_au: position.norm(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPointOut {
    pub body: String,
    pub index: usize, // Sample index, 0 and N are the same point
    pub x_au: f64,
    pub y_au: f64,
    pub z_au: f64,
}

impl PathPointOut {
    pub fn new(body: &str, index: usize, point: &Position) -> Self {
        PathPointOut {
            body: body.to_string(),
            index,
            x_au: point.x,
            y_au: point.y,
            z_au: point.z,
        }
    }
}

pub trait SimulationOutput {
    fn write_position(&mut self, position: PositionOut) -> OrreryResult<()>;

    fn write_path_point(&mut self, point: PathPointOut) -> OrreryResult<()>;

    fn flush(&mut self) -> OrreryResult<()> {
        Ok(())
    }
}

pub mod csv_output {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::errors::OrreryResult;
    use crate::output::{PathPointOut, PositionOut, SimulationOutput};

    pub const POSITIONS_FILE: &str = "orrery_positions.csv";
    pub const ORBIT_PATHS_FILE: &str = "orrery_orbit_paths.csv";

    pub struct CSVController {
        run_dir: PathBuf,
        position_writer: csv::Writer<fs::File>,
        path_writer: csv::Writer<fs::File>,
    }

    impl CSVController {
        /// Create a UTC-timestamped run directory inside `dir_filepath` and open the
        /// csv writers in it.
        pub fn new<P: AsRef<Path>>(dir_filepath: P) -> OrreryResult<Self> {
            let sub_dirpath = chrono::Utc::now().format("%Y%m%dT%H%M%S%.6fZ").to_string();
            let full_dirpath = dir_filepath.as_ref().join(sub_dirpath);
            fs::create_dir_all(&full_dirpath)?;

            Self::in_directory(full_dirpath)
        }

        /// Open the csv writers directly inside an existing directory.
        pub fn in_directory(run_dir: PathBuf) -> OrreryResult<Self> {
            Ok(CSVController {
                position_writer: csv::Writer::from_path(run_dir.join(POSITIONS_FILE))?,
                path_writer: csv::Writer::from_path(run_dir.join(ORBIT_PATHS_FILE))?,
                run_dir,
            })
        }

        pub fn run_dir(&self) -> &Path {
            &self.run_dir
        }
    }

    impl SimulationOutput for CSVController {
        fn write_position(&mut self, position: PositionOut) -> OrreryResult<()> {
            self.position_writer.serialize(position)?;
            Ok(())
        }

        fn write_path_point(&mut self, point: PathPointOut) -> OrreryResult<()> {
            self.path_writer.serialize(point)?;
            Ok(())
        }

        fn flush(&mut self) -> OrreryResult<()> {
            self.position_writer.flush()?;
            self.path_writer.flush()?;
            Ok(())
        }
    }
}

/// Collects records in memory, for callers that consume results directly.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    pub positions: Vec<PositionOut>,
    pub path_points: Vec<PathPointOut>,
}

impl SimulationOutput for MemoryOutput {
    fn write_position(&mut self, position: PositionOut) -> OrreryResult<()> {
        self.positions.push(position);
        Ok(())
    }

    fn write_path_point(&mut self, point: PathPointOut) -> OrreryResult<()> {
        self.path_points.push(point);
        Ok(())
    }
}
