use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    bodies::{Body, ElementStore},
    errors::{OrreryError, OrreryResult},
    kepler::{self, DEFAULT_PATH_SAMPLES},
    types::Position,
};

/// Mean orbital speed of the Earth (km/s), scales the circular speed estimate.
const EARTH_MEAN_ORBITAL_SPEED_KM_S: f64 = 29.78;

/// Position of a single body at the timestamp of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodyState {
    pub name: String,
    pub position: Position,
}

/// Distances used by info panels: from the Sun, from the Earth, and a circular-orbit
/// speed estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BodyDistances {
    pub from_sun_au: f64,
    pub from_earth_au: Option<f64>, // None when the store carries no Earth
    pub orbital_speed_km_s: f64,
}

/// Read-only facade over the element store. Orbit paths at the default resolution are
/// computed once when the system is built; positions are always computed on demand.
#[derive(Clone, Debug)]
pub struct SolarSystem {
    store: ElementStore,
    orbit_paths: Vec<Vec<Position>>, // index aligned with store records
}

impl SolarSystem {
    pub fn new(store: ElementStore) -> SolarSystem {
        let orbit_paths: Vec<Vec<Position>> = store
            .records()
            .par_iter()
            .map(|record| kepler::orbit_path(&record.elements, DEFAULT_PATH_SAMPLES))
            .collect();

        tracing::debug!(
            "Cached {} orbit paths at {} samples",
            orbit_paths.len(),
            DEFAULT_PATH_SAMPLES
        );

        SolarSystem { store, orbit_paths }
    }

    /// System built from the compiled-in planetary table.
    pub fn planets() -> OrreryResult<SolarSystem> {
        Ok(Self::new(ElementStore::planets()?))
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    fn index_of(&self, name: &str) -> OrreryResult<usize> {
        let record = self.store.get(name)?;
        self.store
            .records()
            .iter()
            .position(|candidate| candidate.name == record.name)
            .ok_or_else(|| OrreryError::UnknownBody(name.to_string()))
    }

    /// Heliocentric ecliptic position (AU) of a named body at a timestamp.
    pub fn get_position(&self, name: &str, timestamp: &DateTime<Utc>) -> OrreryResult<Position> {
        let elements = self.store.elements(name)?;
        Ok(kepler::position(elements, timestamp))
    }

    /// Closed orbit path of a named body with `sample_count + 1` points.
    ///
    /// ### Arguments
    /// * 'name' - Body name, case is ignored.
    /// * 'sample_count' - Intervals per revolution, must be at least one.
    ///
    /// ### Return
    /// The cached path when the default resolution is asked for, a freshly sampled
    /// one otherwise. Both are identical for identical inputs.
    ///
    pub fn get_orbit_path(&self, name: &str, sample_count: usize) -> OrreryResult<Vec<Position>> {
        if sample_count == 0 {
            return Err(OrreryError::InvalidSampleCount(sample_count));
        }

        if sample_count == DEFAULT_PATH_SAMPLES {
            return self.cached_orbit_path(name).map(|path| path.to_vec());
        }

        let elements = self.store.elements(name)?;
        Ok(kepler::orbit_path(elements, sample_count))
    }

    /// Borrow the orbit path cached at the default resolution.
    pub fn cached_orbit_path(&self, name: &str) -> OrreryResult<&[Position]> {
        let index = self.index_of(name)?;
        Ok(self.orbit_paths[index].as_slice())
    }

    /// Positions of every body in store order.
    pub fn snapshot(&self, timestamp: &DateTime<Utc>) -> Vec<BodyState> {
        self.store
            .records()
            .iter()
            .map(|record| BodyState {
                name: record.name.clone(),
                position: kepler::position(&record.elements, timestamp),
            })
            .collect()
    }

    /// Distance of a body from the Sun and from the Earth, plus its circular speed estimate.
    pub fn distances(&self, name: &str, timestamp: &DateTime<Utc>) -> OrreryResult<BodyDistances> {
        let position = self.get_position(name, timestamp)?;
        let from_sun_au = position.norm();

        let earth_name = Body::Earth.to_string();
        let from_earth_au = if self.store.contains(&earth_name) {
            let earth = self.get_position(&earth_name, timestamp)?;
            Some(position.distance_to(&earth))
        } else {
            None
        };

        Ok(BodyDistances {
            from_sun_au,
            from_earth_au,
            orbital_speed_km_s: EARTH_MEAN_ORBITAL_SPEED_KM_S * (1.0 / from_sun_au).sqrt(),
        })
    }

    /// Largest distance from the Sun projected on the ecliptic plane across all bodies.
    pub fn max_extent(&self, timestamp: &DateTime<Utc>) -> f64 {
        self.snapshot(timestamp)
            .iter()
            .map(|state| state.position.planar_norm())
            .fold(0.0_f64, f64::max)
    }
}
