use serde::{Deserialize, Serialize};

use crate::errors::{OrreryError, OrreryResult};

/// Mean Keplerian elements of one body, fixed at the reference epoch.
/// Angles are in degrees and may hold any real value.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct OrbitalElements {
    #[serde(rename = "a")]
    pub semi_major_axis_au: f64, // size of the orbit (AU)
    #[serde(rename = "e")]
    pub eccentricity: f64, // 0 = circle, 0..1 = ellipse
    #[serde(rename = "i")]
    pub inclination_deg: f64, // inclination to the ecliptic
    #[serde(rename = "node")]
    pub ascending_node_deg: f64, // longitude of the ascending node
    #[serde(rename = "peri")]
    pub periapsis_arg_deg: f64, // argument of perihelion
    #[serde(rename = "m0")]
    pub mean_anomaly_at_epoch_deg: f64, // mean anomaly at J2000.0
    #[serde(rename = "period")]
    pub sidereal_period_days: f64, // one full revolution
}

impl OrbitalElements {
    pub const fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        periapsis_arg_deg: f64,
        mean_anomaly_at_epoch_deg: f64,
        sidereal_period_days: f64,
    ) -> Self {
        Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            ascending_node_deg,
            periapsis_arg_deg,
            mean_anomaly_at_epoch_deg,
            sidereal_period_days,
        }
    }

    /// Mean motion in degrees per day.
    pub fn mean_motion(&self) -> f64 {
        360.0 / self.sidereal_period_days
    }

    /// Closest approach to the Sun, a(1 - e).
    pub fn perihelion_distance(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the Sun, a(1 + e).
    pub fn aphelion_distance(&self) -> f64 {
        self.semi_major_axis_au * (1.0 + self.eccentricity)
    }

    /// Check the element set describes a closed ellipse the propagator can handle.
    ///
    /// ### Argument
    /// * 'body' - Name used in the error when the check fails.
    ///
    /// ### Return
    /// Ok when every field is finite, a > 0, 0 <= e < 1 and period > 0.
    ///
    pub fn validate(&self, body: &str) -> OrreryResult<()> {
        let invalid = |reason: String| OrreryError::InvalidElements {
            body: body.to_string(),
            reason,
        };

        let fields = [
            ("semi-major axis", self.semi_major_axis_au),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination_deg),
            ("ascending node", self.ascending_node_deg),
            ("argument of periapsis", self.periapsis_arg_deg),
            ("mean anomaly at epoch", self.mean_anomaly_at_epoch_deg),
            ("sidereal period", self.sidereal_period_days),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!("{name} is not finite ({value})")));
        }

        if self.semi_major_axis_au <= 0.0 {
            return Err(invalid(format!(
                "semi-major axis must be positive, got {}",
                self.semi_major_axis_au
            )));
        }
        if !in_range_open!(0.0, 1.0, self.eccentricity) {
            return Err(invalid(format!(
                "eccentricity must lie in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if self.sidereal_period_days <= 0.0 {
            return Err(invalid(format!(
                "sidereal period must be positive, got {}",
                self.sidereal_period_days
            )));
        }

        Ok(())
    }
}
