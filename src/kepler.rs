//! Two-body Kepler propagation of fixed mean elements.
//!
//! Position pipeline: elapsed days -> mean anomaly -> eccentric anomaly (Newton-Raphson)
//! -> true anomaly -> radius -> orbital plane -> heliocentric ecliptic (x, y, z) in AU.
//! Orbit paths skip the time steps and sample true anomaly directly.
//!
//! Every function here is pure and allocation free apart from `orbit_path`'s output.

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Utc};

use crate::bodies::OrbitalElements;
use crate::time::elapsed_days;
use crate::types::Position;

/// Samples per revolution used when a caller does not ask for a specific resolution.
pub const DEFAULT_PATH_SAMPLES: usize = 200;

/// Newton-Raphson iteration cap for Kepler's equation.
pub const KEPLER_MAX_ITERATIONS: usize = 10;

/// Correction size (radians) below which the solver stops early.
pub const KEPLER_TOLERANCE: f64 = 1e-10;

/// Eccentricity from which the solver seeds with +/-pi instead of M.
const HIGH_ECCENTRICITY_SEED: f64 = 0.8;

/// Mean anomaly in degrees, normalised into [0, 360), `days` after the reference epoch.
pub fn mean_anomaly_at_days(elements: &OrbitalElements, days: f64) -> f64 {
    let m = (elements.mean_anomaly_at_epoch_deg + elements.mean_motion() * days).rem_euclid(360.0);

    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if m >= 360.0 {
        0.0
    } else {
        m
    }
}

/// Mean anomaly in degrees, normalised into [0, 360), at a UTC timestamp.
pub fn mean_anomaly(elements: &OrbitalElements, timestamp: &DateTime<Utc>) -> f64 {
    mean_anomaly_at_days(elements, elapsed_days(timestamp))
}

/// Solve Kepler's equation M = E - e sin(E) for the eccentric anomaly.
///
/// ### Arguments
/// * 'mean_anomaly_deg' - Mean anomaly in degrees, any real value.
/// * 'e' - Eccentricity in [0, 1).
///
/// ### Return
/// Eccentric anomaly in radians, in the branch around M wrapped into (-pi, pi].
///
/// At most `KEPLER_MAX_ITERATIONS` Newton steps are taken and the last estimate is
/// returned even if the tolerance was never met. Planetary eccentricities converge in a
/// handful of steps; orbits with e close to 1 can come back under-converged and nothing
/// flags it.
///
pub fn solve_kepler(mean_anomaly_deg: f64, e: f64) -> f64 {
    let m = wrap_pi(mean_anomaly_deg.to_radians());

    // High eccentricity seeds from the apoapsis on the same side as M.
    let mut ecc = if e < HIGH_ECCENTRICITY_SEED {
        m
    } else {
        PI.copysign(m)
    };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ecc - e * ecc.sin() - m;
        let f_prime = 1.0 - e * ecc.cos();

        let correction = f / f_prime;
        ecc -= correction;

        if correction.abs() < KEPLER_TOLERANCE {
            break;
        }
    }

    ecc
}

/// Wrap an angle in radians into (-pi, pi].
fn wrap_pi(angle: f64) -> f64 {
    let wrapped = PI - (PI - angle).rem_euclid(TAU);
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// True anomaly (radians) from the eccentric anomaly using the half-angle form, which keeps
/// the quadrant and stays stable near E = 0 and E = pi.
pub fn true_anomaly(eccentric_anomaly: f64, e: f64) -> f64 {
    let half_e = eccentric_anomaly / 2.0;
    let sqrt_ratio = ((1.0 + e) / (1.0 - e)).sqrt();

    2.0 * (sqrt_ratio * half_e.sin()).atan2(half_e.cos())
}

/// Distance from the focus from the polar conic equation, r = a(1 - e^2) / (1 + e cos v).
pub fn radius_from_true_anomaly(a: f64, e: f64, true_anomaly: f64) -> f64 {
    a * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
}

/// Distance from the focus from the eccentric anomaly, r = a(1 - e cos E).
pub fn radius_from_eccentric_anomaly(a: f64, e: f64, eccentric_anomaly: f64) -> f64 {
    a * (1.0 - e * eccentric_anomaly.cos())
}

/// Rotate an orbital-plane polar position into the heliocentric ecliptic frame.
///
/// The 3-1-3 sequence (node about z, inclination about x, periapsis about z) maps the
/// orbital-plane axes onto the perifocal unit vectors P (towards periapsis) and Q (ninety
/// degrees ahead of it); the position is then r cos v P + r sin v Q.
///
/// ### Arguments
/// * 'r' - Distance from the Sun.
/// * 'true_anomaly' - Angle from periapsis, radians.
/// * 'node_deg' - Longitude of the ascending node, degrees.
/// * 'inclination_deg' - Inclination to the ecliptic, degrees.
/// * 'periapsis_deg' - Argument of periapsis, degrees.
///
pub fn orbital_to_ecliptic(
    r: f64,
    true_anomaly: f64,
    node_deg: f64,
    inclination_deg: f64,
    periapsis_deg: f64,
) -> Position {
    let cos_n = cos_deg!(node_deg);
    let sin_n = sin_deg!(node_deg);
    let cos_i = cos_deg!(inclination_deg);
    let sin_i = sin_deg!(inclination_deg);
    let cos_w = cos_deg!(periapsis_deg);
    let sin_w = sin_deg!(periapsis_deg);

    let p = Position::new(
        cos_n * cos_w - sin_n * sin_w * cos_i,
        sin_n * cos_w + cos_n * sin_w * cos_i,
        sin_w * sin_i,
    );
    let q = Position::new(
        -cos_n * sin_w - sin_n * cos_w * cos_i,
        -sin_n * sin_w + cos_n * cos_w * cos_i,
        cos_w * sin_i,
    );

    let (sin_v, cos_v) = true_anomaly.sin_cos();
    p * (r * cos_v) + q * (r * sin_v)
}

/// Heliocentric ecliptic position `days` after the reference epoch.
pub fn position_at_days(elements: &OrbitalElements, days: f64) -> Position {
    let e = elements.eccentricity;

    let m = mean_anomaly_at_days(elements, days);
    let ecc = solve_kepler(m, e);
    let nu = true_anomaly(ecc, e);
    let r = radius_from_eccentric_anomaly(elements.semi_major_axis_au, e, ecc);

    orbital_to_ecliptic(
        r,
        nu,
        elements.ascending_node_deg,
        elements.inclination_deg,
        elements.periapsis_arg_deg,
    )
}

/// Heliocentric ecliptic position (AU) of a body at a UTC timestamp.
///
/// Pure function of its inputs, cheap enough to call for every body on every frame.
pub fn position(elements: &OrbitalElements, timestamp: &DateTime<Utc>) -> Position {
    position_at_days(elements, elapsed_days(timestamp))
}

/// Sample one full revolution uniformly in true anomaly.
///
/// ### Arguments
/// * 'elements' - Orbital elements of the body.
/// * 'sample_count' - Number of intervals; `sample_count + 1` points are returned.
///
/// ### Return
/// Closed curve from v = 0 to v = 2 pi, first and last points coincide. Independent
/// of time, so the result may be cached for as long as the elements live.
/// An empty path is returned for a zero sample count.
///
pub fn orbit_path(elements: &OrbitalElements, sample_count: usize) -> Vec<Position> {
    if sample_count == 0 {
        return Vec::new();
    }

    let a = elements.semi_major_axis_au;
    let e = elements.eccentricity;

    let mut points: Vec<Position> = (0..=sample_count)
        .map(|j| {
            let nu = TAU * j as f64 / sample_count as f64;
            let r = radius_from_true_anomaly(a, e, nu);
            orbital_to_ecliptic(
                r,
                nu,
                elements.ascending_node_deg,
                elements.inclination_deg,
                elements.periapsis_arg_deg,
            )
        })
        .collect();

    // cos/sin of 2 pi are not exactly those of 0, pin the closing point
    if let Some(first) = points.first().copied() {
        if let Some(last) = points.last_mut() {
            *last = first;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Body;
    use crate::time::{offset_days, reference_epoch};

    fn unit_circle() -> OrbitalElements {
        OrbitalElements::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 365.25)
    }

    #[test]
    fn test_mean_anomaly_at_epoch() {
        let earth = Body::Earth.elements();
        assert!((mean_anomaly(&earth, &reference_epoch()) - 357.517).abs() < 1e-12);
    }

    #[test]
    fn test_mean_anomaly_normalised() {
        let earth = Body::Earth.elements();
        for days in [-1e6, -365.256, -0.5, 0.0, 2.5, 1e5, 7.3e5] {
            let m = mean_anomaly_at_days(&earth, days);
            assert!(in_range_open!(0.0, 360.0, m), "M = {m} at {days} days");
        }

        // A full period brings the mean anomaly back.
        let m0 = mean_anomaly_at_days(&earth, 100.0);
        let m1 = mean_anomaly_at_days(&earth, 100.0 + earth.sidereal_period_days);
        assert!((m0 - m1).abs() < 1e-9);
    }

    #[test]
    fn test_solve_kepler_residual() {
        for e in [0.0, 0.1, 0.5, 0.9] {
            for step in 0..36 {
                let m_deg = step as f64 * 10.0;
                let ecc = solve_kepler(m_deg, e);
                let m_rad = wrap_pi(m_deg.to_radians());
                let residual = ecc - e * ecc.sin() - m_rad;
                assert!(
                    residual.abs() < 1e-8,
                    "e = {e}, M = {m_deg}: residual {residual:e}"
                );
            }
        }
    }

    #[test]
    fn test_solve_kepler_high_eccentricity() {
        for e in [0.95, 0.99] {
            for step in 0..360 {
                let m_deg = step as f64;
                let ecc = solve_kepler(m_deg, e);
                let residual = ecc - e * ecc.sin() - wrap_pi(m_deg.to_radians());
                assert!(residual.abs() < 1e-8, "e = {e}, M = {m_deg}");
            }
        }
    }

    #[test]
    fn test_solve_kepler_circular_is_identity() {
        for m_deg in [0.0, 45.0, 90.0, 179.0] {
            assert!((solve_kepler(m_deg, 0.0) - m_deg.to_radians()).abs() < 1e-12);
        }
        // Angles past 180 come back on the negative branch
        assert!((solve_kepler(270.0, 0.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_kepler_apsides() {
        assert!(solve_kepler(0.0, 0.2).abs() < 1e-12);
        assert!((solve_kepler(180.0, 0.2) - PI).abs() < 1e-12);
        assert!((solve_kepler(180.0, 0.95) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_pi() {
        assert!((wrap_pi(PI) - PI).abs() < 1e-15);
        assert!((wrap_pi(-PI) - PI).abs() < 1e-15);
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!(wrap_pi(TAU).abs() < 1e-12);
    }

    #[test]
    fn test_true_anomaly() {
        // Circular orbit: all anomalies coincide
        assert!((true_anomaly(0.7, 0.0) - 0.7).abs() < 1e-12);
        // Apsides map onto themselves
        assert!(true_anomaly(0.0, 0.5).abs() < 1e-12);
        assert!((true_anomaly(PI, 0.5).abs() - PI).abs() < 1e-12);
        // True anomaly runs ahead of E between periapsis and apoapsis
        assert!(true_anomaly(PI / 2.0, 0.3) > PI / 2.0);
    }

    #[test]
    fn test_radius_forms_agree() {
        let (a, e) = (1.523679, 0.0934);
        for step in 0..12 {
            let ecc = wrap_pi(step as f64 * 0.5);
            let nu = true_anomaly(ecc, e);
            let from_e = radius_from_eccentric_anomaly(a, e, ecc);
            let from_nu = radius_from_true_anomaly(a, e, nu);
            assert!((from_e - from_nu).abs() < 1e-12);
        }
    }

    #[test]
    fn test_orbital_to_ecliptic_unrotated() {
        let p = orbital_to_ecliptic(2.0, PI / 2.0, 0.0, 0.0, 0.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_orbital_to_ecliptic_inclined() {
        // Polar orbit with node on +x: ninety degrees past the node points straight up.
        let p = orbital_to_ecliptic(1.0, PI / 2.0, 0.0, 90.0, 0.0);
        assert!(p.x.abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);

        // Rotation preserves length
        let q = orbital_to_ecliptic(3.0, 1.1, 48.331, 7.0049, 29.124);
        assert!((q.norm() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_orbital_to_ecliptic_argument_of_latitude() {
        // Only node, inclination and the argument of latitude u = w + v fix the direction.
        let (node, inc, peri, nu) = (131.784_f64, 1.77_f64, 272.846_f64, 2.3_f64);
        let u = peri.to_radians() + nu;
        let (n, i) = (node.to_radians(), inc.to_radians());

        let p = orbital_to_ecliptic(30.0, nu, node, inc, peri);
        assert!((p.x - 30.0 * (n.cos() * u.cos() - n.sin() * u.sin() * i.cos())).abs() < 1e-9);
        assert!((p.y - 30.0 * (n.sin() * u.cos() + n.cos() * u.sin() * i.cos())).abs() < 1e-9);
        assert!((p.z - 30.0 * u.sin() * i.sin()).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_period_circular() {
        let elements = unit_circle();
        let days = 91.3125;

        let m = mean_anomaly_at_days(&elements, days);
        assert!((m - 90.0).abs() < 1e-9);
        let nu = true_anomaly(solve_kepler(m, 0.0), 0.0);
        assert!((nu.to_degrees() - 90.0).abs() < 1e-9);

        let timestamp = offset_days(&reference_epoch(), days).unwrap();
        let p = position(&elements, &timestamp);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_earth_at_epoch() {
        let earth = Body::Earth.elements();
        let r = position(&earth, &reference_epoch()).norm();
        assert!(in_range!(0.9833, 1.0167, r), "r = {r}");
        // Mean anomaly near 357.5 deg puts Earth just short of perihelion
        assert!(r < 0.984);
    }

    #[test]
    fn test_radius_bounds_all_planets() {
        for body in [
            Body::Mercury,
            Body::Venus,
            Body::Earth,
            Body::Mars,
            Body::Jupiter,
            Body::Saturn,
            Body::Uranus,
            Body::Neptune,
        ] {
            let elements = body.elements();
            let lower = elements.perihelion_distance() - 1e-9;
            let upper = elements.aphelion_distance() + 1e-9;
            for step in -50..50 {
                let days = step as f64 * 1234.567;
                let r = position_at_days(&elements, days).norm();
                assert!(in_range!(lower, upper, r), "{body} r = {r} at {days} days");
            }
        }
    }

    #[test]
    fn test_periodicity() {
        let mars = Body::Mars.elements();
        for days in [-40_000.0, -1.0, 0.0, 523.25, 36_525.0] {
            let p0 = position_at_days(&mars, days);
            let p1 = position_at_days(&mars, days + mars.sidereal_period_days);
            assert!(p0.distance_to(&p1) < 1e-6, "drift at {days} days");
        }
    }

    #[test]
    fn test_circular_orbit_constant_radius() {
        let elements = OrbitalElements::new(2.5, 0.0, 12.0, 40.0, 75.0, 10.0, 1444.0);
        for step in 0..40 {
            let r = position_at_days(&elements, step as f64 * 97.3).norm();
            assert!((r - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_orbit_path_closed() {
        let mercury = Body::Mercury.elements();
        let path = orbit_path(&mercury, DEFAULT_PATH_SAMPLES);

        assert_eq!(path.len(), DEFAULT_PATH_SAMPLES + 1);
        assert_eq!(path.first(), path.last());

        // First point is the perihelion
        let r0 = path[0].norm();
        assert!((r0 - mercury.perihelion_distance()).abs() < 1e-12);
        // Halfway round is the aphelion
        let r_half = path[DEFAULT_PATH_SAMPLES / 2].norm();
        assert!((r_half - mercury.aphelion_distance()).abs() < 1e-12);
    }

    #[test]
    fn test_orbit_path_deterministic() {
        let saturn = Body::Saturn.elements();
        assert_eq!(orbit_path(&saturn, 64), orbit_path(&saturn, 64));
    }

    #[test]
    fn test_orbit_path_zero_samples() {
        assert!(orbit_path(&unit_circle(), 0).is_empty());
        assert_eq!(orbit_path(&unit_circle(), 1).len(), 2);
    }

    #[test]
    fn test_position_lies_on_orbit_path() {
        // A sampled position must match the conic radius at its own true anomaly.
        let jupiter = Body::Jupiter.elements();
        let e = jupiter.eccentricity;
        let days = 4321.0;

        let ecc = solve_kepler(mean_anomaly_at_days(&jupiter, days), e);
        let nu = true_anomaly(ecc, e);
        let expected = orbital_to_ecliptic(
            radius_from_true_anomaly(jupiter.semi_major_axis_au, e, nu),
            nu,
            jupiter.ascending_node_deg,
            jupiter.inclination_deg,
            jupiter.periapsis_arg_deg,
        );
        assert!(position_at_days(&jupiter, days).distance_to(&expected) < 1e-9);
    }
}
