use serde::{Deserialize, Serialize};
use std::ops;

/// Cartesian triple in the heliocentric ecliptic frame. Units are astronomical units
/// wherever the propagator produces one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Array3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Heliocentric ecliptic position (AU) valid for the elements and timestamp that produced it.
pub type Position = Array3d;

impl Array3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Array3d) -> f64 {
        (self.x * other.x) + (self.y * other.y) + (self.z * other.z)
    }

    /// Euclidean length, i.e. heliocentric distance for a position.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Length of the projection onto the ecliptic plane.
    pub fn planar_norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Array3d) -> f64 {
        (self - other).norm()
    }
}

impl_op_ex!(+ |a: &Array3d, b: &Array3d| -> Array3d {
    Array3d {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Array3d, b: &Array3d| -> Array3d {
    Array3d {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(*|a: &Array3d, b: &f64| -> Array3d {
    Array3d {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});
