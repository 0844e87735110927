//!
//! Orrery - heliocentric positions and orbit paths of solar-system bodies from
//! fixed J2000.0 Keplerian mean elements.
//!

#[macro_use]
mod macros;
#[macro_use]
extern crate impl_ops;

pub mod bodies;
pub mod errors;
pub mod input;
pub mod kepler;
pub mod output;
pub mod sim;
pub mod system;
pub mod time;
pub mod types;

pub use bodies::{Body, ElementStore, OrbitalElements};
pub use errors::{OrreryError, OrreryResult};
pub use system::{BodyDistances, BodyState, SolarSystem};
pub use types::{Array3d, Position};
