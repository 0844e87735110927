//! Orbital element store: the element record type and the named body table.

pub mod catalog;
pub mod elements;

pub use catalog::{Body, BodyRecord, ElementStore};
pub use elements::OrbitalElements;
