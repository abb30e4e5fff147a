//! Geometry helpers over geodetic positions and world-space points.
//!
//! Everything here is pure: no entity state, no terrain, no I/O.

pub mod bezier;
pub mod grid;
pub mod polygon;
pub mod segment;
pub mod validity;

pub use bezier::*;
pub use grid::*;
pub use polygon::*;
pub use segment::*;
pub use validity::*;
