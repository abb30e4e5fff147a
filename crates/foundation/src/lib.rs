//! WGS84 math, fixed-precision geodetic positions and the small value types
//! shared by every other crate.

pub mod bounds;
pub mod handles;
pub mod math;
pub mod time;

pub use bounds::*;
pub use handles::*;
pub use time::*;
