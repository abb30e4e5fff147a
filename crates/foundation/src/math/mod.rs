pub mod ecef;
pub mod geodesy;
pub mod local;
pub mod position;
pub mod precision;
pub mod vec;

pub use ecef::*;
pub use geodesy::*;
pub use local::*;
pub use position::*;
pub use precision::*;
pub use vec::*;
