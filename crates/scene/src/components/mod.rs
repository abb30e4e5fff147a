pub mod color;
pub mod display;
pub mod label;
pub mod model;
pub mod particles;
pub mod point;
pub mod polygon;
pub mod polyline;
pub mod wall;

pub use color::*;
pub use display::*;
pub use label::*;
pub use model::*;
pub use particles::*;
pub use point::*;
pub use polygon::*;
pub use polyline::*;
pub use wall::*;
