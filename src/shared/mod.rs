pub mod geo;
pub mod geometry;

pub use geo::*;
pub use geometry::*;
