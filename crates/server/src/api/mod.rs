mod model;
mod route;
mod stations;

pub use model::*;
pub use route::*;
pub use stations::*;
