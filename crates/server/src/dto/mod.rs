mod model;
mod route;
mod station;

pub use model::*;
pub use route::*;
pub use station::*;
