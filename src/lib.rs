pub mod model;
pub mod pmz;
pub mod route;
pub mod shared;

pub mod prelude {
    pub use crate::model::{
        CountryDictionary, CountryDirectory, LineView, Locale, MapView, Model, References,
        SegmentView, StationDictionary, StationDirectory, StationInfo, StationView, TransferView,
        TransportLine, TransportMap, TransportSegment, TransportStation, TransportTransfer,
        TransportType,
    };
    pub use crate::pmz::{Config, PmzArchive};
    pub use crate::route::{
        RouteBuilder, RouteContainer, RouteOptions, RouteParameters, TransportRoute,
    };
    pub use crate::shared::{Color, Coordinate, Point, Rect, Spline};
}
