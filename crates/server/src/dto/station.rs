use serde::{Deserialize, Serialize};
use transitmap::{
    model::{Model, TransportStation},
    shared::geo::Coordinate,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub id: u32,
    pub name: String,
    pub line: String,
    pub map_id: u32,
    pub location: Option<Coordinate>,
}

impl StationDto {
    pub fn from(station: &TransportStation, model: &Model) -> Self {
        Self {
            id: station.id,
            name: model.text(station.name).to_string(),
            line: model
                .line_name(station.line_id)
                .unwrap_or_default()
                .to_string(),
            map_id: station.map_id,
            location: station.location,
        }
    }
}
