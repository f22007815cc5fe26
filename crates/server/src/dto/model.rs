use serde::{Deserialize, Serialize};
use transitmap::{model::Model, shared::geo::Coordinate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDto {
    pub id: u32,
    pub name: String,
    pub transport_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDto {
    pub name: String,
    pub city: String,
    pub country: String,
    pub location: Option<Coordinate>,
    pub locale: Option<String>,
    pub delay_names: Vec<String>,
    pub maps: Vec<MapDto>,
    pub views: Vec<String>,
    pub lines: usize,
    pub stations: usize,
    pub segments: usize,
    pub transfers: usize,
}

impl ModelDto {
    pub fn from(model: &Model) -> Self {
        Self {
            name: model.system_name.to_string(),
            city: model.city().to_string(),
            country: model.country().to_string(),
            location: model.location,
            locale: model.locale().map(|locale| locale.code().to_string()),
            delay_names: model
                .delay_names
                .iter()
                .map(|id| model.text(*id).to_string())
                .collect(),
            maps: model
                .maps
                .iter()
                .map(|map| MapDto {
                    id: map.id,
                    name: map.system_name.to_string(),
                    transport_type: map.transport_type.as_str().to_string(),
                })
                .collect(),
            views: model.view_names.iter().map(|name| name.to_string()).collect(),
            lines: model.lines.len(),
            stations: model.stations.len(),
            segments: model.segments.len(),
            transfers: model.transfers.len(),
        }
    }
}
