use serde::{Deserialize, Serialize};
use transitmap::{model::Model, route::TransportRoute};

use crate::dto::StationDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub station: StationDto,
    pub delay: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDto {
    pub length: u64,
    pub stops: Vec<StopDto>,
    pub segments: Vec<u32>,
    pub transfers: Vec<u32>,
}

impl RouteDto {
    pub fn from(route: &TransportRoute, model: &Model) -> Self {
        let stops = route
            .stations
            .iter()
            .zip(&route.delays)
            .filter_map(|(id, delay)| {
                let station = model.stations.get(*id as usize)?;
                Some(StopDto {
                    station: StationDto::from(station, model),
                    delay: *delay,
                })
            })
            .collect();
        Self {
            length: route.length,
            stops,
            segments: route.segments.clone(),
            transfers: route.transfers.clone(),
        }
    }
}
