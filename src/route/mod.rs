pub mod graph;

use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::{
    model::Model,
    route::graph::{Graph, ShortestPaths},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Station id {0} does not match any entry")]
    InvalidStationId(u32),
}

/// Requested routing mode. Every mode currently yields the single minimum-delay path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RouteOptions {
    #[default]
    Shortest,
    Simplest,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParameters {
    pub from: u32,
    pub to: u32,
    /// Map ids the route may use.
    pub transports: Vec<u32>,
    /// Selects the extra wait added to transfers from each line's delay table.
    pub delay_profile: Option<usize>,
    pub options: RouteOptions,
}

impl RouteParameters {
    pub fn new(from: u32, to: u32, transports: impl Into<Vec<u32>>) -> Self {
        Self {
            from,
            to,
            transports: transports.into(),
            delay_profile: None,
            options: RouteOptions::default(),
        }
    }

    pub fn with_delay_profile(mut self, profile: usize) -> Self {
        self.delay_profile = Some(profile);
        self
    }

    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    fn allows(&self, map_id: u32) -> bool {
        self.transports.contains(&map_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportRoute {
    pub from: u32,
    pub to: u32,
    /// Station ids from source to destination.
    pub stations: Vec<u32>,
    /// Cumulative delay on arrival at each entry of `stations`.
    pub delays: Vec<u64>,
    pub segments: Vec<u32>,
    pub transfers: Vec<u32>,
    pub length: u64,
}

#[derive(Debug, Clone)]
pub struct RouteContainer {
    pub parameters: RouteParameters,
    pub routes: Vec<TransportRoute>,
}

impl RouteContainer {
    pub fn has_routes(&self) -> bool {
        !self.routes.is_empty()
    }

    pub fn default_route(&self) -> Option<&TransportRoute> {
        self.routes.first()
    }
}

/// Plans routes over a frozen model. Holds no state between requests.
pub struct RouteBuilder<'a> {
    model: &'a Model,
}

impl<'a> RouteBuilder<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    pub fn create_routes(&self, parameters: RouteParameters) -> Result<RouteContainer, self::Error> {
        let routes = self.find_route(&parameters)?.into_iter().collect();
        Ok(RouteContainer { parameters, routes })
    }

    /// `Ok(None)` when the destination cannot be reached with the allowed transports.
    pub fn find_route(
        &self,
        parameters: &RouteParameters,
    ) -> Result<Option<TransportRoute>, self::Error> {
        let stations = self.model.stations.len() as u32;
        for id in [parameters.from, parameters.to] {
            if id >= stations {
                return Err(self::Error::InvalidStationId(id));
            }
        }
        let now = Instant::now();
        let graph = self.build_graph(parameters);
        let paths = graph.dijkstra(parameters.from);
        let route = self.reconstruct(parameters, &paths);
        debug!("Route search took {:?}", now.elapsed());
        Ok(route)
    }

    pub fn build_graph(&self, parameters: &RouteParameters) -> Graph {
        let model = self.model;
        let mut graph = Graph::new(model.stations.len());
        for segment in model.segments.iter() {
            if !parameters.allows(segment.map_id) {
                continue;
            }
            if let Some(delay) = segment.delay {
                graph.add_edge(
                    segment.from_station_id,
                    segment.to_station_id,
                    delay as u64,
                );
            }
        }
        for transfer in model.transfers.iter() {
            if !parameters.allows(transfer.from_map_id) || !parameters.allows(transfer.to_map_id) {
                continue;
            }
            let Some(delay) = transfer.delay.filter(|delay| *delay != 0) else {
                continue;
            };
            let wait = parameters
                .delay_profile
                .and_then(|profile| {
                    model
                        .lines
                        .get(transfer.to_line_id as usize)?
                        .delay_for_profile(profile)
                })
                .unwrap_or(0);
            let weight = delay as u64 + wait as u64;
            graph.add_edge(transfer.from_station_id, transfer.to_station_id, weight);
            graph.add_edge(transfer.to_station_id, transfer.from_station_id, weight);
        }
        graph
    }

    fn reconstruct(
        &self,
        parameters: &RouteParameters,
        paths: &ShortestPaths,
    ) -> Option<TransportRoute> {
        let stations = paths.path_to(parameters.to)?;
        let mut route = TransportRoute {
            from: parameters.from,
            to: parameters.to,
            length: paths.distance(parameters.to)?,
            ..Default::default()
        };
        for pair in stations.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if let Some(segment) = self.model.segment_between(from, to) {
                route.segments.push(segment.id);
            } else if let Some(transfer) = self
                .model
                .transfer_between(from, to)
                .or_else(|| self.model.transfer_between(to, from))
            {
                route.transfers.push(transfer.id);
            }
        }
        route.delays = stations
            .iter()
            .map(|station| paths.distance(*station).unwrap_or(0))
            .collect();
        route.stations = stations;
        Some(route)
    }
}

impl Model {
    pub fn route_builder(&self) -> RouteBuilder<'_> {
        RouteBuilder::new(self)
    }

    pub fn find_route(
        &self,
        parameters: &RouteParameters,
    ) -> Result<Option<TransportRoute>, self::Error> {
        self.route_builder().find_route(parameters)
    }

    /// Ids of every map, i.e. a transport filter allowing everything.
    pub fn all_transports(&self) -> Vec<u32> {
        self.maps.iter().map(|map| map.id).collect()
    }
}
