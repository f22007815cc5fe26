mod common;

use common::{ArchiveBuilder, station_id};
use transitmap::{
    model::Model,
    route::{Error, RouteOptions, RouteParameters},
};

const CITY: &str = "[Options]\nCityName=Testville\nCountry=Nowhere\nDelayNames=Day\n";

/// A -> B (5), B -> C (5) and the direct branch A -> C (20).
fn triangle() -> Model {
    ArchiveBuilder::new()
        .text("city.cty", CITY)
        .text(
            "metro.trp",
            "[Line 1]\nName=L1\nStations=A,(C),B,C\nDriving=(20),5,5\n",
        )
        .import()
}

/// Two networks joined by transfers X <-> Y (7) and P <-> Q (0).
fn two_networks() -> Model {
    ArchiveBuilder::new()
        .text("city.cty", CITY)
        .text(
            "m1.trp",
            "[Line 1]\nName=L1\nStations=X,P\nDriving=1\n\n[Transfers]\n1=L1,X,L2,Y,7\n2=L1,P,L2,Q,0\n",
        )
        .text(
            "m2.trp",
            "[Line 1]\nName=L2\nStations=Y,Q\nDriving=1\nDelays=2\n",
        )
        .import()
}

#[test]
fn shortest_path_prefers_cheaper_detour_test() {
    let model = triangle();
    let a = station_id(&model, "L1", "A");
    let b = station_id(&model, "L1", "B");
    let c = station_id(&model, "L1", "C");
    assert_eq!(model.segment_between(a, c).unwrap().delay, Some(20));

    let route = model
        .find_route(&RouteParameters::new(a, c, model.all_transports()))
        .unwrap()
        .unwrap();
    assert_eq!(route.stations, vec![a, b, c]);
    assert_eq!(route.length, 10);
    assert_eq!(route.delays, vec![0, 5, 10]);
    assert_eq!(
        route.segments,
        vec![
            model.segment_between(a, b).unwrap().id,
            model.segment_between(b, c).unwrap().id,
        ]
    );
    assert!(route.transfers.is_empty());
}

#[test]
fn unreachable_destination_test() {
    let model = triangle();
    let a = station_id(&model, "L1", "A");
    let c = station_id(&model, "L1", "C");
    // Segments are directed
    let route = model
        .find_route(&RouteParameters::new(c, a, model.all_transports()))
        .unwrap();
    assert!(route.is_none());
}

#[test]
fn excluded_transport_test() {
    let model = triangle();
    let a = station_id(&model, "L1", "A");
    let c = station_id(&model, "L1", "C");
    let route = model
        .find_route(&RouteParameters::new(a, c, Vec::new()))
        .unwrap();
    assert!(route.is_none());
}

#[test]
fn transfer_is_bidirectional_test() {
    let model = two_networks();
    let x = station_id(&model, "L1", "X");
    let y = station_id(&model, "L2", "Y");
    let transports = vec![0, 1];

    let route = model
        .find_route(&RouteParameters::new(x, y, transports.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(route.stations, vec![x, y]);
    assert_eq!(route.length, 7);
    assert_eq!(route.transfers, vec![0]);
    assert!(route.segments.is_empty());

    let back = model
        .find_route(&RouteParameters::new(y, x, transports))
        .unwrap()
        .unwrap();
    assert_eq!(back.length, 7);
    assert_eq!(back.transfers, vec![0]);
}

#[test]
fn transfer_needs_both_transports_test() {
    let model = two_networks();
    let x = station_id(&model, "L1", "X");
    let y = station_id(&model, "L2", "Y");
    for transports in [vec![0], vec![1]] {
        let route = model
            .find_route(&RouteParameters::new(x, y, transports))
            .unwrap();
        assert!(route.is_none());
    }
}

#[test]
fn zero_delay_transfer_is_not_an_edge_test() {
    let model = two_networks();
    let p = station_id(&model, "L1", "P");
    let q = station_id(&model, "L2", "Q");
    assert_eq!(model.transfer_between(p, q).unwrap().delay, Some(0));

    // P has no outgoing edge once the zero delay transfer is skipped
    let route = model
        .find_route(&RouteParameters::new(p, q, vec![0, 1]))
        .unwrap();
    assert!(route.is_none());
}

#[test]
fn delay_profile_adds_wait_test() {
    let model = two_networks();
    let x = station_id(&model, "L1", "X");
    let y = station_id(&model, "L2", "Y");
    let q = station_id(&model, "L2", "Q");

    let parameters = RouteParameters::new(x, q, vec![0, 1]).with_delay_profile(0);
    let route = model.find_route(&parameters).unwrap().unwrap();
    assert_eq!(route.stations, vec![x, y, q]);
    assert_eq!(route.length, 7 + 2 + 1);

    // A profile missing from the delay table adds nothing
    let parameters = RouteParameters::new(x, q, vec![0, 1]).with_delay_profile(3);
    assert_eq!(model.find_route(&parameters).unwrap().unwrap().length, 8);
}

#[test]
fn route_options_share_one_search_test() {
    let model = triangle();
    let a = station_id(&model, "L1", "A");
    let c = station_id(&model, "L1", "C");
    let base = RouteParameters::new(a, c, model.all_transports());
    let shortest = model.find_route(&base).unwrap();
    for options in [RouteOptions::Simplest, RouteOptions::All] {
        let route = model
            .find_route(&base.clone().with_options(options))
            .unwrap();
        assert_eq!(route, shortest);
    }
}

#[test]
fn same_station_route_test() {
    let model = triangle();
    let a = station_id(&model, "L1", "A");
    let route = model
        .find_route(&RouteParameters::new(a, a, model.all_transports()))
        .unwrap()
        .unwrap();
    assert_eq!(route.stations, vec![a]);
    assert_eq!(route.length, 0);
    assert!(route.segments.is_empty());
}

#[test]
fn invalid_station_test() {
    let model = triangle();
    let result = model.find_route(&RouteParameters::new(0, 99, model.all_transports()));
    assert_eq!(result, Err(Error::InvalidStationId(99)));
}

#[test]
fn create_routes_test() {
    let model = two_networks();
    let x = station_id(&model, "L1", "X");
    let y = station_id(&model, "L2", "Y");
    let builder = model.route_builder();

    let container = builder
        .create_routes(RouteParameters::new(x, y, vec![0, 1]))
        .unwrap();
    assert!(container.has_routes());
    assert_eq!(container.default_route().unwrap().length, 7);
    assert_eq!(container.parameters.from, x);

    let container = builder
        .create_routes(RouteParameters::new(x, y, vec![0]))
        .unwrap();
    assert!(!container.has_routes());
}
