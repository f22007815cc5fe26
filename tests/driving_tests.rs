use transitmap::pmz::driving::{DrivingGraph, SegmentKey};

fn edges(graph: &DrivingGraph) -> Vec<(String, String, Option<u32>)> {
    graph
        .segments()
        .map(|info| (info.from.to_string(), info.to.to_string(), info.delay))
        .collect()
}

fn edge(from: &str, to: &str, delay: Option<u32>) -> (String, String, Option<u32>) {
    (from.to_string(), to.to_string(), delay)
}

#[test]
fn branch_group_edges_test() {
    let graph = DrivingGraph::build("A,B,(C,-D),E", Some("2,(3,4),5"));
    // Branch-only stations come after the main sequence
    assert_eq!(graph.stations, vec!["A", "B", "E", "C", "D"]);
    assert_eq!(
        edges(&graph),
        vec![
            edge("A", "B", Some(2)),
            edge("B", "C", Some(3)),
            edge("B", "E", Some(5)),
            edge("D", "B", Some(4)),
        ]
    );
}

#[test]
fn attached_branch_group_test() {
    let graph = DrivingGraph::build("A,B(C),D", Some("1,(2),3"));
    assert_eq!(graph.delay(&SegmentKey::new("B", "C")), Some(Some(2)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "D")), Some(Some(3)));
    assert_eq!(graph.len(), 3);
}

#[test]
fn deterministic_build_test() {
    let stations = "A,B,(C,-D),E,\"F (old)\",G";
    let driving = "2,(3,4),5,(6,7),";
    let first = DrivingGraph::build(stations, Some(driving));
    let second = DrivingGraph::build(stations, Some(driving));
    assert_eq!(first, second);
    assert_eq!(edges(&first), edges(&second));
}

#[test]
fn reverse_delay_is_mirrored_test() {
    let graph = DrivingGraph::build("A,B,A", Some("4,"));
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(4)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "A")), Some(Some(4)));
}

#[test]
fn branch_delay_is_never_mirrored_test() {
    let graph = DrivingGraph::build("A,B,(A)", Some("4,()"));
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(4)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "A")), Some(None));
}

#[test]
fn duplicate_edge_keeps_first_delay_test() {
    let graph = DrivingGraph::build("A,B,A,B", Some("1,2,3"));
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(1)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "A")), Some(Some(2)));
    assert_eq!(graph.len(), 2);

    let mut graph = DrivingGraph::default();
    assert!(graph.insert(SegmentKey::new("X", "Y"), Some(5)));
    assert!(!graph.insert(SegmentKey::new("X", "Y"), Some(9)));
    assert_eq!(graph.delay(&SegmentKey::new("X", "Y")), Some(Some(5)));
}

#[test]
fn quoted_station_names_test() {
    let graph = DrivingGraph::build("\"Park, North\",\"Square (1)\"", Some("3"));
    assert_eq!(graph.stations, vec!["Park, North", "Square (1)"]);
    assert_eq!(
        graph.delay(&SegmentKey::new("Park, North", "Square (1)")),
        Some(Some(3))
    );
}
