//! Builds the directed edge set of one line from its `Stations` and `Driving` values.

use std::collections::BTreeMap;

use crate::pmz::{
    delays::DelayListTokenizer,
    stations::{Delimiter, StationListTokenizer},
};

/// Identity of an edge. The delay is deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    pub from: String,
    pub to: String,
}

impl SegmentKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentInfo<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub delay: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DrivingGraph {
    /// Distinct main-sequence station names in order, followed by stations only named in a branch.
    /// View geometry is listed in this order.
    pub stations: Vec<String>,
    segments: BTreeMap<SegmentKey, Option<u32>>,
}

impl DrivingGraph {
    pub fn build(station_list: &str, driving_list: Option<&str>) -> Self {
        let mut graph = Self::default();
        let mut stations = StationListTokenizer::new(station_list);
        let mut delays = DelayListTokenizer::new(driving_list.unwrap_or_default());

        let mut branch_stations = Vec::new();

        let Some(mut anchor) = stations.next() else {
            return graph;
        };
        add_unique(&mut graph.stations, &anchor);

        while stations.has_next() {
            if stations.next_delimiter() == Delimiter::Open {
                graph.read_branch(&anchor, &mut stations, &mut delays, &mut branch_stations);
                continue;
            }

            let Some(current) = stations.next() else {
                break;
            };
            let (forward, reverse) = if delays.begin_bracket() {
                let pair = delays.next_bracket();
                let forward = pair.first().copied().flatten();
                (forward, Some(pair.get(1).copied().flatten()))
            } else {
                (delays.next(), None)
            };
            if current.is_empty() {
                continue;
            }
            add_unique(&mut graph.stations, &current);
            graph.insert_mirrored(SegmentKey::new(&anchor, &current), forward);
            if let Some(reverse) = reverse {
                graph.insert_mirrored(SegmentKey::new(&current, &anchor), reverse);
            }
            anchor = current;
        }
        for name in branch_stations {
            add_unique(&mut graph.stations, &name);
        }
        graph
    }

    /// Reads one branch group. Every branch station is linked to the anchor in one direction,
    /// towards the branch unless the name carries a leading `-`. An empty group adds nothing.
    fn read_branch(
        &mut self,
        anchor: &str,
        stations: &mut StationListTokenizer<'_>,
        delays: &mut DelayListTokenizer<'_>,
        branch_stations: &mut Vec<String>,
    ) {
        let bracket = delays.next_bracket();
        if !stations.enter_group() {
            return;
        }
        let mut index = 0;
        while let Some(token) = stations.next() {
            let (name, towards_branch) = match token.strip_prefix('-') {
                Some(name) => (name.trim(), false),
                None => (token.as_str(), true),
            };
            if !name.is_empty() {
                let delay = bracket.get(index).copied().flatten();
                let key = if towards_branch {
                    SegmentKey::new(anchor, name)
                } else {
                    SegmentKey::new(name, anchor)
                };
                add_unique(branch_stations, name);
                self.insert(key, delay);
            }
            index += 1;
            if stations.next_delimiter() != Delimiter::Comma {
                break;
            }
        }
    }

    /// Inserts an edge unless its `(from, to)` pair is already present.
    /// Returns false when the edge was dropped as a duplicate.
    pub fn insert(&mut self, key: SegmentKey, delay: Option<u32>) -> bool {
        if self.segments.contains_key(&key) {
            return false;
        }
        self.segments.insert(key, delay);
        true
    }

    /// Like `insert`, but an unknown delay is copied from the reverse edge when one exists.
    fn insert_mirrored(&mut self, key: SegmentKey, delay: Option<u32>) -> bool {
        let delay = delay.or_else(|| self.delay(&key.reversed()).flatten());
        self.insert(key, delay)
    }

    /// `None` when the edge does not exist, `Some(None)` when it exists with an unknown delay.
    pub fn delay(&self, key: &SegmentKey) -> Option<Option<u32>> {
        self.segments.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = SegmentInfo<'_>> {
        self.segments.iter().map(|(key, delay)| SegmentInfo {
            from: &key.from,
            to: &key.to,
            delay: *delay,
        })
    }
}

fn add_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|station| station == name) {
        names.push(name.to_string());
    }
}

#[test]
fn linear_line_test() {
    let graph = DrivingGraph::build("A,B,C", Some("2,3"));
    assert_eq!(graph.stations, vec!["A", "B", "C"]);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(2)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "C")), Some(Some(3)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "A")), None);
}

#[test]
fn forward_reverse_pair_test() {
    let graph = DrivingGraph::build("A,B", Some("(4,6)"));
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(4)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "A")), Some(Some(6)));

    let graph = DrivingGraph::build("A,B", Some("(4,)"));
    assert_eq!(graph.delay(&SegmentKey::new("B", "A")), Some(Some(4)));
}

#[test]
fn missing_driving_test() {
    let graph = DrivingGraph::build("A,B", None);
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(None));
}

#[test]
fn empty_station_list_test() {
    let graph = DrivingGraph::build("", Some("1,2"));
    assert!(graph.stations.is_empty());
    assert!(graph.is_empty());
}

#[test]
fn short_bracket_test() {
    let graph = DrivingGraph::build("A,(B,C,D)", Some("(1)"));
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(1)));
    assert_eq!(graph.delay(&SegmentKey::new("A", "C")), Some(None));
    assert_eq!(graph.delay(&SegmentKey::new("A", "D")), Some(None));
}

#[test]
fn branch_stations_follow_main_sequence_test() {
    let graph = DrivingGraph::build("A,B(D),C,D", Some("1,(2),3,4"));
    assert_eq!(graph.stations, vec!["A", "B", "C", "D"]);
    assert_eq!(graph.delay(&SegmentKey::new("B", "D")), Some(Some(2)));
    assert_eq!(graph.delay(&SegmentKey::new("C", "D")), Some(Some(4)));

    let graph = DrivingGraph::build("A,B(X),C", Some("1,(2),3"));
    assert_eq!(graph.stations, vec!["A", "B", "C", "X"]);
}

#[test]
fn empty_group_keeps_main_line_test() {
    let graph = DrivingGraph::build("A,(),B,C", Some("(),1,2"));
    assert_eq!(graph.stations, vec!["A", "B", "C"]);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.delay(&SegmentKey::new("A", "B")), Some(Some(1)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "C")), Some(Some(2)));
}

#[test]
fn consecutive_groups_share_anchor_test() {
    let graph = DrivingGraph::build("A,B,(C),(D),E", Some("1,(2),(3),4"));
    assert_eq!(graph.delay(&SegmentKey::new("B", "C")), Some(Some(2)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "D")), Some(Some(3)));
    assert_eq!(graph.delay(&SegmentKey::new("B", "E")), Some(Some(4)));
    assert_eq!(graph.stations, vec!["A", "B", "E", "C", "D"]);
}
