use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: u32,
    pub weight: u64,
}

/// Directed weighted adjacency list over dense node ids.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new(nodes: usize) -> Self {
        Self {
            edges: vec![Vec::new(); nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges pointing outside of the node range are ignored.
    pub fn add_edge(&mut self, from: u32, to: u32, weight: u64) {
        if (to as usize) >= self.edges.len() {
            return;
        }
        if let Some(edges) = self.edges.get_mut(from as usize) {
            edges.push(Edge { to, weight });
        }
    }

    pub fn edges(&self, node: u32) -> &[Edge] {
        self.edges
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn dijkstra(&self, source: u32) -> ShortestPaths {
        let mut paths = ShortestPaths {
            distances: vec![ShortestPaths::UNREACHED; self.edges.len()],
            predecessors: vec![None; self.edges.len()],
        };
        if (source as usize) >= self.edges.len() {
            return paths;
        }
        let mut heap = BinaryHeap::new();
        paths.distances[source as usize] = 0;
        heap.push(Candidate {
            node: source,
            cost: 0,
        });

        while let Some(Candidate { node, cost }) = heap.pop() {
            // Stale entry, a shorter path was settled already
            if cost > paths.distances[node as usize] {
                continue;
            }
            for edge in self.edges(node) {
                let next = cost.saturating_add(edge.weight);
                if next < paths.distances[edge.to as usize] {
                    paths.distances[edge.to as usize] = next;
                    paths.predecessors[edge.to as usize] = Some(node);
                    heap.push(Candidate {
                        node: edge.to,
                        cost: next,
                    });
                }
            }
        }
        paths
    }
}

/// Result of a single-source search.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub distances: Vec<u64>,
    pub predecessors: Vec<Option<u32>>,
}

impl ShortestPaths {
    pub const UNREACHED: u64 = u64::MAX;

    pub fn distance(&self, node: u32) -> Option<u64> {
        self.distances
            .get(node as usize)
            .copied()
            .filter(|distance| *distance != Self::UNREACHED)
    }

    /// Nodes from the source to `target`, or `None` when `target` was never reached.
    pub fn path_to(&self, target: u32) -> Option<Vec<u32>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut current = target;
        while let Some(previous) = self.predecessors[current as usize] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: u32,
    cost: u64,
}

impl Eq for Candidate {}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[test]
fn dijkstra_prefers_cheaper_detour_test() {
    let mut graph = Graph::new(3);
    graph.add_edge(0, 1, 5);
    graph.add_edge(1, 2, 5);
    graph.add_edge(0, 2, 20);
    let paths = graph.dijkstra(0);
    assert_eq!(paths.distance(2), Some(10));
    assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
}

#[test]
fn dijkstra_unreachable_test() {
    let mut graph = Graph::new(3);
    graph.add_edge(1, 0, 1);
    let paths = graph.dijkstra(0);
    assert_eq!(paths.distance(1), None);
    assert_eq!(paths.path_to(2), None);
    assert_eq!(paths.path_to(0), Some(vec![0]));
}

#[test]
fn add_edge_out_of_range_test() {
    let mut graph = Graph::new(2);
    graph.add_edge(0, 5, 1);
    graph.add_edge(5, 0, 1);
    assert!(graph.edges(0).is_empty());
    assert!(graph.edges(5).is_empty());
}
