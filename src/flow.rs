use std::collections::VecDeque;

use crate::constants::UNBOUNDED_CAPACITY;

/// Capacity of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Finite(u64),
    /// Never a bottleneck; the solver stores it as [`UNBOUNDED_CAPACITY`].
    Unbounded,
}

impl Capacity {
    fn initial_residual(self) -> u64 {
        match self {
            Capacity::Finite(cap) => cap,
            Capacity::Unbounded => UNBOUNDED_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// Forward edge as seen by callers, with the flow currently routed over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: Capacity,
    pub flow: u64,
}

#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    rev: usize,
    residual: u64,
}

#[derive(Debug, Clone, Copy)]
struct EdgeSlot {
    from: usize,
    index: usize,
    capacity: Capacity,
}

/// Directed capacitated graph stored as residual adjacency lists.
///
/// Every edge added through [`FlowNetwork::add_edge`] gets a paired reverse
/// arc with zero residual capacity.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<Arc>>,
    edges: Vec<EdgeSlot>,
}

/// Outcome of a max-flow run.
#[derive(Debug, Clone)]
pub struct MaxFlow {
    pub value: u64,
    pub augmenting_paths: usize,
    source_side: Vec<bool>,
}

impl MaxFlow {
    /// True when `vertex` is reachable from the source in the final residual
    /// graph, i.e. it lies on the source side of the minimum cut.
    pub fn in_cut(&self, vertex: usize) -> bool {
        self.source_side.get(vertex).copied().unwrap_or(false)
    }
}

impl FlowNetwork {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity) -> EdgeId {
        assert!(
            from < self.vertex_count() && to < self.vertex_count(),
            "edge endpoint outside vertex range"
        );
        let from_index = self.adjacency[from].len();
        let to_index = self.adjacency[to].len() + usize::from(from == to);
        self.adjacency[from].push(Arc {
            to,
            rev: to_index,
            residual: capacity.initial_residual(),
        });
        self.adjacency[to].push(Arc {
            to: from,
            rev: from_index,
            residual: 0,
        });
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeSlot {
            from,
            index: from_index,
            capacity,
        });
        id
    }

    pub fn edge(&self, id: EdgeId) -> Option<FlowEdge> {
        let slot = self.edges.get(id.0)?;
        let arc = &self.adjacency[slot.from][slot.index];
        Some(FlowEdge {
            from: slot.from,
            to: arc.to,
            capacity: slot.capacity,
            flow: slot.capacity.initial_residual() - arc.residual,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, FlowEdge)> + '_ {
        (0..self.edges.len()).filter_map(|idx| self.edge(EdgeId(idx)).map(|e| (EdgeId(idx), e)))
    }

    /// Sum of capacities leaving `vertex`; unbounded edges count as the sentinel.
    pub fn outgoing_capacity(&self, vertex: usize) -> u64 {
        self.edges
            .iter()
            .filter(|slot| slot.from == vertex)
            .map(|slot| slot.capacity.initial_residual())
            .fold(0u64, u64::saturating_add)
    }

    /// Edmonds-Karp: augment along shortest residual paths until the sink is
    /// unreachable. The last search doubles as the min-cut membership test.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> MaxFlow {
        assert!(source != sink, "source and sink must differ");
        assert!(
            source < self.vertex_count() && sink < self.vertex_count(),
            "terminal outside vertex range"
        );

        let mut value = 0u64;
        let mut augmenting_paths = 0usize;

        loop {
            let (reached, parent) = self.bfs(source, sink);
            if !reached[sink] {
                tracing::trace!(value, augmenting_paths, "max flow reached");
                return MaxFlow {
                    value,
                    augmenting_paths,
                    source_side: reached,
                };
            }

            let mut bottleneck = u64::MAX;
            let mut v = sink;
            while let Some((u, idx)) = parent[v] {
                bottleneck = bottleneck.min(self.adjacency[u][idx].residual);
                v = u;
            }

            let mut v = sink;
            while let Some((u, idx)) = parent[v] {
                let rev = self.adjacency[u][idx].rev;
                self.adjacency[u][idx].residual -= bottleneck;
                self.adjacency[v][rev].residual += bottleneck;
                v = u;
            }

            value += bottleneck;
            augmenting_paths += 1;
        }
    }

    /// Breadth-first search over arcs with spare residual capacity.
    ///
    /// Returns the reachable set and, per vertex, the (vertex, arc index)
    /// it was discovered through. Stops early once the sink is found.
    fn bfs(&self, source: usize, sink: usize) -> (Vec<bool>, Vec<Option<(usize, usize)>>) {
        let n = self.vertex_count();
        let mut reached = vec![false; n];
        let mut parent = vec![None; n];
        let mut queue = VecDeque::new();

        reached[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for (idx, arc) in self.adjacency[u].iter().enumerate() {
                if arc.residual == 0 || reached[arc.to] {
                    continue;
                }
                reached[arc.to] = true;
                parent[arc.to] = Some((u, idx));
                if arc.to == sink {
                    return (reached, parent);
                }
                queue.push_back(arc.to);
            }
        }

        (reached, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook_network() -> FlowNetwork {
        let mut network = FlowNetwork::new(6);
        network.add_edge(0, 1, Capacity::Finite(16));
        network.add_edge(0, 2, Capacity::Finite(13));
        network.add_edge(2, 1, Capacity::Finite(4));
        network.add_edge(1, 3, Capacity::Finite(12));
        network.add_edge(3, 2, Capacity::Finite(9));
        network.add_edge(2, 4, Capacity::Finite(14));
        network.add_edge(4, 3, Capacity::Finite(7));
        network.add_edge(3, 5, Capacity::Finite(20));
        network.add_edge(4, 5, Capacity::Finite(4));
        network
    }

    #[test]
    fn test_textbook_max_flow() {
        let mut network = textbook_network();
        let result = network.max_flow(0, 5);
        assert_eq!(result.value, 23);
        assert!(result.augmenting_paths > 0);
    }

    #[test]
    fn test_textbook_min_cut() {
        let mut network = textbook_network();
        let result = network.max_flow(0, 5);

        for vertex in [0, 1, 2, 4] {
            assert!(result.in_cut(vertex), "vertex {} should be on source side", vertex);
        }
        for vertex in [3, 5] {
            assert!(!result.in_cut(vertex), "vertex {} should be on sink side", vertex);
        }
        assert!(!result.in_cut(99));
    }

    #[test]
    fn test_flow_conservation() {
        let mut network = textbook_network();
        let result = network.max_flow(0, 5);

        let mut balance = vec![0i64; network.vertex_count()];
        for (_, edge) in network.edges() {
            if let Capacity::Finite(cap) = edge.capacity {
                assert!(edge.flow <= cap);
            }
            balance[edge.from] -= edge.flow as i64;
            balance[edge.to] += edge.flow as i64;
        }

        assert_eq!(balance[0], -(result.value as i64));
        assert_eq!(balance[5], result.value as i64);
        for vertex in 1..5 {
            assert_eq!(balance[vertex], 0, "vertex {} not conserved", vertex);
        }
    }

    #[test]
    fn test_unbounded_edges_never_saturate() {
        let mut network = FlowNetwork::new(4);
        network.add_edge(0, 1, Capacity::Finite(5));
        let middle = network.add_edge(1, 2, Capacity::Unbounded);
        network.add_edge(2, 3, Capacity::Finite(7));

        let result = network.max_flow(0, 3);
        assert_eq!(result.value, 5);

        let edge = network.edge(middle).unwrap();
        assert_eq!(edge.capacity, Capacity::Unbounded);
        assert_eq!(edge.flow, 5);
        // The source edge is the bottleneck, so the cut sits right after the source.
        assert!(result.in_cut(0));
        assert!(!result.in_cut(1));
    }

    #[test]
    fn test_disconnected_sink() {
        let mut network = FlowNetwork::new(3);
        network.add_edge(0, 1, Capacity::Finite(3));

        let result = network.max_flow(0, 2);
        assert_eq!(result.value, 0);
        assert_eq!(result.augmenting_paths, 0);
        assert!(result.in_cut(1));
        assert!(!result.in_cut(2));
    }

    #[test]
    fn test_zero_capacity_edges_carry_nothing() {
        let mut network = FlowNetwork::new(2);
        let edge = network.add_edge(0, 1, Capacity::Finite(0));

        let result = network.max_flow(0, 1);
        assert_eq!(result.value, 0);
        assert_eq!(network.edge(edge).unwrap().flow, 0);
    }

    #[test]
    fn test_outgoing_capacity() {
        let network = textbook_network();
        assert_eq!(network.outgoing_capacity(0), 29);
        assert_eq!(network.outgoing_capacity(5), 0);
        assert_eq!(network.edge_count(), 9);
        assert!(network.edge(EdgeId(9)).is_none());
    }

    #[test]
    #[should_panic(expected = "edge endpoint outside vertex range")]
    fn test_add_edge_out_of_range() {
        let mut network = FlowNetwork::new(2);
        network.add_edge(0, 2, Capacity::Finite(1));
    }
}
