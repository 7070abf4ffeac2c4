//! Immutable weighted undirected graph. Every transformation returns a new
//! graph, so sibling branches of the search can never observe each other's
//! changes.

use rustc_hash::{FxHashMap, FxHashSet};

/// A weighted undirected graph over `u32` vertex identifiers.
///
/// Value semantics: `remove_vertices` builds a fresh graph and leaves the
/// receiver untouched. Self-loops, duplicate edges and edges referencing
/// unknown vertices are dropped silently at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    adj: FxHashMap<u32, FxHashSet<u32>>,
    weights: FxHashMap<u32, f64>,
    num_edges: usize,
}

impl Graph {
    pub fn new(
        vertices: impl IntoIterator<Item = (u32, f64)>,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Self {
        let mut adj: FxHashMap<u32, FxHashSet<u32>> = FxHashMap::default();
        let mut weights = FxHashMap::default();
        for (v, w) in vertices {
            weights.insert(v, w);
            adj.entry(v).or_default();
        }
        let mut num_edges = 0;
        for (u, v) in edges {
            if u == v || !weights.contains_key(&u) || !weights.contains_key(&v) {
                continue;
            }
            if adj.entry(u).or_default().insert(v) {
                num_edges += 1;
            }
            adj.entry(v).or_default().insert(u);
        }
        Graph {
            adj,
            weights,
            num_edges,
        }
    }

    /// Returns an iterator over all vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.adj.keys().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn has_edges(&self) -> bool {
        self.num_edges > 0
    }

    pub fn contains(&self, v: u32) -> bool {
        self.adj.contains_key(&v)
    }

    /// Returns an iterator over all edges as `(u, v)` pairs with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.adj.iter().flat_map(|(&u, neighbors)| {
            neighbors
                .iter()
                .filter_map(move |&v| if u < v { Some((u, v)) } else { None })
        })
    }

    /// Returns the neighborhood of `v`. Empty for isolated or absent
    /// vertices; never contains `v` itself.
    pub fn neighbors(&self, v: u32) -> FxHashSet<u32> {
        self.adj.get(&v).cloned().unwrap_or_default()
    }

    pub fn degree(&self, v: u32) -> usize {
        self.adj.get(&v).map_or(0, |neighbors| neighbors.len())
    }

    /// Weight of `v`, or `0.0` if `v` is not part of the graph.
    pub fn weight(&self, v: u32) -> f64 {
        self.weights.get(&v).copied().unwrap_or(0.0)
    }

    /// Total weight of the vertices in `set` that are part of the graph.
    pub fn set_weight(&self, set: &FxHashSet<u32>) -> f64 {
        set.iter().map(|&v| self.weight(v)).sum()
    }

    /// Returns a new graph on `V \ removed`, keeping only edges fully
    /// disjoint from `removed` and restricting weights to the survivors.
    /// Identifiers in `removed` that are not in the graph are ignored.
    pub fn remove_vertices(&self, removed: &FxHashSet<u32>) -> Graph {
        let mut adj = FxHashMap::default();
        let mut weights = FxHashMap::default();
        let mut half_edges = 0;
        for (&v, neighbors) in &self.adj {
            if removed.contains(&v) {
                continue;
            }
            let kept: FxHashSet<u32> = neighbors
                .iter()
                .copied()
                .filter(|u| !removed.contains(u))
                .collect();
            half_edges += kept.len();
            adj.insert(v, kept);
            weights.insert(v, self.weights[&v]);
        }
        Graph {
            adj,
            weights,
            num_edges: half_edges / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_vertices(ids: &[u32]) -> Vec<(u32, f64)> {
        ids.iter().map(|&v| (v, 1.0)).collect()
    }

    #[test]
    fn construction_drops_malformed_edges() {
        let graph = Graph::new(
            unit_vertices(&[1, 2, 3]),
            vec![(1, 2), (2, 2), (2, 1), (3, 7), (2, 3)],
        );
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert!(!graph.neighbors(2).contains(&2));
        assert!(graph.neighbors(3).contains(&2));
    }

    #[test]
    fn neighbors_of_isolated_vertex_is_empty() {
        let graph = Graph::new(unit_vertices(&[1, 2, 3]), vec![(1, 2)]);
        assert!(graph.neighbors(3).is_empty());
        assert_eq!(graph.degree(3), 0);
        assert!(graph.neighbors(42).is_empty());
    }

    #[test]
    fn remove_vertices_leaves_receiver_untouched() {
        let graph = Graph::new(unit_vertices(&[1, 2, 3]), vec![(1, 2), (2, 3), (1, 3)]);
        let copy = graph.clone();
        let removed: FxHashSet<u32> = [2].into_iter().collect();
        let reduced = graph.remove_vertices(&removed);
        assert_eq!(graph, copy);
        assert_eq!(reduced.num_vertices(), 2);
        assert_eq!(reduced.num_edges(), 1);
        assert!(!reduced.contains(2));
    }

    #[test]
    fn remove_vertices_is_idempotent() {
        let graph = Graph::new(unit_vertices(&[1, 2, 3, 4]), vec![(1, 2), (2, 3), (3, 4)]);
        let removed: FxHashSet<u32> = [2, 99].into_iter().collect();
        let once = graph.remove_vertices(&removed);
        let twice = once.remove_vertices(&removed);
        assert_eq!(once, twice);
    }

    #[test]
    fn remove_all_vertices_gives_empty_graph() {
        let graph = Graph::new(unit_vertices(&[1, 2]), vec![(1, 2)]);
        let removed: FxHashSet<u32> = [1, 2].into_iter().collect();
        let empty = graph.remove_vertices(&removed);
        assert_eq!(empty.num_vertices(), 0);
        assert!(!empty.has_edges());
    }

    #[test]
    fn set_weight_ignores_absent_vertices() {
        let graph = Graph::new(vec![(1, 2.5), (2, 4.0)], vec![(1, 2)]);
        let set: FxHashSet<u32> = [1, 2, 9].into_iter().collect();
        assert_eq!(graph.set_weight(&set), 6.5);
    }
}
