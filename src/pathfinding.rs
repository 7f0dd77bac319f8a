//! Dijkstra's shortest paths and Prim's minimum spanning forest
//!
//! Both algorithms keep their frontier in an [`IndexedMinHeap`] keyed by vertex
//! number, so improving a tentative distance (or a tentative attachment weight)
//! is a `decrease_priority` on a vertex that is already queued instead of a
//! duplicate insertion. The heap never holds more than one entry per vertex and
//! its capacity is exactly the vertex count.
//!
//! # Example
//!
//! ```rust
//! use indexed_min_heap::pathfinding::{dijkstra, Graph};
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 4).unwrap();
//! graph.add_edge(0, 2, 1).unwrap();
//! graph.add_edge(2, 1, 2).unwrap();
//! graph.add_edge(1, 3, 5).unwrap();
//!
//! let paths = dijkstra(&graph, 0).unwrap();
//! assert_eq!(paths.distance(3), Some(8));
//! assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
//! ```

use crate::error::GraphError;
use crate::indexed::{HeapNode, IndexedMinHeap, Priority};

/// A weighted edge in an adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: usize,
    pub weight: Priority,
}

/// A directed graph over the vertices `0..vertex_count`
///
/// Undirected graphs are built with [`Graph::add_undirected_edge`], which
/// records the edge in both adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Returns the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Adds a directed edge `from -> to`
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Priority) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.adjacency[from].push(Edge { to, weight });
        Ok(())
    }

    /// Adds the edge in both directions
    pub fn add_undirected_edge(
        &mut self,
        a: usize,
        b: usize,
        weight: Priority,
    ) -> Result<(), GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.adjacency[a].push(Edge { to: b, weight });
        if a != b {
            self.adjacency[b].push(Edge { to: a, weight });
        }
        Ok(())
    }

    /// Returns the outgoing edges of `vertex` (empty if out of range)
    pub fn edges_from(&self, vertex: usize) -> &[Edge] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn check_non_negative(&self) -> Result<(), GraphError> {
        for (from, edges) in self.adjacency.iter().enumerate() {
            if let Some(edge) = edges.iter().find(|edge| edge.weight < 0) {
                return Err(GraphError::NegativeWeight {
                    from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Shortest paths
// ============================================================================

/// Result of a single-source shortest path search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: usize,
    distance: Vec<Option<Priority>>,
    predecessor: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Returns the source vertex of the search
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the length of the shortest path to `vertex`, or `None` if it
    /// was not reached
    pub fn distance(&self, vertex: usize) -> Option<Priority> {
        self.distance.get(vertex).copied().flatten()
    }

    /// Returns the vertex preceding `vertex` on its shortest path
    pub fn predecessor(&self, vertex: usize) -> Option<usize> {
        self.predecessor.get(vertex).copied().flatten()
    }

    /// Returns true if `vertex` was reached from the source
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// Returns the vertices on the shortest path from the source to `vertex`,
    /// both ends included
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;

        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }

        path.reverse();
        Some(path)
    }
}

/// Stop conditions for the shared search loop
#[derive(Debug, Clone, Copy, Default)]
struct SearchLimits {
    goal: Option<usize>,
    max_cost: Option<Priority>,
}

/// Runs Dijkstra's algorithm from `source` over the whole graph
///
/// # Errors
/// - [`GraphError::VertexOutOfRange`] if `source` is not a vertex
/// - [`GraphError::NegativeWeight`] if any edge weight is negative
/// - [`GraphError::Overflow`] if a path length does not fit in [`Priority`]
pub fn dijkstra(graph: &Graph, source: usize) -> Result<ShortestPaths, GraphError> {
    search(graph, source, SearchLimits::default())
}

/// Finds a shortest path from `source` to `target`, stopping as soon as the
/// target is settled
///
/// Returns `Ok(None)` if `target` is unreachable.
pub fn shortest_path(
    graph: &Graph,
    source: usize,
    target: usize,
) -> Result<Option<(Vec<usize>, Priority)>, GraphError> {
    graph.check_vertex(target)?;
    let limits = SearchLimits {
        goal: Some(target),
        ..SearchLimits::default()
    };
    let paths = search(graph, source, limits)?;
    Ok(paths.path_to(target).zip(paths.distance(target)))
}

/// Returns every vertex whose shortest distance from `source` is at most
/// `max_cost`, in order of increasing distance
pub fn reachable_within(
    graph: &Graph,
    source: usize,
    max_cost: Priority,
) -> Result<Vec<(usize, Priority)>, GraphError> {
    let limits = SearchLimits {
        max_cost: Some(max_cost),
        ..SearchLimits::default()
    };
    let paths = search(graph, source, limits)?;

    let mut reached: Vec<(usize, Priority)> = (0..graph.vertex_count())
        .filter_map(|v| paths.distance(v).map(|d| (v, d)))
        .collect();
    reached.sort_by_key(|&(v, d)| (d, v));
    Ok(reached)
}

fn search(graph: &Graph, source: usize, limits: SearchLimits) -> Result<ShortestPaths, GraphError> {
    graph.check_vertex(source)?;
    graph.check_non_negative()?;

    let n = graph.vertex_count();
    let mut distance: Vec<Option<Priority>> = vec![None; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];

    let mut heap = IndexedMinHeap::new(n);
    heap.insert(0, source)?;
    distance[source] = Some(0);

    while let Some(HeapNode { priority: dist, id: u }) = heap.extract_min() {
        if limits.max_cost.is_some_and(|max| dist > max) {
            distance[u] = None;
            break;
        }
        settled[u] = true;
        if limits.goal == Some(u) {
            break;
        }

        for edge in graph.edges_from(u) {
            let v = edge.to;
            if settled[v] {
                continue;
            }

            let tentative = dist
                .checked_add(edge.weight)
                .ok_or(GraphError::Overflow { vertex: v })?;
            if limits.max_cost.is_some_and(|max| tentative > max) {
                continue;
            }

            match distance[v] {
                Some(current) if current <= tentative => continue,
                Some(_) => heap.decrease_priority(v, tentative)?,
                None => heap.insert(tentative, v)?,
            }
            distance[v] = Some(tentative);
            predecessor[v] = Some(u);
        }
    }

    // With an early stop, vertices still queued only have tentative distances.
    if limits.goal.is_some() {
        for v in 0..n {
            if !settled[v] {
                distance[v] = None;
                predecessor[v] = None;
            }
        }
    }

    Ok(ShortestPaths {
        source,
        distance,
        predecessor,
    })
}

// ============================================================================
// Minimum spanning forest
// ============================================================================

/// An edge chosen for the spanning forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub from: usize,
    pub to: usize,
    pub weight: Priority,
}

/// A minimum spanning forest: one tree per connected component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest {
    edges: Vec<TreeEdge>,
    total_weight: Priority,
    tree_count: usize,
}

impl SpanningForest {
    /// Returns the chosen edges in the order they were added
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Returns the sum of the chosen edge weights
    pub fn total_weight(&self) -> Priority {
        self.total_weight
    }

    /// Returns the number of trees (connected components)
    pub fn tree_count(&self) -> usize {
        self.tree_count
    }
}

/// Computes a minimum spanning forest with Prim's algorithm
///
/// The graph is read as undirected, so its adjacency lists should be
/// symmetric (see [`Graph::add_undirected_edge`]). Negative weights are
/// allowed. Each tree is grown from the lowest-numbered vertex not yet
/// covered.
///
/// # Errors
/// [`GraphError::Overflow`] if the total weight does not fit in [`Priority`].
pub fn prim(graph: &Graph) -> Result<SpanningForest, GraphError> {
    let n = graph.vertex_count();
    let mut heap = IndexedMinHeap::new(n);
    let mut in_tree = vec![false; n];
    // Cheapest known edge attaching each queued vertex to the tree
    let mut attach: Vec<Option<usize>> = vec![None; n];

    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    let mut total_weight: Priority = 0;
    let mut tree_count = 0;

    for root in 0..n {
        if in_tree[root] {
            continue;
        }
        tree_count += 1;
        heap.insert(0, root)?;

        while let Some(HeapNode { priority: weight, id: u }) = heap.extract_min() {
            in_tree[u] = true;
            if let Some(from) = attach[u] {
                edges.push(TreeEdge { from, to: u, weight });
                total_weight = total_weight
                    .checked_add(weight)
                    .ok_or(GraphError::Overflow { vertex: u })?;
            }

            for edge in graph.edges_from(u) {
                let v = edge.to;
                if in_tree[v] {
                    continue;
                }
                match heap.priority_of(v) {
                    Some(key) if key <= edge.weight => continue,
                    Some(_) => heap.decrease_priority(v, edge.weight)?,
                    None => heap.insert(edge.weight, v)?,
                }
                attach[v] = Some(u);
            }
        }
    }

    Ok(SpanningForest {
        edges,
        total_weight,
        tree_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // 0 -> 1 (1), 0 -> 2 (4), 1 -> 2 (2), 1 -> 3 (6), 2 -> 3 (3)
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(0, 2, 4).unwrap();
        graph.add_edge(1, 2, 2).unwrap();
        graph.add_edge(1, 3, 6).unwrap();
        graph.add_edge(2, 3, 3).unwrap();
        graph
    }

    #[test]
    fn test_dijkstra_uses_decrease_key() {
        let paths = dijkstra(&diamond(), 0).unwrap();
        assert_eq!(paths.source(), 0);
        assert_eq!(paths.distance(0), Some(0));
        assert_eq!(paths.distance(1), Some(1));
        // Reached first via 0 -> 2 (4), then improved via 1 -> 2 (3)
        assert_eq!(paths.distance(2), Some(3));
        assert_eq!(paths.distance(3), Some(6));
        assert_eq!(paths.path_to(3), Some(vec![0, 1, 2, 3]));
        assert_eq!(paths.predecessor(0), None);
    }

    #[test]
    fn test_dijkstra_unreachable() {
        let mut graph = diamond();
        graph.add_edge(3, 0, 1).unwrap();
        let paths = dijkstra(&graph, 3).unwrap();
        assert_eq!(paths.distance(1), Some(2));

        let graph = Graph::new(3);
        let paths = dijkstra(&graph, 1).unwrap();
        assert_eq!(paths.path_to(1), Some(vec![1]));
        assert!(!paths.is_reachable(0));
        assert_eq!(paths.path_to(2), None);
    }

    #[test]
    fn test_dijkstra_rejects_bad_input() {
        let graph = diamond();
        assert_eq!(
            dijkstra(&graph, 9),
            Err(GraphError::VertexOutOfRange {
                vertex: 9,
                vertex_count: 4
            })
        );

        let mut graph = diamond();
        graph.add_edge(3, 1, -2).unwrap();
        assert_eq!(
            dijkstra(&graph, 0),
            Err(GraphError::NegativeWeight {
                from: 3,
                to: 1,
                weight: -2
            })
        );
    }

    #[test]
    fn test_dijkstra_overflow() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, Priority::MAX).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        assert_eq!(dijkstra(&graph, 0), Err(GraphError::Overflow { vertex: 2 }));
    }

    #[test]
    fn test_shortest_path_early_exit() {
        let graph = diamond();
        assert_eq!(
            shortest_path(&graph, 0, 2).unwrap(),
            Some((vec![0, 1, 2], 3))
        );
        assert_eq!(shortest_path(&graph, 3, 0).unwrap(), None);
        assert!(shortest_path(&graph, 0, 4).is_err());
    }

    #[test]
    fn test_reachable_within() {
        let graph = diamond();
        assert_eq!(
            reachable_within(&graph, 0, 3).unwrap(),
            vec![(0, 0), (1, 1), (2, 3)]
        );
        assert_eq!(reachable_within(&graph, 0, 0).unwrap(), vec![(0, 0)]);
    }

    #[test]
    fn test_reachable_within_negative_budget() {
        let mut graph = Graph::new(2);
        graph.add_edge(0, 1, 1).unwrap();
        assert_eq!(reachable_within(&graph, 0, -1).unwrap(), Vec::new());
        assert!(reachable_within(&graph, 2, -1).is_err());
    }

    #[test]
    fn test_add_edge_bounds() {
        let mut graph = Graph::new(2);
        assert!(graph.add_edge(0, 2, 1).is_err());
        assert!(graph.add_undirected_edge(2, 0, 1).is_err());
        assert_eq!(graph.edge_count(), 0);

        graph.add_undirected_edge(0, 1, 5).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_from(1), &[Edge { to: 0, weight: 5 }]);
        assert!(graph.edges_from(7).is_empty());
    }

    #[test]
    fn test_prim_single_tree() {
        let mut graph = Graph::new(5);
        graph.add_undirected_edge(0, 1, 2).unwrap();
        graph.add_undirected_edge(0, 3, 6).unwrap();
        graph.add_undirected_edge(1, 2, 3).unwrap();
        graph.add_undirected_edge(1, 3, 8).unwrap();
        graph.add_undirected_edge(1, 4, 5).unwrap();
        graph.add_undirected_edge(2, 4, 7).unwrap();
        graph.add_undirected_edge(3, 4, 9).unwrap();

        let forest = prim(&graph).unwrap();
        assert_eq!(forest.tree_count(), 1);
        assert_eq!(forest.edges().len(), 4);
        assert_eq!(forest.total_weight(), 16);
    }

    #[test]
    fn test_prim_forest_and_negative_weights() {
        let mut graph = Graph::new(6);
        graph.add_undirected_edge(0, 1, -3).unwrap();
        graph.add_undirected_edge(1, 2, 4).unwrap();
        graph.add_undirected_edge(0, 2, 1).unwrap();
        graph.add_undirected_edge(3, 4, 10).unwrap();
        // vertex 5 is isolated

        let forest = prim(&graph).unwrap();
        assert_eq!(forest.tree_count(), 3);
        assert_eq!(forest.total_weight(), -3 + 1 + 10);
        assert_eq!(
            forest.edges(),
            &[
                TreeEdge {
                    from: 0,
                    to: 1,
                    weight: -3
                },
                TreeEdge {
                    from: 0,
                    to: 2,
                    weight: 1
                },
                TreeEdge {
                    from: 3,
                    to: 4,
                    weight: 10
                },
            ]
        );
    }

    #[test]
    fn test_prim_empty_graph() {
        let forest = prim(&Graph::new(0)).unwrap();
        assert_eq!(forest.tree_count(), 0);
        assert!(forest.edges().is_empty());
        assert_eq!(forest.total_weight(), 0);
    }
}
